//! Account management commands.
//!
//! Role changes aren't exposed in the site UI, so employee and admin
//! accounts are created here.

use std::io::Write;

use tracing::info;

use cedar_motors_core::{AccountRole, Email};
use cedar_motors_site::db::accounts::AccountRepository;
use cedar_motors_site::services::auth;
use cedar_motors_site::validation::{FormErrors, check_password_strength};

/// Create an account with the given role.
///
/// Prompts for the password on stdin so it never lands in shell history.
///
/// # Errors
///
/// Returns an error if the role or email is invalid, the password is too
/// weak, or the account already exists.
pub async fn create(
    email: &str,
    first_name: &str,
    last_name: &str,
    role: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let role: AccountRole = role.parse()?;
    let email = Email::parse(email)?;

    let password = prompt_password()?;
    ensure_strong_password(&password)?;
    let password_hash = auth::hash_password(&password)?;

    let pool = super::connect().await?;
    let account = AccountRepository::new(&pool)
        .create_with_role(first_name, last_name, &email, &password_hash, role)
        .await?;

    info!(account_id = %account.id, role = %account.role, "Account created");
    Ok(())
}

/// Read a password from stdin, confirming it matches.
fn prompt_password() -> Result<String, Box<dyn std::error::Error>> {
    let mut stdout = std::io::stdout();

    write!(stdout, "Password: ")?;
    stdout.flush()?;
    let mut password = String::new();
    std::io::stdin().read_line(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']).to_string();

    write!(stdout, "Confirm password: ")?;
    stdout.flush()?;
    let mut confirm = String::new();
    std::io::stdin().read_line(&mut confirm)?;
    let confirm = confirm.trim_end_matches(['\r', '\n']);

    if password != confirm {
        return Err("passwords do not match".into());
    }
    Ok(password)
}

/// Apply the same password rules as the registration form.
fn ensure_strong_password(password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut errors = FormErrors::new();
    check_password_strength(&mut errors, password);
    errors.finish().map_err(|messages| messages.join(" ").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weak_password_rejected() {
        assert!(ensure_strong_password("hunter2").is_err());
        assert!(ensure_strong_password("alllowercasebutlong1!").is_err());
    }

    #[test]
    fn test_strong_password_accepted() {
        assert!(ensure_strong_password("Corr3ct-Horse-Battery").is_ok());
    }
}
