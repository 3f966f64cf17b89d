//! Account route handlers.
//!
//! Registration, login/logout, and account self-service. Login issues the
//! JWT auth cookie; the update handlers re-issue it so the header greeting
//! stays in sync with the database.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tower_sessions::Session;

use cedar_motors_core::{AccountId, AccountRole};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{FlashLevel, RequireAuth, auth_cookie, clear_auth_cookie, flash};
use crate::models::session::CurrentAccount;
use crate::routes::Shell;
use crate::services::auth::{AuthError, AuthService};
use crate::services::tokens;
use crate::state::AppState;
use crate::validation;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Account info update form data.
#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    pub account_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Password change form data.
#[derive(Debug, Deserialize)]
pub struct UpdatePasswordForm {
    pub account_id: i32,
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/login.html")]
pub struct LoginTemplate {
    pub shell: Shell,
    pub errors: Vec<String>,
    pub email: String,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/register.html")]
pub struct RegisterTemplate {
    pub shell: Shell,
    pub errors: Vec<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Account management page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/management.html")]
pub struct ManagementTemplate {
    pub shell: Shell,
    pub current: CurrentAccount,
}

/// Account update page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/update.html")]
pub struct UpdateTemplate {
    pub shell: Shell,
    pub errors: Vec<String>,
    pub account_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

// =============================================================================
// Login
// =============================================================================

/// Display the login page.
pub async fn login_page(State(state): State<AppState>, session: Session) -> Result<Response> {
    let shell = Shell::load(&state, &session, None).await?;
    Ok(LoginTemplate {
        shell,
        errors: Vec::new(),
        email: String::new(),
    }
    .into_response())
}

/// Handle login form submission.
///
/// On success, issues the JWT auth cookie and redirects to the account
/// management page. On failure, re-renders the form with the submitted
/// email kept sticky.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.email, &form.password).await {
        Ok(account) => {
            let token = tokens::issue(&account, state.jwt_encoding_key())
                .map_err(|e| AppError::Internal(format!("token issue failed: {e}")))?;
            let jar = jar.add(auth_cookie(token, state.config().is_secure()));

            tracing::info!(account_id = %account.id, "Account logged in");
            Ok((jar, Redirect::to("/account/")).into_response())
        }
        Err(
            AuthError::InvalidCredentials
            | AuthError::AccountNotFound
            | AuthError::InvalidEmail(_),
        ) => {
            tracing::warn!("Login failed");
            let shell = Shell::load(&state, &session, None).await?;
            Ok(LoginTemplate {
                shell,
                errors: vec!["Please check your credentials and try again.".to_string()],
                email: form.email,
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Registration
// =============================================================================

/// Display the registration page.
pub async fn register_page(State(state): State<AppState>, session: Session) -> Result<Response> {
    let shell = Shell::load(&state, &session, None).await?;
    Ok(RegisterTemplate {
        shell,
        errors: Vec::new(),
        first_name: String::new(),
        last_name: String::new(),
        email: String::new(),
    }
    .into_response())
}

/// Handle registration form submission.
///
/// New accounts always get the client role. Duplicate emails re-render the
/// form rather than leaking through as a server error.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let mut errors = validation::FormErrors::new();
    validation::check_names(&mut errors, &form.first_name, &form.last_name);
    validation::check_email(&mut errors, &form.email);
    validation::check_password_strength(&mut errors, &form.password);

    if let Err(errors) = errors.finish() {
        let shell = Shell::load(&state, &session, None).await?;
        return Ok(RegisterTemplate {
            shell,
            errors,
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
        }
        .into_response());
    }

    let auth = AuthService::new(state.pool());
    match auth
        .register(
            form.first_name.trim(),
            form.last_name.trim(),
            &form.email,
            &form.password,
        )
        .await
    {
        Ok(account) => {
            tracing::info!(account_id = %account.id, "Account registered");
            flash(
                &session,
                FlashLevel::Success,
                format!(
                    "Congratulations, you're registered {}. Please log in.",
                    account.first_name
                ),
            )
            .await;
            Ok(Redirect::to("/account/login").into_response())
        }
        Err(AuthError::AccountAlreadyExists) => {
            let shell = Shell::load(&state, &session, None).await?;
            Ok(RegisterTemplate {
                shell,
                errors: vec![
                    "An account with this email already exists. Please log in or use a different email."
                        .to_string(),
                ],
                first_name: form.first_name,
                last_name: form.last_name,
                email: form.email,
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Account Management
// =============================================================================

/// Display the account management page.
pub async fn management(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(current): RequireAuth,
) -> Result<Response> {
    let shell = Shell::load(&state, &session, Some(current.clone())).await?;
    Ok(ManagementTemplate { shell, current }.into_response())
}

/// Check that `current` may edit `target`: their own account, or any
/// account if they're an admin.
fn may_edit(current: &CurrentAccount, target: AccountId) -> bool {
    current.id == target || current.role == AccountRole::Admin
}

/// Display the account update page.
pub async fn update_page(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(current): RequireAuth,
    Path(account_id): Path<i32>,
) -> Result<Response> {
    let account_id = AccountId::new(account_id);
    if !may_edit(&current, account_id) {
        flash(
            &session,
            FlashLevel::Notice,
            "You may only update your own account.",
        )
        .await;
        return Ok(Redirect::to("/account/").into_response());
    }

    let account = crate::db::accounts::AccountRepository::new(state.pool())
        .get_by_id(account_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("account {account_id}")))?;

    let shell = Shell::load(&state, &session, Some(current)).await?;
    Ok(UpdateTemplate {
        shell,
        errors: Vec::new(),
        account_id: account.id.as_i32(),
        first_name: account.first_name,
        last_name: account.last_name,
        email: account.email.to_string(),
    }
    .into_response())
}

/// Handle the name/email update form.
///
/// When the account updates itself, the auth cookie is re-issued so the
/// JWT claims match the new data.
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(current): RequireAuth,
    jar: CookieJar,
    Form(form): Form<UpdateForm>,
) -> Result<Response> {
    let account_id = AccountId::new(form.account_id);
    if !may_edit(&current, account_id) {
        flash(
            &session,
            FlashLevel::Notice,
            "You may only update your own account.",
        )
        .await;
        return Ok(Redirect::to("/account/").into_response());
    }

    let mut errors = validation::FormErrors::new();
    validation::check_names(&mut errors, &form.first_name, &form.last_name);
    validation::check_email(&mut errors, &form.email);

    let render_form = |shell: Shell, errors: Vec<String>| {
        UpdateTemplate {
            shell,
            errors,
            account_id: form.account_id,
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
        }
        .into_response()
    };

    if let Err(errors) = errors.finish() {
        let shell = Shell::load(&state, &session, Some(current)).await?;
        return Ok(render_form(shell, errors));
    }

    let auth = AuthService::new(state.pool());
    match auth
        .update_account(
            account_id,
            form.first_name.trim(),
            form.last_name.trim(),
            &form.email,
        )
        .await
    {
        Ok(account) => {
            flash(
                &session,
                FlashLevel::Success,
                "Congratulations, your information has been updated.",
            )
            .await;

            // Refresh the cookie when editing our own account
            let jar = if account.id == current.id {
                let token = tokens::issue(&account, state.jwt_encoding_key())
                    .map_err(|e| AppError::Internal(format!("token issue failed: {e}")))?;
                jar.add(auth_cookie(token, state.config().is_secure()))
            } else {
                jar
            };

            Ok((jar, Redirect::to("/account/")).into_response())
        }
        Err(AuthError::AccountAlreadyExists) => {
            let shell = Shell::load(&state, &session, Some(current)).await?;
            Ok(render_form(
                shell,
                vec!["That email is already in use by another account.".to_string()],
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// Handle the password change form.
pub async fn update_password(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(current): RequireAuth,
    Form(form): Form<UpdatePasswordForm>,
) -> Result<Response> {
    let account_id = AccountId::new(form.account_id);
    if !may_edit(&current, account_id) {
        flash(
            &session,
            FlashLevel::Notice,
            "You may only update your own account.",
        )
        .await;
        return Ok(Redirect::to("/account/").into_response());
    }

    let mut errors = validation::FormErrors::new();
    validation::check_password_strength(&mut errors, &form.password);

    if let Err(errors) = errors.finish() {
        let account = crate::db::accounts::AccountRepository::new(state.pool())
            .get_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("account {account_id}")))?;

        let shell = Shell::load(&state, &session, Some(current)).await?;
        return Ok(UpdateTemplate {
            shell,
            errors,
            account_id: account.id.as_i32(),
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email.to_string(),
        }
        .into_response());
    }

    let auth = AuthService::new(state.pool());
    auth.update_password(account_id, &form.password).await?;

    flash(
        &session,
        FlashLevel::Success,
        "Your password has been updated.",
    )
    .await;
    Ok(Redirect::to("/account/").into_response())
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout.
///
/// Clears the auth cookie and destroys the server-side session.
pub async fn logout(session: Session, jar: CookieJar) -> Response {
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    let jar = jar.add(clear_auth_cookie());
    (jar, Redirect::to("/")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cedar_motors_core::Email;

    fn current(id: i32, role: AccountRole) -> CurrentAccount {
        CurrentAccount {
            id: AccountId::new(id),
            first_name: "Pat".to_string(),
            email: Email::parse("pat@example.com").expect("valid email"),
            role,
        }
    }

    #[test]
    fn test_client_may_edit_own_account_only() {
        let client = current(7, AccountRole::Client);
        assert!(may_edit(&client, AccountId::new(7)));
        assert!(!may_edit(&client, AccountId::new(8)));
    }

    #[test]
    fn test_employee_may_not_edit_others() {
        let employee = current(3, AccountRole::Employee);
        assert!(!may_edit(&employee, AccountId::new(4)));
    }

    #[test]
    fn test_admin_may_edit_any_account() {
        let admin = current(1, AccountRole::Admin);
        assert!(may_edit(&admin, AccountId::new(99)));
    }
}
