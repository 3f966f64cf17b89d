//! JWT auth cookie tokens.
//!
//! Login issues a short-lived HS256 token carried in an HttpOnly cookie;
//! the auth extractors verify it on every request. The token carries just
//! enough identity to render the header and gate staff routes.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use cedar_motors_core::{AccountId, AccountRole, Email};

use crate::models::account::Account;
use crate::models::session::CurrentAccount;

/// Name of the auth cookie.
pub const AUTH_COOKIE: &str = "jwt";

/// Token lifetime in seconds (1 hour).
pub const TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Errors that can occur when issuing or verifying tokens.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token encoding failed: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
    #[error("token invalid or expired")]
    Invalid,
}

/// JWT claims for the auth cookie.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Account ID.
    sub: i32,
    /// First name for the header greeting.
    name: String,
    /// Email address.
    email: Email,
    /// Account role.
    role: AccountRole,
    /// Expiry (seconds since epoch).
    exp: i64,
    /// Issued-at (seconds since epoch).
    iat: i64,
}

/// Issue a signed token for an authenticated account.
///
/// # Errors
///
/// Returns `TokenError::Encode` if signing fails.
pub fn issue(account: &Account, key: &EncodingKey) -> Result<String, TokenError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: account.id.as_i32(),
        name: account.first_name.clone(),
        email: account.email.clone(),
        role: account.role,
        exp: now + TOKEN_TTL_SECONDS,
        iat: now,
    };

    encode(&Header::new(Algorithm::HS256), &claims, key).map_err(TokenError::Encode)
}

/// Verify a token and extract the account identity.
///
/// # Errors
///
/// Returns `TokenError::Invalid` for malformed, mis-signed, or expired
/// tokens.
pub fn verify(token: &str, key: &DecodingKey) -> Result<CurrentAccount, TokenError> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(token, key, &validation).map_err(|_| TokenError::Invalid)?;

    Ok(CurrentAccount {
        id: AccountId::new(data.claims.sub),
        first_name: data.claims.name,
        email: data.claims.email,
        role: data.claims.role,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn test_account() -> Account {
        Account {
            id: AccountId::new(7),
            first_name: "Pat".to_string(),
            last_name: "Jones".to_string(),
            email: Email::parse("pat@example.com").unwrap(),
            role: AccountRole::Employee,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let enc = EncodingKey::from_secret(b"0123456789abcdef0123456789abcdef");
        let dec = DecodingKey::from_secret(b"0123456789abcdef0123456789abcdef");

        let token = issue(&test_account(), &enc).unwrap();
        let current = verify(&token, &dec).unwrap();

        assert_eq!(current.id, AccountId::new(7));
        assert_eq!(current.first_name, "Pat");
        assert_eq!(current.email.as_str(), "pat@example.com");
        assert_eq!(current.role, AccountRole::Employee);
        assert!(current.is_staff());
    }

    #[test]
    fn test_verify_wrong_key() {
        let enc = EncodingKey::from_secret(b"0123456789abcdef0123456789abcdef");
        let dec = DecodingKey::from_secret(b"another-key-entirely-another-key");

        let token = issue(&test_account(), &enc).unwrap();
        assert!(matches!(verify(&token, &dec), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_verify_garbage() {
        let dec = DecodingKey::from_secret(b"0123456789abcdef0123456789abcdef");
        assert!(matches!(
            verify("not.a.token", &dec),
            Err(TokenError::Invalid)
        ));
    }
}
