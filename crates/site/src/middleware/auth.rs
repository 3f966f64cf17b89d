//! Authentication middleware and extractors.
//!
//! Auth state rides in a signed JWT cookie issued at login. The extractors
//! verify the cookie per request; anything missing, tampered, or expired
//! redirects back to the login page.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tower_sessions::Session;

use crate::middleware::flash::{FlashLevel, flash};
use crate::models::session::CurrentAccount;
use crate::services::tokens::{self, AUTH_COOKIE};
use crate::state::AppState;

/// Extractor that requires a logged-in account.
///
/// If the visitor is not logged in (or the token expired), flashes a
/// notice and redirects to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(account): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", account.first_name)
/// }
/// ```
pub struct RequireAuth(pub CurrentAccount);

/// Extractor that requires an Employee or Admin account.
///
/// Used on inventory management routes.
pub struct RequireStaff(pub CurrentAccount);

/// Error returned when authentication is required but missing.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        Redirect::to("/account/login").into_response()
    }
}

/// Read and verify the auth cookie from request parts.
fn current_account(parts: &Parts, state: &AppState) -> Option<CurrentAccount> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar.get(AUTH_COOKIE)?.value().to_owned();
    tokens::verify(&token, state.jwt_decoding_key()).ok()
}

/// Flash a login prompt if the session is available.
async fn flash_login_prompt(parts: &Parts, text: &str) {
    if let Some(session) = parts.extensions.get::<Session>() {
        flash(session, FlashLevel::Notice, text).await;
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match current_account(parts, state) {
            Some(account) => Ok(Self(account)),
            None => {
                flash_login_prompt(parts, "Please log in.").await;
                Err(AuthRejection)
            }
        }
    }
}

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match current_account(parts, state) {
            Some(account) if account.is_staff() => Ok(Self(account)),
            Some(_) => {
                flash_login_prompt(parts, "You are not authorized to manage inventory.").await;
                Err(AuthRejection)
            }
            None => {
                flash_login_prompt(parts, "Please log in.").await;
                Err(AuthRejection)
            }
        }
    }
}

/// Extractor that optionally gets the current account.
///
/// Unlike `RequireAuth`, this does not reject the request if the visitor
/// is not logged in. Used to render the account header on public pages.
pub struct OptionalAuth(pub Option<CurrentAccount>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(current_account(parts, state)))
    }
}

/// Build the auth cookie carrying a freshly issued token.
///
/// The cookie itself has session lifetime; expiry is enforced by the
/// token's `exp` claim.
#[must_use]
pub fn auth_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Build a removal cookie that clears the auth cookie (logout).
#[must_use]
pub fn clear_auth_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, ""))
        .path("/")
        .http_only(true)
        .removal()
        .build()
}
