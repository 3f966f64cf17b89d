//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;

use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::Shell;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub shell: Shell,
}

/// Display the home page.
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(account): OptionalAuth,
) -> Result<impl IntoResponse> {
    let shell = Shell::load(&state, &session, account).await?;
    Ok(HomeTemplate { shell })
}
