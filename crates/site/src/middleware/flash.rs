//! One-shot flash messages stored in the session.
//!
//! Redirect flows push a message before redirecting; the next rendered page
//! takes (and thereby clears) all pending messages.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::session_keys;

/// Severity of a flash message, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Notice,
    Error,
}

impl FlashLevel {
    /// CSS class for the message container.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "flash-success",
            Self::Notice => "flash-notice",
            Self::Error => "flash-error",
        }
    }
}

/// A message shown once on the next rendered page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

/// Queue a flash message for the next rendered page.
///
/// Session failures are logged rather than propagated; losing a flash
/// message must not fail the request.
pub async fn flash(session: &Session, level: FlashLevel, text: impl Into<String>) {
    let mut pending: Vec<FlashMessage> = session
        .get(session_keys::FLASH)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();

    pending.push(FlashMessage {
        level,
        text: text.into(),
    });

    if let Err(e) = session.insert(session_keys::FLASH, &pending).await {
        tracing::warn!("Failed to store flash message: {e}");
    }
}

/// Take all pending flash messages, clearing them from the session.
pub async fn take_flash(session: &Session) -> Vec<FlashMessage> {
    match session.remove::<Vec<FlashMessage>>(session_keys::FLASH).await {
        Ok(messages) => messages.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to read flash messages: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_classes() {
        assert_eq!(FlashLevel::Success.css_class(), "flash-success");
        assert_eq!(FlashLevel::Notice.css_class(), "flash-notice");
        assert_eq!(FlashLevel::Error.css_class(), "flash-error");
    }

    #[test]
    fn test_flash_message_serde_round_trip() {
        let msg = FlashMessage {
            level: FlashLevel::Notice,
            text: "Please check your credentials and try again.".to_string(),
        };
        let json = serde_json::to_string(&msg).expect("serialize");
        let back: FlashMessage = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.level, FlashLevel::Notice);
        assert_eq!(back.text, msg.text);
    }
}
