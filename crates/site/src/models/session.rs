//! Session-related types.
//!
//! Types stored in the session and the JWT auth cookie.

use serde::{Deserialize, Serialize};

use cedar_motors_core::{AccountId, AccountRole, Email};

/// Identity of the logged-in account.
///
/// Carried in the JWT cookie claims; minimal data needed to render the
/// header and make authorization decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAccount {
    /// Account's database ID.
    pub id: AccountId,
    /// Account's first name (shown in the header greeting).
    pub first_name: String,
    /// Account's email address.
    pub email: Email,
    /// Account's role.
    pub role: AccountRole,
}

impl CurrentAccount {
    /// Whether this account may manage inventory.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}

/// Session keys for server-side session data.
pub mod session_keys {
    /// Key for pending flash messages.
    pub const FLASH: &str = "flash";
}
