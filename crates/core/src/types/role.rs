//! Account role for authorization decisions.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an [`AccountRole`] from a string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown account role: {0}")]
pub struct RoleParseError(pub String);

/// Role assigned to a dealership account.
///
/// Stored as lowercase text in the database. `Employee` and `Admin` are
/// staff roles with access to inventory management; `Admin` may additionally
/// edit other accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// Regular customer account.
    #[default]
    Client,
    /// Dealership employee.
    Employee,
    /// Administrator.
    Admin,
}

impl AccountRole {
    /// Whether this role grants access to inventory management.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Employee | Self::Admin)
    }

    /// The role name as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Employee => "employee",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "employee" => Ok(Self::Employee),
            "admin" => Ok(Self::Admin),
            other => Err(RoleParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_staff() {
        assert!(!AccountRole::Client.is_staff());
        assert!(AccountRole::Employee.is_staff());
        assert!(AccountRole::Admin.is_staff());
    }

    #[test]
    fn test_display_round_trip() {
        for role in [AccountRole::Client, AccountRole::Employee, AccountRole::Admin] {
            let parsed: AccountRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_from_str_case_insensitive() {
        let role: AccountRole = "Employee".parse().unwrap();
        assert_eq!(role, AccountRole::Employee);
    }

    #[test]
    fn test_from_str_unknown() {
        assert!("manager".parse::<AccountRole>().is_err());
    }

    #[test]
    fn test_default_is_client() {
        assert_eq!(AccountRole::default(), AccountRole::Client);
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&AccountRole::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
    }
}
