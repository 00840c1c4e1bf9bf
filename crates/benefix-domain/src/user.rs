//! Account roles and their privilege ordering.

use serde::{Deserialize, Serialize};

/// Account permission level.
///
/// Wire format: `u8` (0 = Employee, 1 = Hr, 2 = Admin). Declaration order is
/// privilege order, so guards compare with `>=` against the required level.
/// Never compare role names as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Employee = 0,
    Hr = 1,
    Admin = 2,
}

impl UserRole {
    /// Parse the `u8` wire value; unknown values come back as `None`.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Employee),
            1 => Some(Self::Hr),
            2 => Some(Self::Admin),
            _ => None,
        }
    }

    /// The `u8` wire value of this role.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
