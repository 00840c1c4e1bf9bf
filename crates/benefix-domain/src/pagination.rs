//! Page selection shared by every list endpoint.

use serde::{Deserialize, Serialize};

/// Sort direction for list endpoints. Newest-first unless a caller asks
/// otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sort {
    #[default]
    Desc,
    Asc,
}

/// Page selection for list queries.
///
/// `per_page` runs 1 to 100 with a default of 25; `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_per_page", rename = "per-page")]
    pub per_page: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_per_page() -> u32 {
    25
}

fn default_page() -> u32 {
    1
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            page: default_page(),
        }
    }
}

impl PageRequest {
    /// Clamp `per_page` into 1 to 100 and `page` to at least 1.
    ///
    /// Repositories apply this before building a query, so handler input
    /// never reaches SQL unbounded.
    pub fn clamped(self) -> Self {
        Self {
            per_page: self.per_page.clamp(1, 100),
            page: self.page.max(1),
        }
    }

    /// Row offset for a SQL query. Assumes `clamped()` has been applied.
    pub fn offset(self) -> u64 {
        u64::from(self.per_page) * u64::from(self.page - 1)
    }

    /// Row limit for a SQL query.
    pub fn limit(self) -> u64 {
        u64::from(self.per_page)
    }
}
