use base64::engine::general_purpose::URL_SAFE_NO_PAD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ids::EmployeeId;
use crate::error::{CoreError, Result};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Validated offset-pagination window.
///
/// `limit` is intentionally uncapped to match the behavior this service
/// replaces; large pages are a documented scalability caveat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageParams {
    /// Validates the window before any store access. Both values must be ≥ 1
    /// and the implied skip must stay representable.
    pub fn new(page: i64, limit: i64) -> Result<Self> {
        if page < 1 || limit < 1 || (page - 1).checked_mul(limit).is_none() {
            return Err(CoreError::Validation(
                "Invalid pagination parameters. Page and limit must be valid numbers.".to_string(),
            ));
        }
        Ok(Self { page, limit })
    }

    /// Number of records to skip before the requested page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Pages needed to cover `total` records at this limit.
    pub fn total_pages(&self, total: i64) -> i64 {
        if total == 0 {
            0
        } else {
            total.saturating_add(self.limit - 1) / self.limit
        }
    }
}

/// Encodes the identity of the last returned record as an opaque cursor.
pub fn encode_cursor(id: &EmployeeId) -> String {
    BASE64.encode(id.as_uuid().to_string())
}

/// Decodes a cursor back into the identity it was issued for.
///
/// Any malformed token fails with a validation error before the store is
/// touched.
pub fn decode_cursor(raw: &str) -> Result<EmployeeId> {
    let invalid = || CoreError::Validation("Invalid cursor format".to_string());

    let bytes = BASE64.decode(raw).map_err(|_| invalid())?;
    let text = String::from_utf8(bytes).map_err(|_| invalid())?;
    let uuid = Uuid::parse_str(&text).map_err(|_| invalid())?;
    Ok(EmployeeId::from_uuid(uuid))
}

/// Cursor-mode pagination descriptor returned alongside each page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_cursor: Option<String>,
    pub has_next: bool,
    pub has_prev: bool,
    pub limit: i64,
}
