use serde::Deserialize;
use utoipa::IntoParams;

use crate::shared::crud::PageRequest;

/// Page size bounds applied to every listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: u64,
    pub max_size: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: 20,
            max_size: 100,
        }
    }
}

/// `?skip=&limit=` as accepted by listing endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Rows to skip
    #[param(example = 0)]
    pub skip: Option<u64>,
    /// Page size, clamped to the configured maximum
    #[param(example = 20)]
    pub limit: Option<u64>,
}

impl PageQuery {
    pub fn to_request(self, limits: PageLimits) -> PageRequest {
        let limit = self
            .limit
            .unwrap_or(limits.default_size)
            .clamp(1, limits.max_size.max(1));

        PageRequest::new(self.skip.unwrap_or(0), limit)
    }
}
