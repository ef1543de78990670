use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

use crate::user::application::domain::entities::UserId;

pub const DEMO_NAME_MAX_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DemoStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

impl DemoStatus {
    pub const ALL: [DemoStatus; 3] = [DemoStatus::Active, DemoStatus::Inactive, DemoStatus::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            DemoStatus::Active => "active",
            DemoStatus::Inactive => "inactive",
            DemoStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for DemoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Status must be one of: active, inactive, pending (got '{0}')")]
pub struct InvalidDemoStatus(pub String);

impl FromStr for DemoStatus {
    type Err = InvalidDemoStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(DemoStatus::Active),
            "inactive" => Ok(DemoStatus::Inactive),
            "pending" => Ok(DemoStatus::Pending),
            other => Err(InvalidDemoStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DemoId(i64);

impl DemoId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for DemoId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for DemoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Demo {
    pub id: DemoId,
    pub name: String,
    pub description: Option<String>,
    pub status: DemoStatus,
    /// Higher sorts first.
    pub priority: i32,
    pub is_featured: bool,
    pub owner_id: UserId,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Demo {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// Active status on a live row.
    pub fn is_live(&self) -> bool {
        self.status == DemoStatus::Active && !self.is_deleted
    }
}

/// Counts over non-deleted demos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DemoStatistics {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub pending: u64,
    pub featured: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_known_values_only() {
        assert_eq!("pending".parse::<DemoStatus>(), Ok(DemoStatus::Pending));
        assert_eq!(
            "archived".parse::<DemoStatus>(),
            Err(InvalidDemoStatus("archived".to_string()))
        );
        assert!("Active".parse::<DemoStatus>().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&DemoStatus::Inactive).unwrap();
        assert_eq!(json, "\"inactive\"");
    }

    #[test]
    fn deleted_demo_is_not_live() {
        let now = Utc::now();
        let demo = Demo {
            id: DemoId::from(1),
            name: "D1".to_string(),
            description: None,
            status: DemoStatus::Active,
            priority: 0,
            is_featured: false,
            owner_id: UserId::from(1),
            is_deleted: true,
            deleted_at: Some(now),
            created_at: now,
            updated_at: now,
        };

        assert!(!demo.is_live());
        assert!(demo.is_owned_by(UserId::from(1)));
    }
}
