use std::fmt;

use poem_openapi::Enum;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Urgency classification of an aid request
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Enum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Priority {
    #[sea_orm(string_value = "Baja")]
    #[oai(rename = "Baja")]
    #[serde(rename = "Baja")]
    Low,

    #[default]
    #[sea_orm(string_value = "Media")]
    #[oai(rename = "Media")]
    #[serde(rename = "Media")]
    Medium,

    #[sea_orm(string_value = "Alta")]
    #[oai(rename = "Alta")]
    #[serde(rename = "Alta")]
    High,

    #[sea_orm(string_value = "Urgente")]
    #[oai(rename = "Urgente")]
    #[serde(rename = "Urgente")]
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Baja",
            Priority::Medium => "Media",
            Priority::High => "Alta",
            Priority::Urgent => "Urgente",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Priority::Urgent => "#EF4444",
            Priority::High => "#F97316",
            Priority::Medium => "#F59E0B",
            Priority::Low => "#22C55E",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_priority_is_media() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_priority_round_trips_through_db_value() {
        for priority in Priority::ALL {
            let value = priority.to_value();
            assert_eq!(value, priority.as_str());
            assert_eq!(Priority::try_from_value(&value).unwrap(), priority);
        }
    }
}
