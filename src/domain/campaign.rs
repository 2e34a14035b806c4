// ============================================================
// CAMPAIGN DOMAIN MODEL
// ============================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Active,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Active => "active",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(CampaignStatus::Draft),
            "active" => Some(CampaignStatus::Active),
            _ => None,
        }
    }
}

/// An outreach campaign with its sending schedule and message template.
/// Times are stored as UTC "HH:MM" strings; `days_of_week` holds full
/// English day names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub status: CampaignStatus,
    pub daily_limit: i64,
    pub start_time: String,
    pub end_time: String,
    pub days_of_week: Vec<String>,
    pub message_content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Campaign {
    /// Build a fresh draft campaign with the default weekday schedule.
    /// Timestamps stay `None` until the store fills them in.
    pub fn new(user_id: &str, name: &str) -> Self {
        Campaign {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            status: CampaignStatus::Draft,
            daily_limit: 100,
            start_time: "09:00".to_string(),
            end_time: "18:00".to_string(),
            days_of_week: vec![
                "Monday".to_string(),
                "Tuesday".to_string(),
                "Wednesday".to_string(),
                "Thursday".to_string(),
                "Friday".to_string(),
            ],
            message_content: String::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct NewCampaign {
    pub user_id: String,
    #[validate(length(min = 1, max = 120, message = "Campaign name must be 1-120 characters"))]
    pub name: String,
}

// ============================================================
// TESTS
// ============================================================
