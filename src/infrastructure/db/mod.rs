pub mod sqlite;

use async_trait::async_trait;

use crate::domain::campaign::{Campaign, CampaignStatus};
use crate::domain::error::Result;
use crate::domain::lead::{Lead, LeadRecord};
use crate::domain::schedule::ScheduleUpdate;

/// Persistence port for campaigns and their leads. The schedule fields
/// handed to `update_schedule` are expected to already be normalized
/// (times in UTC, daily limit clamped).
#[async_trait]
pub trait CampaignStore {
    async fn insert_campaign(&self, campaign: &Campaign) -> Result<()>;
    async fn get_campaign(&self, id: &str) -> Result<Campaign>;
    async fn list_campaigns(&self, user_id: &str) -> Result<Vec<Campaign>>;
    async fn rename_campaign(&self, id: &str, name: &str) -> Result<()>;
    async fn update_schedule(&self, id: &str, schedule: &ScheduleUpdate) -> Result<()>;
    async fn update_message(&self, id: &str, message_content: &str) -> Result<()>;
    async fn update_status(&self, id: &str, status: CampaignStatus) -> Result<()>;
    async fn delete_campaign(&self, id: &str) -> Result<()>;

    async fn bulk_insert_leads(&self, campaign_id: &str, leads: &[LeadRecord]) -> Result<u64>;
    async fn list_leads(&self, campaign_id: &str) -> Result<Vec<Lead>>;
    async fn delete_leads(&self, campaign_id: &str) -> Result<u64>;
    async fn count_leads(&self, campaign_id: &str) -> Result<i64>;
}
