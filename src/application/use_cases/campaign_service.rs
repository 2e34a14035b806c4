// ============================================================
// CAMPAIGN SERVICE
// ============================================================
// Campaign lifecycle, schedule updates, and lead management

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::application::use_cases::lead_import::import_leads;
use crate::domain::campaign::{Campaign, CampaignStatus, NewCampaign};
use crate::domain::csv::{FieldMapping, RawTable};
use crate::domain::error::{AppError, Result};
use crate::domain::lead::{ImportResult, Lead, LeadRecord};
use crate::domain::schedule::{
    clamp_daily_limit, local_hhmm_to_utc, validate_days, ScheduleUpdate,
};
use crate::infrastructure::db::CampaignStore;

pub struct CampaignService {
    store: Arc<dyn CampaignStore + Send + Sync>,
}

impl CampaignService {
    pub fn new(store: Arc<dyn CampaignStore + Send + Sync>) -> Self {
        Self { store }
    }

    pub async fn create(&self, user_id: &str, name: &str) -> Result<Campaign> {
        let name = name.trim();
        let new_campaign = NewCampaign {
            user_id: user_id.to_string(),
            name: name.to_string(),
        };
        new_campaign
            .validate()
            .map_err(|e| AppError::ValidationError(format!("Invalid campaign: {}", e)))?;

        let campaign = Campaign::new(user_id, name);
        self.store.insert_campaign(&campaign).await?;
        info!("Created campaign {}", campaign.id);

        self.store.get_campaign(&campaign.id).await
    }

    pub async fn get(&self, id: &str) -> Result<Campaign> {
        self.store.get_campaign(id).await
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Campaign>> {
        self.store.list_campaigns(user_id).await
    }

    pub async fn rename(&self, id: &str, name: &str) -> Result<Campaign> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Campaign name is required.".to_string(),
            ));
        }
        self.store.rename_campaign(id, name).await?;
        self.store.get_campaign(id).await
    }

    /// Apply a schedule update. The requested daily limit is capped at
    /// backend capacity and the sending window is converted to UTC
    /// before anything is stored.
    pub async fn save_schedule(
        &self,
        id: &str,
        schedule: ScheduleUpdate,
        backend_count: i64,
    ) -> Result<Campaign> {
        let name = schedule.name.trim().to_string();
        let requested = ScheduleUpdate { name, ..schedule };
        requested
            .validate()
            .map_err(|e| AppError::ValidationError(format!("Invalid schedule: {}", e)))?;
        validate_days(&requested.days_of_week)?;

        let stored = ScheduleUpdate {
            name: requested.name,
            daily_limit: clamp_daily_limit(requested.daily_limit, backend_count),
            start_time: local_hhmm_to_utc(&requested.start_time)?,
            end_time: local_hhmm_to_utc(&requested.end_time)?,
            days_of_week: requested.days_of_week,
        };

        self.store.update_schedule(id, &stored).await?;
        self.store.get_campaign(id).await
    }

    pub async fn save_message(&self, id: &str, message_content: &str) -> Result<Campaign> {
        self.store.update_message(id, message_content).await?;
        self.store.get_campaign(id).await
    }

    /// Mark a campaign active. Launching an already-active campaign is
    /// a no-op.
    pub async fn launch(&self, id: &str) -> Result<Campaign> {
        let campaign = self.store.get_campaign(id).await?;
        if campaign.status == CampaignStatus::Active {
            return Ok(campaign);
        }

        self.store.update_status(id, CampaignStatus::Active).await?;
        info!("Launched campaign {}", id);
        self.store.get_campaign(id).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete_campaign(id).await?;
        info!("Deleted campaign {}", id);
        Ok(())
    }

    /// Clone a campaign with its schedule, message, and leads. The copy
    /// starts as a draft named "<source> (copy)"; its leads keep their
    /// opt-out state but get a fresh import timestamp.
    pub async fn duplicate(&self, id: &str) -> Result<Campaign> {
        let source = self.store.get_campaign(id).await?;

        let copy = Campaign {
            daily_limit: source.daily_limit,
            start_time: source.start_time.clone(),
            end_time: source.end_time.clone(),
            days_of_week: source.days_of_week.clone(),
            message_content: source.message_content.clone(),
            ..Campaign::new(&source.user_id, &format!("{} (copy)", source.name))
        };
        self.store.insert_campaign(&copy).await?;

        let leads = self.store.list_leads(id).await?;
        if !leads.is_empty() {
            let now = chrono::Utc::now();
            let records: Vec<LeadRecord> = leads
                .into_iter()
                .map(|lead| LeadRecord {
                    created_at: now,
                    ..lead.record
                })
                .collect();
            self.store.bulk_insert_leads(&copy.id, &records).await?;
        }

        info!("Duplicated campaign {} into {}", id, copy.id);
        self.store.get_campaign(&copy.id).await
    }

    /// Import leads from a parsed table into a campaign.
    pub async fn import_from_table(
        &self,
        campaign_id: &str,
        table: &RawTable,
        mapping: &FieldMapping,
    ) -> Result<ImportResult> {
        self.store.get_campaign(campaign_id).await?;

        let result = import_leads(table, mapping)?;
        if !result.accepted.is_empty() {
            self.store
                .bulk_insert_leads(campaign_id, &result.accepted)
                .await?;
        }

        info!(
            "Imported {} leads into campaign {} ({} rejected)",
            result.accepted.len(),
            campaign_id,
            result.rejected_count
        );
        Ok(result)
    }

    pub async fn leads(&self, campaign_id: &str) -> Result<Vec<Lead>> {
        self.store.get_campaign(campaign_id).await?;
        self.store.list_leads(campaign_id).await
    }

    pub async fn clear_leads(&self, campaign_id: &str) -> Result<u64> {
        self.store.get_campaign(campaign_id).await?;
        self.store.delete_leads(campaign_id).await
    }

    pub async fn lead_count(&self, campaign_id: &str) -> Result<i64> {
        self.store.count_leads(campaign_id).await
    }
}

// ============================================================
// TESTS
// ============================================================
