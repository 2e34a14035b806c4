use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool},
    Pool, Sqlite,
};

use crate::domain::campaign::{Campaign, CampaignStatus};
use crate::domain::error::{AppError, Result};
use crate::domain::lead::{Lead, LeadRecord};
use crate::domain::schedule::ScheduleUpdate;
use crate::infrastructure::db::CampaignStore;

pub struct SqliteCampaignStore {
    pool: Pool<Sqlite>,
}

impl SqliteCampaignStore {
    pub async fn init(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to parse connection string: {}", e))
            })?
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to connect: {}", e)))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS campaigns (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'draft',
                daily_limit INTEGER NOT NULL DEFAULT 100,
                start_time TEXT NOT NULL DEFAULT '09:00',
                end_time TEXT NOT NULL DEFAULT '18:00',
                days_of_week TEXT NOT NULL DEFAULT '[]',
                message_content TEXT NOT NULL DEFAULT '',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
        )
        .execute(&pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create campaigns table: {}", e)))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS campaign_leads (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                campaign_id TEXT NOT NULL,
                phone TEXT NOT NULL,
                first_name TEXT NOT NULL DEFAULT '',
                last_name TEXT NOT NULL DEFAULT '',
                company_name TEXT NOT NULL DEFAULT '',
                personalization TEXT NOT NULL DEFAULT '{}',
                stop_sending INTEGER NOT NULL DEFAULT 0,
                created_at DATETIME NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create leads table: {}", e)))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl CampaignStore for SqliteCampaignStore {
    async fn insert_campaign(&self, campaign: &Campaign) -> Result<()> {
        sqlx::query(
            "INSERT INTO campaigns
                (id, user_id, name, status, daily_limit, start_time, end_time, days_of_week, message_content)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&campaign.id)
        .bind(&campaign.user_id)
        .bind(&campaign.name)
        .bind(campaign.status.as_str())
        .bind(campaign.daily_limit)
        .bind(&campaign.start_time)
        .bind(&campaign.end_time)
        .bind(encode_days(&campaign.days_of_week)?)
        .bind(&campaign.message_content)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to insert campaign: {}", e)))?;

        Ok(())
    }

    async fn get_campaign(&self, id: &str) -> Result<Campaign> {
        let row = sqlx::query_as::<_, CampaignEntity>(
            "SELECT id, user_id, name, status, daily_limit, start_time, end_time,
                    days_of_week, message_content, created_at, updated_at
             FROM campaigns WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch campaign: {}", e)))?;

        match row {
            Some(entity) => Ok(entity.into()),
            None => Err(AppError::NotFound(format!("Campaign not found: {}", id))),
        }
    }

    async fn list_campaigns(&self, user_id: &str) -> Result<Vec<Campaign>> {
        let rows = sqlx::query_as::<_, CampaignEntity>(
            "SELECT id, user_id, name, status, daily_limit, start_time, end_time,
                    days_of_week, message_content, created_at, updated_at
             FROM campaigns WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list campaigns: {}", e)))?;

        Ok(rows.into_iter().map(|e| e.into()).collect())
    }

    async fn rename_campaign(&self, id: &str, name: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE campaigns SET name = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(name)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to rename campaign: {}", e)))?;

        require_found(result.rows_affected(), id)
    }

    async fn update_schedule(&self, id: &str, schedule: &ScheduleUpdate) -> Result<()> {
        let result = sqlx::query(
            "UPDATE campaigns
             SET name = ?, daily_limit = ?, start_time = ?, end_time = ?, days_of_week = ?,
                 updated_at = CURRENT_TIMESTAMP
             WHERE id = ?",
        )
        .bind(&schedule.name)
        .bind(schedule.daily_limit)
        .bind(&schedule.start_time)
        .bind(&schedule.end_time)
        .bind(encode_days(&schedule.days_of_week)?)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update schedule: {}", e)))?;

        require_found(result.rows_affected(), id)
    }

    async fn update_message(&self, id: &str, message_content: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE campaigns SET message_content = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(message_content)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update message: {}", e)))?;

        require_found(result.rows_affected(), id)
    }

    async fn update_status(&self, id: &str, status: CampaignStatus) -> Result<()> {
        let result = sqlx::query(
            "UPDATE campaigns SET status = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update status: {}", e)))?;

        require_found(result.rows_affected(), id)
    }

    async fn delete_campaign(&self, id: &str) -> Result<()> {
        // Leads go first so a campaign row never outlives its children.
        self.delete_leads(id).await?;

        let result = sqlx::query("DELETE FROM campaigns WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete campaign: {}", e)))?;

        require_found(result.rows_affected(), id)
    }

    async fn bulk_insert_leads(&self, campaign_id: &str, leads: &[LeadRecord]) -> Result<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        let mut inserted = 0u64;
        for lead in leads {
            let personalization = serde_json::to_string(&lead.personalization)
                .map_err(|e| AppError::Internal(format!("Failed to encode personalization: {}", e)))?;

            let result = sqlx::query(
                "INSERT INTO campaign_leads
                    (campaign_id, phone, first_name, last_name, company_name,
                     personalization, stop_sending, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(campaign_id)
            .bind(&lead.phone)
            .bind(&lead.first_name)
            .bind(&lead.last_name)
            .bind(&lead.company_name)
            .bind(personalization)
            .bind(lead.stop_sending)
            .bind(lead.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to insert lead: {}", e)))?;

            inserted += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to commit leads: {}", e)))?;

        Ok(inserted)
    }

    async fn list_leads(&self, campaign_id: &str) -> Result<Vec<Lead>> {
        let rows = sqlx::query_as::<_, LeadEntity>(
            "SELECT id, campaign_id, phone, first_name, last_name, company_name,
                    personalization, stop_sending, created_at
             FROM campaign_leads WHERE campaign_id = ? ORDER BY id",
        )
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list leads: {}", e)))?;

        Ok(rows.into_iter().map(|e| e.into()).collect())
    }

    async fn delete_leads(&self, campaign_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM campaign_leads WHERE campaign_id = ?")
            .bind(campaign_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete leads: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn count_leads(&self, campaign_id: &str) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM campaign_leads WHERE campaign_id = ?")
            .bind(campaign_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to count leads: {}", e)))
    }
}

fn require_found(rows_affected: u64, id: &str) -> Result<()> {
    if rows_affected == 0 {
        return Err(AppError::NotFound(format!("Campaign not found: {}", id)));
    }
    Ok(())
}

fn encode_days(days: &[String]) -> Result<String> {
    serde_json::to_string(days)
        .map_err(|e| AppError::Internal(format!("Failed to encode days of week: {}", e)))
}

// Internal entities for database mapping
#[derive(sqlx::FromRow)]
struct CampaignEntity {
    id: String,
    user_id: String,
    name: String,
    status: String,
    daily_limit: i64,
    start_time: String,
    end_time: String,
    days_of_week: String,
    message_content: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<CampaignEntity> for Campaign {
    fn from(e: CampaignEntity) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            name: e.name,
            status: CampaignStatus::parse(&e.status).unwrap_or(CampaignStatus::Draft),
            daily_limit: e.daily_limit,
            start_time: e.start_time,
            end_time: e.end_time,
            days_of_week: serde_json::from_str(&e.days_of_week).unwrap_or_default(),
            message_content: e.message_content,
            created_at: Some(e.created_at),
            updated_at: Some(e.updated_at),
        }
    }
}

#[derive(sqlx::FromRow)]
struct LeadEntity {
    id: i64,
    campaign_id: String,
    phone: String,
    first_name: String,
    last_name: String,
    company_name: String,
    personalization: String,
    stop_sending: bool,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<LeadEntity> for Lead {
    fn from(e: LeadEntity) -> Self {
        Self {
            id: e.id,
            campaign_id: e.campaign_id,
            record: LeadRecord {
                phone: e.phone,
                first_name: e.first_name,
                last_name: e.last_name,
                company_name: e.company_name,
                personalization: serde_json::from_str(&e.personalization).unwrap_or_default(),
                stop_sending: e.stop_sending,
                created_at: e.created_at,
            },
        }
    }
}
