pub mod use_cases;

pub use use_cases::campaign_service::CampaignService;
pub use use_cases::header_mapping::infer_mapping;
pub use use_cases::lead_import::import_leads;
