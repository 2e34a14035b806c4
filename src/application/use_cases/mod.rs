pub mod campaign_service;
pub mod header_mapping;
pub mod lead_import;
pub mod message_template;
