//! Command-line interface for campaign and lead management.
//!
//! The CLI stays thin: argument parsing and printing live here, all
//! behavior sits in the campaign service and use cases.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::application::use_cases::campaign_service::CampaignService;
use crate::application::use_cases::header_mapping::infer_mapping;
use crate::application::use_cases::message_template::{
    extract_variables, render, DYNAMIC_VARIABLES,
};
use crate::domain::csv::{FieldMapping, LeadField};
use crate::domain::error::Result;
use crate::domain::schedule::{utc_hhmm_to_local, ScheduleUpdate};
use crate::infrastructure::config::Settings;
use crate::infrastructure::csv::{CsvParser, CsvWriter};
use crate::infrastructure::db::sqlite::SqliteCampaignStore;
use crate::shared::phone_format::format_phone_number;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "textblast",
    version,
    about = "CSV lead import and campaign management for SMS outreach",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create, list, and manage campaigns
    Campaign {
        #[command(subcommand)]
        command: CampaignCommand,
    },
    Inspect(InspectArgs),
    Import(ImportArgs),
    Leads(LeadsArgs),
    Export(ExportArgs),
    Render(RenderArgs),
}

#[derive(Subcommand, Debug)]
pub enum CampaignCommand {
    Create(CreateArgs),
    /// List campaigns with their status and lead counts
    List,
    Rename(RenameArgs),
    Schedule(ScheduleArgs),
    Message(MessageArgs),
    /// Mark a campaign active
    Launch(IdArgs),
    /// Copy a campaign with its schedule, message, and leads
    Duplicate(IdArgs),
    /// Delete a campaign and its leads
    Delete(IdArgs),
}

#[derive(Parser, Debug)]
#[command(about = "Create a new draft campaign")]
pub struct CreateArgs {
    /// Campaign name
    #[arg(long, value_name = "NAME")]
    pub name: String,
}

#[derive(Parser, Debug)]
#[command(about = "Rename a campaign")]
pub struct RenameArgs {
    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub id: String,

    /// New campaign name
    #[arg(long, value_name = "NAME")]
    pub name: String,
}

#[derive(Parser, Debug)]
#[command(about = "Update a campaign's sending schedule")]
pub struct ScheduleArgs {
    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub id: String,

    /// New campaign name (defaults to the current name)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Messages to send per day, capped at backend capacity
    #[arg(long, value_name = "N")]
    pub daily_limit: i64,

    /// Window start in local time, HH:MM
    #[arg(long, value_name = "HH:MM")]
    pub start_time: String,

    /// Window end in local time, HH:MM
    #[arg(long, value_name = "HH:MM")]
    pub end_time: String,

    /// Sending day, repeatable (e.g. --day Monday --day Tuesday)
    #[arg(long = "day", value_name = "DAY")]
    pub days: Vec<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Set a campaign's message template")]
pub struct MessageArgs {
    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub id: String,

    /// Message template, placeholders in {braces}
    #[arg(long, value_name = "TEXT")]
    pub text: String,
}

#[derive(Parser, Debug)]
pub struct IdArgs {
    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub id: String,
}

#[derive(Parser, Debug)]
#[command(about = "Preview a lead file and the inferred column mapping")]
pub struct InspectArgs {
    /// Lead file to inspect
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Parser, Debug)]
#[command(about = "Import leads from a delimited file into a campaign")]
pub struct ImportArgs {
    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub id: String,

    /// Lead file to import
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Header of the phone column, overriding detection
    #[arg(long, value_name = "HEADER")]
    pub phone_column: Option<String>,

    /// Header of the first name column, overriding detection
    #[arg(long, value_name = "HEADER")]
    pub first_name_column: Option<String>,

    /// Header of the last name column, overriding detection
    #[arg(long, value_name = "HEADER")]
    pub last_name_column: Option<String>,

    /// Header of the company column, overriding detection
    #[arg(long, value_name = "HEADER")]
    pub company_column: Option<String>,
}

#[derive(Parser, Debug)]
#[command(about = "List a campaign's leads")]
pub struct LeadsArgs {
    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub id: String,
}

#[derive(Parser, Debug)]
#[command(about = "Export a campaign's leads to a CSV file")]
pub struct ExportArgs {
    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub id: String,

    /// Output file path
    #[arg(long, value_name = "FILE")]
    pub out: PathBuf,
}

#[derive(Parser, Debug)]
#[command(about = "Preview the rendered message for a campaign's leads")]
pub struct RenderArgs {
    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub id: String,

    /// Number of leads to preview
    #[arg(long, value_name = "N", default_value_t = 3)]
    pub limit: usize,
}

pub async fn run(args: RootArgs) -> Result<()> {
    let settings = Settings::load()?;
    let store = SqliteCampaignStore::init(&settings.database_url).await?;
    let service = CampaignService::new(Arc::new(store));

    match args.command {
        Command::Campaign { command } => run_campaign(command, &service, &settings).await,
        Command::Inspect(args) => run_inspect(&args),
        Command::Import(args) => run_import(&args, &service).await,
        Command::Leads(args) => run_leads(&args, &service).await,
        Command::Export(args) => run_export(&args, &service).await,
        Command::Render(args) => run_render(&args, &service).await,
    }
}

async fn run_campaign(
    command: CampaignCommand,
    service: &CampaignService,
    settings: &Settings,
) -> Result<()> {
    match command {
        CampaignCommand::Create(args) => {
            let campaign = service.create(&settings.user_id, &args.name).await?;
            println!("Created campaign \"{}\" ({})", campaign.name, campaign.id);
        }
        CampaignCommand::List => {
            let campaigns = service.list(&settings.user_id).await?;
            if campaigns.is_empty() {
                println!("No campaigns yet.");
                return Ok(());
            }
            for campaign in campaigns {
                let leads = service.lead_count(&campaign.id).await?;
                println!(
                    "{}  {:<6}  {:>5} leads  {}",
                    campaign.id,
                    campaign.status.as_str(),
                    leads,
                    campaign.name
                );
            }
        }
        CampaignCommand::Rename(args) => {
            let campaign = service.rename(&args.id, &args.name).await?;
            println!("Renamed campaign {} to \"{}\"", campaign.id, campaign.name);
        }
        CampaignCommand::Schedule(args) => {
            let name = match args.name {
                Some(name) => name,
                None => service.get(&args.id).await?.name,
            };
            let schedule = ScheduleUpdate {
                name,
                daily_limit: args.daily_limit,
                start_time: args.start_time,
                end_time: args.end_time,
                days_of_week: args.days,
            };
            let campaign = service
                .save_schedule(&args.id, schedule, settings.backend_count)
                .await?;
            println!(
                "Saved schedule: {} per day, {}-{} local time, on {}",
                campaign.daily_limit,
                utc_hhmm_to_local(&campaign.start_time)?,
                utc_hhmm_to_local(&campaign.end_time)?,
                campaign.days_of_week.join(", ")
            );
        }
        CampaignCommand::Message(args) => {
            let campaign = service.save_message(&args.id, &args.text).await?;
            println!("Saved message for campaign {}", campaign.id);
            let variables = extract_variables(&campaign.message_content);
            if !variables.is_empty() {
                println!("Placeholders: {}", variables.join(", "));
            }
            println!("Always available: {}", DYNAMIC_VARIABLES.join(", "));
        }
        CampaignCommand::Launch(args) => {
            let campaign = service.launch(&args.id).await?;
            println!("Campaign \"{}\" is active.", campaign.name);
        }
        CampaignCommand::Duplicate(args) => {
            let copy = service.duplicate(&args.id).await?;
            println!("Created \"{}\" ({})", copy.name, copy.id);
        }
        CampaignCommand::Delete(args) => {
            service.delete(&args.id).await?;
            println!("Deleted campaign {}", args.id);
        }
    }
    Ok(())
}

fn run_inspect(args: &InspectArgs) -> Result<()> {
    let table = CsvParser::parse_file_auto_detect(&args.file)?;
    let mapping = infer_mapping(&table.headers);

    println!(
        "{}: {} columns, {} rows",
        args.file.display(),
        table.headers.len(),
        table.row_count()
    );
    for field in LeadField::ALL {
        match mapping.get(field) {
            Some(header) => println!("  {:<12} -> {}", field.label(), header),
            None => println!("  {:<12} -> (unmapped)", field.label()),
        }
    }

    let extra: Vec<&str> = table
        .headers
        .iter()
        .map(String::as_str)
        .filter(|h| !mapping.mapped_headers().contains(h))
        .collect();
    if !extra.is_empty() {
        println!("  personalization: {}", extra.join(", "));
    }

    Ok(())
}

async fn run_import(args: &ImportArgs, service: &CampaignService) -> Result<()> {
    let table = CsvParser::parse_file_auto_detect(&args.file)?;
    let mut mapping = infer_mapping(&table.headers);
    apply_overrides(&mut mapping, args);

    let result = service.import_from_table(&args.id, &table, &mapping).await?;
    println!("{}", result.summary());
    Ok(())
}

async fn run_leads(args: &LeadsArgs, service: &CampaignService) -> Result<()> {
    let leads = service.leads(&args.id).await?;
    if leads.is_empty() {
        println!("No leads in campaign {}.", args.id);
        return Ok(());
    }

    for lead in &leads {
        let name = format!("{} {}", lead.record.first_name, lead.record.last_name);
        let flag = if lead.record.stop_sending { " [stopped]" } else { "" };
        println!(
            "{:>6}  {:<18}  {}{}",
            lead.id,
            format_phone_number(&lead.record.phone),
            name.trim(),
            flag
        );
    }
    println!("{} leads total.", leads.len());
    Ok(())
}

async fn run_export(args: &ExportArgs, service: &CampaignService) -> Result<()> {
    let leads = service.leads(&args.id).await?;
    CsvWriter::new().write_leads_to_file(&args.out, &leads)?;
    println!("Exported {} leads to {}", leads.len(), args.out.display());
    Ok(())
}

async fn run_render(args: &RenderArgs, service: &CampaignService) -> Result<()> {
    let campaign = service.get(&args.id).await?;
    if campaign.message_content.is_empty() {
        println!("Campaign \"{}\" has no message yet.", campaign.name);
        return Ok(());
    }

    let variables = extract_variables(&campaign.message_content);
    if !variables.is_empty() {
        println!("Placeholders: {}", variables.join(", "));
    }

    let leads = service.leads(&args.id).await?;
    for lead in leads.iter().take(args.limit) {
        println!("--- {}", format_phone_number(&lead.record.phone));
        println!("{}", render(&campaign.message_content, &lead.record));
    }
    Ok(())
}

fn apply_overrides(mapping: &mut FieldMapping, args: &ImportArgs) {
    if let Some(header) = &args.phone_column {
        mapping.set(LeadField::Phone, Some(header.clone()));
    }
    if let Some(header) = &args.first_name_column {
        mapping.set(LeadField::FirstName, Some(header.clone()));
    }
    if let Some(header) = &args.last_name_column {
        mapping.set(LeadField::LastName, Some(header.clone()));
    }
    if let Some(header) = &args.company_column {
        mapping.set(LeadField::CompanyName, Some(header.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import_args(phone: Option<&str>, first: Option<&str>) -> ImportArgs {
        ImportArgs {
            id: "c1".to_string(),
            file: PathBuf::from("leads.csv"),
            phone_column: phone.map(|s| s.to_string()),
            first_name_column: first.map(|s| s.to_string()),
            last_name_column: None,
            company_column: None,
        }
    }

    #[test]
    fn test_overrides_replace_inferred_columns() {
        let mut mapping = FieldMapping::default();
        mapping.phone = Some("Phone".to_string());

        apply_overrides(&mut mapping, &import_args(Some("Cell"), Some("Given")));

        assert_eq!(mapping.phone.as_deref(), Some("Cell"));
        assert_eq!(mapping.first_name.as_deref(), Some("Given"));
    }

    #[test]
    fn test_empty_override_clears_a_mapping() {
        let mut mapping = FieldMapping::default();
        mapping.phone = Some("Phone".to_string());

        apply_overrides(&mut mapping, &import_args(Some(""), None));

        assert!(mapping.phone.is_none());
    }
}
