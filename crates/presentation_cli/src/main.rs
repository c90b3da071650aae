//! SOS CLI
//!
//! Command-line interface for contact lookup, alert dispatch, raising
//! emergencies and managing the n8n SOS workflows. Results are printed as
//! pretty JSON on stdout; logs go to stderr.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use application::{
    AlertService, ContactService, DirectoryPort, EmergencyService, NotificationGatewayPort,
    WorkflowPort,
};
use clap::{Parser, Subcommand};
use domain::{
    AlertOptions, AlertPriority, Channel, ContactSelectionCriteria, EmergencyData, EmergencyType,
};
use infrastructure::{
    AppConfig, DirectoryAdapter, GatewayAdapter, N8nWorkflowAdapter, init_logging,
};
use serde::Serialize;
use tracing::{debug, info};

/// SOS CLI
#[derive(Debug, Parser)]
#[command(name = "sos-cli")]
#[command(author, version, about = "SOS emergency contact selection and alert dispatch", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml when present)
    #[arg(short, long, env = "SOS_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up responders in the directory
    ///
    /// Lists available contacts unless `--zone` or `--id` is given.
    Contacts {
        /// List contacts covering a location
        #[arg(long, conflicts_with = "id")]
        zone: Option<String>,

        /// Show a single contact
        #[arg(long)]
        id: Option<String>,
    },

    /// Show a vehicle and its predefined emergency contacts
    Vehicle {
        /// Vehicle identifier
        id: String,
    },

    /// Select the contacts to alert for an emergency, without alerting them
    Select {
        /// Emergency type (medical, security, technical)
        #[arg(short = 't', long = "type")]
        emergency_type: EmergencyType,

        /// Where the emergency happened
        #[arg(short, long)]
        location: String,

        /// Urgency (default: derived from the emergency type)
        #[arg(short, long)]
        priority: Option<AlertPriority>,

        /// Vehicle whose predefined contacts are tried first
        #[arg(long)]
        vehicle: Option<String>,

        /// Specialty a zone contact must have (repeatable)
        #[arg(long = "specialty")]
        specialties: Vec<String>,
    },

    /// Alert a single contact
    Alert {
        /// Contact identifier
        #[arg(long)]
        contact: String,

        /// Alert text
        #[arg(short, long)]
        message: String,

        /// Urgency
        #[arg(short, long, default_value = "high")]
        priority: AlertPriority,

        /// Channel to use (repeatable; default: alert.default_channels)
        #[arg(long = "channel")]
        channels: Vec<Channel>,
    },

    /// Raise an emergency: select contacts and alert each of them
    ///
    /// Also posts the emergency to the n8n SOS webhook when one is
    /// configured, unless `--no-webhook` is given.
    Emergency {
        /// Emergency type (medical, security, technical)
        #[arg(short = 't', long = "type")]
        emergency_type: EmergencyType,

        /// Where the emergency happened
        #[arg(short, long)]
        location: String,

        /// Vehicle involved
        #[arg(long)]
        vehicle: Option<String>,

        /// Driver raising the emergency
        #[arg(long)]
        driver: Option<String>,

        /// Free-text description
        #[arg(short, long)]
        description: Option<String>,

        /// Urgency (default: derived from the emergency type)
        #[arg(short, long)]
        priority: Option<AlertPriority>,

        /// Channel to use (repeatable; default: alert.default_channels)
        #[arg(long = "channel")]
        channels: Vec<Channel>,

        /// Skip the n8n webhook and dispatch directly only
        #[arg(long)]
        no_webhook: bool,
    },

    /// Manage n8n workflows
    Workflows {
        #[command(subcommand)]
        command: WorkflowCommands,
    },
}

#[derive(Debug, Subcommand)]
enum WorkflowCommands {
    /// List workflows
    List,

    /// List recent executions of a workflow
    Executions {
        /// Workflow identifier
        workflow_id: String,

        /// Maximum number of executions
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },

    /// Activate a workflow
    Activate {
        /// Workflow identifier
        workflow_id: String,
    },

    /// Deactivate a workflow
    Deactivate {
        /// Workflow identifier
        workflow_id: String,
    },

    /// Execute a workflow
    Execute {
        /// Workflow identifier
        workflow_id: String,

        /// JSON input passed to the workflow
        #[arg(long)]
        data: Option<String>,
    },
}

/// Determine log filter from verbosity count, `None` keeps the configured one
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Channels requested on the command line, or the configured defaults
fn resolve_channels(requested: Vec<Channel>, config: &AppConfig) -> Vec<Channel> {
    if requested.is_empty() {
        config.alert.default_channels.clone()
    } else {
        requested
    }
}

/// Parse the `--data` argument of `workflows execute`
fn parse_payload(data: Option<&str>) -> anyhow::Result<serde_json::Value> {
    data.map_or_else(
        || Ok(serde_json::json!({})),
        |raw| serde_json::from_str(raw).context("--data must be valid JSON"),
    )
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn contact_service(config: &AppConfig) -> anyhow::Result<ContactService> {
    let directory: Arc<dyn DirectoryPort> =
        Arc::new(DirectoryAdapter::new(config.directory.to_sos_api_config())?);
    Ok(ContactService::with_policy(
        directory,
        config.selection.to_policy(),
    ))
}

fn alert_service(config: &AppConfig) -> anyhow::Result<AlertService> {
    let gateway: Arc<dyn NotificationGatewayPort> =
        Arc::new(GatewayAdapter::new(config.gateway.to_sos_api_config())?);
    Ok(AlertService::with_config(
        gateway,
        config.alert.to_alert_config(),
    ))
}

fn workflow_adapter(config: &AppConfig) -> anyhow::Result<N8nWorkflowAdapter> {
    let n8n = config
        .n8n
        .as_ref()
        .context("n8n is not configured; add an [n8n] section or SOS__N8N__API_URL")?;
    Ok(N8nWorkflowAdapter::new(n8n.to_n8n_config())?)
}

async fn run_workflows(command: WorkflowCommands, config: &AppConfig) -> anyhow::Result<()> {
    let workflows = workflow_adapter(config)?;

    match command {
        WorkflowCommands::List => print_json(&workflows.list_workflows().await?),
        WorkflowCommands::Executions { workflow_id, limit } => {
            print_json(&workflows.list_executions(&workflow_id, limit).await?)
        },
        WorkflowCommands::Activate { workflow_id } => {
            print_json(&workflows.set_workflow_active(&workflow_id, true).await?)
        },
        WorkflowCommands::Deactivate { workflow_id } => {
            print_json(&workflows.set_workflow_active(&workflow_id, false).await?)
        },
        WorkflowCommands::Execute { workflow_id, data } => {
            let payload = parse_payload(data.as_deref())?;
            print_json(&workflows.execute_workflow(&workflow_id, payload).await?)
        },
    }
}

#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load_from(cli.config.as_deref()).context("Failed to load configuration")?;

    // Set up logging based on verbosity
    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        config.logging.filter = filter.to_string();
    }
    init_logging(&config.logging)?;
    debug!(environment = ?config.environment, "Configuration loaded");

    match cli.command {
        Commands::Contacts { zone, id } => {
            let contacts = contact_service(&config)?;
            if let Some(id) = id {
                let Some(contact) = contacts.get_contact_by_id(&id).await else {
                    bail!("Contact {id} not found");
                };
                print_json(&contact)?;
            } else if let Some(zone) = zone {
                print_json(&contacts.find_contacts_in_zone(&zone).await)?;
            } else {
                print_json(&contacts.get_available_contacts().await)?;
            }
        },

        Commands::Vehicle { id } => {
            let Some(vehicle) = contact_service(&config)?.get_vehicle_by_id(&id).await else {
                bail!("Vehicle {id} not found");
            };
            print_json(&vehicle)?;
        },

        Commands::Select {
            emergency_type,
            location,
            priority,
            vehicle,
            specialties,
        } => {
            let mut criteria = ContactSelectionCriteria::new(emergency_type, location);
            if let Some(priority) = priority {
                criteria = criteria.with_priority(priority);
            }
            if let Some(vehicle) = vehicle {
                criteria = criteria.with_vehicle(vehicle);
            }
            for specialty in specialties {
                criteria = criteria.with_required_specialty(specialty);
            }

            let selected = contact_service(&config)?
                .select_contacts_for_emergency(&criteria)
                .await;
            print_json(&selected)?;
        },

        Commands::Alert {
            contact,
            message,
            priority,
            channels,
        } => {
            let Some(target) = contact_service(&config)?.get_contact_by_id(&contact).await else {
                bail!("Contact {contact} not found");
            };
            let options = AlertOptions::new(message)
                .with_priority(priority)
                .with_channels(resolve_channels(channels, &config));

            let result = alert_service(&config)?.alert_contact(&target, &options).await;
            print_json(&result)?;
            if !result.success {
                std::process::exit(1);
            }
        },

        Commands::Emergency {
            emergency_type,
            location,
            vehicle,
            driver,
            description,
            priority,
            channels,
            no_webhook,
        } => {
            let mut emergency = EmergencyData::new(emergency_type, location);
            if let Some(vehicle) = vehicle {
                emergency = emergency.with_vehicle(vehicle);
            }
            if let Some(driver) = driver {
                emergency = emergency.with_driver(driver);
            }
            if let Some(description) = description {
                emergency = emergency.with_description(description);
            }
            if let Some(priority) = priority {
                emergency = emergency.with_priority(priority);
            }

            let mut service =
                EmergencyService::new(contact_service(&config)?, alert_service(&config)?);
            let webhook = config
                .n8n
                .as_ref()
                .filter(|n8n| !no_webhook && n8n.webhook_url.is_some());
            if let Some(n8n) = webhook {
                let adapter: Arc<dyn WorkflowPort> =
                    Arc::new(N8nWorkflowAdapter::new(n8n.to_n8n_config())?);
                service = service.with_workflow(adapter);
            }

            let channels = resolve_channels(channels, &config);
            let report = service.raise(&emergency, &channels).await;
            info!(
                reached = report.reached(),
                selected = report.contacts.len(),
                "Emergency dispatch finished"
            );
            print_json(&report)?;
            if !report.success {
                std::process::exit(1);
            }
        },

        Commands::Workflows { command } => run_workflows(command, &config).await?,
    }

    Ok(())
}
