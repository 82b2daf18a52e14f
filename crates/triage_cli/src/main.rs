//! # Triage CLI (`triage`)
//!
//! Command line front end over `triage_core`: assess symptom descriptions,
//! chat with the rule-based assistant, and manage the local patient record
//! store.
//!
//! ## Usage
//!
//! ```bash
//! triage --config ./triage.toml <command>
//! ```
//!
//! | Command | Description |
//! |---------|-------------|
//! | `triage assess "<text>"` | Score risk and pick a department |
//! | `triage chat "<text>"` | Conversational reply |
//! | `triage profile create\|show\|update\|list\|switch` | Manage profiles |
//! | `triage history` | Visits of the active user |
//! | `triage insights` | Aggregate health insights |
//! | `triage advice <symptoms..>` | Personalized advice |
//! | `triage export` / `triage import <file>` | JSON snapshot |
//! | `triage clear` | Remove the active user's records |
//! | `triage tool <name> '<json>'` | Run an agent tool call |
//! | `triage utter [<text>]` | Record or list agent utterances |
//! | `triage departments` | List the department catalog |

use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use triage_core::model::assessment::RiskLevel;
use triage_core::{
    catalog, chat_reply, dispatch, load_config, now_epoch_ms, open_db, EmergencyContact,
    KvPatientRepository, NewProfile, PatientService, ProfileUpdate, SqliteKvStore, ToolCall,
    TriageConfig, TriageService, UserProfile, UtteranceLog,
};

/// Rule-based symptom triage with a local patient record store.
#[derive(Parser)]
#[command(name = "triage", version)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override `[storage].db_path`.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a free-text symptom description.
    Assess {
        text: String,
        /// Store the result in the active user's history.
        #[arg(long)]
        record: bool,
        /// Notes attached to the recorded visit.
        #[arg(long, default_value = "")]
        notes: String,
        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Reply to one chat message.
    Chat { text: String },
    /// Manage patient profiles.
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Print the active user's visit history as JSON.
    History,
    /// Print health insights for the active user.
    Insights,
    /// Personalized advice for the given symptoms.
    Advice {
        #[arg(required = true)]
        symptoms: Vec<String>,
        /// Risk tier used for age-related rules.
        #[arg(long, default_value = "low", value_parser = parse_risk_level)]
        risk: RiskLevel,
    },
    /// Print a JSON snapshot of the active user's records.
    Export,
    /// Restore a snapshot written by `export`.
    Import { file: PathBuf },
    /// Remove the active user's profile and history.
    Clear,
    /// Run a conversational-agent tool call.
    Tool {
        name: String,
        /// JSON object with tool parameters.
        #[arg(default_value = "{}")]
        parameters: String,
    },
    /// Record an agent utterance, or list recent ones when no text is given.
    Utter { transcript: Option<String> },
    /// List the department catalog.
    Departments,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Create a profile and make it active.
    Create(ProfileFields),
    /// Show the active profile.
    Show,
    /// Update fields of the active profile.
    Update(ProfileFields),
    /// List all stored profiles.
    List,
    /// Make another stored profile active.
    Switch { id: String },
}

#[derive(Args)]
struct ProfileFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    age: Option<u32>,
    #[arg(long)]
    date_of_birth: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    /// Repeatable.
    #[arg(long = "allergy")]
    allergies: Vec<String>,
    /// Repeatable.
    #[arg(long = "medication")]
    medications: Vec<String>,
    /// Repeatable.
    #[arg(long = "condition")]
    chronic_conditions: Vec<String>,
    #[arg(long, requires = "contact_phone")]
    contact_name: Option<String>,
    #[arg(long, requires = "contact_name")]
    contact_phone: Option<String>,
    #[arg(long)]
    contact_relationship: Option<String>,
}

impl ProfileFields {
    fn emergency_contact(&self) -> Option<EmergencyContact> {
        match (&self.contact_name, &self.contact_phone) {
            (Some(name), Some(phone)) => Some(EmergencyContact {
                name: name.clone(),
                phone: phone.clone(),
                relationship: self.contact_relationship.clone().unwrap_or_default(),
            }),
            _ => None,
        }
    }

    fn into_new_profile(self) -> NewProfile {
        NewProfile {
            emergency_contact: self.emergency_contact(),
            name: self.name,
            age: self.age,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            allergies: self.allergies,
            medications: self.medications,
            chronic_conditions: self.chronic_conditions,
        }
    }

    fn into_update(self) -> ProfileUpdate {
        fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
            (!values.is_empty()).then_some(values)
        }
        ProfileUpdate {
            emergency_contact: self.emergency_contact(),
            name: self.name,
            age: self.age,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            allergies: non_empty(self.allergies),
            medications: non_empty(self.medications),
            chronic_conditions: non_empty(self.chronic_conditions),
        }
    }
}

fn parse_risk_level(value: &str) -> Result<RiskLevel, String> {
    match value.to_ascii_lowercase().as_str() {
        "low" => Ok(RiskLevel::Low),
        "medium" => Ok(RiskLevel::Medium),
        "high" => Ok(RiskLevel::High),
        "critical" => Ok(RiskLevel::Critical),
        other => Err(format!(
            "unknown risk level `{other}` (expected low|medium|high|critical)"
        )),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(db) = cli.db {
        config.storage.db_path = db;
    }
    triage_core::init_from_config(&config.logging)
        .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;

    // Stateless commands never open the record store.
    match &cli.command {
        Commands::Chat { text } => {
            println!("{}", chat_reply(text));
            return Ok(());
        }
        Commands::Departments => {
            for info in catalog() {
                println!(
                    "{:<30} {:<16} {:?}  wait {}",
                    info.name, info.floor, info.urgency, info.waiting_room.current_wait
                );
            }
            return Ok(());
        }
        Commands::Tool { name, parameters } => {
            let parameters: serde_json::Value = serde_json::from_str(parameters)
                .with_context(|| format!("tool parameters for `{name}` are not valid JSON"))?;
            let result = dispatch(&ToolCall {
                tool_name: name.clone(),
                parameters,
            })?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }
        _ => {}
    }

    run_with_store(cli.command, &config)
}

fn run_with_store(command: Commands, config: &TriageConfig) -> anyhow::Result<()> {
    let db_path = &config.storage.db_path;
    let conn = open_db(db_path)
        .with_context(|| format!("failed to open record store `{}`", db_path.display()))?;
    let store = SqliteKvStore::new(&conn);
    let patients = PatientService::with_windows(KvPatientRepository::new(&store), config.advice);
    let now = now_epoch_ms();

    match command {
        Commands::Assess {
            text,
            record,
            notes,
            json,
        } => {
            let triage = TriageService::new(&patients);
            let report = triage.assess(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "Risk: {} ({}/100), seek care {:?}",
                    report.risk.risk_level, report.risk.risk_score, report.risk.time_to_seek
                );
                println!(
                    "Department: {} ({}), confidence {}%",
                    report.diagnosis.department, report.diagnosis.floor, report.diagnosis.confidence
                );
                println!("Keyword route: {}", report.keyword_department);
                for flag in &report.risk.red_flags {
                    println!("Red flag: {flag}");
                }
                for recommendation in &report.risk.recommendations {
                    println!("- {recommendation}");
                }
                if report.contagious {
                    println!("Please wear a mask when visiting the hospital.");
                }
            }
            if record {
                let visit = triage
                    .record_visit(&report, notes, now)
                    .context("failed to record visit")?;
                println!("Recorded visit {}", visit.id);
            }
        }
        Commands::Profile { action } => match action {
            ProfileAction::Create(fields) => {
                let profile = patients.create_profile(fields.into_new_profile(), now)?;
                print_profile(&profile)?;
            }
            ProfileAction::Show => match patients.current_profile()? {
                Some(profile) => print_profile(&profile)?,
                None => println!("No active profile."),
            },
            ProfileAction::Update(fields) => {
                let profile = patients.update_profile(fields.into_update(), now)?;
                print_profile(&profile)?;
            }
            ProfileAction::List => {
                let active = patients.current_user_id()?;
                for profile in patients.list_profiles()? {
                    let marker = if Some(profile.id) == active { "*" } else { " " };
                    println!("{marker} {} {}", profile.id, profile.name);
                }
            }
            ProfileAction::Switch { id } => {
                let id = id
                    .parse()
                    .with_context(|| format!("`{id}` is not a valid profile id"))?;
                let profile = patients.switch_user(id)?;
                println!("Active profile: {} {}", profile.id, profile.name);
            }
        },
        Commands::History => {
            println!("{}", serde_json::to_string_pretty(&patients.history()?)?);
        }
        Commands::Insights => match patients.health_insights(now)? {
            Some(insights) => println!("{}", serde_json::to_string_pretty(&insights)?),
            None => println!("No visit history yet."),
        },
        Commands::Advice { symptoms, risk } => {
            let advice = patients.personalized_advice(&symptoms, risk, now)?;
            println!("{}", serde_json::to_string_pretty(&advice)?);
        }
        Commands::Export => {
            println!("{}", patients.export_json(now)?);
        }
        Commands::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read `{}`", file.display()))?;
            let id = patients.import(&text)?;
            println!("Imported records for {id}");
        }
        Commands::Clear => {
            patients.clear()?;
            println!("Records cleared.");
        }
        Commands::Utter { transcript } => {
            let log = UtteranceLog::new(&store);
            match transcript {
                Some(text) => log.record(text, now)?,
                None => {
                    for utterance in log.recent()? {
                        println!("{} {}", utterance.timestamp, utterance.transcript);
                    }
                }
            }
        }
        Commands::Chat { .. } | Commands::Departments | Commands::Tool { .. } => {
            bail!("command does not use the record store")
        }
    }

    Ok(())
}

fn print_profile(profile: &UserProfile) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(profile)?);
    Ok(())
}
