//! Clinical evolution commands.

use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use crate::output::{self, OutputFormat};
use woundcare_core::error::{AppError, ErrorKind};
use woundcare_entity::evolution::{
    ClinicalEvolution, Material, NewEvolution, NewMaterial, WoundAssessment,
};

/// Arguments for evolution commands
#[derive(Debug, Args)]
pub struct EvolutionArgs {
    /// Evolution subcommand
    #[command(subcommand)]
    pub command: EvolutionCommand,
}

/// Evolution subcommands
#[derive(Debug, Subcommand)]
pub enum EvolutionCommand {
    /// List evolutions, most recent date first
    List {
        /// Only evolutions of this patient
        #[arg(short, long)]
        patient: Option<Uuid>,
    },
    /// Record an evolution
    Create {
        /// Patient ID
        #[arg(short, long)]
        patient: Uuid,
        /// Clinical description
        #[arg(short, long)]
        description: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Time (HH:MM:SS), defaults to now
        #[arg(long)]
        time: Option<NaiveTime>,
        /// Procedures performed
        #[arg(long)]
        procedures: Option<String>,
        /// Observations
        #[arg(long)]
        observations: Option<String>,
        /// Odor present
        #[arg(long)]
        odor: bool,
        /// Exudate present
        #[arg(long)]
        exudate: bool,
        /// Compromised edges
        #[arg(long)]
        edges: bool,
        /// Depth observed
        #[arg(long)]
        depth: bool,
        /// Material used, as NAME:QUANTITY[:BATCH] (repeatable)
        #[arg(short, long = "material", value_parser = parse_material)]
        materials: Vec<NewMaterial>,
    },
    /// List the materials recorded with an evolution
    Materials {
        /// Evolution ID
        id: Uuid,
    },
    /// Delete an evolution
    Delete {
        /// Evolution ID
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Evolution display row for table output
#[derive(Debug, Serialize, Tabled)]
struct EvolutionRow {
    /// Evolution ID
    id: String,
    /// Patient ID
    patient: String,
    /// Date
    date: String,
    /// Time
    time: String,
    /// Findings
    findings: String,
    /// Description
    description: String,
}

impl From<&ClinicalEvolution> for EvolutionRow {
    fn from(e: &ClinicalEvolution) -> Self {
        let findings = e.wound_assessment.findings();
        Self {
            id: e.id.to_string(),
            patient: e.patient_id.to_string(),
            date: e.evolution_date.to_string(),
            time: e.evolution_time.format("%H:%M").to_string(),
            findings: if findings.is_empty() {
                "-".to_string()
            } else {
                findings.join(", ")
            },
            description: e.clinical_description.clone(),
        }
    }
}

/// Material display row for table output
#[derive(Debug, Serialize, Tabled)]
struct MaterialRow {
    /// Material name
    name: String,
    /// Quantity
    quantity: String,
    /// Batch
    batch: String,
}

impl From<&Material> for MaterialRow {
    fn from(m: &Material) -> Self {
        Self {
            name: m.name.clone(),
            quantity: m.quantity.clone(),
            batch: output::cell(&m.batch),
        }
    }
}

/// Execute evolution commands
pub async fn execute(
    args: &EvolutionArgs,
    config_path: &str,
    email: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (services, _context) = super::open_session(config_path, email).await?;
    let evolutions = &services.evolutions;

    match &args.command {
        EvolutionCommand::List { patient } => {
            evolutions.refresh().await?;
            let items = match patient {
                Some(id) => evolutions.for_patient(*id).await,
                None => evolutions.list().await,
            };
            let rows: Vec<EvolutionRow> = items.iter().map(EvolutionRow::from).collect();
            output::print_list(&rows, format);
        }
        EvolutionCommand::Create {
            patient,
            description,
            date,
            time,
            procedures,
            observations,
            odor,
            exudate,
            edges,
            depth,
            materials,
        } => {
            let now = Local::now();
            let time = time.unwrap_or_else(|| now.time().with_nanosecond(0).unwrap_or(now.time()));
            let mut payload = NewEvolution::new(
                *patient,
                date.unwrap_or_else(|| now.date_naive()),
                time,
                description.clone(),
            );
            payload.procedures = procedures.clone();
            payload.observations = observations.clone();
            payload.wound_assessment = WoundAssessment {
                odor: *odor,
                exudate: *exudate,
                edges: *edges,
                depth: *depth,
            };
            payload.materials = materials.clone();

            match evolutions.create(payload).await {
                Ok(evolution) => output::print_success(&format!(
                    "Evolution recorded for {} (id: {})",
                    evolution.evolution_date, evolution.id
                )),
                Err(e) if e.kind == ErrorKind::PartialWrite => {
                    output::print_warning(&format!(
                        "Evolution saved, but its materials were not: {}",
                        e.message
                    ));
                    return Err(e);
                }
                Err(e) => return Err(e),
            }
        }
        EvolutionCommand::Materials { id } => {
            let rows: Vec<MaterialRow> = evolutions
                .materials(*id)
                .await?
                .iter()
                .map(MaterialRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        EvolutionCommand::Delete { id, yes } => {
            if !yes && !super::patient::confirm(&format!("Delete evolution {}?", id))? {
                output::print_warning("Aborted");
                return Ok(());
            }
            evolutions.delete(*id).await?;
            output::print_success(&format!("Evolution {} deleted", id));
        }
    }

    Ok(())
}

/// Parse `NAME:QUANTITY[:BATCH]`.
fn parse_material(s: &str) -> Result<NewMaterial, String> {
    let mut parts = s.splitn(3, ':').map(str::trim);
    let name = parts.next().unwrap_or_default();
    if name.is_empty() {
        return Err("material name is required".to_string());
    }
    let quantity = parts.next().unwrap_or_default();
    let batch = parts.next().filter(|b| !b.is_empty()).map(str::to_string);
    Ok(NewMaterial::new(name, quantity, batch))
}
