//! Patient record commands.

use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use crate::output::{self, OutputFormat};
use woundcare_core::error::AppError;
use woundcare_entity::patient::{Gender, NewPatient, Patient, PatientUpdate};

/// Arguments for patient commands
#[derive(Debug, Args)]
pub struct PatientArgs {
    /// Patient subcommand
    #[command(subcommand)]
    pub command: PatientCommand,
}

/// Patient subcommands
#[derive(Debug, Subcommand)]
pub enum PatientCommand {
    /// List your patients, newest first
    List {
        /// Only names containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Register a patient
    Create {
        /// Full name
        #[arg(long)]
        name: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        birth_date: NaiveDate,
        /// Gender: masculino, feminino or outro
        #[arg(long)]
        gender: Gender,
        /// Main diagnosis
        #[arg(long)]
        diagnosis: String,
        /// Phone
        #[arg(long)]
        phone: Option<String>,
        /// Email
        #[arg(long)]
        contact_email: Option<String>,
        /// Observations
        #[arg(long)]
        observations: Option<String>,
        /// Responsible person's name
        #[arg(long)]
        responsible_name: Option<String>,
        /// Responsible person's phone
        #[arg(long)]
        responsible_phone: Option<String>,
        /// Protect the record with an access password (prompted)
        #[arg(long)]
        protect: bool,
    },
    /// Update patient fields
    Update {
        /// Patient ID
        id: Uuid,
        /// Full name
        #[arg(long)]
        name: Option<String>,
        /// Main diagnosis
        #[arg(long)]
        diagnosis: Option<String>,
        /// Phone
        #[arg(long)]
        phone: Option<String>,
        /// Observations
        #[arg(long)]
        observations: Option<String>,
    },
    /// Delete a patient
    Delete {
        /// Patient ID
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Check a protected patient's access password
    Verify {
        /// Patient ID
        id: Uuid,
    },
}

/// Patient display row for table output
#[derive(Debug, Serialize, Tabled)]
struct PatientRow {
    /// Patient ID
    id: String,
    /// Name
    name: String,
    /// Age
    age: u32,
    /// Gender
    gender: String,
    /// Diagnosis
    diagnosis: String,
    /// Protected
    protected: String,
}

impl PatientRow {
    fn from_patient(patient: &Patient, today: NaiveDate) -> Self {
        Self {
            id: patient.id.to_string(),
            name: patient.full_name.clone(),
            age: patient.age_on(today),
            gender: patient.gender.to_string(),
            diagnosis: patient.main_diagnosis.clone(),
            protected: if patient.password_protected { "yes" } else { "no" }.to_string(),
        }
    }
}

/// Execute patient commands
pub async fn execute(
    args: &PatientArgs,
    config_path: &str,
    email: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (services, _context) = super::open_session(config_path, email).await?;
    let patients = &services.patients;

    match &args.command {
        PatientCommand::List { search } => {
            let today = Local::now().date_naive();
            let rows: Vec<PatientRow> = patients
                .refresh()
                .await?
                .iter()
                .filter(|p| name_matches(p, search.as_deref()))
                .map(|p| PatientRow::from_patient(p, today))
                .collect();
            output::print_list(&rows, format);
        }
        PatientCommand::Create {
            name,
            birth_date,
            gender,
            diagnosis,
            phone,
            contact_email,
            observations,
            responsible_name,
            responsible_phone,
            protect,
        } => {
            let mut payload = NewPatient::new(name.clone(), *birth_date, *gender, diagnosis.clone());
            payload.phone = phone.clone();
            payload.email = contact_email.clone();
            payload.observations = observations.clone();
            payload.responsible_name = responsible_name.clone();
            payload.responsible_phone = responsible_phone.clone();
            if *protect {
                let password = dialoguer::Password::new()
                    .with_prompt("Patient access password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
                payload = payload.protect_with(password);
            }

            let patient = patients.create(payload).await?;
            output::print_success(&format!(
                "Patient '{}' registered (id: {})",
                patient.full_name, patient.id
            ));
        }
        PatientCommand::Update {
            id,
            name,
            diagnosis,
            phone,
            observations,
        } => {
            let update = PatientUpdate {
                full_name: name.clone(),
                main_diagnosis: diagnosis.clone(),
                phone: phone.clone(),
                observations: observations.clone(),
                ..PatientUpdate::default()
            };
            let patient = patients.update(*id, update).await?;
            output::print_success(&format!("Patient '{}' updated", patient.full_name));
        }
        PatientCommand::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete patient {}?", id))? {
                output::print_warning("Aborted");
                return Ok(());
            }
            patients.delete(*id).await?;
            output::print_success(&format!("Patient {} deleted", id));
        }
        PatientCommand::Verify { id } => {
            let password = super::prompt_password("Patient access password")?;
            if patients.verify_access(*id, &password).await? {
                output::print_success("Access granted");
            } else {
                return Err(AppError::authorization("Incorrect patient access password"));
            }
        }
    }

    Ok(())
}

fn name_matches(patient: &Patient, search: Option<&str>) -> bool {
    match search {
        Some(term) => patient
            .full_name
            .to_lowercase()
            .contains(&term.to_lowercase()),
        None => true,
    }
}

pub(crate) fn confirm(prompt: &str) -> Result<bool, AppError> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))
}
