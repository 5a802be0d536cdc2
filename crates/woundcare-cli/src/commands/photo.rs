//! Wound photo commands.

use std::path::PathBuf;

use bytes::Bytes;
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use crate::output::{self, OutputFormat};
use woundcare_core::error::AppError;
use woundcare_entity::photo::WoundPhoto;
use woundcare_service::PhotoDetails;

/// Arguments for photo commands
#[derive(Debug, Args)]
pub struct PhotoArgs {
    /// Photo subcommand
    #[command(subcommand)]
    pub command: PhotoCommand,
}

/// Photo subcommands
#[derive(Debug, Subcommand)]
pub enum PhotoCommand {
    /// List photos, most recent first
    List {
        /// Only photos of this patient
        #[arg(short, long)]
        patient: Option<Uuid>,
    },
    /// Upload an image and record it
    Upload {
        /// Image file to upload
        file: PathBuf,
        /// Patient ID
        #[arg(short, long)]
        patient: Uuid,
        /// Photo date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Wound type
        #[arg(long)]
        wound_type: Option<String>,
        /// Wound stage
        #[arg(long)]
        stage: Option<String>,
        /// Comments
        #[arg(long)]
        comments: Option<String>,
    },
    /// Delete a photo record (the stored image is kept)
    Delete {
        /// Photo ID
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Photo display row for table output
#[derive(Debug, Serialize, Tabled)]
struct PhotoRow {
    /// Photo ID
    id: String,
    /// Patient ID
    patient: String,
    /// Date
    date: String,
    /// Wound type
    wound_type: String,
    /// Stage
    stage: String,
    /// URL
    url: String,
}

impl From<&WoundPhoto> for PhotoRow {
    fn from(p: &WoundPhoto) -> Self {
        Self {
            id: p.id.to_string(),
            patient: p.patient_id.to_string(),
            date: p.photo_date.to_string(),
            wound_type: output::cell(&p.wound_type),
            stage: output::cell(&p.wound_stage),
            url: p.photo_url.clone(),
        }
    }
}

/// Execute photo commands
pub async fn execute(
    args: &PhotoArgs,
    config_path: &str,
    email: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (services, _context) = super::open_session(config_path, email).await?;
    let photos = &services.photos;

    match &args.command {
        PhotoCommand::List { patient } => {
            photos.refresh().await?;
            let items = match patient {
                Some(id) => photos.for_patient(*id).await,
                None => photos.list().await,
            };
            let rows: Vec<PhotoRow> = items.iter().map(PhotoRow::from).collect();
            output::print_list(&rows, format);
        }
        PhotoCommand::Upload {
            file,
            patient,
            date,
            wound_type,
            stage,
            comments,
        } => {
            let file_name = file
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| {
                    AppError::validation(format!("Invalid file path '{}'", file.display()))
                })?
                .to_string();
            let data = tokio::fs::read(file).await.map_err(|e| {
                AppError::storage(format!("Failed to read '{}': {}", file.display(), e))
            })?;

            let mut details =
                PhotoDetails::new(*patient, date.unwrap_or_else(|| Local::now().date_naive()));
            details.wound_type = wound_type.clone();
            details.wound_stage = stage.clone();
            details.comments = comments.clone();

            let photo = photos
                .upload_and_create(&file_name, Bytes::from(data), details)
                .await?;
            output::print_success(&format!("Photo uploaded (id: {})", photo.id));
            output::print_kv("URL", &photo.photo_url);
        }
        PhotoCommand::Delete { id, yes } => {
            if !yes && !super::patient::confirm(&format!("Delete photo {}?", id))? {
                output::print_warning("Aborted");
                return Ok(());
            }
            photos.delete(*id).await?;
            output::print_success(&format!("Photo {} deleted", id));
        }
    }

    Ok(())
}
