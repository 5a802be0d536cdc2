//! All services wired to one gateway and one session.

use chrono::NaiveDate;

use woundcare_auth::SessionManager;
use woundcare_core::config::StorageConfig;
use woundcare_core::result::AppResult;
use woundcare_gateway::Gateway;

use crate::admin::AdminService;
use crate::dashboard::DashboardSummary;
use crate::evolution::EvolutionService;
use crate::patient::PatientService;
use crate::photo::WoundPhotoService;
use crate::professional::ProfessionalService;

/// Services sharing a gateway, so a sign-in is seen by all of them.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub sessions: SessionManager,
    pub professionals: ProfessionalService,
    pub patients: PatientService,
    pub evolutions: EvolutionService,
    pub photos: WoundPhotoService,
    pub admin: AdminService,
}

impl AppServices {
    /// Wire every service to `gateway`. Nothing is fetched yet.
    pub fn new(gateway: &Gateway, storage: StorageConfig) -> Self {
        let sessions = SessionManager::new(gateway.auth.clone());
        Self {
            professionals: ProfessionalService::new(gateway.tables.clone(), sessions.clone()),
            patients: PatientService::new(gateway.tables.clone(), sessions.clone()),
            evolutions: EvolutionService::new(gateway.tables.clone(), sessions.clone()),
            photos: WoundPhotoService::new(
                gateway.tables.clone(),
                gateway.storage.clone(),
                sessions.clone(),
                storage,
            ),
            admin: AdminService::new(gateway.tables.clone(), sessions.clone()),
            sessions,
        }
    }

    /// Fetch the patient, evolution and photo lists and summarize them.
    pub async fn dashboard(&self, today: NaiveDate) -> AppResult<DashboardSummary> {
        let (patients, evolutions, photos) = tokio::try_join!(
            self.patients.refresh(),
            self.evolutions.refresh(),
            self.photos.refresh(),
        )?;
        Ok(DashboardSummary::compute(
            &patients,
            &evolutions,
            &photos,
            today,
        ))
    }
}
