//! Dashboard counters computed from the local lists.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use woundcare_entity::evolution::ClinicalEvolution;
use woundcare_entity::patient::Patient;
use woundcare_entity::photo::WoundPhoto;

/// Patients without an evolution in this many days count as pending.
pub const PENDING_WINDOW_DAYS: u64 = 7;

/// Counts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Registered patients.
    pub patients: usize,
    /// Evolutions dated `today`.
    pub evolutions_today: usize,
    /// Stored photos.
    pub photos: usize,
    /// Patients with no evolution in the last [`PENDING_WINDOW_DAYS`] days.
    pub pending_patients: usize,
}

impl DashboardSummary {
    /// Compute the counters as of `today`.
    pub fn compute(
        patients: &[Patient],
        evolutions: &[ClinicalEvolution],
        photos: &[WoundPhoto],
        today: NaiveDate,
    ) -> Self {
        let window_start = today
            .checked_sub_days(Days::new(PENDING_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MIN);
        let recently_seen: HashSet<Uuid> = evolutions
            .iter()
            .filter(|e| e.evolution_date >= window_start)
            .map(|e| e.patient_id)
            .collect();

        Self {
            patients: patients.len(),
            evolutions_today: evolutions
                .iter()
                .filter(|e| e.evolution_date == today)
                .count(),
            photos: photos.len(),
            pending_patients: patients
                .iter()
                .filter(|p| !recently_seen.contains(&p.id))
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveTime, Utc};
    use woundcare_entity::evolution::WoundAssessment;
    use woundcare_entity::patient::Gender;

    use super::*;

    fn patient() -> Patient {
        Patient {
            id: Uuid::new_v4(),
            professional_id: Uuid::new_v4(),
            full_name: "Maria".into(),
            birth_date: NaiveDate::from_ymd_opt(1950, 1, 1).unwrap(),
            gender: Gender::Feminino,
            phone: None,
            email: None,
            main_diagnosis: "Úlcera".into(),
            observations: None,
            responsible_name: None,
            responsible_phone: None,
            password_protected: false,
            password_hash: None,
            photo_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn evolution(patient_id: Uuid, date: NaiveDate) -> ClinicalEvolution {
        ClinicalEvolution {
            id: Uuid::new_v4(),
            patient_id,
            professional_id: Uuid::new_v4(),
            evolution_date: date,
            evolution_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            clinical_description: "ok".into(),
            procedures: None,
            observations: None,
            wound_assessment: WoundAssessment::default(),
            digital_signature: None,
            location_coordinates: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_counts() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let seen_today = patient();
        let seen_last_week = patient();
        let stale = patient();
        let never = patient();
        let evolutions = vec![
            evolution(seen_today.id, today),
            evolution(seen_last_week.id, NaiveDate::from_ymd_opt(2024, 5, 13).unwrap()),
            evolution(stale.id, NaiveDate::from_ymd_opt(2024, 5, 12).unwrap()),
        ];
        let patients = vec![seen_today, seen_last_week, stale, never];

        let summary = DashboardSummary::compute(&patients, &evolutions, &[], today);
        assert_eq!(
            summary,
            DashboardSummary {
                patients: 4,
                evolutions_today: 1,
                photos: 0,
                pending_patients: 2,
            }
        );
    }
}
