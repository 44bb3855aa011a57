use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::wizard::draft::{DraftError, DraftStore, DRAFT_KEY};
use crate::wizard::machine::OnboardingWizard;
use crate::wizard::record::{
    ApplicantRecord, EmergencyContact, JobType, SkillEntry, WizardStep,
};
use crate::wizard::submit::{SubmissionPayload, SubmissionSink, SubmitError};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

/// Date of birth putting the applicant just under the guardian threshold.
pub(super) fn minor_date_of_birth() -> &'static str {
    // Turns 21 on 2026-06-16; age 19 on the fixed evaluation date.
    "2005-06-16"
}

pub(super) fn adult_date_of_birth() -> &'static str {
    "1990-04-12"
}

pub(super) fn valid_record() -> ApplicantRecord {
    let mut record = ApplicantRecord::default();
    record.personal.full_name = "Avery Johnson".to_string();
    record.personal.email = "avery.johnson@example.com".to_string();
    record.personal.phone = "+1-202-555-0123".to_string();
    record.personal.date_of_birth = adult_date_of_birth().to_string();

    record.job.department = "Engineering".to_string();
    record.job.position = "Software Engineer".to_string();
    record.job.start_date = "2025-06-29".to_string();
    record.job.job_type = JobType::FullTime;
    record.job.salary = "90000".to_string();
    record.job.manager = "Sarah Chen".to_string();

    record.skills.skills = vec![
        SkillEntry {
            skill: "React".to_string(),
            experience: "3 years".to_string(),
        },
        SkillEntry {
            skill: "SQL".to_string(),
            experience: "4 years".to_string(),
        },
        SkillEntry {
            skill: "Docker".to_string(),
            experience: "2 years".to_string(),
        },
    ];

    record.emergency_contact = EmergencyContact {
        name: "Jordan Johnson".to_string(),
        relationship: "Spouse".to_string(),
        phone: "+1-202-555-0188".to_string(),
    };

    record.confirmed = true;
    record
}

#[derive(Default)]
pub(super) struct MemoryDraftStore {
    entries: Mutex<HashMap<String, String>>,
    saves: Mutex<usize>,
}

impl MemoryDraftStore {
    pub(super) fn seeded(draft: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .lock()
            .expect("draft mutex poisoned")
            .insert(DRAFT_KEY.to_string(), draft.to_string());
        store
    }

    pub(super) fn stored(&self) -> Option<String> {
        self.entries
            .lock()
            .expect("draft mutex poisoned")
            .get(DRAFT_KEY)
            .cloned()
    }

    pub(super) fn save_count(&self) -> usize {
        *self.saves.lock().expect("draft mutex poisoned")
    }
}

impl DraftStore for MemoryDraftStore {
    fn save(&self, key: &str, draft: &str) -> Result<(), DraftError> {
        *self.saves.lock().expect("draft mutex poisoned") += 1;
        self.entries
            .lock()
            .expect("draft mutex poisoned")
            .insert(key.to_string(), draft.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, DraftError> {
        Ok(self
            .entries
            .lock()
            .expect("draft mutex poisoned")
            .get(key)
            .cloned())
    }

    fn clear(&self, key: &str) -> Result<(), DraftError> {
        self.entries
            .lock()
            .expect("draft mutex poisoned")
            .remove(key);
        Ok(())
    }
}

pub(super) struct UnavailableDraftStore;

impl DraftStore for UnavailableDraftStore {
    fn save(&self, _key: &str, _draft: &str) -> Result<(), DraftError> {
        Err(DraftError::Unavailable("storage offline".to_string()))
    }

    fn load(&self, _key: &str) -> Result<Option<String>, DraftError> {
        Err(DraftError::Unavailable("storage offline".to_string()))
    }

    fn clear(&self, _key: &str) -> Result<(), DraftError> {
        Err(DraftError::Unavailable("storage offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct RecordingSink {
    deliveries: Mutex<Vec<SubmissionPayload>>,
}

impl RecordingSink {
    pub(super) fn deliveries(&self) -> Vec<SubmissionPayload> {
        self.deliveries.lock().expect("sink mutex poisoned").clone()
    }
}

impl SubmissionSink for RecordingSink {
    fn deliver(&self, payload: &SubmissionPayload) -> Result<(), SubmitError> {
        self.deliveries
            .lock()
            .expect("sink mutex poisoned")
            .push(payload.clone());
        Ok(())
    }
}

pub(super) struct FailingSink;

impl SubmissionSink for FailingSink {
    fn deliver(&self, _payload: &SubmissionPayload) -> Result<(), SubmitError> {
        Err(SubmitError::Transport("endpoint unreachable".to_string()))
    }
}

pub(super) fn build_wizard() -> (
    OnboardingWizard<MemoryDraftStore, RecordingSink>,
    Arc<MemoryDraftStore>,
    Arc<RecordingSink>,
) {
    let drafts = Arc::new(MemoryDraftStore::default());
    let sink = Arc::new(RecordingSink::default());
    let wizard = OnboardingWizard::new(drafts.clone(), sink.clone());
    (wizard, drafts, sink)
}

/// A wizard pre-seeded with a complete, valid record and walked forward to
/// the review step.
pub(super) fn wizard_on_review_step() -> (
    OnboardingWizard<MemoryDraftStore, RecordingSink>,
    Arc<MemoryDraftStore>,
    Arc<RecordingSink>,
) {
    let draft = serde_json::to_string(&valid_record()).expect("record serializes");
    let drafts = Arc::new(MemoryDraftStore::seeded(&draft));
    let sink = Arc::new(RecordingSink::default());
    let mut wizard = OnboardingWizard::new(drafts.clone(), sink.clone());
    for _ in 0..4 {
        wizard.advance(today()).expect("valid step advances");
    }
    assert_eq!(wizard.current_step(), WizardStep::ReviewSubmit);
    (wizard, drafts, sink)
}
