//! The wizard state machine: owns the aggregate record, governs step
//! transitions, applies cross-section side effects on every field update,
//! and drives draft persistence and final submission.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::draft::{DraftStore, DRAFT_KEY};
use super::record::{
    ApplicantRecord, GuardianContact, ImageMime, JobType, ProfilePicture, SkillEntry, WizardStep,
};
use super::rules::{
    derived_age, format_us_phone, requires_guardian, salary_guidance, DepartmentDirectory,
    SalaryGuidance,
};
use super::schema::validate_step;
use super::submit::{normalize, NormalizeError, SubmissionPayload, SubmissionSink, SubmitError};
use super::validators::ValidationIssue;

/// Maximum accepted profile picture size.
pub const MAX_PROFILE_PICTURE_BYTES: u64 = 2 * 1024 * 1024;

/// Maximum accepted length of the free-text notes, in characters.
pub const MAX_NOTES_CHARS: usize = 500;

/// Typed field mutation applied through [`OnboardingWizard::update_field`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum FieldUpdate {
    FullName { value: String },
    Email { value: String },
    Phone { value: String },
    DateOfBirth { value: String },
    Department { value: String },
    Position { value: String },
    StartDate { value: String },
    JobType { value: JobType },
    Salary { value: String },
    Manager { value: String },
    AddSkill { skill: String, experience: String },
    RemoveSkill { skill: String },
    SkillExperience { skill: String, experience: String },
    WorkingHoursStart { value: String },
    WorkingHoursEnd { value: String },
    RemotePreference { value: u8 },
    ManagerApproved { value: bool },
    Notes { value: String },
    EmergencyName { value: String },
    EmergencyRelationship { value: String },
    EmergencyPhone { value: String },
    GuardianName { value: String },
    GuardianPhone { value: String },
    Confirmed { value: bool },
}

impl FieldUpdate {
    /// The step whose schema covers the updated field.
    pub const fn owning_step(&self) -> WizardStep {
        match self {
            Self::FullName { .. }
            | Self::Email { .. }
            | Self::Phone { .. }
            | Self::DateOfBirth { .. } => WizardStep::PersonalInfo,
            Self::Department { .. }
            | Self::Position { .. }
            | Self::StartDate { .. }
            | Self::JobType { .. }
            | Self::Salary { .. }
            | Self::Manager { .. } => WizardStep::JobDetails,
            Self::AddSkill { .. }
            | Self::RemoveSkill { .. }
            | Self::SkillExperience { .. }
            | Self::WorkingHoursStart { .. }
            | Self::WorkingHoursEnd { .. }
            | Self::RemotePreference { .. }
            | Self::ManagerApproved { .. }
            | Self::Notes { .. } => WizardStep::SkillsPreferences,
            Self::EmergencyName { .. }
            | Self::EmergencyRelationship { .. }
            | Self::EmergencyPhone { .. }
            | Self::GuardianName { .. }
            | Self::GuardianPhone { .. } => WizardStep::EmergencyContact,
            Self::Confirmed { .. } => WizardStep::ReviewSubmit,
        }
    }
}

/// Rejection of a single field update; the record is left unchanged.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("notes are limited to {MAX_NOTES_CHARS} characters (got {length})")]
    NotesTooLong { length: usize },
    #[error("the form has already been submitted")]
    AlreadySubmitted,
}

/// Rejection of a profile picture at the point of attachment.
#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("profile picture must be a JPG or PNG file (got '{found}')")]
    UnsupportedType { found: String },
    #[error("profile picture must be {MAX_PROFILE_PICTURE_BYTES} bytes or smaller (got {size})")]
    TooLarge { size: u64 },
}

/// Error raised by step transitions and submission.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("{0}")]
    Invalid(ValidationIssue),
    #[error("submission is only available from the review step")]
    NotOnReviewStep,
    #[error("the form has already been submitted")]
    AlreadySubmitted,
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error(transparent)]
    Submission(#[from] SubmitError),
}

/// Derived display values recomputed for every view, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedView {
    pub age: Option<i32>,
    pub guardian_required: bool,
    pub manager_options: Vec<&'static str>,
    pub skill_suggestions: Vec<&'static str>,
    pub salary_guidance: SalaryGuidance,
}

/// Snapshot handed to the rendering layer for the current step.
#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub step: WizardStep,
    pub step_number: u8,
    pub step_label: &'static str,
    pub step_description: &'static str,
    pub progress_pct: u8,
    pub submitted: bool,
    pub issues: Vec<ValidationIssue>,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub unsaved_changes: bool,
    pub derived: DerivedView,
    pub record: ApplicantRecord,
}

/// The wizard session. All mutations run to completion before the next is
/// accepted; callers needing shared access wrap the session in a mutex.
pub struct OnboardingWizard<D, S> {
    record: ApplicantRecord,
    step: WizardStep,
    submitted: bool,
    step_validity: BTreeMap<WizardStep, bool>,
    directory: DepartmentDirectory,
    drafts: Arc<D>,
    sink: Arc<S>,
    unsaved_changes: bool,
}

impl<D, S> OnboardingWizard<D, S>
where
    D: DraftStore,
    S: SubmissionSink,
{
    pub fn new(drafts: Arc<D>, sink: Arc<S>) -> Self {
        Self::with_directory(DepartmentDirectory::standard(), drafts, sink)
    }

    pub fn with_directory(
        directory: DepartmentDirectory,
        drafts: Arc<D>,
        sink: Arc<S>,
    ) -> Self {
        let record = restore_record(drafts.as_ref());
        Self {
            record,
            step: WizardStep::PersonalInfo,
            submitted: false,
            step_validity: BTreeMap::new(),
            directory,
            drafts,
            sink,
            unsaved_changes: false,
        }
    }

    pub fn record(&self) -> &ApplicantRecord {
        &self.record
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    pub fn cached_validity(&self, step: WizardStep) -> Option<bool> {
        self.step_validity.get(&step).copied()
    }

    /// Apply a single field mutation, run the dependent cross-section side
    /// effects, and write the draft through to the store.
    pub fn update_field(&mut self, update: FieldUpdate) -> Result<(), UpdateError> {
        if self.submitted {
            return Err(UpdateError::AlreadySubmitted);
        }

        let owning_step = update.owning_step();
        let changed = self.apply(update)?;
        if !changed {
            return Ok(());
        }

        self.invalidate(owning_step);
        self.persist();
        Ok(())
    }

    fn apply(&mut self, update: FieldUpdate) -> Result<bool, UpdateError> {
        let record = &mut self.record;
        let changed = match update {
            FieldUpdate::FullName { value } => replace(&mut record.personal.full_name, value),
            FieldUpdate::Email { value } => replace(&mut record.personal.email, value),
            FieldUpdate::Phone { value } => {
                replace(&mut record.personal.phone, format_us_phone(&value))
            }
            FieldUpdate::DateOfBirth { value } => {
                let changed = replace(&mut record.personal.date_of_birth, value);
                if changed {
                    // The guardian requirement depends on this field.
                    self.step_validity.remove(&WizardStep::EmergencyContact);
                }
                changed
            }
            FieldUpdate::Department { value } => {
                let changed = replace(&mut record.job.department, value);
                if changed {
                    record.job.manager.clear();
                }
                changed
            }
            FieldUpdate::Position { value } => replace(&mut record.job.position, value),
            FieldUpdate::StartDate { value } => replace(&mut record.job.start_date, value),
            FieldUpdate::JobType { value } => {
                if record.job.job_type == value {
                    false
                } else {
                    record.job.job_type = value;
                    record.job.salary.clear();
                    true
                }
            }
            FieldUpdate::Salary { value } => replace(&mut record.job.salary, value),
            FieldUpdate::Manager { value } => replace(&mut record.job.manager, value),
            FieldUpdate::AddSkill { skill, experience } => {
                let exists = record
                    .skills
                    .skills
                    .iter()
                    .any(|entry| entry.skill == skill);
                if exists || skill.trim().is_empty() {
                    false
                } else {
                    record.skills.skills.push(SkillEntry { skill, experience });
                    true
                }
            }
            FieldUpdate::RemoveSkill { skill } => {
                let before = record.skills.skills.len();
                record.skills.skills.retain(|entry| entry.skill != skill);
                record.skills.skills.len() != before
            }
            FieldUpdate::SkillExperience { skill, experience } => {
                match record
                    .skills
                    .skills
                    .iter_mut()
                    .find(|entry| entry.skill == skill)
                {
                    Some(entry) if entry.experience != experience => {
                        entry.experience = experience;
                        true
                    }
                    _ => false,
                }
            }
            FieldUpdate::WorkingHoursStart { value } => {
                replace(&mut record.skills.working_hours.start, value)
            }
            FieldUpdate::WorkingHoursEnd { value } => {
                replace(&mut record.skills.working_hours.end, value)
            }
            FieldUpdate::RemotePreference { value } => {
                if record.skills.remote_preference == value {
                    false
                } else {
                    record.skills.remote_preference = value;
                    if value <= 50 {
                        // Approval is only meaningful above the 50% mark.
                        record.skills.manager_approved = false;
                    }
                    true
                }
            }
            FieldUpdate::ManagerApproved { value } => {
                if record.skills.manager_approved == value {
                    false
                } else {
                    record.skills.manager_approved = value;
                    true
                }
            }
            FieldUpdate::Notes { value } => {
                let length = value.chars().count();
                if length > MAX_NOTES_CHARS {
                    return Err(UpdateError::NotesTooLong { length });
                }
                replace(&mut record.skills.notes, value)
            }
            FieldUpdate::EmergencyName { value } => {
                replace(&mut record.emergency_contact.name, value)
            }
            FieldUpdate::EmergencyRelationship { value } => {
                replace(&mut record.emergency_contact.relationship, value)
            }
            FieldUpdate::EmergencyPhone { value } => {
                replace(&mut record.emergency_contact.phone, value)
            }
            FieldUpdate::GuardianName { value } => {
                let guardian = record
                    .guardian_contact
                    .get_or_insert_with(GuardianContact::default);
                replace(&mut guardian.name, value)
            }
            FieldUpdate::GuardianPhone { value } => {
                let guardian = record
                    .guardian_contact
                    .get_or_insert_with(GuardianContact::default);
                replace(&mut guardian.phone, value)
            }
            FieldUpdate::Confirmed { value } => {
                if record.confirmed == value {
                    false
                } else {
                    record.confirmed = value;
                    true
                }
            }
        };
        Ok(changed)
    }

    /// Validate and attach a profile picture reference. A rejection is a
    /// local synchronous check, not a schema failure.
    pub fn attach_profile_picture(
        &mut self,
        file_name: impl Into<String>,
        content_type: &str,
        byte_size: u64,
    ) -> Result<(), AttachmentError> {
        let mime = match content_type.parse::<mime::Mime>() {
            Ok(parsed) if parsed.type_() == mime::IMAGE && parsed.subtype() == mime::JPEG => {
                ImageMime::Jpeg
            }
            Ok(parsed) if parsed.type_() == mime::IMAGE && parsed.subtype() == mime::PNG => {
                ImageMime::Png
            }
            _ => {
                return Err(AttachmentError::UnsupportedType {
                    found: content_type.to_string(),
                })
            }
        };
        if byte_size > MAX_PROFILE_PICTURE_BYTES {
            return Err(AttachmentError::TooLarge { size: byte_size });
        }

        self.record.personal.profile_picture = Some(ProfilePicture {
            file_name: file_name.into(),
            mime,
            byte_size,
        });
        self.invalidate(WizardStep::PersonalInfo);
        self.persist();
        Ok(())
    }

    /// Validate the current step and move forward when it passes. A failing
    /// step leaves the position unchanged and surfaces the first issue.
    pub fn advance(&mut self, today: NaiveDate) -> Result<WizardStep, WizardError> {
        if self.submitted {
            return Err(WizardError::AlreadySubmitted);
        }

        let issues = validate_step(self.step, &self.record, &self.directory, today);
        self.step_validity.insert(self.step, issues.is_empty());
        if let Some(first) = issues.into_iter().next() {
            return Err(WizardError::Invalid(first));
        }

        self.step = self.step.next();
        Ok(self.step)
    }

    /// Move backward unconditionally; backward navigation is never blocked.
    pub fn retreat(&mut self) -> WizardStep {
        if !self.submitted {
            self.step = self.step.back();
        }
        self.step
    }

    /// Final submission, only available from the review step: every step is
    /// re-validated live in order, the payload is normalized and handed to
    /// the submission collaborator, and the draft is cleared.
    pub fn submit(&mut self, today: NaiveDate) -> Result<SubmissionPayload, WizardError> {
        if self.submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        if self.step != WizardStep::ReviewSubmit {
            return Err(WizardError::NotOnReviewStep);
        }

        for step in WizardStep::ordered() {
            let issues = validate_step(step, &self.record, &self.directory, today);
            self.step_validity.insert(step, issues.is_empty());
            if let Some(first) = issues.into_iter().next() {
                return Err(WizardError::Invalid(first));
            }
        }

        let payload = normalize(&self.record, today)?;
        self.sink.deliver(&payload)?;

        if let Err(err) = self.drafts.clear(DRAFT_KEY) {
            warn!(%err, "failed to clear onboarding draft after submission");
        }
        self.submitted = true;
        self.unsaved_changes = false;
        info!(age = payload.age, "onboarding form submitted");
        Ok(payload)
    }

    /// Assemble the rendering snapshot for the current step.
    pub fn step_view(&self, today: NaiveDate) -> StepView {
        let department = self.record.job.department.as_str();
        let derived = DerivedView {
            age: derived_age(&self.record.personal.date_of_birth, today),
            guardian_required: requires_guardian(&self.record.personal.date_of_birth, today),
            manager_options: self.directory.managers_for(department).to_vec(),
            skill_suggestions: self.directory.skill_suggestions_for(department).to_vec(),
            salary_guidance: salary_guidance(self.record.job.job_type),
        };

        StepView {
            step: self.step,
            step_number: self.step.number(),
            step_label: self.step.label(),
            step_description: self.step.description(),
            progress_pct: (self.step.number() as u16 * 100 / WizardStep::ordered().len() as u16)
                as u8,
            submitted: self.submitted,
            issues: validate_step(self.step, &self.record, &self.directory, today),
            can_advance: !self.submitted && self.step != WizardStep::ReviewSubmit,
            can_retreat: !self.submitted && self.step != WizardStep::PersonalInfo,
            unsaved_changes: self.unsaved_changes,
            derived,
            record: self.record.clone(),
        }
    }

    fn invalidate(&mut self, step: WizardStep) {
        self.step_validity.remove(&step);
    }

    fn persist(&mut self) {
        let draft = match serde_json::to_string(&self.record) {
            Ok(draft) => draft,
            Err(err) => {
                warn!(%err, "failed to serialize onboarding draft");
                self.unsaved_changes = true;
                return;
            }
        };
        match self.drafts.save(DRAFT_KEY, &draft) {
            Ok(()) => self.unsaved_changes = false,
            Err(err) => {
                warn!(%err, "failed to autosave onboarding draft");
                self.unsaved_changes = true;
            }
        }
    }
}

fn restore_record<D: DraftStore>(drafts: &D) -> ApplicantRecord {
    match drafts.load(DRAFT_KEY) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(record) => {
                info!("restored in-progress onboarding draft");
                record
            }
            Err(err) => {
                warn!(%err, "discarding unreadable onboarding draft");
                ApplicantRecord::default()
            }
        },
        Ok(None) => ApplicantRecord::default(),
        Err(err) => {
            warn!(%err, "draft store unavailable, starting from an empty form");
            ApplicantRecord::default()
        }
    }
}

fn replace(slot: &mut String, value: String) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
