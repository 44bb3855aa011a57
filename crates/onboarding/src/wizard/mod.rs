//! Employee onboarding wizard engine.
//!
//! The aggregate [`ApplicantRecord`] is owned exclusively by the
//! [`OnboardingWizard`] state machine; field validators, section schemas,
//! and the cross-section rules are pure functions over snapshots of it.
//! Draft persistence and final submission go through the [`DraftStore`] and
//! [`SubmissionSink`] collaborator interfaces.

pub mod draft;
pub(crate) mod machine;
pub mod record;
pub mod router;
pub(crate) mod rules;
pub(crate) mod schema;
pub mod submit;
pub(crate) mod validators;

#[cfg(test)]
mod tests;

pub use draft::{DraftError, DraftStore, JsonFileDraftStore, DRAFT_KEY};
pub use machine::{
    AttachmentError, DerivedView, FieldUpdate, OnboardingWizard, StepView, UpdateError,
    WizardError, MAX_NOTES_CHARS, MAX_PROFILE_PICTURE_BYTES,
};
pub use record::{
    ApplicantRecord, EmergencyContact, GuardianContact, ImageMime, JobDetails, JobType,
    PersonalInfo, ProfilePicture, SkillEntry, SkillsPreferences, WizardStep, WorkingHours,
};
pub use router::{onboarding_router, SharedWizard};
pub use rules::{
    derived_age, digits_only, format_us_phone, requires_guardian, salary_guidance,
    DepartmentDirectory, DepartmentProfile, SalaryGuidance, ELIGIBILITY_AGE, GUARDIAN_AGE,
    START_DATE_WINDOW_DAYS,
};
pub use schema::{
    validate_emergency, validate_job, validate_personal, validate_review, validate_skills,
    validate_step,
};
pub use submit::{
    normalize, NormalizeError, NormalizedEmergencyContact, NormalizedJob, NormalizedPersonal,
    NormalizedSkills, SubmissionPayload, SubmissionSink, SubmitError,
};
pub use validators::{IssueKind, ValidationIssue};
