//! Submission normalization: the pure transformation from a fully validated
//! record to the payload handed to the external submission collaborator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{
    ApplicantRecord, GuardianContact, JobType, ProfilePicture, SkillEntry, WorkingHours,
};
use super::rules::{derived_age, digits_only, parse_iso_date, requires_guardian, GUARDIAN_AGE};

/// Personal section with the phone reduced to digits and the date of birth
/// parsed into a calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPersonal {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub profile_picture: Option<ProfilePicture>,
}

/// Job section with the salary parsed into a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedJob {
    pub department: String,
    pub position: String,
    pub start_date: NaiveDate,
    pub job_type: JobType,
    pub salary: f64,
    pub manager: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSkills {
    pub skills: Vec<SkillEntry>,
    pub working_hours: WorkingHours,
    pub remote_preference: u8,
    pub manager_approved: bool,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
}

/// The final submission payload: the record's sections plus the derived
/// age and minor flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub personal: NormalizedPersonal,
    pub job: NormalizedJob,
    pub skills: NormalizedSkills,
    pub emergency_contact: NormalizedEmergencyContact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_contact: Option<GuardianContact>,
    pub confirmed: bool,
    pub age: i32,
    pub is_minor: bool,
}

/// Raised when normalization meets a value step validation should have
/// already rejected.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("{field} is not a valid YYYY-MM-DD date: '{value}'")]
    UnparsableDate { field: &'static str, value: String },
    #[error("salary is not a valid amount: '{0}'")]
    UnparsableSalary(String),
}

/// Build the submission payload. Pure and idempotent for a given record and
/// date: phones keep digits only, the salary becomes numeric, and the minor
/// flag applies the guardian threshold (21), not the eligibility threshold.
pub fn normalize(
    record: &ApplicantRecord,
    today: NaiveDate,
) -> Result<SubmissionPayload, NormalizeError> {
    let date_of_birth = parse_iso_date(&record.personal.date_of_birth).ok_or_else(|| {
        NormalizeError::UnparsableDate {
            field: "date_of_birth",
            value: record.personal.date_of_birth.clone(),
        }
    })?;
    let start_date =
        parse_iso_date(&record.job.start_date).ok_or_else(|| NormalizeError::UnparsableDate {
            field: "start_date",
            value: record.job.start_date.clone(),
        })?;
    let salary = record
        .job
        .salary
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
        .ok_or_else(|| NormalizeError::UnparsableSalary(record.job.salary.clone()))?;

    let age = derived_age(&record.personal.date_of_birth, today).unwrap_or(0);
    let guardian_contact = if requires_guardian(&record.personal.date_of_birth, today) {
        record.guardian_contact.clone()
    } else {
        None
    };

    Ok(SubmissionPayload {
        personal: NormalizedPersonal {
            full_name: record.personal.full_name.clone(),
            email: record.personal.email.clone(),
            phone: digits_only(&record.personal.phone),
            date_of_birth,
            profile_picture: record.personal.profile_picture.clone(),
        },
        job: NormalizedJob {
            department: record.job.department.clone(),
            position: record.job.position.clone(),
            start_date,
            job_type: record.job.job_type,
            salary,
            manager: record.job.manager.clone(),
        },
        skills: NormalizedSkills {
            skills: record.skills.skills.clone(),
            working_hours: record.skills.working_hours.clone(),
            remote_preference: record.skills.remote_preference,
            manager_approved: record.skills.manager_approved,
            notes: record.skills.notes.clone(),
        },
        emergency_contact: NormalizedEmergencyContact {
            name: record.emergency_contact.name.clone(),
            relationship: record.emergency_contact.relationship.clone(),
            phone: digits_only(&record.emergency_contact.phone),
        },
        guardian_contact,
        confirmed: record.confirmed,
        age,
        is_minor: age < GUARDIAN_AGE,
    })
}

/// Outbound interface for the collaborator that ultimately receives the
/// payload; this crate does not define its transport.
pub trait SubmissionSink: Send + Sync {
    fn deliver(&self, payload: &SubmissionPayload) -> Result<(), SubmitError>;
}

/// Submission dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("submission transport unavailable: {0}")]
    Transport(String),
}
