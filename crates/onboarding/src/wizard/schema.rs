//! Section schemas: each wizard step validates independently, producing
//! issues in field-declaration order so the first element is the failure
//! surfaced to the applicant.

use chrono::NaiveDate;

use super::record::{ApplicantRecord, WizardStep};
use super::rules::{requires_guardian, DepartmentDirectory};
use super::validators::{
    check_confirmed, check_date_of_birth, check_department, check_email, check_full_name,
    check_manager, check_phone, check_position, check_remote_preference, check_required,
    check_salary, check_skills, check_start_date, check_working_hours, IssueKind, ValidationIssue,
};

pub fn validate_step(
    step: WizardStep,
    record: &ApplicantRecord,
    directory: &DepartmentDirectory,
    today: NaiveDate,
) -> Vec<ValidationIssue> {
    match step {
        WizardStep::PersonalInfo => validate_personal(record, today),
        WizardStep::JobDetails => validate_job(record, directory, today),
        WizardStep::SkillsPreferences => validate_skills(record),
        WizardStep::EmergencyContact => validate_emergency(record, today),
        WizardStep::ReviewSubmit => validate_review(record),
    }
}

pub fn validate_personal(record: &ApplicantRecord, today: NaiveDate) -> Vec<ValidationIssue> {
    let personal = &record.personal;
    [
        check_full_name(&personal.full_name),
        check_email(&personal.email),
        check_phone(&personal.phone),
        check_date_of_birth(&personal.date_of_birth, today),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn validate_job(
    record: &ApplicantRecord,
    directory: &DepartmentDirectory,
    today: NaiveDate,
) -> Vec<ValidationIssue> {
    let job = &record.job;
    [
        check_department(&job.department),
        check_position(&job.position),
        check_start_date(&job.start_date, today),
        check_salary(&job.salary),
        check_manager(&job.manager, &job.department, directory),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn validate_skills(record: &ApplicantRecord) -> Vec<ValidationIssue> {
    let skills = &record.skills;
    let mut issues = check_skills(&skills.skills);
    issues.extend(check_working_hours(&skills.working_hours));
    issues.extend(check_remote_preference(skills.remote_preference));
    issues
}

pub fn validate_emergency(record: &ApplicantRecord, today: NaiveDate) -> Vec<ValidationIssue> {
    let contact = &record.emergency_contact;
    let mut issues: Vec<ValidationIssue> = [
        check_required(
            "emergency_contact",
            &contact.name,
            "Emergency contact name is required",
        ),
        check_required(
            "emergency_contact",
            &contact.relationship,
            "Relationship is required",
        ),
        check_required(
            "emergency_contact",
            &contact.phone,
            "Emergency contact phone is required",
        ),
    ]
    .into_iter()
    .flatten()
    .collect();

    if requires_guardian(&record.personal.date_of_birth, today) && !guardian_complete(record) {
        issues.push(ValidationIssue::new(
            "guardian_contact",
            IssueKind::RelationalError,
            "Guardian contact is required for employees under 21",
        ));
    }

    issues
}

fn guardian_complete(record: &ApplicantRecord) -> bool {
    record
        .guardian_contact
        .as_ref()
        .map(|guardian| !guardian.name.trim().is_empty() && !guardian.phone.trim().is_empty())
        .unwrap_or(false)
}

pub fn validate_review(record: &ApplicantRecord) -> Vec<ValidationIssue> {
    check_confirmed(record.confirmed).into_iter().collect()
}
