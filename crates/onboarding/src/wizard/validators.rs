//! Per-field validation predicates. Each check is a pure function of the
//! value (plus sibling context where a rule is relational) returning the
//! first issue it finds, or `None` when the value passes.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::record::{SkillEntry, WorkingHours};
use super::rules::{
    derived_age, digits_only, parse_iso_date, DepartmentDirectory, ELIGIBILITY_AGE,
    START_DATE_WINDOW_DAYS,
};

/// Classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    RequiredField,
    FormatError,
    RangeError,
    RelationalError,
}

impl IssueKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::RequiredField => "Required Field",
            Self::FormatError => "Format Error",
            Self::RangeError => "Range Error",
            Self::RelationalError => "Relational Error",
        }
    }
}

/// One failing rule, attributed to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub kind: IssueKind,
    pub message: String,
}

impl ValidationIssue {
    pub(crate) fn new(field: &'static str, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub(crate) fn check_full_name(value: &str) -> Option<ValidationIssue> {
    if value.trim().is_empty() {
        return Some(ValidationIssue::new(
            "full_name",
            IssueKind::RequiredField,
            "Full name is required",
        ));
    }
    if value.trim().split_whitespace().count() < 2 {
        return Some(ValidationIssue::new(
            "full_name",
            IssueKind::FormatError,
            "Please enter both first and last name",
        ));
    }
    None
}

pub(crate) fn check_email(value: &str) -> Option<ValidationIssue> {
    let issue = || {
        ValidationIssue::new(
            "email",
            IssueKind::FormatError,
            "Please enter a valid email address",
        )
    };

    if value.chars().any(char::is_whitespace) {
        return Some(issue());
    }
    match value.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.') =>
        {
            None
        }
        _ => Some(issue()),
    }
}

pub(crate) fn check_phone(value: &str) -> Option<ValidationIssue> {
    let digits = digits_only(value);
    if digits.len() == 11 && digits.starts_with('1') {
        None
    } else {
        Some(ValidationIssue::new(
            "phone",
            IssueKind::FormatError,
            "Please enter a valid US phone number",
        ))
    }
}

pub(crate) fn check_date_of_birth(value: &str, today: NaiveDate) -> Option<ValidationIssue> {
    if value.trim().is_empty() {
        return Some(ValidationIssue::new(
            "date_of_birth",
            IssueKind::RequiredField,
            "Date of birth is required",
        ));
    }
    if parse_iso_date(value).is_none() {
        return Some(ValidationIssue::new(
            "date_of_birth",
            IssueKind::FormatError,
            "Date of birth must be a valid YYYY-MM-DD date",
        ));
    }
    match derived_age(value, today) {
        Some(age) if age >= ELIGIBILITY_AGE => None,
        _ => Some(ValidationIssue::new(
            "date_of_birth",
            IssueKind::RangeError,
            "Must be at least 18 years old",
        )),
    }
}

pub(crate) fn check_start_date(value: &str, today: NaiveDate) -> Option<ValidationIssue> {
    if value.trim().is_empty() {
        return Some(ValidationIssue::new(
            "start_date",
            IssueKind::RequiredField,
            "Start date is required",
        ));
    }
    let Some(date) = parse_iso_date(value) else {
        return Some(ValidationIssue::new(
            "start_date",
            IssueKind::FormatError,
            "Start date must be a valid YYYY-MM-DD date",
        ));
    };
    if date < today {
        return Some(ValidationIssue::new(
            "start_date",
            IssueKind::RangeError,
            "Start date cannot be in the past",
        ));
    }
    if date > today + Duration::days(START_DATE_WINDOW_DAYS) {
        return Some(ValidationIssue::new(
            "start_date",
            IssueKind::RangeError,
            "Start date must be within the next 90 days",
        ));
    }
    None
}

pub(crate) fn check_department(value: &str) -> Option<ValidationIssue> {
    if value.is_empty() {
        Some(ValidationIssue::new(
            "department",
            IssueKind::RequiredField,
            "Department is required",
        ))
    } else {
        None
    }
}

pub(crate) fn check_position(value: &str) -> Option<ValidationIssue> {
    if value.chars().count() < 3 {
        Some(ValidationIssue::new(
            "position",
            IssueKind::RangeError,
            "Position must be at least 3 characters",
        ))
    } else {
        None
    }
}

/// Only `> 0` is enforced; the bounds quoted in the salary label are
/// guidance, not hard validation.
pub(crate) fn check_salary(value: &str) -> Option<ValidationIssue> {
    if value.trim().is_empty() {
        return Some(ValidationIssue::new(
            "salary",
            IssueKind::RequiredField,
            "Salary is required",
        ));
    }
    match value.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => None,
        _ => Some(ValidationIssue::new(
            "salary",
            IssueKind::FormatError,
            "Please enter a valid salary amount",
        )),
    }
}

pub(crate) fn check_manager(
    value: &str,
    department: &str,
    directory: &DepartmentDirectory,
) -> Option<ValidationIssue> {
    if value.is_empty() {
        return Some(ValidationIssue::new(
            "manager",
            IssueKind::RequiredField,
            "Manager is required",
        ));
    }
    if directory
        .managers_for(department)
        .iter()
        .any(|manager| *manager == value)
    {
        None
    } else {
        Some(ValidationIssue::new(
            "manager",
            IssueKind::RelationalError,
            "Manager must belong to the selected department",
        ))
    }
}

pub(crate) fn check_skills(entries: &[SkillEntry]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if entries.len() < 3 {
        issues.push(ValidationIssue::new(
            "skills",
            IssueKind::RangeError,
            "At least 3 skills are required",
        ));
    }
    for entry in entries {
        if entry.skill.trim().is_empty() {
            issues.push(ValidationIssue::new(
                "skills",
                IssueKind::RequiredField,
                "Skill name is required",
            ));
        }
        if entry.experience.trim().is_empty() {
            issues.push(ValidationIssue::new(
                "skills",
                IssueKind::RequiredField,
                "Experience level is required",
            ));
        }
    }
    issues
}

pub(crate) fn check_working_hours(hours: &WorkingHours) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if hours.start.trim().is_empty() {
        issues.push(ValidationIssue::new(
            "working_hours",
            IssueKind::RequiredField,
            "Start time is required",
        ));
    }
    if hours.end.trim().is_empty() {
        issues.push(ValidationIssue::new(
            "working_hours",
            IssueKind::RequiredField,
            "End time is required",
        ));
    }
    issues
}

pub(crate) fn check_remote_preference(value: u8) -> Option<ValidationIssue> {
    if value > 100 {
        Some(ValidationIssue::new(
            "remote_preference",
            IssueKind::RangeError,
            "Remote preference must be between 0 and 100",
        ))
    } else {
        None
    }
}

pub(crate) fn check_required(
    field: &'static str,
    value: &str,
    message: &'static str,
) -> Option<ValidationIssue> {
    if value.trim().is_empty() {
        Some(ValidationIssue::new(
            field,
            IssueKind::RequiredField,
            message,
        ))
    } else {
        None
    }
}

pub(crate) fn check_confirmed(confirmed: bool) -> Option<ValidationIssue> {
    if confirmed {
        None
    } else {
        Some(ValidationIssue::new(
            "confirmed",
            IssueKind::RequiredField,
            "You must confirm the information is accurate",
        ))
    }
}
