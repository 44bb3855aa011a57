//! Cross-section rules: values derived from the aggregate record at
//! evaluation time and the static department directory backing the
//! manager and skill option sets.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::record::JobType;

/// Applicants younger than this are disqualified entirely.
pub const ELIGIBILITY_AGE: i32 = 18;

/// Applicants younger than this must provide a guardian contact. Also the
/// threshold behind the submission payload's `is_minor` flag; deliberately
/// distinct from [`ELIGIBILITY_AGE`].
pub const GUARDIAN_AGE: i32 = 21;

/// Latest acceptable start date, counted in days from today.
pub const START_DATE_WINDOW_DAYS: i64 = 90;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), ISO_DATE_FORMAT).ok()
}

/// Whole years since the last birthday, or `None` when the date of birth is
/// empty or unparsable. Never stored; recomputed wherever age matters.
pub fn derived_age(date_of_birth: &str, today: NaiveDate) -> Option<i32> {
    let birth = parse_iso_date(date_of_birth)?;
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    Some(age)
}

/// Guardian contact requirement. An absent or unparsable date of birth keeps
/// the requirement in force until the applicant supplies a valid one.
pub fn requires_guardian(date_of_birth: &str, today: NaiveDate) -> bool {
    derived_age(date_of_birth, today)
        .map(|age| age < GUARDIAN_AGE)
        .unwrap_or(true)
}

/// One department with its configured manager and skill-suggestion sets.
#[derive(Debug, Clone)]
pub struct DepartmentProfile {
    pub name: &'static str,
    pub managers: Vec<&'static str>,
    pub skills: Vec<&'static str>,
}

/// Static department -> option-set association. Lookups on departments that
/// are not configured yield empty sets, never errors.
#[derive(Debug, Clone)]
pub struct DepartmentDirectory {
    departments: Vec<DepartmentProfile>,
}

impl DepartmentDirectory {
    pub fn standard() -> Self {
        Self {
            departments: standard_departments(),
        }
    }

    pub fn with_departments(departments: Vec<DepartmentProfile>) -> Self {
        Self { departments }
    }

    pub fn department_names(&self) -> Vec<&'static str> {
        self.departments.iter().map(|dept| dept.name).collect()
    }

    pub fn contains(&self, department: &str) -> bool {
        self.departments.iter().any(|dept| dept.name == department)
    }

    pub fn managers_for(&self, department: &str) -> &[&'static str] {
        self.departments
            .iter()
            .find(|dept| dept.name == department)
            .map(|dept| dept.managers.as_slice())
            .unwrap_or(&[])
    }

    pub fn skill_suggestions_for(&self, department: &str) -> &[&'static str] {
        self.departments
            .iter()
            .find(|dept| dept.name == department)
            .map(|dept| dept.skills.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for DepartmentDirectory {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_departments() -> Vec<DepartmentProfile> {
    vec![
        DepartmentProfile {
            name: "Engineering",
            managers: vec!["Sarah Chen", "Mike Johnson", "Alex Rodriguez"],
            skills: vec![
                "JavaScript", "Python", "React", "Node.js", "SQL", "AWS", "Docker", "Git",
            ],
        },
        DepartmentProfile {
            name: "Marketing",
            managers: vec!["Emma Wilson", "David Park", "Lisa Thompson"],
            skills: vec![
                "SEO",
                "Content Marketing",
                "Social Media",
                "Analytics",
                "Email Marketing",
                "PPC",
            ],
        },
        DepartmentProfile {
            name: "Sales",
            managers: vec!["John Smith", "Maria Garcia", "Tom Brown"],
            skills: vec![
                "CRM",
                "Lead Generation",
                "Negotiation",
                "Customer Relations",
                "Sales Analytics",
            ],
        },
        DepartmentProfile {
            name: "HR",
            managers: vec!["Jennifer Lee", "Robert Davis"],
            skills: vec![
                "Recruitment",
                "Employee Relations",
                "Performance Management",
                "Training",
                "Compliance",
            ],
        },
        DepartmentProfile {
            name: "Finance",
            managers: vec!["Amanda White", "Kevin Miller"],
            skills: vec![
                "Financial Analysis",
                "Budgeting",
                "Excel",
                "QuickBooks",
                "Tax Preparation",
                "Auditing",
            ],
        },
        DepartmentProfile {
            name: "Operations",
            managers: vec!["Rachel Green", "Steve Wilson"],
            skills: vec![
                "Project Management",
                "Process Improvement",
                "Supply Chain",
                "Quality Control",
            ],
        },
        DepartmentProfile {
            name: "Design",
            managers: vec!["Maya Patel", "Chris Taylor"],
            skills: vec![
                "Figma",
                "Photoshop",
                "UI/UX Design",
                "Prototyping",
                "Brand Design",
                "Illustration",
            ],
        },
    ]
}

/// Display metadata for the salary field; swaps with the job type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SalaryGuidance {
    pub label: &'static str,
    pub placeholder: &'static str,
}

pub const fn salary_guidance(job_type: JobType) -> SalaryGuidance {
    match job_type {
        JobType::FullTime => SalaryGuidance {
            label: "Annual Salary ($30,000 - $200,000)",
            placeholder: "75000",
        },
        JobType::Contract => SalaryGuidance {
            label: "Hourly Rate ($50 - $150)",
            placeholder: "85",
        },
        JobType::PartTime => SalaryGuidance {
            label: "Salary",
            placeholder: "Enter amount",
        },
    }
}

/// Strip every non-digit character; used by phone validation and the
/// submission normalizer.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Progressive `+1-XXX-XXX-XXXX` entry formatter for the applicant's own
/// phone. Assumes a US number with a leading country digit, matching the
/// digit-count validation rule.
pub fn format_us_phone(raw: &str) -> String {
    let digits = digits_only(raw);
    match digits.len() {
        0 => String::new(),
        1 => {
            if digits.starts_with('1') {
                "+1-".to_string()
            } else {
                format!("+1-{digits}")
            }
        }
        2..=4 => format!("+1-{}", &digits[1..]),
        5..=7 => format!("+1-{}-{}", &digits[1..4], &digits[4..]),
        _ => {
            let tail_end = digits.len().min(11);
            format!(
                "+1-{}-{}-{}",
                &digits[1..4],
                &digits[4..7],
                &digits[7..tail_end]
            )
        }
    }
}
