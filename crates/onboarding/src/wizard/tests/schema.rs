use chrono::Duration;

use super::common::{minor_date_of_birth, today, valid_record};
use crate::wizard::record::{GuardianContact, SkillEntry, WizardStep};
use crate::wizard::rules::DepartmentDirectory;
use crate::wizard::schema::{
    validate_emergency, validate_job, validate_personal, validate_review, validate_skills,
    validate_step,
};
use crate::wizard::validators::IssueKind;

#[test]
fn a_complete_record_passes_every_step() {
    let record = valid_record();
    let directory = DepartmentDirectory::standard();
    for step in WizardStep::ordered() {
        assert!(
            validate_step(step, &record, &directory, today()).is_empty(),
            "expected step {step:?} to validate"
        );
    }
}

#[test]
fn personal_issues_follow_field_declaration_order() {
    let mut record = valid_record();
    record.personal.full_name = "Avery".to_string();
    record.personal.email = "not-an-email".to_string();

    let issues = validate_personal(&record, today());
    assert_eq!(issues[0].field, "full_name");
    assert_eq!(issues[0].kind, IssueKind::FormatError);
    assert_eq!(issues[0].message, "Please enter both first and last name");
    assert_eq!(issues[1].field, "email");
}

#[test]
fn empty_full_name_is_a_required_field_failure() {
    let mut record = valid_record();
    record.personal.full_name = "   ".to_string();
    let issues = validate_personal(&record, today());
    assert_eq!(issues[0].kind, IssueKind::RequiredField);
    assert_eq!(issues[0].message, "Full name is required");
}

#[test]
fn email_needs_an_at_shaped_structure() {
    let mut record = valid_record();
    for bad in ["plain", "a@b", "@example.com", "a@", "a b@example.com", "a@@example.com"] {
        record.personal.email = bad.to_string();
        let issues = validate_personal(&record, today());
        assert!(
            issues.iter().any(|issue| issue.field == "email"),
            "expected '{bad}' to be rejected"
        );
    }
    record.personal.email = "first.last@sub.example.com".to_string();
    assert!(validate_personal(&record, today()).is_empty());
}

#[test]
fn phone_must_carry_eleven_digits_with_a_leading_one() {
    let mut record = valid_record();
    record.personal.phone = "555-0123".to_string();
    let issues = validate_personal(&record, today());
    assert_eq!(issues[0].field, "phone");
    assert_eq!(issues[0].message, "Please enter a valid US phone number");

    record.personal.phone = "12025550123".to_string();
    assert!(validate_personal(&record, today()).is_empty());
}

#[test]
fn under_eighteen_applicants_are_rejected() {
    let mut record = valid_record();
    record.personal.date_of_birth = "2010-01-01".to_string();
    let issues = validate_personal(&record, today());
    assert_eq!(issues[0].field, "date_of_birth");
    assert_eq!(issues[0].kind, IssueKind::RangeError);
    assert_eq!(issues[0].message, "Must be at least 18 years old");
}

#[test]
fn start_date_window_is_inclusive_of_today_and_ninety_days() {
    let directory = DepartmentDirectory::standard();
    let mut record = valid_record();

    record.job.start_date = today().format("%Y-%m-%d").to_string();
    assert!(validate_job(&record, &directory, today()).is_empty());

    record.job.start_date = (today() + Duration::days(90)).format("%Y-%m-%d").to_string();
    assert!(validate_job(&record, &directory, today()).is_empty());

    record.job.start_date = (today() - Duration::days(1)).format("%Y-%m-%d").to_string();
    let issues = validate_job(&record, &directory, today());
    assert_eq!(issues[0].field, "start_date");
    assert_eq!(issues[0].kind, IssueKind::RangeError);

    record.job.start_date = (today() + Duration::days(91)).format("%Y-%m-%d").to_string();
    let issues = validate_job(&record, &directory, today());
    assert_eq!(issues[0].kind, IssueKind::RangeError);
}

#[test]
fn salary_only_enforces_a_positive_amount() {
    let directory = DepartmentDirectory::standard();
    let mut record = valid_record();

    for bad in ["", "abc", "-5", "0"] {
        record.job.salary = bad.to_string();
        let issues = validate_job(&record, &directory, today());
        assert_eq!(issues[0].field, "salary", "expected '{bad}' to be rejected");
    }

    // The label-stated bounds are guidance only.
    for ok in ["90000", "90000.50", "1", "999999999"] {
        record.job.salary = ok.to_string();
        assert!(
            validate_job(&record, &directory, today()).is_empty(),
            "expected '{ok}' to pass"
        );
    }
}

#[test]
fn manager_must_belong_to_the_selected_department() {
    let directory = DepartmentDirectory::standard();
    let mut record = valid_record();
    record.job.manager = "Emma Wilson".to_string();

    let issues = validate_job(&record, &directory, today());
    assert_eq!(issues[0].field, "manager");
    assert_eq!(issues[0].kind, IssueKind::RelationalError);
}

#[test]
fn fewer_than_three_skills_fail_the_sequence_rule() {
    let mut record = valid_record();
    record.skills.skills.truncate(2);
    let issues = validate_skills(&record);
    assert_eq!(issues[0].field, "skills");
    assert_eq!(issues[0].kind, IssueKind::RangeError);
    assert_eq!(issues[0].message, "At least 3 skills are required");
}

#[test]
fn skill_entries_need_both_a_name_and_an_experience_value() {
    let mut record = valid_record();
    record.skills.skills.push(SkillEntry {
        skill: "Kubernetes".to_string(),
        experience: String::new(),
    });
    let issues = validate_skills(&record);
    assert_eq!(issues[0].kind, IssueKind::RequiredField);
    assert_eq!(issues[0].message, "Experience level is required");
}

#[test]
fn emergency_contact_fields_are_all_required() {
    let mut record = valid_record();
    record.emergency_contact.relationship = String::new();
    let issues = validate_emergency(&record, today());
    assert_eq!(issues[0].field, "emergency_contact");
    assert_eq!(issues[0].message, "Relationship is required");
}

#[test]
fn guardian_rule_fires_only_for_minors() {
    let mut record = valid_record();
    assert!(validate_emergency(&record, today()).is_empty());

    record.personal.date_of_birth = minor_date_of_birth().to_string();
    let issues = validate_emergency(&record, today());
    assert_eq!(issues[0].field, "guardian_contact");
    assert_eq!(issues[0].kind, IssueKind::RelationalError);
    assert_eq!(
        issues[0].message,
        "Guardian contact is required for employees under 21"
    );

    record.guardian_contact = Some(GuardianContact {
        name: "Morgan Johnson".to_string(),
        phone: "+1-202-555-0144".to_string(),
    });
    assert!(validate_emergency(&record, today()).is_empty());
}

#[test]
fn a_guardian_with_a_blank_phone_does_not_satisfy_the_rule() {
    let mut record = valid_record();
    record.personal.date_of_birth = minor_date_of_birth().to_string();
    record.guardian_contact = Some(GuardianContact {
        name: "Morgan Johnson".to_string(),
        phone: String::new(),
    });
    let issues = validate_emergency(&record, today());
    assert_eq!(issues[0].field, "guardian_contact");
}

#[test]
fn review_requires_the_confirmation_flag() {
    let mut record = valid_record();
    record.confirmed = false;
    let issues = validate_review(&record);
    assert_eq!(issues[0].field, "confirmed");
    assert_eq!(issues[0].message, "You must confirm the information is accurate");
}
