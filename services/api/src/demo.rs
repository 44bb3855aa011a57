use crate::infra::{parse_date, InMemoryDraftStore, InMemorySubmissionSink};
use chrono::{Datelike, Duration, Local, NaiveDate};
use clap::Args;
use std::sync::Arc;

use onboarding::error::AppError;
use onboarding::wizard::{FieldUpdate, OnboardingWizard, StepView};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date for the walk-through (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Script an under-21 applicant to demonstrate the guardian requirement
    #[arg(long)]
    pub(crate) minor: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let drafts = Arc::new(InMemoryDraftStore::default());
    let sink = Arc::new(InMemorySubmissionSink::default());
    let mut wizard = OnboardingWizard::new(drafts, sink.clone());

    println!("Employee Onboarding Demo (evaluated {today})");
    println!("============================================");

    let date_of_birth = if args.minor {
        minor_date_of_birth(today)
    } else {
        "1990-04-12".to_string()
    };
    let start_date = (today + Duration::days(14)).format("%Y-%m-%d").to_string();

    apply(
        &mut wizard,
        vec![
            FieldUpdate::FullName {
                value: "Avery Johnson".to_string(),
            },
            FieldUpdate::Email {
                value: "avery.johnson@example.com".to_string(),
            },
            FieldUpdate::Phone {
                value: "12025550123".to_string(),
            },
            FieldUpdate::DateOfBirth {
                value: date_of_birth,
            },
        ],
    );
    render_step(&wizard.step_view(today));
    wizard.advance(today)?;

    apply(
        &mut wizard,
        vec![
            FieldUpdate::Department {
                value: "Engineering".to_string(),
            },
            FieldUpdate::Position {
                value: "Software Engineer".to_string(),
            },
            FieldUpdate::StartDate { value: start_date },
            FieldUpdate::Salary {
                value: "90000".to_string(),
            },
            FieldUpdate::Manager {
                value: "Sarah Chen".to_string(),
            },
        ],
    );
    render_step(&wizard.step_view(today));
    wizard.advance(today)?;

    apply(
        &mut wizard,
        vec![
            FieldUpdate::AddSkill {
                skill: "React".to_string(),
                experience: "3 years".to_string(),
            },
            FieldUpdate::AddSkill {
                skill: "SQL".to_string(),
                experience: "4 years".to_string(),
            },
            FieldUpdate::AddSkill {
                skill: "Docker".to_string(),
                experience: "2 years".to_string(),
            },
            FieldUpdate::RemotePreference { value: 80 },
            FieldUpdate::ManagerApproved { value: true },
        ],
    );
    render_step(&wizard.step_view(today));
    wizard.advance(today)?;

    let mut emergency = vec![
        FieldUpdate::EmergencyName {
            value: "Jordan Johnson".to_string(),
        },
        FieldUpdate::EmergencyRelationship {
            value: "Spouse".to_string(),
        },
        FieldUpdate::EmergencyPhone {
            value: "+1-202-555-0188".to_string(),
        },
    ];
    if args.minor {
        emergency.push(FieldUpdate::GuardianName {
            value: "Morgan Johnson".to_string(),
        });
        emergency.push(FieldUpdate::GuardianPhone {
            value: "+1-202-555-0144".to_string(),
        });
    }
    apply(&mut wizard, emergency);
    render_step(&wizard.step_view(today));
    wizard.advance(today)?;

    apply(
        &mut wizard,
        vec![FieldUpdate::Confirmed { value: true }],
    );
    render_step(&wizard.step_view(today));

    let payload = wizard.submit(today)?;
    println!();
    println!("Normalized submission payload");
    println!("-----------------------------");
    match serde_json::to_string_pretty(&payload) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => println!("  (payload could not be rendered: {err})"),
    }
    println!();
    println!(
        "Collaborator received {} submission(s); the draft has been cleared.",
        sink.deliveries().len()
    );

    Ok(())
}

fn apply<D, S>(wizard: &mut OnboardingWizard<D, S>, updates: Vec<FieldUpdate>)
where
    D: onboarding::wizard::DraftStore,
    S: onboarding::wizard::SubmissionSink,
{
    for update in updates {
        if let Err(err) = wizard.update_field(update) {
            println!("  update rejected: {err}");
        }
    }
}

fn render_step(view: &StepView) {
    println!();
    println!(
        "Step {}/5 - {} ({}% complete)",
        view.step_number, view.step_label, view.progress_pct
    );
    if let Some(age) = view.derived.age {
        let guardian = if view.derived.guardian_required {
            " (guardian contact required)"
        } else {
            ""
        };
        println!("  derived age: {age}{guardian}");
    }
    if !view.derived.manager_options.is_empty() {
        println!("  manager options: {}", view.derived.manager_options.join(", "));
    }
    println!("  salary field: {}", view.derived.salary_guidance.label);
    if view.issues.is_empty() {
        println!("  status: step is complete");
    } else {
        for issue in &view.issues {
            println!("  open item [{}]: {}", issue.kind.label(), issue.message);
        }
    }
}

fn minor_date_of_birth(today: NaiveDate) -> String {
    let year = today.year() - 19;
    let day = today.day().min(28);
    NaiveDate::from_ymd_opt(year, today.month(), day)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| format!("{year}-01-15"))
}
