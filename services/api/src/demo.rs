use chrono::SecondsFormat;
use clap::Args;
use job_board::board::{
    BoardError, CompanyPayload, EducationHistoryPayload, JobApplicationPayload, JobBoard,
    JobPayload, MemoryEventSink, Stores, UserPayload, WorkHistoryPayload,
};
use job_board::error::AppError;
use job_board::identity::{Identity, SystemClock};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Identity used for the job seeker
    #[arg(long, default_value = "seeker-demo")]
    pub(crate) seeker: String,
    /// Identity used for the company admin
    #[arg(long, default_value = "admin-demo")]
    pub(crate) admin: String,
    /// Print the lifecycle events emitted during the walkthrough
    #[arg(long)]
    pub(crate) show_events: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        seeker,
        admin,
        show_events,
    } = args;
    let seeker = Identity::new(seeker);
    let admin = Identity::new(admin);

    let events = MemoryEventSink::default();
    let board = JobBoard::new(
        Stores::in_memory(),
        Arc::new(SystemClock::new()),
        Arc::new(events.clone()),
    );

    println!("Job board walkthrough (in-memory stores)");

    let user = board.register_user(
        &seeker,
        UserPayload {
            full_name: "Avery Quinn".to_string(),
            email: "avery@example.com".to_string(),
            phone: "+1-555-0133".to_string(),
        },
    )?;
    println!(
        "- {} registered as {} at {}",
        user.id,
        user.full_name,
        user.registered_at
            .to_datetime()
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    );

    let education = board.add_education_history(
        &seeker,
        EducationHistoryPayload {
            education_level: "Bachelor".to_string(),
            institution: "Lakeside College".to_string(),
            field_of_study: "Mathematics".to_string(),
            year_of_entry: 2015,
            year_of_graduation: 2019,
            gpa: 3.4,
            description: "Minor in statistics".to_string(),
        },
    )?;
    println!(
        "  education: {} at {} ({}-{})",
        education.education_level,
        education.institution,
        education.year_of_entry,
        education.year_of_graduation
    );

    let work = board.add_work_history(
        &seeker,
        WorkHistoryPayload {
            company_name: "Northwind".to_string(),
            position: "Analyst".to_string(),
            year_started: 2019,
            year_ended: 2024,
            salary: "68000".to_string(),
            description: "Forecasting and reporting".to_string(),
        },
    )?;
    println!(
        "  work: {} at {} ({}-{})",
        work.position, work.company_name, work.year_started, work.year_ended
    );

    let company = board.register_company(
        &admin,
        CompanyPayload {
            name: "Fabrikam".to_string(),
            email: "talent@fabrikam.test".to_string(),
            phone: "+1-555-0177".to_string(),
            address: "9 Foundry Lane".to_string(),
            description: "Industrial sensors".to_string(),
        },
    )?;
    println!("- {} registered company {} ({})", admin, company.name, company.id);

    let job = board.create_job(
        &admin,
        JobPayload {
            company_id: None,
            position: "Data Engineer".to_string(),
            requirements: "SQL, Rust or Python".to_string(),
            location: "Hybrid".to_string(),
            salary: "105000".to_string(),
            description: "Own the telemetry pipeline".to_string(),
        },
    )?;
    println!(
        "- posted {} ({}) -> status {}",
        job.position,
        job.id,
        job.post_status.label()
    );
    println!("  open jobs: {}", board.list_open_jobs()?.len());

    let application = board.apply_to_job(
        &seeker,
        JobApplicationPayload {
            job_id: job.id.clone(),
            cover_letter: "Telemetry pipelines are my favorite kind of plumbing.".to_string(),
            resume: "https://cv.example/avery.pdf".to_string(),
            portfolio: Some("https://github.com/avery".to_string()),
        },
    )?;
    println!(
        "- {} applied to {} (application {})",
        application.user_id, application.job_id, application.id
    );

    match board.remove_company(&admin, &company.id) {
        Err(BoardError::Conflict(reason)) => println!("- company removal refused: {reason}"),
        Err(other) => return Err(other.into()),
        Ok(_) => println!("- company removed unexpectedly"),
    }

    let closed = board.close_job(&admin, &job.id)?;
    println!("- closed {} -> status {}", closed.id, closed.post_status.label());

    let late = board.apply_to_job(
        &seeker,
        JobApplicationPayload {
            job_id: job.id.clone(),
            cover_letter: "Following up".to_string(),
            resume: "https://cv.example/avery.pdf".to_string(),
            portfolio: None,
        },
    );
    match late {
        Err(err) => println!("- late application rejected: {err}"),
        Ok(_) => println!("- late application accepted unexpectedly"),
    }

    board.remove_job(&admin, &job.id)?;
    let removed = board.remove_company(&admin, &company.id)?;
    println!("- removed job and then company {}", removed.name);

    if show_events {
        println!("\nLifecycle events");
        for event in events.events() {
            println!(
                "  - {} {} {} by {}",
                event.entity.label(),
                event.action.label(),
                event.record_id,
                event.actor
            );
        }
    }

    Ok(())
}
