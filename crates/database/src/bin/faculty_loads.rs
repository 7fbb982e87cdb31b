use database::{DbConfig, create_connection, services::FacultyLoadService};
use log::error;
use std::{env, process};

const USAGE: &str = "usage: faculty-loads <faculty_id> [academic_year] [semester]";

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(faculty_id) = args.first().and_then(|arg| arg.parse::<i64>().ok()) else {
        eprintln!("{USAGE}");
        process::exit(2);
    };
    let academic_year = args.get(1).map(String::as_str);
    let semester = args.get(2).map(String::as_str);

    if let Err(e) = run(faculty_id, academic_year, semester).await {
        error!("{e}");
        process::exit(1);
    }
}

async fn run(
    faculty_id: i64,
    academic_year: Option<&str>,
    semester: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = DbConfig::from_env()?;
    let db = create_connection(&config).await?;

    let loads =
        FacultyLoadService::get_enriched_loads(&db, faculty_id, academic_year, semester).await?;
    let sections =
        FacultyLoadService::get_faculty_sections(&db, faculty_id, academic_year, semester).await?;

    let report = serde_json::json!({
        "faculty_id": faculty_id,
        "sections": sections,
        "loads": loads,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
