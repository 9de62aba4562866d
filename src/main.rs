use std::env;
use std::io::{self, IsTerminal, Read};

use chrono::Local;
use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use rollcall_client::{
    config::ClientConfig,
    conflict::HttpConflictChecker,
    form::{ClassScheduleForm, SubmitDecision},
};
use rollcall_core::parser;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Schedule from the command line, or stdin when no arguments are given.
fn read_input() -> Result<String> {
    let args: Vec<String> = env::args().skip(1).collect();
    if !args.is_empty() {
        return Ok(args.join(" "));
    }

    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("Enter a schedule (e.g. MWF 10:00 AM-12:00 PM), then EOF:");
    }
    let mut input = String::new();
    stdin
        .read_to_string(&mut input)
        .wrap_err("Failed to read schedule from stdin")?;
    Ok(input)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ClientConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let input = read_input()?;
    let input = input.trim();

    if let Err(err) = parser::validate(input) {
        warn!("Stored schedule is not fully valid: {}", err);
    }

    let mut form = ClassScheduleForm::open_for_edit(input);
    let view = form.view();

    println!("Schedule: {}", view.value);
    match view.empty_message {
        Some(message) => println!("  {}", message),
        None => {
            for row in &view.rows {
                let overnight = if row.overnight { " (overnight)" } else { "" };
                println!("  {:<10} {}{}  [{}]", row.days, row.time_range, overnight, row.day_names);
            }
        }
    }

    let today = Local::now().date_naive();
    if let Some(window) = form.builder().schedule().resolve_window(today) {
        println!(
            "Today ({}): {} to {}",
            today,
            window.start.format("%Y-%m-%d %H:%M"),
            window.end.format("%Y-%m-%d %H:%M")
        );
    }

    println!("{}", serde_json::to_string_pretty(form.builder().schedule())?);

    let Some(checker) = HttpConflictChecker::from_config(&config)? else {
        info!("CONFLICT_CHECK_URL not set, skipping conflict check");
        return Ok(());
    };

    match form.prepare_submit(&checker).await {
        SubmitDecision::Proceed { schedule, notice } => {
            println!("Conflict check passed for \"{}\"", schedule);
            if let Some(notice) = notice {
                println!("  {}", notice);
            }
        }
        SubmitDecision::Blocked { message } => {
            println!("Conflict detected:\n{}", message);
        }
    }

    Ok(())
}
