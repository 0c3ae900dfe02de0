// Draft board entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, stdout carries the report)
// 2. Load config, copying defaults on first run
// 3. Load the league snapshot and build the report
// 4. Write the report

use draftboard_app::config;
use draftboard_app::output;
use draftboard_app::pipeline;

use anyhow::Context;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("draftboard starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: method={}, snapshot={}",
        config.draft_order.method,
        config.snapshot.dir.display()
    );

    let report = pipeline::run(&config).context("failed to build draft report")?;
    info!(
        "Draft order for {} teams, {} picks on the board",
        report.standings.len(),
        report.board.picks.len()
    );

    output::write_report(&report, &config.output).context("failed to write report")?;

    info!("draftboard finished");
    Ok(())
}

/// Initialize tracing to log to a file, keeping stdout for the report.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("draftboard.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("draftboard=info,draftboard_app=info,draftboard_core=info,warn")
        }))
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
