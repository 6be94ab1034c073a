//! frota - Fleet dashboard reports from the command line

use chrono::Utc;
use clap::Parser;
use frota::{
    cli::{Cli, Command},
    commands::run_command,
    data_loader::DataLoader,
    error::Result,
    output::{OutputFormat, get_formatter},
    timezone::TimezoneConfig,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose turns on info for our crates.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            tracing_subscriber::EnvFilter::new("frota=info,frota_core=info,frota_terminal=info")
        } else {
            tracing_subscriber::EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let tz_config = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.utc, cli.local)?;
    info!("Using timezone: {}", tz_config.display_name());

    let now = cli.now.unwrap_or_else(Utc::now);
    let today = tz_config.today(now);
    info!("Reference day: {}", today);

    let repository = DataLoader::new(cli.data.clone()).load()?;

    let format = OutputFormat::from_flags(cli.json, cli.csv);
    if format == OutputFormat::Table && !is_terminal::is_terminal(std::io::stdout()) {
        colored::control::set_override(false);
    }
    let formatter = get_formatter(format);

    let command = cli.command.unwrap_or_else(Command::default_overview);
    let output = run_command(&command, &repository, today, formatter.as_ref())?;
    println!("{output}");

    Ok(())
}
