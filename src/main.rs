use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::api::{HttpApiClient, MachineApi};
use crate::config::AppConfig;
use crate::panel::{ListPanel, SummaryPanel};
use crate::views::estop::EstopControl;
use crate::views::processing::ProcessingToggle;

mod api;
mod config;
mod panel;
mod telemetry;
mod types;
mod views;

#[derive(Parser)]
#[command(name = "agbot-console", about = "Operator console for the agbot field unit")]
struct Cli {
    /// Console configuration file
    #[arg(short, long, default_value = "config.json")]
    config: String,

    #[command(subcommand)]
    command: ConsoleCommand,
}

#[derive(Subcommand)]
enum ConsoleCommand {
    /// List the cameras the machine reports
    Cameras,
    /// List completed records
    History,
    /// Show one record's summary
    Record {
        /// Record ID, or a record page URL containing `recordID=`
        id: String,
        /// Also download the record's image to this file
        #[arg(long)]
        image_out: Option<PathBuf>,
    },
    /// Send the emergency-stop command
    Estop,
    /// Show the processing state
    Processing {
        /// Invert the current processing state first
        #[arg(long)]
        toggle: bool,
        /// Keep the live image fresh and re-render until Ctrl-C
        #[arg(long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;
    info!("🚜 agbot console targeting {}", config.base_url);
    let client = HttpApiClient::new(&config)?;

    match cli.command {
        ConsoleCommand::Cameras => {
            let mut panel = ListPanel::new("No cameras found");
            views::cameras::load(&client, &mut panel).await;
            print!("{}", panel.render("Cameras"));
        }
        ConsoleCommand::History => {
            let mut panel = ListPanel::new("No records found");
            views::history::load(&client, &mut panel).await;
            print!("{}", panel.render("Records"));
        }
        ConsoleCommand::Record { id, image_out } => {
            run_record_view(&client, &id, image_out).await?;
        }
        ConsoleCommand::Estop => {
            let mut control = EstopControl::new();
            control.trigger(&client).await;
            print!("{}", control.panel.render());
            print_alerts(&control.panel.alerts);
        }
        ConsoleCommand::Processing { toggle, watch } => {
            run_processing_view(&client, &config, toggle, watch).await;
        }
    }

    Ok(())
}

async fn run_record_view(
    client: &HttpApiClient,
    id: &str,
    image_out: Option<PathBuf>,
) -> Result<()> {
    let mut panel = SummaryPanel::new();
    let Some(record_id) = views::record::resolve_record_id(id) else {
        // no record named: the default "not found" state stands
        print!("{}", panel.render());
        return Ok(());
    };

    views::record::load(client, &record_id, &mut panel).await;
    print!("{}", panel.render());

    if let Some(path) = image_out {
        match client.record_image(&record_id).await {
            Ok(image) => {
                std::fs::write(&path, &image)?;
                info!("wrote {} bytes to {}", image.len(), path.display());
            }
            Err(e) => warn!("could not download image for record {}: {}", record_id, e),
        }
    }
    Ok(())
}

async fn run_processing_view(client: &HttpApiClient, config: &AppConfig, toggle: bool, watch: bool) {
    let mut view = ProcessingToggle::with_period(Duration::from_millis(config.image_refresh_ms));
    view.sync(client).await;
    if toggle {
        view.toggle(client).await;
    }

    let snapshot = view.snapshot();
    print!("{}", snapshot.render());
    print_alerts(&snapshot.alerts);

    if watch && view.processing() {
        info!("watching live image, Ctrl-C to stop");
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                _ = tokio::time::sleep(Duration::from_secs(1)) => {
                    if let Some(url) = view.snapshot().live_image_url {
                        println!("live image: {}", url);
                    }
                }
            }
        }
        view.apply(false);
    }
}

fn print_alerts(alerts: &[String]) {
    for alert in alerts {
        eprintln!("\nALERT: {}", alert);
    }
}
