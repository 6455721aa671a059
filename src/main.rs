// src/main.rs - API server and one-shot CLI commands
use clap::{Parser, Subcommand};
use tracing::info;

use safety_cockpit::api::{self, ApiState};
use safety_cockpit::config::CockpitConfig;
use safety_cockpit::feedback::{FeedbackRecord, FeedbackStore, Rating};
use safety_cockpit::generator::generate_bundle;
use safety_cockpit::logging::{init_console_logging, init_logging};
use safety_cockpit::metrics::SummaryMetrics;

#[derive(Parser, Debug)]
#[command(name = "safety_cockpit")]
#[command(about = "Micromobility safety cockpit prototype with synthetic live data")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API for one session
    Serve {
        /// Listen host (default: COCKPIT_HOST or 127.0.0.1)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (default: COCKPIT_PORT or 3010)
        #[arg(short, long)]
        port: Option<u16>,

        /// Feedback CSV path (default: FEEDBACK_FILE or feedback.csv)
        #[arg(long)]
        feedback_file: Option<String>,
    },
    /// Print a freshly generated bundle (or just its metrics) as JSON
    Generate {
        /// Scenario slug or display name; unknown values give baseline data
        #[arg(short, long, default_value = "commuter-peak")]
        scenario: String,

        /// Only print the summary metrics
        #[arg(long)]
        metrics_only: bool,

        #[arg(long)]
        pretty: bool,
    },
    /// Append one feedback record to the feedback table
    Feedback {
        #[arg(long, default_value_t = 4)]
        happiness_usage: u8,

        #[arg(long, default_value_t = 4)]
        usability: u8,

        #[arg(long, default_value_t = 4)]
        happiness_methods: u8,

        #[arg(short, long, default_value = "")]
        comments: String,

        #[arg(long)]
        feedback_file: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = dotenv::dotenv() {
        eprintln!("Warning: Could not load .env file: {}", e);
    }

    let args = Args::parse();
    let mut config = CockpitConfig::from_env();

    match args.command {
        Command::Serve {
            host,
            port,
            feedback_file,
        } => {
            if let Err(e) = init_logging(&config.log_dir, "safety_cockpit", true) {
                eprintln!("Failed to initialize file logging: {}", e);
                tracing_subscriber::fmt()
                    .with_target(false)
                    .with_level(true)
                    .init();
            }

            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(path) = feedback_file {
                config.feedback_file = path;
            }

            info!("🚀 Starting safety cockpit API...");
            config.log_summary();

            let state = ApiState::from_config(&config);
            api::serve(&config.host, config.port, state).await?;
        }
        Command::Generate {
            scenario,
            metrics_only,
            pretty,
        } => {
            init_console_logging();
            let bundle = generate_bundle(&scenario);
            let value = if metrics_only {
                serde_json::to_value(SummaryMetrics::from_bundle(&bundle))?
            } else {
                serde_json::to_value(&bundle)?
            };
            let output = if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            println!("{}", output);
        }
        Command::Feedback {
            happiness_usage,
            usability,
            happiness_methods,
            comments,
            feedback_file,
        } => {
            init_console_logging();
            let store = FeedbackStore::new(feedback_file.unwrap_or(config.feedback_file));
            let record = FeedbackRecord::new(
                Rating::new(happiness_usage)?,
                Rating::new(usability)?,
                Rating::new(happiness_methods)?,
                comments,
            );
            let rows = store.append(&record)?;
            println!(
                "✅ Feedback saved to {} ({} rows)",
                store.path().display(),
                rows
            );
        }
    }

    Ok(())
}
