// SPDX-License-Identifier: MIT

use clap::{Parser, Subcommand};
use display_logic::panel::{ControlEdit, MemoryPanel};
use display_logic::reconcile::ReconcileReport;
use display_logic::rules::{ConfigLoader, PanelConfig};
use display_logic::{HostEvent, PanelSession};
use dotenv::dotenv;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply the rules once and print every control's visibility
    Evaluate {
        /// Path to the panel fixture
        #[arg(short, long)]
        panel: String,

        /// Path to the panel configuration (YAML or JSON)
        #[arg(short, long)]
        config: Option<String>,

        /// Path to a bare conditional-logic JSON document
        #[arg(short, long)]
        logic: Option<String>,
    },
    /// Replay timed control edits and print each reconcile pass
    Replay {
        /// Path to the panel fixture
        #[arg(short, long)]
        panel: String,

        /// Path to the panel configuration (YAML or JSON)
        #[arg(short, long)]
        config: Option<String>,

        /// Path to a bare conditional-logic JSON document
        #[arg(short, long)]
        logic: Option<String>,

        /// Path to the replay script
        #[arg(short, long)]
        script: String,
    },
}

/// One scripted host interaction
#[derive(Debug, Deserialize)]
struct ReplayStep {
    /// Offset from the start of the replay
    at_ms: u64,
    #[serde(default = "HostEvent::change")]
    event: HostEvent,
    edit: Option<ControlEdit>,
}

#[derive(Debug, Deserialize)]
struct ReplayScript {
    steps: Vec<ReplayStep>,
}

fn load_config(
    config: Option<&str>,
    logic: Option<&str>,
) -> Result<PanelConfig, Box<dyn std::error::Error + Send + Sync>> {
    let loader = ConfigLoader::new();
    let mut config = match config {
        Some(path) => loader.load_config(path)?,
        None => PanelConfig::default(),
    };

    if let Some(path) = logic {
        let extended = loader.load_extended_logic(path)?;
        log::info!("Loaded {} declaration(s) from {}", extended.len(), path);
        for (tag, declarations) in extended.iter() {
            for declaration in declarations {
                config.conditional_logic.push(tag, declaration.clone());
            }
        }
    }

    Ok(config)
}

fn print_pass(elapsed: Duration, report: &ReconcileReport) {
    println!(
        "[{:>6}ms] pass: {} evaluated, {} changed, {} toggled",
        elapsed.as_millis(),
        report.evaluated,
        report.changed,
        report.toggled
    );
}

fn print_visibility(panel: &MemoryPanel) {
    for control in panel.controls() {
        let state = if control.visible { "shown" } else { "hidden" };
        println!("{:<48} {}", control.id, state);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Evaluate {
            panel,
            config,
            logic,
        } => {
            let config = load_config(config.as_deref(), logic.as_deref())?;
            let panel = MemoryPanel::load(&panel)?;

            let session = PanelSession::new(panel, &config);
            println!(
                "{} rule(s), {} initial toggle(s)",
                session.rules().len(),
                session.initial_report().toggled
            );
            print_visibility(&session.into_panel());
        }
        Commands::Replay {
            panel,
            config,
            logic,
            script,
        } => {
            let config = load_config(config.as_deref(), logic.as_deref())?;
            let panel = MemoryPanel::load(&panel)?;
            let script: ReplayScript = serde_yaml::from_str(&std::fs::read_to_string(&script)?)?;

            let mut session = PanelSession::new(panel, &config);
            println!(
                "{} rule(s), quiet period {}ms",
                session.rules().len(),
                session.quiet_period().as_millis()
            );
            let start = Instant::now();
            print_pass(Duration::ZERO, &session.initial_report());

            for step in &script.steps {
                let at = start + Duration::from_millis(step.at_ms);
                if let Some(report) = session.advance_until(at).await {
                    print_pass(report_time(&session, start), &report);
                }

                if let Some(edit) = &step.edit {
                    if !session.panel_mut().apply(edit) {
                        log::warn!("Edit targets an unknown control: {:?}", edit);
                    }
                }
                session.notify(&step.event);
            }

            if let Some(report) = session.flush().await {
                print_pass(report_time(&session, start), &report);
            }
            println!("{} debounced pass(es)", session.passes());
            print_visibility(session.panel());
        }
    }

    Ok(())
}

fn report_time(session: &PanelSession<MemoryPanel>, start: Instant) -> Duration {
    session
        .last_pass()
        .map(|at| at.duration_since(start))
        .unwrap_or_default()
}
