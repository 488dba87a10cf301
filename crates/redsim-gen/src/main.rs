//! redsim - SOC Traffic & Attack Scenario Generator
//!
//! Usage:
//!   redsim run <scenario>                     # named scenario from scenarios/
//!   redsim continuous [normalMs] [attackMs]   # mixed background traffic
//!   redsim probe <name|index|all>             # correlation engine probes
//!   redsim list                               # what can be run

use clap::{Parser, Subcommand, error::ErrorKind};
use redsim_core::{DeliveryClient, DeliveryConfig};
use redsim_gen::continuous::{GeneratorConfig, MixedTrafficGenerator};
use redsim_gen::loader::{self, DEFAULT_SCENARIO_DIR};
use redsim_gen::probe::{self, ProbeScenario};
use redsim_gen::scenario::run_scenario;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "redsim")]
#[command(about = "Synthetic SOC traffic and attack scenario generator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one named attack scenario against the ingestion endpoint
    Run {
        /// Scenario name, resolved to <dir>/<name>.json
        scenario: String,

        /// Scenario directory
        #[arg(long, default_value = DEFAULT_SCENARIO_DIR)]
        dir: PathBuf,
    },

    /// Continuous mixed traffic: steady business events plus
    /// intermittent random attacks, until Ctrl-C
    Continuous {
        /// Normal-traffic period in milliseconds (default 400)
        normal_period_ms: Option<String>,

        /// Attack period in milliseconds (default 6000)
        attack_period_ms: Option<String>,
    },

    /// Drive the external correlation engine with probe narratives
    Probe {
        /// Probe name, 1-based index, or "all"
        #[arg(default_value = "all")]
        scenario: String,
    },

    /// List loadable scenarios and built-in probes
    List {
        /// Scenario directory
        #[arg(long, default_value = DEFAULT_SCENARIO_DIR)]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    // Help is not an error, and neither is a typo'd verb: both print
    // usage and exit 0 so the generator never looks crashed.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return;
        }
        Err(_) => {
            print_usage();
            return;
        }
    };

    match cli.command {
        None => print_usage(),
        Some(Commands::Run { scenario, dir }) => run_named(&dir, &scenario).await,
        Some(Commands::Continuous {
            normal_period_ms,
            attack_period_ms,
        }) => {
            let config = GeneratorConfig {
                normal_period: parse_period_ms(normal_period_ms, 400),
                attack_period: parse_period_ms(attack_period_ms, 6000),
            };
            run_continuous(config).await;
        }
        Some(Commands::Probe { scenario }) => run_probe(&scenario).await,
        Some(Commands::List { dir }) => run_list(&dir),
    }
}

/// Malformed period arguments fall back silently to the default -
/// traffic generation must not become its own outage.
fn parse_period_ms(arg: Option<String>, default_ms: u64) -> Duration {
    Duration::from_millis(
        arg.and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(default_ms),
    )
}

async fn run_named(dir: &Path, name: &str) {
    let scenario = match loader::load_scenario(dir, name) {
        Ok(Some(scenario)) => scenario,
        Ok(None) => {
            println!("unknown scenario '{}'", name);
            print_usage();
            return;
        }
        Err(e) => {
            println!("scenario '{}' could not be loaded: {}", name, e);
            print_usage();
            return;
        }
    };

    let config = DeliveryConfig::from_env();
    let client = DeliveryClient::new(&config.ingest_url, config.timeout_ms);

    println!("Running scenario '{}' against {}", scenario.name, config.ingest_url);
    let report = run_scenario(&client, &scenario).await;

    println!("\n=== Scenario Report ===");
    println!("Scenario:        {}", scenario.name);
    println!("Source identity: {}", report.source_identity);
    println!("Events sent:     {}", report.delivered);
    println!("Steps skipped:   {}", report.skipped_steps);
}

async fn run_continuous(config: GeneratorConfig) {
    let delivery = DeliveryConfig::from_env();
    let sink = Arc::new(DeliveryClient::new(&delivery.ingest_url, delivery.timeout_ms));

    println!(
        "Continuous mode: normal every {}ms, attack every {}ms -> {}",
        config.normal_period.as_millis(),
        config.attack_period.as_millis(),
        delivery.ingest_url
    );
    println!("Ctrl-C to stop.\n");

    let handle = MixedTrafficGenerator::start(sink, config);
    let _ = tokio::signal::ctrl_c().await;
    let report = handle.stop().await;

    println!("\n=== Continuous Run Report ===");
    println!("Normal events: {}", report.normal_events);
    println!("Attack events: {}", report.attack_events);
    println!("Duration:      {:.2?}", report.elapsed);
}

async fn run_probe(selector: &str) {
    let config = DeliveryConfig::from_env();
    let client = DeliveryClient::new(&config.probe_url, config.timeout_ms);

    if selector == "all" {
        probe::run_all(&client).await;
        return;
    }

    match ProbeScenario::parse(selector) {
        Some(scenario) => scenario.run(&client).await,
        None => {
            println!("unknown probe '{}'. available probes:", selector);
            for (i, probe) in ProbeScenario::ALL.iter().enumerate() {
                println!("  {}. {:18} - {}", i + 1, probe.name(), probe.description());
            }
        }
    }
}

fn run_list(dir: &Path) {
    let names = loader::list_scenarios(dir);
    if names.is_empty() {
        println!("no scenarios found in {}/", dir.display());
    } else {
        println!("scenarios ({}/):", dir.display());
        for name in names {
            println!("  {}", name);
        }
    }

    println!("\nprobes:");
    for (i, probe) in ProbeScenario::ALL.iter().enumerate() {
        println!("  {}. {:18} - {}", i + 1, probe.name(), probe.description());
    }
}

fn print_usage() {
    println!("redsim - synthetic SOC traffic and attack scenario generator");
    println!();
    println!("Usage:");
    println!("  redsim run <scenario>                     run a named scenario");
    println!("  redsim continuous [normalMs] [attackMs]   mixed traffic until Ctrl-C");
    println!("  redsim probe <name|index|all>             correlation engine probes");
    println!("  redsim list                               list scenarios and probes");
}
