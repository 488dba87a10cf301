//! redsim-probe - Standalone Correlation Probe Driver
//!
//! Thin wrapper around the probe harness for driving the correlation
//! engine without the full CLI:
//!
//!   redsim-probe                      # run all five narratives
//!   redsim-probe attack-chain         # one narrative by name
//!   redsim-probe 2 --target http://soc.local:3000/api/correlation/events

use clap::Parser;
use redsim_core::{DeliveryClient, DeliveryConfig};
use redsim_gen::probe::{self, ProbeScenario};

#[derive(Parser)]
#[command(name = "redsim-probe")]
#[command(about = "Emit correlation-engine probe narratives")]
struct Cli {
    /// Probe name, 1-based index, or "all"
    #[arg(default_value = "all")]
    scenario: String,

    /// Correlation ingestion URL (defaults to REDSIM_PROBE_URL or the
    /// built-in endpoint)
    #[arg(short, long)]
    target: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    let config = DeliveryConfig::from_env();
    let url = cli.target.unwrap_or(config.probe_url);
    let client = DeliveryClient::new(&url, config.timeout_ms);

    println!("Probe target: {}\n", url);

    if cli.scenario == "all" {
        probe::run_all(&client).await;
        return;
    }

    match ProbeScenario::parse(&cli.scenario) {
        Some(scenario) => scenario.run(&client).await,
        None => {
            println!("unknown probe '{}'. available probes:", cli.scenario);
            for (i, probe) in ProbeScenario::ALL.iter().enumerate() {
                println!("  {}. {:18} - {}", i + 1, probe.name(), probe.description());
            }
        }
    }
}
