//! OmniChain console binary.
//!
//! Reads operator questions from stdin and prints grounded answers to
//! stdout. Structured logs go to stderr.

use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use oc_console::config::ConsoleConfig;
use oc_console::session::Session;
use oc_console::shell;
use oc_engine::GroundedEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "oc-console starting");

    // ── Load config ─────────────────────────────────────────────
    let config_path = std::env::args().nth(1);
    let config = ConsoleConfig::load(config_path.as_deref())?;
    tracing::info!(
        path = config_path.as_deref().unwrap_or("<defaults>"),
        thinking_delay_ms = config.thinking_delay_ms,
        reveal_evidence = config.reveal_evidence,
        "config loaded"
    );

    // ── Engine ──────────────────────────────────────────────────
    let engine = GroundedEngine::from_config(&config.engine)?;
    let computed = engine.snapshot().computed();
    tracing::info!(
        months = engine.snapshot().monthly().len(),
        suppliers = engine.snapshot().suppliers().len(),
        shipments = engine.snapshot().shipments().len(),
        low_inventory_months = computed.low_inventory_months.len(),
        "snapshot loaded"
    );

    let mut session = Session::new(Box::new(engine), config.reveal_evidence);

    println!("{}", shell::HELP);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    shell::run(&mut session, stdin, &mut stdout, config.thinking_delay()).await?;

    tracing::info!("oc-console exiting");
    Ok(())
}
