//! champion-runner: headless runner for champion store resolution.
//!
//! Usage:
//!   champion-runner --db shop.db seed --seed 42 --companies 3 --customers 200
//!   champion-runner --db shop.db --config engine.json sweep
//!   champion-runner --db shop.db sweep --company <company-id>
//!   champion-runner --db shop.db drain --max-rounds 50
//!   champion-runner --db shop.db order --order <order-id>

use anyhow::{bail, Context, Result};
use champion_core::{
    config::EngineConfig,
    engine::ChampionEngine,
    policy::{BlockList, Either, FreeTier},
    report::{CompanyOutcome, SweepReport},
    source::require_company,
    store::SqliteStore,
    synth::{Dataset, SynthConfig},
};
use std::env;

type Engine = ChampionEngine<SqliteStore, Either<FreeTier, BlockList>>;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = flag(&args, "--db").unwrap_or(":memory:");
    let config = match flag(&args, "--config") {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let command = args
        .iter()
        .skip(1)
        .find(|a| matches!(a.as_str(), "seed" | "sweep" | "drain" | "order"))
        .map(String::as_str)
        .unwrap_or("sweep");

    let store = SqliteStore::open(db)?;
    store.migrate()?;
    log::info!("champion-runner: db={db} command={command} chunk_size={}", config.chunk_size);

    match command {
        "seed" => seed(&store, &args),
        _ => {
            let oracle = Either(FreeTier, BlockList::new(config.blocked_companies.clone()));
            let engine = ChampionEngine::new(store, oracle, config)?;
            match command {
                "drain" => drain(&engine, parse_arg(&args, "--max-rounds", 100usize)),
                "order" => order(&engine, &args),
                _ => sweep(&engine, &args),
            }
        }
    }
}

fn seed(store: &SqliteStore, args: &[String]) -> Result<()> {
    let seed = parse_arg(args, "--seed", 42u64);
    let defaults = SynthConfig::default();
    let config = SynthConfig {
        companies: parse_arg(args, "--companies", defaults.companies),
        customers_per_company: parse_arg(args, "--customers", defaults.customers_per_company),
        stores_per_company: parse_arg(args, "--stores", defaults.stores_per_company),
        ..defaults
    };
    let data = Dataset::generate(seed, &config);
    data.load_into(store)?;

    println!("=== SEEDED ===");
    println!("  seed:       {seed}");
    println!("  companies:  {}", data.companies.len());
    println!("  stores:     {}", data.stores.len());
    println!("  customers:  {}", data.customers.len());
    println!("  orders:     {}", data.orders.len());
    Ok(())
}

fn sweep(engine: &Engine, args: &[String]) -> Result<()> {
    let report = match flag(args, "--company") {
        Some(company_id) => {
            let company = require_company(&engine.source, &company_id.to_string())?;
            let mut report = SweepReport::new();
            let outcome = engine.sweep_company(&company)?;
            report.push(company.company_id, outcome);
            report
        }
        None => engine.sweep()?,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Repeat sweeps until one assigns nothing. The engine never loops on its
/// own; this is the caller-side loop.
fn drain(engine: &Engine, max_rounds: usize) -> Result<()> {
    let mut total = 0usize;
    for round in 1..=max_rounds {
        let report = engine.sweep()?;
        let assigned = report.assignment_count();
        total += assigned;
        println!(
            "  round {round:>3}: {assigned:>7} assigned, {} failed companies",
            report.failed_count()
        );
        for c in &report.companies {
            if let CompanyOutcome::Failed { error } = &c.outcome {
                log::warn!("drain: company {} failed: {error}", c.company_id);
            }
        }
        if assigned == 0 {
            println!("=== DRAINED === {total} customers assigned in {round} rounds");
            return Ok(());
        }
    }
    println!("=== STOPPED === {total} customers assigned, round limit {max_rounds} reached");
    Ok(())
}

fn order(engine: &Engine, args: &[String]) -> Result<()> {
    let Some(order_id) = flag(args, "--order") else {
        bail!("order: --order <order-id> is required");
    };
    let order = engine
        .source
        .get_order(order_id)?
        .with_context(|| format!("order {order_id} not found"))?;
    let customer = engine
        .source
        .get_customer(&order.customer_id)?
        .with_context(|| format!("customer {} not found", order.customer_id))?;

    let outcome = engine.on_order_recorded(&order, &customer)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
