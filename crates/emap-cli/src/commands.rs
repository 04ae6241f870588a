//! Command implementations for the emap CLI.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info, warn};

use emap_client::{ClientConfig, EmailMapClient};
use emap_model::Mapping;
use emap_store::{MappingStore, PairState};

use emap_cli::plan::ChangePlan;

use crate::cli::{ApplyArgs, Cli, PairArgs, PairsArgs, ShowArgs};
use crate::observer::LogObserver;

/// Build a store wired to the configured server and load the current set.
fn connect(cli: &Cli) -> Result<MappingStore<EmailMapClient>> {
    let Some(server) = &cli.server else {
        bail!("--server is required (base URL of the records-management server)");
    };
    let mut config =
        ClientConfig::new(server.clone()).with_timeout(Duration::from_secs(cli.timeout_secs));
    if let (Some(user), Some(password)) = (&cli.user, &cli.password) {
        config = config.with_basic_auth(user.clone(), password.clone());
    }
    let client = EmailMapClient::new(config).context("build HTTP client")?;
    let mut store = MappingStore::new(client);
    store.register(Box::new(LogObserver));
    store.load().context("load mappings")?;
    Ok(store)
}

pub fn run_list(cli: &Cli) -> Result<()> {
    let store = connect(cli)?;
    let mut table = Table::new();
    table.set_header(vec!["Email header", "Record property"]);
    for mapping in store.mappings() {
        table.add_row(vec![mapping.from.clone(), mapping.to.clone()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_show(cli: &Cli, args: &ShowArgs) -> Result<()> {
    let store = connect(cli)?;
    let selection = store.selection_by_key(&args.from);
    if selection.is_empty() {
        println!("no mappings for {}", args.from);
    } else {
        for target in selection.split_terminator(',') {
            println!("{target}");
        }
    }
    Ok(())
}

pub fn run_check(cli: &Cli, args: &PairArgs) -> Result<()> {
    let pair = Mapping::parse(&args.pair)?;
    let store = connect(cli)?;
    if store.is_valid_addition(&pair) {
        println!("ok: {pair} can be added");
    } else {
        println!(
            "conflict: {} is already mapped under {}",
            pair.to, pair.from
        );
    }
    Ok(())
}

pub fn run_add(cli: &Cli, args: &PairsArgs) -> Result<()> {
    let pairs = parse_pairs(&args.pairs)?;
    let mut store = connect(cli)?;
    let mut staged = 0usize;
    for pair in pairs {
        if store.add(pair.clone()) {
            staged += 1;
        } else {
            warn!(%pair, "skipped: already mapped");
        }
    }
    if staged == 0 {
        bail!("nothing to add; every pair is already mapped");
    }
    store.save().context("save mapping changes")?;
    info!(added = staged, "mappings added");
    println!("added {staged} mapping(s)");
    Ok(())
}

pub fn run_remove(cli: &Cli, args: &PairsArgs) -> Result<()> {
    let pairs = parse_pairs(&args.pairs)?;
    let mut store = connect(cli)?;
    let mut staged = 0usize;
    for pair in pairs {
        if store.pair_state(&pair) == PairState::Absent {
            warn!(%pair, "not present on the server; deletion will be a no-op");
        }
        if store.remove(&pair) {
            staged += 1;
        }
    }
    if !store.has_pending_changes() {
        println!("nothing to remove");
        return Ok(());
    }
    store.save().context("save mapping changes")?;
    info!(removed = staged, "mappings removed");
    println!("removed {staged} mapping(s)");
    Ok(())
}

pub fn run_apply(cli: &Cli, args: &ApplyArgs) -> Result<()> {
    let plan = ChangePlan::from_file(&args.plan)?;
    if plan.is_empty() {
        bail!("plan has no additions or removals");
    }
    let mut store = connect(cli)?;
    let mut rejected = 0usize;
    for pair in &plan.add {
        if !store.add(pair.clone()) {
            warn!(%pair, "skipped addition: incomplete or already mapped");
            rejected += 1;
        }
    }
    for pair in &plan.remove {
        store.remove(pair);
    }
    let summary = store.summary();
    info!(
        adds = summary.pending_adds.len(),
        removes = summary.pending_removes.len(),
        rejected,
        "plan staged"
    );
    if args.dry_run {
        println!(
            "dry run: {} addition(s) and {} removal(s) staged, nothing submitted",
            summary.pending_adds.len(),
            summary.pending_removes.len()
        );
        store.discard();
        return Ok(());
    }
    if !store.has_pending_changes() {
        println!("nothing to submit");
        return Ok(());
    }
    store.save().context("save mapping changes")?;
    println!(
        "applied {} addition(s) and {} removal(s)",
        summary.pending_adds.len(),
        summary.pending_removes.len()
    );
    Ok(())
}

fn parse_pairs(raw: &[String]) -> Result<Vec<Mapping>> {
    raw.iter()
        .map(|text| Mapping::parse(text).map_err(anyhow::Error::from))
        .collect()
}
