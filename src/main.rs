//! Command-line front-end: argument handling, file loading, wiring.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use demonsim::catalog::{hp_for_level, Catalog, DeckList};
use demonsim::core::{EngineConfig, TrialState};
use demonsim::error::SimError;
use demonsim::sim::{self, SimOptions};
use demonsim::trace::TraceLevel;
use demonsim::{report, RunResult};

#[derive(Parser, Debug)]
#[command(name = "demonsim")]
#[command(about = "Monte-Carlo demon battle simulator", long_about = None)]
#[command(args_override_self = true)]
struct Args {
    /// Player level; sets starting hp from the level table
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=150), default_value_t = 61)]
    level: u32,

    /// Override starting hp
    #[arg(long)]
    hp: Option<i32>,

    /// Number of battles to simulate
    #[arg(long, default_value_t = sim::DEFAULT_ITERS)]
    iter: usize,

    /// Demon card name
    #[arg(long, default_value = "DarkTitan")]
    demon: String,

    /// Deck file
    #[arg(long, default_value = "deck.txt")]
    deck: PathBuf,

    /// Card catalog file
    #[arg(long, default_value = "cards.txt")]
    cards: PathBuf,

    /// Narrate every fight event; forces 10 battles on one worker
    #[arg(long)]
    debug: bool,

    /// As --debug, plus per-turn banners
    #[arg(long)]
    verbose: bool,

    /// Print each battle's final damage; forces 200 battles on one worker
    #[arg(long)]
    showdamage: bool,

    /// Replace the 50/50 Concentrate and Frost Bite rolls with their
    /// deterministic average
    #[arg(long, alias = "avgconcentrate")]
    avg_concentrate: bool,

    /// Round threshold for the reach-rate statistic
    #[arg(long, default_value_t = 50)]
    printround: i32,

    /// Worker threads (1..=64)
    #[arg(long, default_value_t = sim::DEFAULT_WORKERS)]
    numthreads: usize,

    /// Safety cap on rounds per battle
    #[arg(long, default_value_t = 500)]
    maxrounds: i32,

    /// Write the report to a file (truncate)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Append the report to a file
    #[arg(short = 'a', long)]
    append: Option<PathBuf>,
}

/// Build the argv to parse: the first line of `defaults.txt`, when
/// present, is tokenized and spliced in ahead of the real arguments so
/// the command line wins any conflict.
fn argv_with_defaults() -> Vec<OsString> {
    let mut argv: Vec<OsString> = std::env::args_os().collect();
    if let Ok(text) = std::fs::read_to_string("defaults.txt") {
        if let Some(first) = text.lines().next() {
            let defaults: Vec<OsString> =
                first.split_whitespace().map(OsString::from).collect();
            if !defaults.is_empty() {
                info!("applying {} tokens from defaults.txt", defaults.len());
                let rest = argv.split_off(1);
                argv.extend(defaults);
                argv.extend(rest);
            }
        }
    }
    argv
}

fn open_output(args: &Args) -> anyhow::Result<Box<dyn Write>> {
    let open = |path: &PathBuf, append: bool| -> anyhow::Result<Box<dyn Write>> {
        let file = if append {
            OpenOptions::new().create(true).append(true).open(path)
        } else {
            File::create(path)
        }
        .map_err(|source| SimError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Box::new(file))
    };

    match (&args.output, &args.append) {
        (Some(path), _) => open(path, false),
        (None, Some(path)) => open(path, true),
        (None, None) => Ok(Box::new(io::stdout())),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse_from(argv_with_defaults());

    let catalog = Catalog::from_file(&args.cards).context("loading card catalog")?;
    info!(
        "loaded {} card templates from {}",
        catalog.len(),
        args.cards.display()
    );
    let deck = DeckList::from_file(&catalog, &args.deck).context("loading deck")?;
    info!(
        "deck has {} cards and {} runes",
        deck.cards.len(),
        deck.runes.len()
    );

    let demon = catalog
        .find(&args.demon)
        .ok_or_else(|| SimError::UnknownDemon(args.demon.clone()))?
        .clone();

    let initial_hp = match args.hp {
        Some(hp) => hp,
        None => hp_for_level(args.level).expect("level range is enforced by the parser"),
    };

    let master = TrialState::assemble(demon, &deck.cards, &deck.runes, initial_hp);

    let cfg = EngineConfig::new()
        .with_max_rounds(args.maxrounds)
        .with_round_x(args.printround)
        .with_avg_concentrate(args.avg_concentrate);

    let trace = if args.verbose {
        TraceLevel::Verbose
    } else if args.debug {
        TraceLevel::Debug
    } else {
        TraceLevel::Off
    };
    let iters = if args.debug || args.verbose {
        10
    } else if args.showdamage {
        200
    } else {
        args.iter
    };
    let opts = SimOptions {
        iters,
        workers: args.numthreads,
        trace,
        show_damage: args.showdamage,
    };

    let mut out = open_output(&args).context("opening output file")?;

    info!(
        "running {} battles on {} workers",
        opts.iters,
        opts.effective_workers()
    );
    let result: RunResult = sim::run(&master, &cfg, &opts, &mut *out);

    report::write_report(
        &mut *out,
        &master,
        args.level,
        opts.iters,
        args.printround,
        &result,
    )
    .context("writing report")?;
    Ok(())
}
