//! The Monte-Carlo driver.
//!
//! Trials are split across workers, each owning a page-aligned
//! [`TrialState`] and a private PRNG stream; a worker runs its share
//! of trials back to back and fills one [`RunResult`]. No state is
//! shared during the run; the accumulators merge associatively after
//! the pool joins. The remainder of an uneven split lands on worker 0.
//!
//! Tracing and the per-trial damage dump serialize output, so either
//! one forces a single worker running inline on the caller's thread.

pub mod result;

use std::io::Write;

use rand::Rng;
use rayon::prelude::*;

use crate::core::{EngineConfig, MwcRng, TrialState};
use crate::engine::Battle;
use crate::trace::{FightLog, TraceLevel};

pub use result::RunResult;

/// Default number of trials.
pub const DEFAULT_ITERS: usize = 50_000;

/// Default worker count.
pub const DEFAULT_WORKERS: usize = 8;

/// Hard cap on workers.
pub const MAX_WORKERS: usize = 64;

/// Driver options.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Number of trials to run.
    pub iters: usize,
    /// Requested worker count.
    pub workers: usize,
    /// Fight narration level.
    pub trace: TraceLevel,
    /// Dump each trial's final damage.
    pub show_damage: bool,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            iters: DEFAULT_ITERS,
            workers: DEFAULT_WORKERS,
            trace: TraceLevel::Off,
            show_damage: false,
        }
    }
}

impl SimOptions {
    /// The worker count actually used: clamped to the supported range,
    /// and forced to 1 whenever per-trial output is on.
    #[must_use]
    pub fn effective_workers(&self) -> usize {
        if self.trace != TraceLevel::Off || self.show_damage {
            1
        } else {
            self.workers.clamp(1, MAX_WORKERS)
        }
    }
}

/// One worker's slice of the run.
struct WorkerTask {
    state: Box<TrialState>,
    iters: usize,
}

impl WorkerTask {
    fn new(master: &TrialState, seeds: (u32, u32), iters: usize) -> Self {
        let mut state = Box::new(master.clone());
        state.rng = MwcRng::new(seeds.0, seeds.1);
        Self { state, iters }
    }

    /// Run this worker's trials.
    fn run(&mut self, master: &TrialState, cfg: &EngineConfig, log: &mut FightLog<'_>) -> RunResult {
        let mut result = RunResult::empty();
        for _ in 0..self.iters {
            self.state.reset_from(master);
            {
                let state = &mut *self.state;
                state.deck.shuffle(&mut state.rng);
            }
            let hit = Battle::new(&mut self.state, cfg, log).run();
            result.record_trial(self.state.dmg_done, self.state.round, hit);
            log.trial_damage(self.state.dmg_done);
            log.debug(format_args!("\n"));
        }
        result
    }
}

/// Run the full simulation with entropy-seeded workers.
pub fn run(
    master: &TrialState,
    cfg: &EngineConfig,
    opts: &SimOptions,
    out: &mut dyn Write,
) -> RunResult {
    let workers = opts.effective_workers();
    let mut entropy = rand::thread_rng();
    let seeds: Vec<(u32, u32)> = (0..workers)
        .map(|_| (entropy.gen::<u32>(), entropy.gen::<u32>()))
        .collect();
    run_seeded(master, cfg, opts, &seeds, out)
}

/// Run the full simulation with explicit worker seeds (one pair per
/// worker). Fixed seeds make the whole run reproducible.
pub fn run_seeded(
    master: &TrialState,
    cfg: &EngineConfig,
    opts: &SimOptions,
    seeds: &[(u32, u32)],
    out: &mut dyn Write,
) -> RunResult {
    if seeds.is_empty() {
        return RunResult::empty();
    }
    let workers = seeds.len();
    let base = opts.iters / workers;
    let mut tasks: Vec<WorkerTask> = seeds
        .iter()
        .enumerate()
        .map(|(i, &pair)| {
            // Worker 0 also takes the remainder of an uneven split.
            let iters = if i == 0 {
                base + (opts.iters - base * workers)
            } else {
                base
            };
            WorkerTask::new(master, pair, iters)
        })
        .collect();

    if workers == 1 {
        let mut log = match opts.trace {
            TraceLevel::Off if !opts.show_damage => FightLog::off(),
            level => FightLog::new(level, out).with_show_damage(opts.show_damage),
        };
        return tasks[0].run(master, cfg, &mut log);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .expect("simulation thread pool");
    let results: Vec<RunResult> = pool.install(|| {
        tasks
            .into_par_iter()
            .map(|mut task| {
                let mut log = FightLog::off();
                task.run(master, cfg, &mut log)
            })
            .collect()
    });
    results.into_iter().fold(RunResult::empty(), RunResult::merge)
}
