//! End-of-run report formatting.
//!
//! The line labels, ordering and number formats here are user-facing
//! output; downstream tooling scrapes them, so they are kept stable.

use std::io::{self, Write};

use crate::core::TrialState;
use crate::sim::RunResult;

/// Write the full report: the setup header, the deck and rune
/// listings, and the aggregate statistics.
pub fn write_report(
    out: &mut dyn Write,
    master: &TrialState,
    level: u32,
    iters: usize,
    round_x: i32,
    result: &RunResult,
) -> io::Result<()> {
    let cost: i32 = master.deck.iter().map(|c| c.template.cost).sum();
    let cooldown = 60 + cost * 2;

    writeln!(out, "Demon: {}", master.demon.name())?;
    writeln!(
        out,
        "Deck : (level {}, {} initial hp, {} cost, {}:{:02} cooldown)",
        level,
        master.hp,
        cost,
        cooldown / 60,
        cooldown % 60
    )?;
    writeln!(out)?;
    for (i, card) in master.deck.iter().enumerate() {
        writeln!(out, "{:2}) {}", i + 1, card.name())?;
    }
    writeln!(out, "\nRunes:\n")?;
    for rune in &master.runes {
        writeln!(out, "{}", rune.name)?;
    }
    writeln!(out, "\nResults of simulation ({iters} fights):\n")?;

    writeln!(
        out,
        "Lowest  number of rounds      : {}",
        result.low_rounds
    )?;
    writeln!(
        out,
        "Highest number of rounds      : {}",
        result.high_rounds
    )?;
    writeln!(
        out,
        "Average number of rounds      : {:4.1}",
        result.avg_rounds(iters)
    )?;
    if result.times_round_x > 0 {
        writeln!(
            out,
            "Percent time hitting round {} : {:4.1}",
            round_x,
            result.times_round_x as f64 * 100.0 / iters as f64
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Lowest  damage                : {}", result.low_damage)?;
    writeln!(out, "Highest damage                : {}", result.high_damage)?;
    writeln!(
        out,
        "Average dmg per fight         : {:5.1}",
        result.avg_damage(iters)
    )?;
    writeln!(
        out,
        "Average dmg per minute        : {:5.1}",
        result.avg_damage(iters) * 60.0 / f64::from(cooldown)
    )?;
    writeln!(out, "\n")?;
    Ok(())
}
