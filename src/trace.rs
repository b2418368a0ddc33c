//! Line-oriented fight narration.
//!
//! When tracing is on, the engine narrates every in-trial event (cards
//! played, damage dealt, abilities firing) to the run's output stream,
//! interleaved exactly where it happens. The narration is report
//! content, not diagnostics, so it goes to the same writer as the
//! final report rather than through the `log` facade. The driver
//! forces a single worker whenever it is enabled so lines never
//! interleave across threads.
//!
//! Two verbosity levels exist: `Debug` narrates events, `Verbose` adds
//! per-turn banners. The separate per-trial damage dump used by the
//! damage histogram mode is carried here too.

use std::fmt;
use std::io::Write;

/// How much narration to emit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum TraceLevel {
    /// No narration; the hot path stays silent.
    #[default]
    Off,
    /// Event narration.
    Debug,
    /// Event narration plus per-turn banners.
    Verbose,
}

/// Sink for fight narration.
///
/// Formatting arguments are passed through verbatim; callers embed
/// their own newlines, which lets multi-part lines (attack headers
/// followed by resolution fragments) compose the way they read.
pub struct FightLog<'w> {
    level: TraceLevel,
    show_damage: bool,
    out: Option<&'w mut dyn Write>,
}

impl<'w> FightLog<'w> {
    /// A silent log for parallel workers.
    #[must_use]
    pub fn off() -> Self {
        Self {
            level: TraceLevel::Off,
            show_damage: false,
            out: None,
        }
    }

    /// A log writing to `out` at the given level.
    #[must_use]
    pub fn new(level: TraceLevel, out: &'w mut dyn Write) -> Self {
        Self {
            level,
            show_damage: false,
            out: Some(out),
        }
    }

    /// Also emit one damage line per finished trial.
    #[must_use]
    pub fn with_show_damage(mut self, show: bool) -> Self {
        self.show_damage = show;
        self
    }

    /// Whether event narration is on.
    #[must_use]
    pub fn debug_enabled(&self) -> bool {
        self.level >= TraceLevel::Debug
    }

    /// Whether per-turn banners are on.
    #[must_use]
    pub fn verbose_enabled(&self) -> bool {
        self.level >= TraceLevel::Verbose
    }

    /// Narrate an event.
    pub fn debug(&mut self, args: fmt::Arguments<'_>) {
        if self.level >= TraceLevel::Debug {
            self.write(args);
        }
    }

    /// Emit a per-turn banner.
    pub fn verbose(&mut self, args: fmt::Arguments<'_>) {
        if self.level >= TraceLevel::Verbose {
            self.write(args);
        }
    }

    /// Emit the per-trial damage line.
    pub fn trial_damage(&mut self, dmg: i32) {
        if self.show_damage {
            self.write(format_args!("Dmg done = {dmg}\n"));
        }
    }

    fn write(&mut self, args: fmt::Arguments<'_>) {
        if let Some(out) = self.out.as_deref_mut() {
            // Narration failures are not worth aborting a battle over.
            let _ = out.write_fmt(args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_log_is_silent() {
        let mut log = FightLog::off();
        assert!(!log.debug_enabled());
        assert!(!log.verbose_enabled());
        log.debug(format_args!("nothing\n"));
        log.trial_damage(42);
    }

    #[test]
    fn test_debug_level_filters_verbose() {
        let mut buf = Vec::new();
        let mut log = FightLog::new(TraceLevel::Debug, &mut buf);
        log.debug(format_args!("event\n"));
        log.verbose(format_args!("banner\n"));
        drop(log);

        assert_eq!(String::from_utf8(buf).unwrap(), "event\n");
    }

    #[test]
    fn test_verbose_level_emits_both() {
        let mut buf = Vec::new();
        let mut log = FightLog::new(TraceLevel::Verbose, &mut buf);
        log.debug(format_args!("event\n"));
        log.verbose(format_args!("banner\n"));
        drop(log);

        assert_eq!(String::from_utf8(buf).unwrap(), "event\nbanner\n");
    }

    #[test]
    fn test_trial_damage_gated_separately() {
        let mut buf = Vec::new();
        let mut log = FightLog::new(TraceLevel::Off, &mut buf).with_show_damage(true);
        log.debug(format_args!("event\n"));
        log.trial_damage(1234);
        drop(log);

        assert_eq!(String::from_utf8(buf).unwrap(), "Dmg done = 1234\n");
    }
}
