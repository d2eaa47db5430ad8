//! Lightweight per-operation timing

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Accumulated timing for one operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionStats {
    /// Number of recorded calls
    pub calls: u64,
    /// Total time spent
    pub total: Duration,
}

impl SectionStats {
    /// Mean time per call
    pub fn mean(&self) -> Duration {
        if self.calls == 0 {
            Duration::ZERO
        } else {
            self.total.div_f64(self.calls as f64)
        }
    }
}

/// Snapshot of every recorded section, ordered by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileReport {
    /// Section name to stats
    pub sections: BTreeMap<&'static str, SectionStats>,
}

impl fmt::Display for ProfileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, stats) in &self.sections {
            writeln!(
                f,
                "{}: {} calls, {:?} total, {:?} mean",
                name,
                stats.calls,
                stats.total,
                stats.mean()
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Profiler {
    enabled: bool,
    report: ProfileReport,
}

impl Profiler {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            report: ProfileReport::default(),
        }
    }

    pub(crate) fn start(&self) -> Option<Instant> {
        self.enabled.then(Instant::now)
    }

    pub(crate) fn finish(&mut self, section: &'static str, started: Option<Instant>) {
        if let Some(started) = started {
            let stats = self.report.sections.entry(section).or_default();
            stats.calls += 1;
            stats.total += started.elapsed();
        }
    }

    pub(crate) fn report(&self) -> &ProfileReport {
        &self.report
    }

    pub(crate) fn clear(&mut self) {
        self.report.sections.clear();
    }
}
