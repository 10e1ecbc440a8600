//! Per-stage running totals accumulated while BOM lines are analyzed.

use std::collections::HashMap;
use std::ops::AddAssign;

use serde::Serialize;

use crate::stage::Stage;

/// Line counts for one stage (or for the whole pipeline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StageCounters {
    pub total: u32,
    pub fulfilled: u32,
    pub blocking_total: u32,
    pub blocking_fulfilled: u32,
}

impl StageCounters {
    /// Count one analyzed line.
    pub fn record(&mut self, blocking: bool, fulfilled: bool) {
        self.total += 1;
        if fulfilled {
            self.fulfilled += 1;
        }
        if blocking {
            self.blocking_total += 1;
            if fulfilled {
                self.blocking_fulfilled += 1;
            }
        }
    }
}

impl AddAssign for StageCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.total += rhs.total;
        self.fulfilled += rhs.fulfilled;
        self.blocking_total += rhs.blocking_total;
        self.blocking_fulfilled += rhs.blocking_fulfilled;
    }
}

/// Counters for one stage plus a back-reference to the stage itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageEntry<'a> {
    pub stage: &'a Stage,
    pub counters: StageCounters,
}

/// Accumulator keyed by stage code.
///
/// Single writer: the analysis pass owns it mutably, gate propagation only
/// reads it afterwards.
#[derive(Debug, Clone, Default)]
pub struct StageLedger<'a> {
    entries: HashMap<&'a str, StageEntry<'a>>,
}

impl<'a> StageLedger<'a> {
    /// Fresh zero counters for every known stage.
    pub fn init(stages: &'a [Stage]) -> Self {
        let entries = stages
            .iter()
            .map(|stage| {
                (
                    stage.code.as_str(),
                    StageEntry {
                        stage,
                        counters: StageCounters::default(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Count one line against `code`. Returns `false` (and records nothing)
    /// for an unknown stage.
    pub fn record(&mut self, code: &str, blocking: bool, fulfilled: bool) -> bool {
        match self.entries.get_mut(code) {
            Some(entry) => {
                entry.counters.record(blocking, fulfilled);
                true
            }
            None => false,
        }
    }

    pub fn entry(&self, code: &str) -> Option<&StageEntry<'a>> {
        self.entries.get(code)
    }

    /// Counters for a stage; zero when the stage has no lines or is unknown.
    pub fn counters(&self, code: &str) -> StageCounters {
        self.entries
            .get(code)
            .map(|e| e.counters)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
