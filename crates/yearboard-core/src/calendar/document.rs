//! The per-year calendar document: the unit of persistence and sync.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::{MonthDocument, QuarterlyNote};

/// Quarters per year, keyed 1..=4.
pub const QUARTERS: u8 = 4;

/// Months per year, keyed 1..=12.
pub const MONTHS_PER_YEAR: usize = 12;

/// Years the planner offers.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 2024..=2030;

/// Everything a user puts on one year.
///
/// `Default` yields the structurally complete empty document: an empty note
/// list for each quarter and twelve months of four unnamed topics. Readers
/// never observe partial substructure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDocument {
    /// Sticky notes per quarter (1..=4). BTreeMap keeps serialization
    /// deterministic for change-detection hashing.
    #[serde(default)]
    pub notes: BTreeMap<u8, Vec<QuarterlyNote>>,
    #[serde(default = "default_months")]
    pub months: Vec<MonthDocument>,
}

fn default_months() -> Vec<MonthDocument> {
    vec![MonthDocument::default(); MONTHS_PER_YEAR]
}

impl Default for CalendarDocument {
    fn default() -> Self {
        Self {
            notes: (1..=QUARTERS).map(|q| (q, Vec::new())).collect(),
            months: default_months(),
        }
    }
}

impl CalendarDocument {
    /// No note content, no named topic, no event anywhere.
    pub fn is_empty(&self) -> bool {
        let notes_empty = self
            .notes
            .values()
            .all(|notes| notes.iter().all(|n| n.content.is_empty()));
        notes_empty && self.months.iter().all(MonthDocument::is_empty)
    }

    /// Month accessor, 1-based.
    pub fn month(&self, month: usize) -> Option<&MonthDocument> {
        month.checked_sub(1).and_then(|idx| self.months.get(idx))
    }

    /// Mutable month accessor, 1-based.
    pub fn month_mut(&mut self, month: usize) -> Option<&mut MonthDocument> {
        month.checked_sub(1).and_then(|idx| self.months.get_mut(idx))
    }

    /// Notes for a quarter (1..=4), empty slice when none exist.
    pub fn quarter_notes(&self, quarter: u8) -> &[QuarterlyNote] {
        self.notes.get(&quarter).map(Vec::as_slice).unwrap_or(&[])
    }
}
