//! Algorithm Library
//!
//! Five in-place sorts written against [`SortBuffer`]. They know nothing about
//! threads, controllers or rendering: every mutation goes through the buffer,
//! which reports it to the step emitter, and a [`Cancelled`] from the emitter
//! unwinds the algorithm through `?`.
//!
//! | Algorithm  | Steps emitted                                   |
//! |------------|-------------------------------------------------|
//! | bubble     | one per swap                                    |
//! | insertion  | one per shift, one per key placement            |
//! | selection  | one swap per pass, even when min == i           |
//! | merge      | one per element written back into the range     |
//! | quick      | one per partition swap, one per pivot placement |

mod bubble;
mod insertion;
mod merge;
mod quick;
mod selection;

pub use bubble::bubble_sort;
pub use insertion::insertion_sort;
pub use merge::merge_sort;
pub use quick::quick_sort;
pub use selection::selection_sort;

use serde::{Deserialize, Serialize};

use crate::array_state::ArrayState;
use crate::step::{Cancelled, StepEmitter, StepResult};

// ─────────────────────────────────────────────────────────────────────────────
// Algorithm Kind
// ─────────────────────────────────────────────────────────────────────────────

/// Closed set of supported algorithms
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum AlgorithmKind {
    #[default]
    #[serde(rename = "bubble")]
    #[value(name = "bubble")]
    BubbleSort,
    #[serde(rename = "insertion")]
    #[value(name = "insertion")]
    InsertionSort,
    #[serde(rename = "selection")]
    #[value(name = "selection")]
    SelectionSort,
    #[serde(rename = "merge")]
    #[value(name = "merge")]
    MergeSort,
    #[serde(rename = "quick")]
    #[value(name = "quick")]
    QuickSort,
}

impl AlgorithmKind {
    /// All kinds in selector order
    pub const ALL: [AlgorithmKind; 5] = [
        Self::BubbleSort,
        Self::InsertionSort,
        Self::SelectionSort,
        Self::MergeSort,
        Self::QuickSort,
    ];

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::BubbleSort => "Bubble Sort",
            Self::InsertionSort => "Insertion Sort",
            Self::SelectionSort => "Selection Sort",
            Self::MergeSort => "Merge Sort",
            Self::QuickSort => "Quick Sort",
        }
    }

    /// Config / CLI name
    pub fn name(&self) -> &'static str {
        match self {
            Self::BubbleSort => "bubble",
            Self::InsertionSort => "insertion",
            Self::SelectionSort => "selection",
            Self::MergeSort => "merge",
            Self::QuickSort => "quick",
        }
    }

    /// Position in the selector, 1-based (also the TUI hotkey)
    pub fn ordinal(&self) -> usize {
        Self::ALL
            .iter()
            .position(|k| k == self)
            .map_or(0, |p| p + 1)
    }

    /// Lookup by 1-based selector position
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        ordinal
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    pub fn next(&self) -> Self {
        Self::ALL[self.ordinal() % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.ordinal() + len - 2) % len]
    }

    /// Sort `buffer` in place with this algorithm
    pub fn run(&self, buffer: &SortBuffer<'_>) -> StepResult {
        match self {
            Self::BubbleSort => bubble_sort(buffer),
            Self::InsertionSort => insertion_sort(buffer),
            Self::SelectionSort => selection_sort(buffer),
            Self::MergeSort => merge_sort(buffer),
            Self::QuickSort => quick_sort(buffer),
        }
    }
}

impl std::fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sort Buffer
// ─────────────────────────────────────────────────────────────────────────────

/// The only view of the array an algorithm gets: reads are free, mutations
/// are reported to the emitter
pub struct SortBuffer<'a> {
    array: &'a ArrayState,
    emitter: &'a dyn StepEmitter,
}

impl<'a> SortBuffer<'a> {
    pub fn new(array: &'a ArrayState, emitter: &'a dyn StepEmitter) -> Self {
        Self { array, emitter }
    }

    pub fn len(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    pub fn get(&self, index: usize) -> u32 {
        self.array.get(index)
    }

    pub fn swap(&self, i: usize, j: usize) -> Result<(), Cancelled> {
        self.array.swap(i, j, self.emitter)
    }

    pub fn write(&self, index: usize, value: u32) -> Result<(), Cancelled> {
        self.array.write(index, value, self.emitter)
    }
}
