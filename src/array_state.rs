//! Array State - the buffer under sort
//!
//! Each element is its own atomic cell, so a reader sampling the buffer while
//! a run mutates it sees every element either before or after a write, never
//! torn. A swap is two stores: a reader can briefly observe one value twice.
//! Exclusive write access is granted by the controller, not by a lock here.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use rand::Rng;

use crate::config::ValueRange;
use crate::error::SortVizError;
use crate::step::{Step, StepEmitter, StepResult};

/// Fixed-length shared buffer of bar heights
#[derive(Clone)]
pub struct ArrayState {
    cells: Arc<[AtomicU32]>,
}

impl ArrayState {
    /// Build a buffer holding exactly `values`
    pub fn from_values(values: impl IntoIterator<Item = u32>) -> Result<Self, SortVizError> {
        let cells: Arc<[AtomicU32]> = values.into_iter().map(AtomicU32::new).collect();
        if cells.is_empty() {
            return Err(SortVizError::invalid_config("array_size must be positive"));
        }
        Ok(Self { cells })
    }

    /// Build a buffer of `len` uniform random values in `range`
    pub fn random(len: usize, range: ValueRange) -> Result<Self, SortVizError> {
        if len == 0 {
            return Err(SortVizError::invalid_config("array_size must be positive"));
        }
        range.validate()?;
        let state = Self::from_values(std::iter::repeat(range.min).take(len))?;
        state.randomize(range)?;
        Ok(state)
    }

    /// Reseed every element; the length is unchanged
    pub fn randomize(&self, range: ValueRange) -> Result<(), SortVizError> {
        self.randomize_with(range, &mut rand::thread_rng())
    }

    /// Reseed every element from the given generator
    pub fn randomize_with<R: Rng + ?Sized>(
        &self,
        range: ValueRange,
        rng: &mut R,
    ) -> Result<(), SortVizError> {
        range.validate()?;
        for cell in self.cells.iter() {
            cell.store(rng.gen_range(range.min..=range.max), Ordering::Relaxed);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read one element
    ///
    /// Panics if `index` is out of bounds, like slice indexing.
    pub fn get(&self, index: usize) -> u32 {
        self.cells[index].load(Ordering::Acquire)
    }

    /// Exchange two elements and report the step
    pub fn swap(&self, i: usize, j: usize, emitter: &dyn StepEmitter) -> StepResult {
        let a = self.get(i);
        let b = self.get(j);
        self.cells[i].store(b, Ordering::Release);
        self.cells[j].store(a, Ordering::Release);
        emitter.on_step(Step::Swap { i, j })
    }

    /// Assign one element and report the step
    pub fn write(&self, index: usize, value: u32, emitter: &dyn StepEmitter) -> StepResult {
        self.cells[index].store(value, Ordering::Release);
        emitter.on_step(Step::Write { index, value })
    }

    /// Copy the current contents for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            values: self.cells.iter().map(|c| c.load(Ordering::Acquire)).collect(),
        }
    }
}

impl std::fmt::Debug for ArrayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrayState")
            .field("len", &self.len())
            .finish()
    }
}

/// Read-only copy of the array at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    values: Vec<u32>,
}

impl Snapshot {
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Non-decreasing order check
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::RecordingEmitter;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_from_values_rejects_empty() {
        let err = ArrayState::from_values(Vec::new()).unwrap_err();
        assert!(matches!(err, SortVizError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_random_rejects_zero_length() {
        assert!(ArrayState::random(0, ValueRange::default()).is_err());
    }

    #[test]
    fn test_random_values_in_range() {
        let range = ValueRange::default();
        let state = ArrayState::random(500, range).unwrap();
        assert_eq!(state.len(), 500);
        assert!(state.snapshot().values().iter().all(|v| range.contains(*v)));
    }

    #[test]
    fn test_randomize_keeps_length_and_changes_values() {
        let range = ValueRange::default();
        let state = ArrayState::random(100, range).unwrap();
        let before = state.snapshot();

        let mut rng = StdRng::seed_from_u64(7);
        state.randomize_with(range, &mut rng).unwrap();
        let after = state.snapshot();

        assert_eq!(after.len(), 100);
        assert_ne!(before, after);
    }

    #[test]
    fn test_single_value_range() {
        let range = ValueRange::new(9, 9).unwrap();
        let state = ArrayState::random(4, range).unwrap();
        assert_eq!(state.snapshot().into_vec(), vec![9, 9, 9, 9]);
    }

    #[test]
    fn test_swap_and_write_report_steps() {
        let state = ArrayState::from_values([1, 2, 3]).unwrap();
        let emitter = RecordingEmitter::new();

        state.swap(0, 2, &emitter).unwrap();
        state.write(1, 7, &emitter).unwrap();

        assert_eq!(state.snapshot().into_vec(), vec![3, 7, 1]);
        assert_eq!(
            emitter.steps(),
            vec![Step::Swap { i: 0, j: 2 }, Step::Write { index: 1, value: 7 }]
        );
    }

    #[test]
    fn test_clones_share_storage() {
        let state = ArrayState::from_values([5, 6]).unwrap();
        let reader = state.clone();
        state.write(0, 1, &RecordingEmitter::new()).unwrap();
        assert_eq!(reader.get(0), 1);
    }

    #[test]
    fn test_snapshot_sorted_check() {
        let state = ArrayState::from_values([1, 1, 2]).unwrap();
        assert!(state.snapshot().is_sorted());
        let state = ArrayState::from_values([2, 1]).unwrap();
        assert!(!state.snapshot().is_sorted());
    }
}
