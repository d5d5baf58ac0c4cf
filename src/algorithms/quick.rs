//! Quick sort with Lomuto partitioning

use super::SortBuffer;
use crate::step::{Cancelled, StepResult};

/// Lomuto quick sort, pivot = last element of each subrange.
///
/// Subranges are kept on an explicit stack, left pushed last, so the visit
/// order matches the recursive form while already-sorted input of any length
/// cannot exhaust the run thread's stack.
pub fn quick_sort(buffer: &SortBuffer<'_>) -> StepResult {
    // Half-open ranges
    let mut pending = vec![(0, buffer.len())];
    while let Some((low, high)) = pending.pop() {
        if high - low < 2 {
            continue;
        }
        let pivot = partition(buffer, low, high - 1)?;
        pending.push((pivot + 1, high));
        pending.push((low, pivot));
    }
    Ok(())
}

/// Partition `low..=high` around `buffer[high]`, returning the pivot's final index
fn partition(buffer: &SortBuffer<'_>, low: usize, high: usize) -> Result<usize, Cancelled> {
    let pivot = buffer.get(high);
    let mut store = low;
    for j in low..high {
        if buffer.get(j) < pivot {
            buffer.swap(store, j)?;
            store += 1;
        }
    }
    buffer.swap(store, high)?;
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run_recorded;
    use super::super::AlgorithmKind;
    use crate::step::Step;

    #[test]
    fn test_duplicates_preserved() {
        let (sorted, emitter) = run_recorded(AlgorithmKind::QuickSort, &[4, 4, 2]);
        assert_eq!(sorted, vec![2, 4, 4]);
        assert_eq!(
            emitter.steps(),
            vec![Step::Swap { i: 0, j: 2 }, Step::Swap { i: 1, j: 2 }]
        );
    }

    #[test]
    fn test_partition_swaps_then_pivot_placement() {
        // pivot 3: 1 and 2 swap into place (self swaps), then pivot lands at 2
        let (sorted, emitter) = run_recorded(AlgorithmKind::QuickSort, &[1, 2, 5, 4, 3]);
        assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            &emitter.steps()[..3],
            &[
                Step::Swap { i: 0, j: 0 },
                Step::Swap { i: 1, j: 1 },
                Step::Swap { i: 2, j: 4 },
            ]
        );
    }

    #[test]
    fn test_long_sorted_input() {
        let values: Vec<u32> = (0..1_000).collect();
        let (sorted, emitter) = run_recorded(AlgorithmKind::QuickSort, &values);
        assert_eq!(sorted, values);
        assert!(emitter.len() > values.len());
    }
}
