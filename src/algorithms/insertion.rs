//! Insertion sort

use super::SortBuffer;
use crate::step::StepResult;

/// Shift larger elements right, then drop the key into the gap.
///
/// Every shift is a write step, and so is the final placement of the key.
pub fn insertion_sort(buffer: &SortBuffer<'_>) -> StepResult {
    for i in 1..buffer.len() {
        let key = buffer.get(i);
        let mut j = i;
        while j > 0 && buffer.get(j - 1) > key {
            buffer.write(j, buffer.get(j - 1))?;
            j -= 1;
        }
        buffer.write(j, key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run_recorded;
    use super::super::AlgorithmKind;
    use crate::step::Step;

    #[test]
    fn test_two_elements_one_shift_one_placement() {
        let (sorted, emitter) = run_recorded(AlgorithmKind::InsertionSort, &[2, 1]);
        assert_eq!(sorted, vec![1, 2]);
        assert_eq!(
            emitter.steps(),
            vec![
                Step::Write { index: 1, value: 2 },
                Step::Write { index: 0, value: 1 },
            ]
        );
    }

    #[test]
    fn test_sorted_input_places_each_key_once() {
        let (_, emitter) = run_recorded(AlgorithmKind::InsertionSort, &[1, 2, 3, 4]);
        assert_eq!(emitter.len(), 3);
        assert_eq!(emitter.swap_count(), 0);
    }

    #[test]
    fn test_equal_keys_do_not_shift() {
        let (sorted, emitter) = run_recorded(AlgorithmKind::InsertionSort, &[3, 3, 3]);
        assert_eq!(sorted, vec![3, 3, 3]);
        assert_eq!(emitter.len(), 2);
    }
}
