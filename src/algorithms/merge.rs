//! Merge sort

use super::SortBuffer;
use crate::step::StepResult;

/// Top-down merge sort over the whole buffer.
///
/// Halves are copied out silently; each element written back into the range
/// is one step, whether it comes from the interleave or a drain.
pub fn merge_sort(buffer: &SortBuffer<'_>) -> StepResult {
    match buffer.len() {
        0 => Ok(()),
        n => sort_range(buffer, 0, n - 1),
    }
}

/// Sort the inclusive range `left..=right`
fn sort_range(buffer: &SortBuffer<'_>, left: usize, right: usize) -> StepResult {
    if left < right {
        let middle = left + (right - left) / 2;
        sort_range(buffer, left, middle)?;
        sort_range(buffer, middle + 1, right)?;
        merge(buffer, left, middle, right)?;
    }
    Ok(())
}

fn merge(buffer: &SortBuffer<'_>, left: usize, middle: usize, right: usize) -> StepResult {
    let lower: Vec<u32> = (left..=middle).map(|i| buffer.get(i)).collect();
    let upper: Vec<u32> = (middle + 1..=right).map(|i| buffer.get(i)).collect();

    let (mut i, mut j, mut k) = (0, 0, left);
    while i < lower.len() && j < upper.len() {
        if lower[i] <= upper[j] {
            buffer.write(k, lower[i])?;
            i += 1;
        } else {
            buffer.write(k, upper[j])?;
            j += 1;
        }
        k += 1;
    }

    for &value in lower[i..].iter().chain(&upper[j..]) {
        buffer.write(k, value)?;
        k += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run_recorded;
    use super::super::AlgorithmKind;
    use crate::step::Step;

    #[test]
    fn test_two_elements_write_both() {
        let (sorted, emitter) = run_recorded(AlgorithmKind::MergeSort, &[9, 4]);
        assert_eq!(sorted, vec![4, 9]);
        assert_eq!(
            emitter.steps(),
            vec![
                Step::Write { index: 0, value: 4 },
                Step::Write { index: 1, value: 9 },
            ]
        );
    }

    #[test]
    fn test_every_level_writes_every_element() {
        // 8 elements, 3 merge levels, 8 writes each
        let (sorted, emitter) = run_recorded(AlgorithmKind::MergeSort, &[8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(sorted, (1..=8).collect::<Vec<_>>());
        assert_eq!(emitter.write_count(), 24);
        assert_eq!(emitter.swap_count(), 0);
    }

    #[test]
    fn test_odd_length() {
        let (sorted, emitter) = run_recorded(AlgorithmKind::MergeSort, &[3, 1, 2]);
        assert_eq!(sorted, vec![1, 2, 3]);
        // [3,1] merge writes 2, then [1,3]+[2] writes 3
        assert_eq!(emitter.len(), 5);
    }
}
