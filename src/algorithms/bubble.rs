//! Bubble sort

use super::SortBuffer;
use crate::step::StepResult;

/// Adjacent compare-and-swap passes; one step per executed swap
pub fn bubble_sort(buffer: &SortBuffer<'_>) -> StepResult {
    let n = buffer.len();
    for pass in 0..n.saturating_sub(1) {
        for j in 0..n - pass - 1 {
            if buffer.get(j) > buffer.get(j + 1) {
                buffer.swap(j, j + 1)?;
            }
        }
    }
    Ok(())
}
