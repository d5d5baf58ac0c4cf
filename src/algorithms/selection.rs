//! Selection sort

use super::SortBuffer;
use crate::step::StepResult;

/// Silent scan for the minimum, then exactly one swap step per pass
pub fn selection_sort(buffer: &SortBuffer<'_>) -> StepResult {
    let n = buffer.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            if buffer.get(j) < buffer.get(min) {
                min = j;
            }
        }
        // Swap with itself still counts; the pass stays visible
        buffer.swap(i, min)?;
    }
    Ok(())
}
