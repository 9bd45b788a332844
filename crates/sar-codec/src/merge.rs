use sar_core::{ErrorInfo, SarError};
use sar_vocab::{MAX_AXIOM_ARITY, POINTER_SYMBOLS};

/// Combines single-entity masks of one statement into a multi-pointer string.
///
/// Each mask's `symbol` occurrence is replaced by the pointer symbol assigned
/// to its list position; shared characters are emitted once. The walk runs
/// until every mask is exhausted, so a pointer in the final position of any
/// mask still reaches the output. Masks must all have the same length and
/// agree character-for-character outside symbol positions; violations are an
/// error rather than a silent truncation.
pub fn merge_masks(masks: &[&str], symbol: char) -> Result<String, SarError> {
    if masks.is_empty() || masks.len() > MAX_AXIOM_ARITY {
        let info = ErrorInfo::new("mask-count-out-of-range", "unsupported mask count")
            .with_context("count", masks.len().to_string())
            .with_context("max", MAX_AXIOM_ARITY.to_string());
        return Err(SarError::Merge(info));
    }
    if masks.len() == 1 {
        return Ok(masks[0].to_owned());
    }

    let columns: Vec<Vec<char>> = masks.iter().map(|mask| mask.chars().collect()).collect();
    let length = columns[0].len();
    for (slot, column) in columns.iter().enumerate() {
        if column.len() != length {
            let info = ErrorInfo::new("mask-length-mismatch", "masks differ in length")
                .with_context("slot", slot.to_string())
                .with_context("expected", length.to_string())
                .with_context("actual", column.len().to_string())
                .with_hint("all masks must come from the same statement");
            return Err(SarError::Merge(info));
        }
    }

    let mut cursors = vec![0usize; columns.len()];
    let mut merged = String::with_capacity(length + columns.len());
    while cursors.iter().any(|cursor| *cursor < length) {
        let mut pointer_found = false;
        for (slot, cursor) in cursors.iter_mut().enumerate() {
            if *cursor < length && columns[slot][*cursor] == symbol {
                merged.push(POINTER_SYMBOLS[slot]);
                *cursor += 1;
                pointer_found = true;
            }
        }
        if pointer_found {
            continue;
        }
        let shared = columns[0][cursors[0].min(length - 1)];
        for (slot, cursor) in cursors.iter_mut().enumerate() {
            if *cursor >= length || columns[slot][*cursor] != shared {
                let info = ErrorInfo::new("mask-misaligned", "masks disagree outside pointers")
                    .with_context("slot", slot.to_string())
                    .with_context("position", cursor.to_string())
                    .with_hint("all masks must come from the same statement");
                return Err(SarError::Merge(info));
            }
            *cursor += 1;
        }
        merged.push(shared);
    }
    Ok(merged)
}
