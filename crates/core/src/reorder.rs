//! Reorder request validation and position assignment.
//!
//! A reorder assigns `order = index` to each id in the submitted sequence.
//! Ownership and existence are checked by the repository; this module only
//! rejects shapes that can never be valid.

use std::collections::HashSet;

use crate::types::DbId;

/// Reject duplicate ids. An empty list is accepted and is a no-op.
pub fn validate_reorder_ids(ids: &[DbId]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(*id) {
            return Err(format!("Duplicate id in reorder list: {id}"));
        }
    }
    Ok(())
}

/// Positions to assign, parallel to `ids`: `0, 1, 2, ...`.
pub fn positions_for(ids: &[DbId]) -> Vec<i32> {
    (0..ids.len() as i32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_ids_pass() {
        assert!(validate_reorder_ids(&[3, 1, 2]).is_ok());
        assert!(validate_reorder_ids(&[]).is_ok());
    }

    #[test]
    fn duplicate_ids_fail() {
        let msg = validate_reorder_ids(&[3, 1, 3]).unwrap_err();
        assert!(msg.contains('3'));
    }

    #[test]
    fn positions_follow_submission_order() {
        assert_eq!(positions_for(&[30, 10, 20]), vec![0, 1, 2]);
        assert!(positions_for(&[]).is_empty());
    }
}
