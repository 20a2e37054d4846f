//! Moving one item within a sequence.

use crate::error::{GridError, Result};

/// Moves the item at `from` to position `to`, shifting the items between.
///
/// Both indices must address an existing item; equal indices leave the
/// sequence unchanged.
///
/// ```rust
/// use unitable::move_item;
///
/// let mut cols = vec!["A", "B", "C", "D"];
/// move_item(&mut cols, 0, 3).unwrap();
/// assert_eq!(cols, ["B", "C", "D", "A"]);
/// ```
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<()> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(GridError::InvalidIndex { index, len });
        }
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    Ok(())
}

/// Copy-on-write form of [`move_item`].
pub fn reordered<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>> {
    let mut next = items.to_vec();
    move_item(&mut next, from, to)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_forward_and_back() {
        let cols = ["A", "B", "C", "D"];
        assert_eq!(reordered(&cols, 0, 3).unwrap(), ["B", "C", "D", "A"]);
        assert_eq!(reordered(&cols, 3, 1).unwrap(), ["A", "D", "B", "C"]);
        assert_eq!(reordered(&cols, 2, 2).unwrap(), cols);
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut cols = vec!["A", "B"];
        let err = move_item(&mut cols, 0, 2).unwrap_err();
        assert!(matches!(err, GridError::InvalidIndex { index: 2, len: 2 }));
        assert!(move_item(&mut cols, 5, 0).is_err());
        assert_eq!(cols, ["A", "B"]);
    }
}
