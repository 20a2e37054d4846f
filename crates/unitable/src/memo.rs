//! Keyed memoization for derived values.
//!
//! A [`Memo`] remembers the last computed value together with the inputs it
//! was computed from. Reading with the same inputs returns the cached value;
//! reading with different inputs recomputes. There is nothing to invalidate
//! by hand: the key *is* the dependency set.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Single-slot cache keyed by the computation's inputs.
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: RefCell<Option<(K, Rc<V>)>>,
    computations: Cell<u64>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Memo {
            slot: RefCell::new(None),
            computations: Cell::new(0),
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`, running `compute` only if `key` differs
    /// from the key of the cached value.
    pub fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> Rc<V> {
        if let Some((cached_key, value)) = self.slot.borrow().as_ref() {
            if *cached_key == key {
                return Rc::clone(value);
            }
        }

        let value = Rc::new(compute());
        self.computations.set(self.computations.get() + 1);
        *self.slot.borrow_mut() = Some((key, Rc::clone(&value)));
        value
    }

    /// Number of times a value was actually computed.
    pub fn computations(&self) -> u64 {
        self.computations.get()
    }
}
