//! Dense integer interning of opaque view-type tokens.

use std::hash::Hash;

use lazybind_core::collections::map::HashMap;

/// Assigns stable, dense integers to opaque tokens, for hosts that key
/// their view recycling pools by small integer view types.
///
/// Integers start at 0 and grow by one per distinct token, with no reuse
/// or compaction; a token keeps its integer for the interner's lifetime.
/// An interner is scoped to a single adapter instance and never shared.
pub struct ViewTypeInterner<T> {
    by_token: HashMap<T, usize>,
    by_int: Vec<T>,
}

impl<T: Clone + Eq + Hash> ViewTypeInterner<T> {
    pub fn new() -> Self {
        Self {
            by_token: HashMap::default(),
            by_int: Vec::new(),
        }
    }

    /// The integer for `token`, assigning the next one on first sight.
    pub fn intern(&mut self, token: T) -> usize {
        if let Some(&int) = self.by_token.get(&token) {
            return int;
        }
        let int = self.by_int.len();
        self.by_token.insert(token.clone(), int);
        self.by_int.push(token);
        int
    }

    /// The token previously assigned `view_type`.
    ///
    /// Panics if `view_type` was never returned by
    /// [`intern`](ViewTypeInterner::intern): the host must only pass back
    /// integers it received from this interner.
    pub fn resolve(&self, view_type: usize) -> &T {
        match self.by_int.get(view_type) {
            Some(token) => token,
            None => panic!(
                "unknown view type {view_type}: only {} types have been assigned",
                self.by_int.len()
            ),
        }
    }

    /// Number of distinct tokens seen so far.
    pub fn len(&self) -> usize {
        self.by_int.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_int.is_empty()
    }
}

impl<T: Clone + Eq + Hash> Default for ViewTypeInterner<T> {
    fn default() -> Self {
        Self::new()
    }
}
