use std::fmt;

use crate::key::StringKey;
use crate::tree::Tst;

/// A plain mapping interface over a [`Tst`].
///
/// The map hides the tree-shaped surface behind the vocabulary of an
/// ordinary key-value container, while keeping the queries only the tree can
/// answer reachable under search-flavored names. Lookups are total: an absent
/// key is an `Option::None`, never a panic or an error.
pub struct TstMap<K, V> {
    tree: Tst<K, V>,
}

impl<K, V> TstMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self { tree: Tst::new() }
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` when the map holds no entry.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns an iterator over a snapshot of the entries, in ascending
    /// key-string order.
    #[must_use]
    pub fn iter(&self) -> std::vec::IntoIter<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.tree.pairs().into_iter()
    }

    /// Borrows the underlying tree for the queries the mapping vocabulary
    /// does not cover.
    #[must_use]
    pub const fn as_tree(&self) -> &Tst<K, V> {
        &self.tree
    }
}

impl<K, V> TstMap<K, V>
where
    K: StringKey,
{
    /// Stores `key` with `value`, returning the previous value when an equal
    /// key was already present.
    ///
    /// # Errors
    ///
    /// As [`Tst::insert`].
    pub fn insert(&mut self, key: K, value: V) -> crate::Result<Option<V>> {
        self.tree.insert(key, value)
    }

    /// Returns the value stored under an equal key. The `Option` return is
    /// the try-style interface: absence is a value, not a failure.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get(key)
    }

    /// Returns a mutable reference to the value stored under an equal key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.get_mut(key)
    }

    /// Returns `true` when an equal key is stored.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    /// Removes the entry stored under an equal key, reporting whether one
    /// existed.
    pub fn remove(&mut self, key: &K) -> bool {
        self.tree.remove_key(key)
    }

    /// Returns `true` when some stored key-string starts with `prefix`.
    #[must_use]
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.tree.contains_node(prefix)
    }

    /// Inserts pre-sorted entries through the balanced schedule.
    ///
    /// # Errors
    ///
    /// As [`Tst::bulk_insert`].
    pub fn extend_sorted(&mut self, pairs: Vec<(K, V)>) -> crate::Result<()> {
        self.tree.bulk_insert(pairs)
    }

    /// Rebuilds the underlying tree into a balanced shape.
    pub fn rebalance(&mut self) {
        self.tree.balance();
    }

    /// Returns every entry whose key-string matches the wildcard `pattern`
    /// (`.` one character, `*` any run).
    #[must_use]
    pub fn find_pattern(&self, pattern: &str) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.tree.partial_key_search(pattern)
    }

    /// Returns every entry whose key-string lies within `distance`
    /// substitutions of `query`.
    #[must_use]
    pub fn find_near(&self, query: &str, distance: usize) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.tree.near_search(query, distance)
    }
}

impl<K, V> Default for TstMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for TstMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.fmt(f)
    }
}
