use std::fmt;

use crate::error::InsertError;
use crate::key::StringKey;
use crate::node::{Link, Node};

/// A ternary search tree mapping string-projecting keys to values.
///
/// The tree owns its root node and exposes the flat operation set: point
/// operations (insert, get, remove), prefix queries, ordered enumerations,
/// balancing, and the near-neighbor and wildcard searches. Keys are any type
/// implementing [`StringKey`]; the projected string decides where a key lives
/// in the tree, while key equality decides whether two keys are the same.
///
/// Removing a key only demotes its terminal node; the node structure built
/// for it stays in place until the tree is cleared or rebuilt by
/// [`balance`](Self::balance).
pub struct Tst<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> Tst<K, V> {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when no key is stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every node; the tree becomes empty.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Length of the longest chain of nodes from the root. Mostly useful to
    /// observe what [`balance`](Self::balance) does to a degenerate tree.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.as_deref().map_or(0, Node::depth)
    }

    /// Returns every stored key in ascending key-string order.
    #[must_use]
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::with_capacity(self.len);
        if let Some(root) = self.root.as_deref() {
            root.for_each_inorder(&mut |node| {
                if let Some(key) = &node.key {
                    keys.push(key.clone());
                }
            });
        }
        keys
    }

    /// Returns every stored value in ascending order of the owning keys.
    #[must_use]
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        let mut values = Vec::with_capacity(self.len);
        if let Some(root) = self.root.as_deref() {
            root.for_each_inorder(&mut |node| {
                if let Some(value) = &node.value {
                    values.push(value.clone());
                }
            });
        }
        values
    }

    /// Returns every stored pair in ascending key-string order.
    ///
    /// The result is a fresh snapshot: it stays valid however the tree is
    /// mutated afterwards.
    #[must_use]
    pub fn pairs(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let mut pairs = Vec::with_capacity(self.len);
        if let Some(root) = self.root.as_deref() {
            root.for_each_inorder(&mut |node| {
                if let (Some(key), Some(value)) = (&node.key, &node.value) {
                    pairs.push((key.clone(), value.clone()));
                }
            });
        }
        pairs
    }
}

impl<K, V> Tst<K, V>
where
    K: StringKey,
{
    /// Stores `key` with `value`.
    ///
    /// When an equal key is already stored, its value is overwritten and the
    /// old value returned. Otherwise the terminal node for the key-string is
    /// stamped with the pair and `None` returned.
    ///
    /// # Errors
    ///
    /// [`InsertError::EmptyKey`] when the key projects to an empty string,
    /// and [`InsertError::Collision`] when the terminal node is already
    /// stamped with a key that spells the same string but does not compare
    /// equal to `key`.
    pub fn insert(&mut self, key: K, value: V) -> crate::Result<Option<V>> {
        let chars: Vec<char> = key.key_str().as_ref().chars().collect();
        let Some(&first) = chars.first() else {
            return Err(InsertError::EmptyKey);
        };
        let root = self.root.get_or_insert_with(|| Box::new(Node::new(first)));
        let node = root.insert_walk(&chars, 0);
        match &node.key {
            Some(stored) if *stored != key => Err(InsertError::Collision(chars.into_iter().collect())),
            Some(_) => {
                node.key = Some(key);
                Ok(node.value.replace(value))
            }
            None => {
                node.key = Some(key);
                node.value = Some(value);
                self.len += 1;
                Ok(None)
            }
        }
    }

    /// Returns a reference to the value stored under an equal key, if any.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let node = self.node_for(key)?;
        match &node.key {
            Some(stored) if stored == key => node.value.as_ref(),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value stored under an equal key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let chars: Vec<char> = key.key_str().as_ref().chars().collect();
        if chars.is_empty() {
            return None;
        }
        let node = self.root.as_deref_mut()?.walk_mut(&chars)?;
        match &node.key {
            Some(stored) if stored == key => node.value.as_mut(),
            _ => None,
        }
    }

    /// Returns `true` when an equal key is stored.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Demotes the node storing an equal key and returns whether one was
    /// found. The node itself, and with it the paths of every other key,
    /// stays in place; only the key and value slots are cleared.
    pub fn remove_key(&mut self, key: &K) -> bool {
        let chars: Vec<char> = key.key_str().as_ref().chars().collect();
        if chars.is_empty() {
            return false;
        }
        let removed = match self
            .root
            .as_deref_mut()
            .and_then(|root| root.walk_mut(&chars))
        {
            Some(node) => match &node.key {
                Some(stored) if stored == key => {
                    node.key = None;
                    node.value = None;
                    true
                }
                _ => false,
            },
            None => false,
        };
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Returns `true` when a node path spelling `prefix` exists, whether or
    /// not the terminal node stores a key. An empty prefix names no path.
    #[must_use]
    pub fn contains_node(&self, prefix: &str) -> bool {
        let chars: Vec<char> = prefix.chars().collect();
        !chars.is_empty()
            && self
                .root
                .as_deref()
                .and_then(|root| root.walk(&chars))
                .is_some()
    }

    /// Returns every stored pair whose key-string starts with `prefix`, in
    /// ascending key-string order. An empty prefix completes to every pair.
    #[must_use]
    pub fn prefix_search(&self, prefix: &str) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let chars: Vec<char> = prefix.chars().collect();
        if chars.is_empty() {
            return self.pairs();
        }
        let mut found = Vec::new();
        if let Some(node) = self.root.as_deref().and_then(|root| root.walk(&chars)) {
            if let (Some(key), Some(value)) = (&node.key, &node.value) {
                found.push((key.clone(), value.clone()));
            }
            if let Some(eq) = node.eq.as_deref() {
                eq.for_each_inorder(&mut |descendant| {
                    if let (Some(key), Some(value)) = (&descendant.key, &descendant.value) {
                        found.push((key.clone(), value.clone()));
                    }
                });
            }
        }
        found
    }

    /// Returns every stored pair whose key-string lies within `distance`
    /// single-character substitutions of `query`, in ascending key-string
    /// order. Unmatched suffix characters each cost one unit of the budget,
    /// the terminal character included. An empty query finds nothing.
    #[must_use]
    pub fn near_search(&self, query: &str, distance: usize) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let chars: Vec<char> = query.chars().collect();
        let mut found = Vec::new();
        if !chars.is_empty() {
            if let Some(root) = self.root.as_deref() {
                let budget = isize::try_from(distance).unwrap_or(isize::MAX);
                root.near_into(&chars, 0, budget, &mut found);
            }
        }
        found
            .into_iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Returns every stored pair whose key-string matches `pattern`, where
    /// `.` matches exactly one character and `*` any run of characters. All
    /// other characters match themselves; there is no escape for the two
    /// wildcards. An empty pattern matches nothing.
    #[must_use]
    pub fn partial_key_search(&self, pattern: &str) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let chars: Vec<char> = pattern.chars().collect();
        let mut found = Vec::new();
        if !chars.is_empty() {
            if let Some(root) = self.root.as_deref() {
                root.match_pattern_into(&chars, 0, &mut found);
            }
        }
        found
            .into_iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Rebuilds the tree into an approximately median-rooted shape.
    ///
    /// The stored pairs are drained in key order, the tree is cleared, and
    /// the pairs are re-inserted middle-first so that the character tree at
    /// every level approximates a balanced binary search. All pairs are
    /// preserved; a tree built by inserting keys in sorted order goes from a
    /// chain to a depth logarithmic in the number of keys.
    pub fn balance(&mut self) {
        let mut pairs = Vec::with_capacity(self.len);
        if let Some(root) = self.root.take() {
            root.drain_pairs(&mut pairs);
        }
        self.len = 0;
        let mut slots: Vec<Option<(K, V)>> = pairs.into_iter().map(Some).collect();
        // Re-inserting the tree's own pairs cannot fail: every key-string was
        // validated on first insertion and distinct stored keys never spell
        // the same string.
        let _ = self.insert_median_first(&mut slots);
    }

    /// Inserts pre-sorted pairs through the same middle-first schedule as
    /// [`balance`](Self::balance). The caller is responsible for sorting the
    /// pairs by key-string; an unsorted input still stores every pair but
    /// loses the balance guarantee.
    ///
    /// # Errors
    ///
    /// As [`insert`](Self::insert), per pair. Pairs inserted before the
    /// failing one remain stored.
    pub fn bulk_insert(&mut self, pairs: Vec<(K, V)>) -> crate::Result<()> {
        let mut slots: Vec<Option<(K, V)>> = pairs.into_iter().map(Some).collect();
        self.insert_median_first(&mut slots)
    }

    /// Middle-first insertion schedule over a sorted slice: the middle pair
    /// goes in first, then each half recursively. The split index is
    /// `len / 2`, the upper middle of an even-length slice.
    fn insert_median_first(&mut self, slots: &mut [Option<(K, V)>]) -> crate::Result<()> {
        if slots.is_empty() {
            return Ok(());
        }
        let mid = slots.len() / 2;
        if let Some((key, value)) = slots[mid].take() {
            self.insert(key, value)?;
        }
        let (left, rest) = slots.split_at_mut(mid);
        let (_, right) = rest.split_at_mut(1);
        self.insert_median_first(left)?;
        self.insert_median_first(right)
    }

    fn node_for(&self, key: &K) -> Option<&Node<K, V>> {
        let chars: Vec<char> = key.key_str().as_ref().chars().collect();
        if chars.is_empty() {
            return None;
        }
        self.root.as_deref()?.walk(&chars)
    }
}

impl<K, V> Default for Tst<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for Tst<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Deep-copies the whole node graph; the clone and the original are
    /// fully independent afterwards.
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<K, V> fmt::Debug for Tst<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tst (len: {})", self.len)?;
        match self.root.as_deref() {
            Some(root) => root.debug_print(f, "root", 1),
            None => Ok(()),
        }
    }
}
