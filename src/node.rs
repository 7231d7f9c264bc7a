use std::cmp::Ordering;
use std::fmt;

/// An owned child slot. Children are exclusively owned by their parent, so
/// dropping a node releases its whole subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// A single node of the tree. The node partitions its siblings on `split`:
/// characters sorting below `split` continue in `low`, characters sorting
/// above it continue in `high`, and a key whose current character matches
/// `split` advances to its next character in `eq`.
///
/// A node is a *key node* when `key` is present; the stored key then spells
/// exactly the characters along the `eq` transitions of the node's path.
/// Demoting a key clears `key` and `value` but never removes the node itself,
/// so the structure reached by other keys is left untouched.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) split: char,
    pub(crate) key: Option<K>,
    pub(crate) value: Option<V>,
    pub(crate) low: Link<K, V>,
    pub(crate) eq: Link<K, V>,
    pub(crate) high: Link<K, V>,
}

impl<K, V> Node<K, V> {
    pub(crate) const fn new(split: char) -> Self {
        Self {
            split,
            key: None,
            value: None,
            low: None,
            eq: None,
            high: None,
        }
    }

    pub(crate) const fn is_key(&self) -> bool {
        self.key.is_some()
    }

    /// Walks `chars` from this node, creating every missing node along the
    /// way, and returns the terminal node where the final character lands.
    /// The caller stamps the terminal with the actual key and value.
    ///
    /// A `low` or `high` step keeps looking for the same character; only an
    /// `eq` step consumes one. Nodes created on a side step carry the current
    /// character, nodes created on an `eq` step carry the next one.
    pub(crate) fn insert_walk(&mut self, chars: &[char], i: usize) -> &mut Self {
        let c = chars[i];
        match c.cmp(&self.split) {
            Ordering::Less => self
                .low
                .get_or_insert_with(|| Box::new(Self::new(c)))
                .insert_walk(chars, i),
            Ordering::Greater => self
                .high
                .get_or_insert_with(|| Box::new(Self::new(c)))
                .insert_walk(chars, i),
            Ordering::Equal if i + 1 < chars.len() => self
                .eq
                .get_or_insert_with(|| Box::new(Self::new(chars[i + 1])))
                .insert_walk(chars, i + 1),
            Ordering::Equal => self,
        }
    }

    /// Follows `chars` without modifying the tree and returns the terminal
    /// node, or `None` as soon as a required child is absent. The caller
    /// decides what terminal-ness means (key equality, prefix existence).
    ///
    /// This walk backs every point operation, so it is iterative.
    pub(crate) fn walk(&self, chars: &[char]) -> Option<&Self> {
        let mut node = self;
        let mut i = 0;
        loop {
            match chars[i].cmp(&node.split) {
                Ordering::Less => node = node.low.as_deref()?,
                Ordering::Greater => node = node.high.as_deref()?,
                Ordering::Equal => {
                    if i + 1 == chars.len() {
                        return Some(node);
                    }
                    node = node.eq.as_deref()?;
                    i += 1;
                }
            }
        }
    }

    pub(crate) fn walk_mut(&mut self, chars: &[char]) -> Option<&mut Self> {
        let mut node = self;
        let mut i = 0;
        loop {
            match chars[i].cmp(&node.split) {
                Ordering::Less => node = node.low.as_deref_mut()?,
                Ordering::Greater => node = node.high.as_deref_mut()?,
                Ordering::Equal => {
                    if i + 1 == chars.len() {
                        return Some(node);
                    }
                    node = node.eq.as_deref_mut()?;
                    i += 1;
                }
            }
        }
    }

    /// Visits every node of this subtree in order: `low`, self, `eq`, `high`.
    /// All enumerations share this visit, which yields key nodes in ascending
    /// key-string order.
    pub(crate) fn for_each_inorder<'a>(&'a self, f: &mut impl FnMut(&'a Self)) {
        if let Some(low) = &self.low {
            low.for_each_inorder(f);
        }
        f(self);
        if let Some(eq) = &self.eq {
            eq.for_each_inorder(f);
        }
        if let Some(high) = &self.high {
            high.for_each_inorder(f);
        }
    }

    /// Consuming in-order walk, moving every stored pair into `out`. Used by
    /// balancing, which re-inserts the drained pairs into a fresh tree.
    pub(crate) fn drain_pairs(self, out: &mut Vec<(K, V)>) {
        let Self {
            key,
            value,
            low,
            eq,
            high,
            ..
        } = self;
        if let Some(low) = low {
            low.drain_pairs(out);
        }
        if let (Some(key), Some(value)) = (key, value) {
            out.push((key, value));
        }
        if let Some(eq) = eq {
            eq.drain_pairs(out);
        }
        if let Some(high) = high {
            high.drain_pairs(out);
        }
    }

    /// Length of the longest chain from this node to any descendant.
    pub(crate) fn depth(&self) -> usize {
        let low = self.low.as_deref().map_or(0, Self::depth);
        let eq = self.eq.as_deref().map_or(0, Self::depth);
        let high = self.high.as_deref().map_or(0, Self::depth);
        1 + low.max(eq).max(high)
    }
}

impl<K, V> Node<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    pub(crate) fn debug_print(
        &self,
        f: &mut fmt::Formatter<'_>,
        branch: &str,
        level: usize,
    ) -> fmt::Result {
        for _ in 0..level {
            write!(f, "  ")?;
        }
        match (&self.key, &self.value) {
            (Some(key), Some(value)) => {
                writeln!(f, "[{branch}] {:?} {key:?} -> {value:?}", self.split)?;
            }
            _ => writeln!(f, "[{branch}] {:?}", self.split)?,
        }
        if let Some(low) = &self.low {
            low.debug_print(f, "low", level + 1)?;
        }
        if let Some(eq) = &self.eq {
            eq.debug_print(f, "eq", level + 1)?;
        }
        if let Some(high) = &self.high {
            high.debug_print(f, "high", level + 1)?;
        }
        Ok(())
    }
}
