//! Near-neighbor and wildcard searches over the node structure.
//!
//! Both searches walk the same ternary shape as the point operations but keep
//! extra state: the near search carries a substitution budget that side steps
//! never consume, and the wildcard matcher fans out over every possible
//! resumption point after a `*`.

use crate::node::Node;

/// Matches exactly one character in a pattern.
pub(crate) const ANY_ONE: char = '.';

/// Matches any run of characters, including the empty one, in a pattern.
pub(crate) const ANY_RUN: char = '*';

impl<K, V> Node<K, V> {
    /// Collects every stored pair whose key-string lies within `budget`
    /// substitutions of `query`.
    ///
    /// `i` is the index of the query character this node is compared against.
    /// Side steps keep both `i` and the budget; an `eq` step consumes one
    /// query character (clamping at the last) and one unit of budget when the
    /// characters differ. A key node reports its pair when the uncompared
    /// query suffix fits in the remaining budget, and in that case its `eq`
    /// subtree is not searched further for this query.
    pub(crate) fn near_into<'a>(
        &'a self,
        query: &[char],
        i: usize,
        budget: isize,
        out: &mut Vec<(&'a K, &'a V)>,
    ) {
        if budget < 0 {
            return;
        }
        let c = query[i];
        if budget > 0 || c < self.split {
            if let Some(low) = &self.low {
                low.near_into(query, i, budget, out);
            }
        }
        let tail = query.len() - i;
        if self.is_key() && tail as isize <= budget {
            if let (Some(key), Some(value)) = (&self.key, &self.value) {
                out.push((key, value));
            }
        } else {
            let next_i = if i + 1 < query.len() { i + 1 } else { i };
            let next_budget = if c == self.split { budget } else { budget - 1 };
            if let Some(eq) = &self.eq {
                eq.near_into(query, next_i, next_budget, out);
            }
        }
        if budget > 0 || c > self.split {
            if let Some(high) = &self.high {
                high.near_into(query, i, budget, out);
            }
        }
    }

    /// Collects every stored pair whose key-string matches `pattern` from
    /// index `i` on, where [`ANY_ONE`] matches exactly one character and
    /// [`ANY_RUN`] hands over to [`Self::glob_into`].
    ///
    /// A literal or [`ANY_ONE`] character keeps its index on side steps, the
    /// same way the point walk keeps looking for one character, and advances
    /// only through `eq`.
    pub(crate) fn match_pattern_into<'a>(
        &'a self,
        pattern: &[char],
        i: usize,
        out: &mut Vec<(&'a K, &'a V)>,
    ) {
        let c = pattern[i];
        if c == ANY_RUN {
            self.glob_into(pattern, i + 1, out);
            return;
        }
        if c == ANY_ONE || c < self.split {
            if let Some(low) = &self.low {
                low.match_pattern_into(pattern, i, out);
            }
        }
        if c == ANY_ONE || c == self.split {
            if i + 1 < pattern.len() {
                if let Some(eq) = &self.eq {
                    eq.match_pattern_into(pattern, i + 1, out);
                }
            } else if let (Some(key), Some(value)) = (&self.key, &self.value) {
                out.push((key, value));
            }
        }
        if c == ANY_ONE || c > self.split {
            if let Some(high) = &self.high {
                high.match_pattern_into(pattern, i, out);
            }
        }
    }

    /// Resumes `pattern` after an [`ANY_RUN`] that was seen just before index
    /// `i`, with this node as the root of the subtree the run may span.
    ///
    /// A terminal run swallows the whole subtree. Consecutive runs collapse.
    /// Otherwise every descendant (this node included) whose split character
    /// can begin the remaining pattern becomes an anchor, and matching
    /// restarts there; trying every anchor is what makes the run expensive
    /// but exhaustive.
    fn glob_into<'a>(&'a self, pattern: &[char], i: usize, out: &mut Vec<(&'a K, &'a V)>) {
        if i == pattern.len() {
            self.for_each_inorder(&mut |node| {
                if let (Some(key), Some(value)) = (&node.key, &node.value) {
                    out.push((key, value));
                }
            });
            return;
        }
        if pattern[i] == ANY_RUN {
            self.glob_into(pattern, i + 1, out);
            return;
        }
        let sub = &pattern[i..];
        let mut anchors = Vec::new();
        self.collect_anchors(sub[0], &mut anchors);
        for anchor in anchors {
            anchor.match_pattern_into(sub, 0, out);
        }
    }

    /// Pre-order collection of every node in this subtree whose split
    /// character equals `next`, or of every node when `next` is [`ANY_ONE`].
    /// The traversal deliberately crosses all three branches: any of them can
    /// hold the position where a run ends.
    fn collect_anchors<'a>(&'a self, next: char, out: &mut Vec<&'a Self>) {
        if next == ANY_ONE || self.split == next {
            out.push(self);
        }
        if let Some(low) = &self.low {
            low.collect_anchors(next, out);
        }
        if let Some(eq) = &self.eq {
            eq.collect_anchors(next, out);
        }
        if let Some(high) = &self.high {
            high.collect_anchors(next, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Tst;

    fn words(found: Vec<(&str, usize)>) -> Vec<&str> {
        found.into_iter().map(|(word, _)| word).collect()
    }

    fn ford_tree() -> Tst<&'static str, usize> {
        let mut tree = Tst::new();
        for (rank, word) in ["FROM", "FORM", "FORD", "FOR", "FOUR"].into_iter().enumerate() {
            tree.insert(word, rank).unwrap();
        }
        tree
    }

    #[test]
    fn one_dot_matches_exactly_one_character() {
        let tree = ford_tree();
        assert_eq!(words(tree.partial_key_search("F..M")), ["FORM", "FROM"]);
        assert_eq!(words(tree.partial_key_search("F.R.")), ["FORD", "FORM"]);
        assert_eq!(words(tree.partial_key_search("...")), ["FOR"]);
        assert_eq!(words(tree.partial_key_search("....")), ["FORD", "FORM", "FOUR", "FROM"]);
    }

    #[test]
    fn a_run_spans_zero_or_more_characters() {
        let tree = ford_tree();
        assert_eq!(words(tree.partial_key_search("FRO*")), ["FROM"]);
        assert_eq!(words(tree.partial_key_search("F*M")), ["FORM", "FROM"]);
        assert_eq!(words(tree.partial_key_search("F*OM")), ["FROM"]);
        assert_eq!(words(tree.partial_key_search("F*.M")), ["FORM", "FROM"]);
        assert_eq!(words(tree.partial_key_search("*M")), ["FORM", "FROM"]);
    }

    #[test]
    fn a_lone_run_enumerates_the_whole_tree() {
        let tree = ford_tree();
        assert_eq!(
            words(tree.partial_key_search("*")),
            ["FOR", "FORD", "FORM", "FOUR", "FROM"]
        );
    }

    #[test]
    fn consecutive_runs_collapse() {
        let tree = ford_tree();
        assert_eq!(words(tree.partial_key_search("F**M")), ["FORM", "FROM"]);
        assert_eq!(
            words(tree.partial_key_search("**")),
            ["FOR", "FORD", "FORM", "FOUR", "FROM"]
        );
    }

    #[test]
    fn overlapping_run_anchors_can_emit_a_pair_twice() {
        let tree = ford_tree();

        // Every node anchors the suffix after the run, so FORD's terminal is
        // reached twice: once through FORM's terminal, whose low child it
        // is, and once as an anchor of its own. The duplicate emission is
        // part of the fan-out's definition.
        assert_eq!(
            words(tree.partial_key_search("*.")),
            ["FOR", "FORD", "FORM", "FORD", "FOUR", "FROM"]
        );
    }

    #[test]
    fn literal_patterns_behave_like_exact_lookup() {
        let tree = ford_tree();
        assert_eq!(words(tree.partial_key_search("FORD")), ["FORD"]);
        assert_eq!(words(tree.partial_key_search("FORT")), Vec::<&str>::new());
        assert_eq!(words(tree.partial_key_search("FO")), Vec::<&str>::new());
    }

    #[test]
    fn empty_patterns_match_nothing() {
        let tree = ford_tree();
        assert!(tree.partial_key_search("").is_empty());
    }

    #[test]
    fn near_search_tolerates_substitutions_and_short_keys() {
        let tree = ford_tree();

        // The uncompared tail of the query, terminal character included,
        // must fit in the leftover budget at the key node.
        assert_eq!(words(tree.near_search("FROM", 0)), Vec::<&str>::new());
        assert_eq!(words(tree.near_search("FROM", 1)), ["FROM"]);
        assert_eq!(words(tree.near_search("FROM", 2)), ["FROM"]);

        // One substitution against FOUR, and FOR absorbs the whole query
        // suffix into the budget.
        assert_eq!(words(tree.near_search("FOUR", 2)), ["FOR", "FOUR"]);
        assert_eq!(words(tree.near_search("FOR", 1)), ["FOR"]);
    }

    #[test]
    fn a_key_node_that_reports_shadows_its_eq_subtree() {
        let tree = ford_tree();

        // With budget 3 the FOR node reports itself and its subtree is not
        // searched further, so FORD and FORM stay hidden while FOUR, which
        // hangs off the high branch of FOR's terminal, is still reached.
        assert_eq!(words(tree.near_search("FROM", 3)), ["FOR", "FOUR", "FROM"]);
    }

    #[test]
    fn near_search_with_an_empty_query_finds_nothing() {
        let tree = ford_tree();
        assert!(tree.near_search("", 2).is_empty());
    }

    #[test]
    fn near_search_results_come_out_in_key_order() {
        let mut tree = Tst::new();
        for (rank, word) in ["bat", "cat", "hat", "mat", "bit"].into_iter().enumerate() {
            tree.insert(word, rank).unwrap();
        }
        assert_eq!(words(tree.near_search("cat", 2)), ["bat", "cat", "hat", "mat"]);
    }
}
