use std::collections::BTreeMap;

use rand::Rng;
use tstree::Tst;

/// Builds a batch of distinct random words, sorted by spelling, so it can
/// feed the balanced bulk insertion directly.
fn sorted_words(rng: &mut impl Rng, count: usize) -> Vec<(String, u32)> {
    let mut words = BTreeMap::new();
    while words.len() < count {
        let len = rng.random_range(3..9);
        let word: String = (0..len).map(|_| rng.random_range('a'..='z')).collect();
        let value = rng.random();
        words.entry(word).or_insert(value);
    }
    words.into_iter().collect()
}

fn main() {
    let mut rng = rand::rng();
    let batch = sorted_words(&mut rng, 512);

    // Inserting a sorted batch one by one degenerates the character tree
    // into chains; the median-first schedule builds a flat tree from the
    // same batch.
    let mut chained = Tst::new();
    for (word, value) in batch.clone() {
        let _ = chained.insert(word, value);
    }
    let mut bulk = Tst::new();
    bulk.bulk_insert(batch)
        .expect("batch words are distinct and non-empty");
    println!(
        "{} words: sorted insertion depth {}, bulk insertion depth {}",
        bulk.len(),
        chained.depth(),
        bulk.depth(),
    );

    chained.balance();
    println!("rebalanced the chained tree to depth {}", chained.depth());

    let probe = bulk.keys().into_iter().next().unwrap_or_default();
    let neighbors = bulk.near_search(&probe, 2);
    println!(
        "{} words within two substitutions of {probe:?}",
        neighbors.len()
    );

    let mut pattern: String = probe.chars().take(1).collect();
    pattern.push('*');
    let completions = bulk.partial_key_search(&pattern);
    println!("{} words match {pattern:?}", completions.len());
}
