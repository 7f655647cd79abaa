//! Category-diversified round-robin selection.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// Pick up to `count` items, interleaving categories round-robin.
///
/// Items are bucketed by `category_of` in order of first appearance. Each
/// bucket (and the uncategorised remainder) goes through `shuffle` once,
/// then every pass takes one item from each non-empty bucket. Uncategorised
/// items follow once all buckets are exhausted.
pub fn diversify<T, K, C, S>(items: &[T], count: usize, category_of: C, mut shuffle: S) -> Vec<T>
where
    T: Clone,
    K: Eq + Hash,
    C: Fn(&T) -> Option<K>,
    S: FnMut(Vec<T>) -> Vec<T>,
{
    let mut bucket_index: HashMap<K, usize> = HashMap::new();
    let mut buckets: Vec<Vec<T>> = Vec::new();
    let mut uncategorised = Vec::new();

    for item in items {
        match category_of(item) {
            Some(key) => {
                let idx = *bucket_index.entry(key).or_insert_with(|| {
                    buckets.push(Vec::new());
                    buckets.len() - 1
                });
                buckets[idx].push(item.clone());
            }
            None => uncategorised.push(item.clone()),
        }
    }

    let mut queues: Vec<VecDeque<T>> = buckets
        .into_iter()
        .map(|bucket| VecDeque::from(shuffle(bucket)))
        .collect();

    let mut selected = Vec::with_capacity(count.min(items.len()));
    while selected.len() < count && queues.iter().any(|q| !q.is_empty()) {
        for queue in queues.iter_mut() {
            if selected.len() == count {
                break;
            }
            if let Some(item) = queue.pop_front() {
                selected.push(item);
            }
        }
    }

    if selected.len() < count && !uncategorised.is_empty() {
        let remaining = count - selected.len();
        selected.extend(shuffle(uncategorised).into_iter().take(remaining));
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::seeded_shuffle;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        category: Option<&'static str>,
    }

    fn item(id: u32, category: &'static str) -> Item {
        Item {
            id,
            category: Some(category),
        }
    }

    fn category(item: &Item) -> Option<&'static str> {
        item.category
    }

    fn keep(bucket: Vec<Item>) -> Vec<Item> {
        bucket
    }

    fn sample() -> Vec<Item> {
        vec![
            item(1, "music"),
            item(2, "music"),
            item(3, "music"),
            item(4, "cinema"),
            item(5, "cinema"),
            item(6, "books"),
            item(7, "books"),
            item(8, "music"),
        ]
    }

    #[test]
    fn test_round_robin_order() {
        let picked = diversify(&sample(), 6, category, keep);
        let ids: Vec<u32> = picked.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 4, 6, 2, 5, 7]);
    }

    #[test]
    fn test_no_adjacent_same_category_while_several_remain() {
        let items = sample();
        for seed in 0..50 {
            let picked = diversify(&items, items.len(), category, |b| seeded_shuffle(&b, seed));
            // after 6 picks only "music" has items left
            for pair in picked[..6].windows(2) {
                assert_ne!(pair[0].category, pair[1].category, "seed {seed}");
            }
        }
    }

    #[test]
    fn test_count_larger_than_items_returns_everything_once() {
        let items = sample();
        let picked = diversify(&items, 100, category, keep);
        assert_eq!(picked.len(), items.len());
        let mut ids: Vec<u32> = picked.iter().map(|i| i.id).collect();
        ids.sort();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
        let ordered: Vec<u32> = picked.iter().map(|i| i.id).collect();
        assert_eq!(ordered, vec![1, 4, 6, 2, 5, 7, 3, 8]);
    }

    #[test]
    fn test_uncategorised_come_last() {
        let mut items = sample();
        items.insert(0, Item { id: 99, category: None });
        let picked = diversify(&items, 100, category, keep);
        assert_eq!(picked.last().map(|i| i.id), Some(99));
        assert_eq!(picked.len(), 9);

        let picked = diversify(&items, 3, category, keep);
        assert!(picked.iter().all(|i| i.id != 99));
    }

    #[test]
    fn test_single_category_degrades_to_its_order() {
        let items = vec![item(1, "music"), item(2, "music"), item(3, "music")];
        let picked = diversify(&items, 2, category, |mut b: Vec<Item>| {
            b.reverse();
            b
        });
        let ids: Vec<u32> = picked.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_empty_and_zero_count() {
        let empty: Vec<Item> = Vec::new();
        assert!(diversify(&empty, 5, category, keep).is_empty());
        assert!(diversify(&sample(), 0, category, keep).is_empty());
    }
}
