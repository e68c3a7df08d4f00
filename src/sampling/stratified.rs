//! Seeded per-category quota sampling.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Default per-category quota.
pub const DEFAULT_QUOTA: usize = 10;
/// Default sampling seed, reused across every group and dataset so runs
/// are bit-reproducible.
pub const DEFAULT_SEED: u64 = 42;

/// Draw up to `quota` rows per category, without replacement.
///
/// Rows are grouped by `category` in first-seen order. A group at or under
/// the quota is taken whole, in source order; a larger group is sampled
/// from a fresh seeded generator. Returns indices into `rows`,
/// concatenated in group order.
pub fn sample_by_category<T>(
    rows: &[T],
    category: impl Fn(&T) -> &str,
    quota: usize,
    seed: u64,
) -> Vec<usize> {
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for (idx, row) in rows.iter().enumerate() {
        let cat = category(row);
        match groups.iter_mut().find(|(name, _)| name.as_str() == cat) {
            Some((_, members)) => members.push(idx),
            None => groups.push((cat.to_string(), vec![idx])),
        }
    }

    let mut selected = Vec::new();
    for (_cat, members) in groups {
        if members.len() <= quota {
            selected.extend(members);
            continue;
        }
        // Same seed for every group: reproducibility beats independence here.
        let mut rng = StdRng::seed_from_u64(seed);
        let picks = rand::seq::index::sample(&mut rng, members.len(), quota);
        selected.extend(picks.iter().map(|pick| members[pick]));
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(categories: &[&str]) -> Vec<String> {
        categories.iter().map(|cat| cat.to_string()).collect()
    }

    #[test]
    fn small_groups_are_taken_whole_in_source_order() {
        let rows = rows(&["sad", "happy", "sad", "sad"]);
        let picked = sample_by_category(&rows, |row| row.as_str(), DEFAULT_QUOTA, DEFAULT_SEED);
        assert_eq!(picked, [0, 2, 3, 1]);
    }

    #[test]
    fn large_groups_are_capped_at_the_quota() {
        let rows: Vec<String> = (0..25).map(|_| "happy".to_string()).collect();
        let picked = sample_by_category(&rows, |row| row.as_str(), 10, DEFAULT_SEED);
        assert_eq!(picked.len(), 10);
        let mut unique = picked.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn mixed_group_sizes_match_the_expected_totals() {
        // 15 happy + 3 sad with quota 10 => 10 happy and all 3 sad.
        let mut cats = vec!["happy"; 15];
        cats.extend(["sad"; 3]);
        let rows = rows(&cats);
        let picked = sample_by_category(&rows, |row| row.as_str(), 10, DEFAULT_SEED);
        assert_eq!(picked.len(), 13);
        let happy = picked.iter().filter(|&&idx| rows[idx] == "happy").count();
        let sad = picked.iter().filter(|&&idx| rows[idx] == "sad").count();
        assert_eq!((happy, sad), (10, 3));
    }

    #[test]
    fn same_seed_reproduces_the_draw() {
        let rows: Vec<String> = (0..100)
            .map(|idx| if idx % 2 == 0 { "a" } else { "b" }.to_string())
            .collect();
        let first = sample_by_category(&rows, |row| row.as_str(), 7, 42);
        let second = sample_by_category(&rows, |row| row.as_str(), 7, 42);
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_change_the_draw() {
        let rows: Vec<String> = (0..100).map(|_| "a".to_string()).collect();
        let first = sample_by_category(&rows, |row| row.as_str(), 10, 1);
        let second = sample_by_category(&rows, |row| row.as_str(), 10, 2);
        assert_ne!(first, second);
    }

    #[test]
    fn group_order_is_first_seen() {
        let rows = rows(&["b", "a", "b", "a"]);
        let picked = sample_by_category(&rows, |row| row.as_str(), DEFAULT_QUOTA, DEFAULT_SEED);
        assert_eq!(picked, [0, 2, 1, 3]);
    }
}
