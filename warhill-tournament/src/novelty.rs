//! Novelty by outcome distance
//!
//! Level 3 - Step-level implementation
//!
//! Two entries that fared the same against the same opponents are
//! redundant. For every pair of entries the weighted distance between
//! their outcome records is averaged over their common opponents; an
//! entry's novelty is the mean of its distances to everyone else.

use warhill_core::Entry;

/// Mean weighted distance between two entries over their common opponents
///
/// None when they share no opponent.
pub fn pairwise_distance(a: &Entry, b: &Entry) -> Option<f64> {
    let mut sum = 0.0;
    let mut shared = 0usize;

    for (opponent, record) in a.outcomes() {
        if let Some(other) = b.outcome(opponent) {
            sum += record.distance(other);
            shared += 1;
        }
    }

    if shared == 0 {
        None
    } else {
        Some(sum / shared as f64)
    }
}

/// Recompute every pairwise distance and every novelty score from scratch
pub fn calculate_distance(entries: &mut [Entry]) {
    let n = entries.len();
    let mut pairs: Vec<(usize, usize, f64)> = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            if let Some(d) = pairwise_distance(&entries[i], &entries[j]) {
                pairs.push((i, j, d));
            }
        }
    }

    for entry in entries.iter_mut() {
        entry.clear_distances();
    }
    for (i, j, d) in pairs {
        let (a_name, b_name) = (entries[i].name.clone(), entries[j].name.clone());
        entries[i].set_distance(&b_name, d);
        entries[j].set_distance(&a_name, d);
    }

    for entry in entries.iter_mut() {
        let novelty = {
            let distances = entry.distances();
            if distances.is_empty() {
                None
            } else {
                Some(distances.values().sum::<f64>() / distances.len() as f64)
            }
        };
        entry.novelty = novelty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warhill_core::OutcomeRecord;

    fn make_test_entry(name: &str, records: &[(&str, (u32, u32, u32))]) -> Entry {
        let mut entry = Entry::new(name, "");
        for (opponent, record) in records {
            entry.record_outcome(opponent, OutcomeRecord::from(*record));
        }
        entry
    }

    #[test]
    fn test_pairwise_distance_weights() {
        let a = make_test_entry("a", &[("x", (2, 0, 0)), ("y", (0, 0, 0))]);
        let b = make_test_entry("b", &[("x", (0, 0, 0)), ("y", (0, 2, 0))]);
        // x: 2 wins * 1.5 = 3.0, y: 2 losses * 0.5 = 1.0
        assert_eq!(pairwise_distance(&a, &b), Some(2.0));
        assert_eq!(pairwise_distance(&b, &a), Some(2.0));
    }

    #[test]
    fn test_pairwise_distance_only_common_opponents() {
        let a = make_test_entry("a", &[("x", (0, 0, 4)), ("only_a", (9, 9, 9))]);
        let b = make_test_entry("b", &[("x", (0, 0, 0)), ("only_b", (1, 1, 1))]);
        assert_eq!(pairwise_distance(&a, &b), Some(4.0));

        let c = make_test_entry("c", &[("z", (1, 0, 0))]);
        assert_eq!(pairwise_distance(&a, &c), None);
    }

    #[test]
    fn test_calculate_distance_symmetric() {
        let mut entries = vec![
            make_test_entry("a", &[("x", (3, 1, 0)), ("y", (1, 1, 2))]),
            make_test_entry("b", &[("x", (0, 4, 0)), ("y", (2, 0, 2))]),
            make_test_entry("c", &[("x", (2, 2, 0)), ("y", (4, 0, 0))]),
        ];
        calculate_distance(&mut entries);

        for i in 0..entries.len() {
            for j in 0..entries.len() {
                if i == j {
                    continue;
                }
                let forward = entries[i].distance_to(&entries[j].name);
                let backward = entries[j].distance_to(&entries[i].name);
                assert!(forward.is_some());
                assert_eq!(forward, backward);
            }
        }
    }

    #[test]
    fn test_novelty_is_mean_distance() {
        let mut entries = vec![
            make_test_entry("a", &[("x", (0, 0, 0))]),
            make_test_entry("b", &[("x", (2, 0, 0))]),
            make_test_entry("c", &[("x", (0, 0, 6))]),
        ];
        calculate_distance(&mut entries);

        // a-b 3.0, a-c 6.0
        assert_eq!(entries[0].novelty, Some(4.5));
        // b-a 3.0, b-c sqrt(9 + 36)
        let expected_b = (3.0 + 45f64.sqrt()) / 2.0;
        assert!((entries[1].novelty.unwrap() - expected_b).abs() < 1e-12);
    }

    #[test]
    fn test_recompute_drops_departed_entries() {
        let mut entries = vec![
            make_test_entry("a", &[("x", (0, 0, 0))]),
            make_test_entry("b", &[("x", (2, 0, 0))]),
            make_test_entry("c", &[("x", (0, 0, 6))]),
        ];
        calculate_distance(&mut entries);
        entries.pop();
        calculate_distance(&mut entries);

        assert_eq!(entries[0].distance_to("c"), None);
        assert_eq!(entries[0].novelty, Some(3.0));
    }

    #[test]
    fn test_lone_entry_has_no_novelty() {
        let mut entries = vec![make_test_entry("a", &[("x", (1, 0, 0))])];
        calculate_distance(&mut entries);
        assert_eq!(entries[0].novelty, None);
    }
}
