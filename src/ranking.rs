//! Leaderboard ordering
//!
//! Highest score first; equal scores are broken by the faster time. Anything
//! still tied keeps its input order, so the sort must stay stable.

use std::cmp::Ordering;

use crate::submission::{Submission, SubmissionId};

/// Total order used for the leaderboard: score descending, then time ascending
pub fn compare(a: &Submission, b: &Submission) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.time.total_cmp(&b.time))
}

/// Return a ranked copy of `submissions`. The input is left untouched.
pub fn rank(submissions: &[Submission]) -> Vec<Submission> {
    let mut ranked = submissions.to_vec();
    rank_in_place(&mut ranked);
    ranked
}

/// Rank a list the store already owns
pub fn rank_in_place(submissions: &mut [Submission]) {
    // `sort_by` is stable
    submissions.sort_by(compare);
}

/// 1-based rank of the submission with `id` in an already ranked list
pub fn position_of(ranked: &[Submission], id: SubmissionId) -> Option<usize> {
    ranked.iter().position(|s| s.id == id).map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn entry(id: u64, name: &str, score: f64, time: f64) -> Submission {
        Submission {
            id: SubmissionId(id),
            name: name.to_string(),
            score,
            time,
            audio_reference: None,
            created_at: Utc.timestamp_millis_opt(id as i64).single().unwrap(),
        }
    }

    fn names(list: &[Submission]) -> Vec<&str> {
        list.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_rank_empty_and_single() {
        assert!(rank(&[]).is_empty());
        let one = [entry(1, "solo", 42.0, 12.0)];
        assert_eq!(rank(&one), one.to_vec());
    }

    #[test]
    fn test_score_beats_time() {
        let list = [
            entry(1, "slow-high", 90.0, 3000.0),
            entry(2, "fast-low", 60.0, 1.0),
        ];
        assert_eq!(names(&rank(&list)), ["slow-high", "fast-low"]);
    }

    #[test]
    fn test_time_breaks_score_tie() {
        let list = [entry(1, "A", 80.0, 20.0), entry(2, "B", 80.0, 10.0)];
        assert_eq!(names(&rank(&list)), ["B", "A"]);
    }

    #[test]
    fn test_full_tie_keeps_input_order() {
        let list = [
            entry(1, "first", 75.0, 40.0),
            entry(2, "second", 75.0, 40.0),
            entry(3, "third", 75.0, 40.0),
        ];
        assert_eq!(names(&rank(&list)), ["first", "second", "third"]);
    }

    #[test]
    fn test_rank_does_not_mutate_input() {
        let list = vec![entry(1, "low", 10.0, 5.0), entry(2, "high", 99.0, 5.0)];
        let before = list.clone();
        let _ = rank(&list);
        assert_eq!(list, before);
    }

    #[test]
    fn test_position_of() {
        let ranked = rank(&[entry(1, "b", 50.0, 5.0), entry(2, "a", 70.0, 5.0)]);
        assert_eq!(position_of(&ranked, SubmissionId(2)), Some(1));
        assert_eq!(position_of(&ranked, SubmissionId(1)), Some(2));
        assert_eq!(position_of(&ranked, SubmissionId(3)), None);
    }

    // Small value pools so ties on score and time actually happen
    fn arb_entries() -> impl Strategy<Value = Vec<Submission>> {
        prop::collection::vec((0u8..=10, 1u8..=5), 0..40).prop_map(|pairs| {
            pairs
                .into_iter()
                .enumerate()
                .map(|(i, (score, time))| {
                    entry(i as u64, "p", f64::from(score) * 10.0, f64::from(time))
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_rank_is_ordered_and_stable(list in arb_entries()) {
            let ranked = rank(&list);
            prop_assert_eq!(ranked.len(), list.len());
            for pair in ranked.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.score >= b.score);
                if a.score == b.score {
                    prop_assert!(a.time <= b.time);
                    if a.time == b.time {
                        // ids were assigned in input order
                        prop_assert!(a.id < b.id);
                    }
                }
            }
        }

        #[test]
        fn prop_rank_is_a_permutation(list in arb_entries()) {
            let mut ranked_ids: Vec<_> = rank(&list).iter().map(|s| s.id).collect();
            let mut input_ids: Vec<_> = list.iter().map(|s| s.id).collect();
            ranked_ids.sort();
            input_ids.sort();
            prop_assert_eq!(ranked_ids, input_ids);
        }

        #[test]
        fn prop_rank_is_idempotent(list in arb_entries()) {
            let once = rank(&list);
            prop_assert_eq!(rank(&once), once.clone());
        }
    }
}
