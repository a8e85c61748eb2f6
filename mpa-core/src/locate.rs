//! Locating the labelled data point nearest a clicked date.
//!
//! Chart crosshairs and tooltips need the index of the label that best
//! matches a timestamp picked from a pixel position. Labels are already
//! sorted ascending, so a converging min/max window finds the answer in
//! O(log n) without ever indexing out of bounds.

/// Index of the tightest lower-or-equal bound for `target` in an ascending
/// label slice.
///
/// Returns `None` only for an empty slice (nothing to indicate). When the
/// target precedes every label the first index is returned; an exact match
/// resolves to the matching label's index.
pub fn locate<T: Ord>(labels: &[T], target: &T) -> Option<usize> {
    if labels.is_empty() {
        return None;
    }
    let mut min_index = 0;
    let mut max_index = labels.len();
    while max_index - min_index > 1 {
        let current = (min_index + max_index) / 2;
        if labels[current] <= *target {
            min_index = current;
        } else {
            max_index = current;
        }
    }
    Some(min_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_labels_yield_nothing() {
        let labels: Vec<i64> = Vec::new();
        assert_eq!(locate(&labels, &10), None);
    }

    #[test]
    fn exact_match_resolves_to_that_label() {
        let labels = vec![10_i64, 20, 30, 40];
        assert_eq!(locate(&labels, &30), Some(2));
        assert_eq!(locate(&labels, &10), Some(0));
        assert_eq!(locate(&labels, &40), Some(3));
    }

    #[test]
    fn between_labels_takes_the_lower_bound() {
        let labels = vec![10_i64, 20, 30, 40];
        assert_eq!(locate(&labels, &25), Some(1));
        assert_eq!(locate(&labels, &39), Some(2));
    }

    #[test]
    fn target_before_all_labels_takes_the_first() {
        let labels = vec![10_i64, 20, 30];
        assert_eq!(locate(&labels, &-5), Some(0));
    }

    #[test]
    fn target_after_all_labels_takes_the_last() {
        let labels = vec![10_i64, 20, 30];
        assert_eq!(locate(&labels, &1000), Some(2));
    }

    #[test]
    fn single_label_never_goes_out_of_bounds() {
        let labels = vec![10_i64];
        assert_eq!(locate(&labels, &-100), Some(0));
        assert_eq!(locate(&labels, &10), Some(0));
        assert_eq!(locate(&labels, &100), Some(0));
    }

    #[test]
    fn works_on_calendar_days() {
        let labels = vec![day(2024, 1, 1), day(2024, 2, 1), day(2024, 3, 1)];
        assert_eq!(locate(&labels, &day(2024, 2, 15)), Some(1));
    }

    #[test]
    fn result_is_stable_under_repeated_calls() {
        let labels: Vec<i64> = (0..1000).map(|i| i * 3).collect();
        for target in [-1_i64, 0, 1, 1499, 1500, 2997, 5000] {
            let first = locate(&labels, &target);
            for _ in 0..3 {
                assert_eq!(locate(&labels, &target), first);
            }
            // The contract: labels[i] <= target, or i == 0.
            let i = first.unwrap();
            assert!(labels[i] <= target || i == 0);
            // And tightest: the next label, if any, is past the target.
            if labels[i] <= target && i + 1 < labels.len() {
                assert!(labels[i + 1] > target);
            }
        }
    }
}
