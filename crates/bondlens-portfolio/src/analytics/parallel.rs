//! Conditional parallel iteration over portfolio rows.
//!
//! Per-row work (schedule + discounting) is independent, so it may run on
//! rayon's pool when the `parallel` feature is enabled. Results always come
//! back in input order; reductions stay sequential in the callers.

use crate::types::AnalyticsConfig;

/// Maps a function over rows, conditionally using parallel iteration.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - The collection size reaches `config.parallel_threshold`
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &AnalyticsConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

/// Filters and maps rows, conditionally using parallel iteration.
#[allow(unused_variables)]
pub fn maybe_parallel_filter_map<T, U, F>(items: &[T], config: &AnalyticsConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> Option<U> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().filter_map(f).collect();
        }
    }

    items.iter().filter_map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maybe_parallel_map_keeps_order() {
        let config = AnalyticsConfig::sequential();
        let items = vec![1, 2, 3, 4, 5];
        let results: Vec<i32> = maybe_parallel_map(&items, &config, |x| x * 2);
        assert_eq!(results, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_maybe_parallel_filter_map() {
        let config = AnalyticsConfig::sequential();
        let items = vec![1, 2, 3, 4, 5];
        let results: Vec<i32> =
            maybe_parallel_filter_map(&items, &config, |x| (*x > 2).then(|| x * 2));
        assert_eq!(results, vec![6, 8, 10]);
    }

    #[test]
    fn test_parallel_path_matches_sequential() {
        let items: Vec<u64> = (0..500).collect();
        let parallel = AnalyticsConfig::default().with_threshold(1);
        let sequential = AnalyticsConfig::sequential();

        let a = maybe_parallel_map(&items, &parallel, |x| x * x);
        let b = maybe_parallel_map(&items, &sequential, |x| x * x);
        assert_eq!(a, b);
    }
}
