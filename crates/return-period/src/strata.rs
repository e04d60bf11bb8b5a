//! Detection of groups with no usable values.

use std::collections::BTreeSet;

use floodstat_series::UnitKey;

/// Keys of the groups whose values are all missing.
///
/// Accepts the `(key, values)` pairs produced by
/// [`SeriesTable::value_groups`](floodstat_series::SeriesTable::value_groups)
/// and [`AnnualMaxima::value_groups`](floodstat_series::AnnualMaxima::value_groups).
/// An empty group counts as all missing.
pub fn extract_nan_strata<'a, I>(groups: I) -> BTreeSet<UnitKey>
where
    I: IntoIterator<Item = (&'a UnitKey, &'a [f64])>,
{
    groups
        .into_iter()
        .filter(|(_, values)| values.iter().all(|v| v.is_nan()))
        .map(|(key, _)| key.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use floodstat_series::AnnualMaxima;

    fn key(pcode: &str) -> UnitKey {
        UnitKey::new(["SOM", pcode]).unwrap()
    }

    #[test]
    fn finds_all_missing_groups_only() {
        let maxima = AnnualMaxima::from_records(vec![
            (key("A"), 2001, f64::NAN),
            (key("A"), 2002, f64::NAN),
            (key("B"), 2001, f64::NAN),
            (key("B"), 2002, 0.3),
            (key("C"), 2001, 0.1),
        ])
        .unwrap();
        let strata = extract_nan_strata(maxima.value_groups());
        assert_eq!(strata.into_iter().collect::<Vec<_>>(), vec![key("A")]);
    }

    #[test]
    fn empty_group_counts_as_missing() {
        let k = key("Z");
        let strata = extract_nan_strata([(&k, &[][..])]);
        assert!(strata.contains(&k));
    }
}
