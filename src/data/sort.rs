use std::cmp::Ordering;

use super::model::{Row, SortDirection, SortSpec};

/// Key a row is ordered by: the cell at `column`, or `""` for short rows.
fn sort_key(row: &[String], column: usize) -> &str {
    row.get(column).map(String::as_str).unwrap_or("")
}

fn compare(a: &[String], b: &[String], spec: SortSpec) -> Ordering {
    let ord = sort_key(a, spec.column).cmp(sort_key(b, spec.column));
    match spec.direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

/// Order row indices by `spec` using plain string comparison (`"10"` sorts
/// before `"9"`). The sort is stable, so rows with equal keys keep their
/// incoming relative order in either direction.
///
/// Sorting only applies to tables with a header row; without one, or
/// without a spec, `indices` come back untouched.
pub fn sort_indices(
    rows: &[Row],
    mut indices: Vec<usize>,
    spec: Option<SortSpec>,
    has_header: bool,
) -> Vec<usize> {
    let Some(spec) = spec else {
        return indices;
    };
    if !has_header {
        return indices;
    }
    indices.sort_by(|&a, &b| compare(&rows[a], &rows[b], spec));
    indices
}

/// Row-level form of [`sort_indices`].
pub fn sort_rows<'a>(
    mut rows: Vec<&'a Row>,
    spec: Option<SortSpec>,
    has_header: bool,
) -> Vec<&'a Row> {
    if let (Some(spec), true) = (spec, has_header) {
        rows.sort_by(|a, b| compare(a, b, spec));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Row> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn sorted(data: &[Row], spec: Option<SortSpec>) -> Vec<Row> {
        sort_rows(data.iter().collect(), spec, true)
            .into_iter()
            .cloned()
            .collect()
    }

    #[test]
    fn test_lexicographic_not_numeric() {
        let data = rows(&[&["9"], &["10"], &["100"], &["2"]]);
        let out = sorted(&data, Some(SortSpec::ascending(0)));
        assert_eq!(out, rows(&[&["10"], &["100"], &["2"], &["9"]]));
    }

    #[test]
    fn test_descending_reverses() {
        let data = rows(&[&["b"], &["a"], &["c"]]);
        let spec = SortSpec {
            column: 0,
            direction: SortDirection::Descending,
        };
        assert_eq!(sorted(&data, Some(spec)), rows(&[&["c"], &["b"], &["a"]]));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let data = rows(&[&["z", "1"], &["z", "2"]]);
        assert_eq!(sorted(&data, Some(SortSpec::ascending(0))), data);

        let desc = SortSpec {
            column: 0,
            direction: SortDirection::Descending,
        };
        assert_eq!(sorted(&data, Some(desc)), data);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let data = rows(&[&["b", "1"], &["a", "2"], &["b", "0"], &["a", "9"]]);
        let spec = Some(SortSpec::ascending(0));
        let once = sorted(&data, spec);
        let twice = sorted(&once, spec);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_out_of_range_column_sorts_as_empty() {
        let data = rows(&[&["x", "b"], &["y"], &["z", "a"]]);
        let out = sorted(&data, Some(SortSpec::ascending(1)));
        assert_eq!(out, rows(&[&["y"], &["z", "a"], &["x", "b"]]));

        let far = sorted(&data, Some(SortSpec::ascending(42)));
        assert_eq!(far, data);
    }

    #[test]
    fn test_no_spec_or_no_header_is_identity() {
        let data = rows(&[&["b"], &["a"]]);
        assert_eq!(sorted(&data, None), data);

        let indices = sort_indices(&data, vec![0, 1], Some(SortSpec::ascending(0)), false);
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_sort_indices_orders_subset() {
        let data = rows(&[&["h"], &["c"], &["a"], &["b"]]);
        let out = sort_indices(&data, vec![1, 3], Some(SortSpec::ascending(0)), true);
        assert_eq!(out, vec![3, 1]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        /// Few distinct values per cell so equal keys are common.
        fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
            prop::collection::vec(prop::collection::vec("[ab]{0,2}", 0..4), 0..16)
        }

        fn spec_strategy() -> impl Strategy<Value = SortSpec> {
            (
                0usize..5,
                prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)],
            )
                .prop_map(|(column, direction)| SortSpec { column, direction })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn prop_sort_is_idempotent(rows in rows_strategy(), spec in spec_strategy()) {
                let all: Vec<usize> = (0..rows.len()).collect();
                let once = sort_indices(&rows, all, Some(spec), true);
                let twice = sort_indices(&rows, once.clone(), Some(spec), true);
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn prop_sort_orders_keys_and_keeps_ties_in_input_order(
                rows in rows_strategy(),
                spec in spec_strategy(),
            ) {
                let all: Vec<usize> = (0..rows.len()).collect();
                let sorted = sort_indices(&rows, all.clone(), Some(spec), true);

                let mut seen = sorted.clone();
                seen.sort_unstable();
                prop_assert_eq!(seen, all);

                for w in sorted.windows(2) {
                    let a = sort_key(&rows[w[0]], spec.column);
                    let b = sort_key(&rows[w[1]], spec.column);
                    match spec.direction {
                        SortDirection::Ascending => {
                            prop_assert!(a <= b);
                        }
                        SortDirection::Descending => {
                            prop_assert!(a >= b);
                        }
                    }
                    if a == b {
                        prop_assert!(w[0] < w[1]);
                    }
                }
            }

            #[test]
            fn prop_no_header_leaves_order_alone(rows in rows_strategy(), spec in spec_strategy()) {
                let all: Vec<usize> = (0..rows.len()).rev().collect();
                prop_assert_eq!(sort_indices(&rows, all.clone(), Some(spec), false), all);
            }
        }
    }
}
