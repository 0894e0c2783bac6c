//! Property tests for the filter/sort projection.

use persona::model::{Field, FieldVisibility, Gender, ProfileRecord};
use persona::pipeline::sort::sort_value;
use persona::pipeline::{ResultProjector, SortDirection, SortSpec, compare, matches, project_indices};
use proptest::prelude::*;
use std::cmp::Ordering;

fn arb_text() -> impl Strategy<Value = Option<String>> {
    prop::option::weighted(0.8, "[a-cA-C ]{0,6}")
}

fn arb_gender() -> impl Strategy<Value = Option<Gender>> {
    prop_oneof![Just(None), Just(Some(Gender::Male)), Just(Some(Gender::Female))]
}

fn arb_record() -> impl Strategy<Value = ProfileRecord> {
    (
        arb_text(),
        arb_text(),
        arb_text(),
        prop::option::weighted(0.8, "[0-9]{9}"),
        arb_gender(),
        prop::option::weighted(0.7, 0u32..100),
        arb_text(),
    )
        .prop_map(|(first, last, email, id, gender, age, city)| {
            let full_name = match (&first, &last) {
                (Some(f), Some(l)) => Some(format!("{f} {l}")),
                (Some(f), None) => Some(f.clone()),
                (None, Some(l)) => Some(l.clone()),
                (None, None) => None,
            };
            ProfileRecord {
                first_name: first,
                last_name: last,
                full_name,
                email,
                email_valid: Some(true),
                national_id: id,
                national_id_valid: Some(true),
                gender,
                age,
                city,
            }
        })
}

fn arb_records() -> impl Strategy<Value = Vec<ProfileRecord>> {
    prop::collection::vec(arb_record(), 0..40)
}

fn arb_column() -> impl Strategy<Value = Field> {
    prop::sample::select(Field::COLUMNS.to_vec())
}

fn arb_direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)]
}

fn arb_sort() -> impl Strategy<Value = Option<SortSpec>> {
    prop::option::of((arb_column(), arb_direction()).prop_map(|(key, direction)| match direction {
        SortDirection::Ascending => SortSpec::ascending(key),
        SortDirection::Descending => SortSpec::descending(key),
    }))
}

fn arb_visibility() -> impl Strategy<Value = FieldVisibility> {
    prop::collection::vec(prop::sample::select(Field::TOGGLES.to_vec()), 0..4)
        .prop_map(|hidden| FieldVisibility::hiding(&hidden))
}

proptest! {
    #[test]
    fn empty_query_without_sort_is_identity(raw in arb_records(), visibility in arb_visibility()) {
        let displayed = project_indices(&raw, "", None, &visibility);
        let expected: Vec<usize> = (0..raw.len()).collect();
        prop_assert_eq!(displayed, expected);
    }

    #[test]
    fn displayed_is_exactly_the_matching_subset(
        raw in arb_records(),
        query in "[a-cA-C0-9 ]{0,3}",
        sort in arb_sort(),
        visibility in arb_visibility(),
    ) {
        let mut displayed = project_indices(&raw, &query, sort, &visibility);
        displayed.sort_unstable();
        displayed.dedup();

        let expected: Vec<usize> = raw
            .iter()
            .enumerate()
            .filter(|(_, r)| matches(r, &query, &visibility))
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(displayed, expected);
    }

    #[test]
    fn projection_is_deterministic(
        raw in arb_records(),
        query in "[a-c]{0,2}",
        sort in arb_sort(),
        visibility in arb_visibility(),
    ) {
        let first = project_indices(&raw, &query, sort, &visibility);
        let second = project_indices(&raw, &query, sort, &visibility);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn sorted_output_is_ordered_and_stable(
        raw in arb_records(),
        key in arb_column(),
        direction in arb_direction(),
    ) {
        let spec = match direction {
            SortDirection::Ascending => SortSpec::ascending(key),
            SortDirection::Descending => SortSpec::descending(key),
        };
        let displayed = project_indices(&raw, "", Some(spec), &FieldVisibility::default());

        for pair in displayed.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            match compare(&raw[a], &raw[b], Some(spec)) {
                Ordering::Less => {}
                Ordering::Equal => prop_assert!(a < b, "equal keys must keep raw order"),
                Ordering::Greater => prop_assert!(false, "out of order at {} / {}", a, b),
            }
        }
    }

    #[test]
    fn missing_keys_sort_last_in_both_directions(
        raw in arb_records(),
        key in arb_column(),
        direction in arb_direction(),
    ) {
        let spec = match direction {
            SortDirection::Ascending => SortSpec::ascending(key),
            SortDirection::Descending => SortSpec::descending(key),
        };
        let displayed = project_indices(&raw, "", Some(spec), &FieldVisibility::default());
        let present: Vec<bool> = displayed
            .iter()
            .map(|&i| sort_value(&raw[i], key).is_some())
            .collect();

        // Once a missing key appears, no present key may follow
        if let Some(first_missing) = present.iter().position(|p| !p) {
            prop_assert!(present[first_missing..].iter().all(|p| !p));
        }
    }

    #[test]
    fn memoized_projection_matches_fresh(
        raw in arb_records(),
        queries in prop::collection::vec("[a-c]{0,2}", 1..5),
        sort in arb_sort(),
    ) {
        let visibility = FieldVisibility::default();
        let mut projector = ResultProjector::new();
        for query in &queries {
            let cached = projector.project(1, &raw, query, sort, &visibility).to_vec();
            prop_assert_eq!(cached, project_indices(&raw, query, sort, &visibility));
        }
    }
}
