#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use persona::model::{Field, FieldVisibility, ProfileRecord};
use persona::pipeline::{SortSpec, project_indices};

#[derive(Arbitrary, Debug)]
struct Input {
    names: Vec<(Option<String>, Option<u32>)>,
    query: String,
    sort_column: Option<u8>,
    descending: bool,
    hidden: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let raw: Vec<ProfileRecord> = input
        .names
        .into_iter()
        .map(|(name, age)| ProfileRecord {
            full_name: name.clone(),
            first_name: name,
            age,
            ..Default::default()
        })
        .collect();

    let hidden: Vec<Field> = input
        .hidden
        .iter()
        .map(|i| Field::TOGGLES[*i as usize % Field::TOGGLES.len()])
        .collect();
    let visibility = FieldVisibility::hiding(&hidden);

    let sort = input.sort_column.map(|i| {
        let key = Field::COLUMNS[i as usize % Field::COLUMNS.len()];
        if input.descending {
            SortSpec::descending(key)
        } else {
            SortSpec::ascending(key)
        }
    });

    let displayed = project_indices(&raw, &input.query, sort, &visibility);
    assert!(displayed.len() <= raw.len());
    assert!(displayed.iter().all(|&i| i < raw.len()));
});
