//! The single owned UI controller.
//!
//! All state lives here and changes only through the per-trigger methods.
//! Views read the displayed sequence through [`Session::displayed`], which
//! reuses the memoized projection until one of its inputs changes.

use crate::client::{Collaborator, ExportFile, GenerateRequest, MAX_COUNT, MIN_COUNT};
use crate::error::{Error, Result};
use crate::model::{Field, FieldVisibility, ProfileRecord};
use crate::pipeline::{sort, ResultProjector, SortSpec};
use crate::render::{compose, CopyTarget, Presentation, ViewKind};
use tracing::{error, info};

/// Rows moved by page up/down
const PAGE_SIZE: usize = 10;

#[derive(Debug)]
pub struct Session {
    raw: Vec<ProfileRecord>,
    raw_revision: u64,
    query: String,
    sort: Option<SortSpec>,
    visibility: FieldVisibility,
    view: ViewKind,
    count: u32,
    selected: usize,
    projector: ResultProjector,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(10, FieldVisibility::default(), ViewKind::default())
    }
}

impl Session {
    pub fn new(count: u32, visibility: FieldVisibility, view: ViewKind) -> Self {
        Self {
            raw: Vec::new(),
            raw_revision: 0,
            query: String::new(),
            sort: None,
            visibility,
            view,
            count: count.clamp(MIN_COUNT, MAX_COUNT),
            selected: 0,
            projector: ResultProjector::new(),
        }
    }

    pub fn raw(&self) -> &[ProfileRecord] {
        &self.raw
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn visibility(&self) -> &FieldVisibility {
        &self.visibility
    }

    pub fn view(&self) -> ViewKind {
        self.view
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    // Input mutations. Each one leaves the projection to be recomputed lazily.

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.selected = 0;
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        self.selected = 0;
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.selected = 0;
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.selected = 0;
    }

    /// Column-header click
    pub fn request_sort(&mut self, key: Field) -> SortSpec {
        let spec = sort::toggle(self.sort, key);
        self.set_sort(Some(spec));
        spec
    }

    pub fn set_sort(&mut self, spec: Option<SortSpec>) {
        self.sort = spec;
        self.selected = 0;
    }

    pub fn set_visibility(&mut self, visibility: FieldVisibility) {
        self.visibility = visibility;
        self.selected = 0;
    }

    pub fn toggle_field(&mut self, field: Field) {
        self.visibility.toggle(field);
        self.selected = 0;
    }

    /// Replace the raw set. Query and sort carry over to the new set.
    pub fn set_raw_records(&mut self, records: Vec<ProfileRecord>) {
        self.raw = records;
        self.raw_revision += 1;
        self.selected = 0;
    }

    pub fn set_view(&mut self, view: ViewKind) {
        self.view = view;
    }

    pub fn cycle_view(&mut self) -> ViewKind {
        self.view = self.view.next();
        self.view
    }

    pub fn set_count(&mut self, count: u32) {
        self.count = count.clamp(MIN_COUNT, MAX_COUNT);
    }

    pub fn adjust_count(&mut self, delta: i64) {
        let count = (i64::from(self.count) + delta).clamp(i64::from(MIN_COUNT), i64::from(MAX_COUNT));
        self.count = u32::try_from(count).unwrap_or(MIN_COUNT);
    }

    // Projection

    /// Positions of the displayed records in the raw set
    pub fn displayed_indices(&mut self) -> &[usize] {
        self.projector.project(
            self.raw_revision,
            &self.raw,
            &self.query,
            self.sort,
            &self.visibility,
        )
    }

    /// The displayed sequence
    pub fn displayed(&mut self) -> Vec<&ProfileRecord> {
        let indices = self.projector.project(
            self.raw_revision,
            &self.raw,
            &self.query,
            self.sort,
            &self.visibility,
        );
        indices.iter().map(|&i| &self.raw[i]).collect()
    }

    pub fn displayed_len(&mut self) -> usize {
        self.displayed_indices().len()
    }

    /// Render the displayed sequence in the active view
    pub fn present(&mut self) -> Presentation {
        let renderer = self.view.renderer(self.sort);
        let visibility = self.visibility;
        renderer.render(&self.displayed(), &visibility)
    }

    // Selection

    pub fn selected_record(&mut self) -> Option<&ProfileRecord> {
        let selected = self.selected;
        self.displayed().get(selected).copied()
    }

    pub fn select(&mut self, position: usize) {
        let len = self.displayed_len();
        self.selected = position.min(len.saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        self.select(self.selected + 1);
    }

    pub fn select_prev(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    pub fn select_page_down(&mut self) {
        self.select(self.selected + PAGE_SIZE);
    }

    pub fn select_page_up(&mut self) {
        self.select(self.selected.saturating_sub(PAGE_SIZE));
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.select(usize::MAX);
    }

    /// Clipboard text and acknowledgment for the selected record
    pub fn copy_text(&mut self, target: CopyTarget) -> Option<(String, &'static str)> {
        let visibility = self.visibility;
        let record = self.selected_record()?;
        compose(record, target, &visibility)
    }

    // Collaborator calls

    /// Request for the current count and visibility
    pub fn generate_request(&self) -> GenerateRequest {
        GenerateRequest::new(self.count, self.visibility)
    }

    /// Apply a finished generation. On failure the raw set is left as it was.
    pub fn apply_generation(&mut self, result: Result<Vec<ProfileRecord>>) -> Result<usize> {
        match result {
            Ok(records) => {
                let received = records.len();
                info!(received, "raw set replaced");
                self.set_raw_records(records);
                Ok(received)
            }
            Err(e) => {
                error!("{e}");
                Err(e)
            }
        }
    }

    pub fn generate(&mut self, collaborator: &dyn Collaborator) -> Result<usize> {
        let request = self.generate_request();
        let result = collaborator.generate(&request);
        self.apply_generation(result)
    }

    /// Owned copy of the displayed sequence to hand to the exporter.
    /// Rejects an empty sequence before any request is made.
    pub fn export_payload(&mut self) -> Result<Vec<ProfileRecord>> {
        let records: Vec<ProfileRecord> = self.displayed().into_iter().cloned().collect();
        if records.is_empty() {
            return Err(Error::EmptyExport);
        }
        Ok(records)
    }

    pub fn export(&mut self, collaborator: &dyn Collaborator) -> Result<ExportFile> {
        let payload = self.export_payload()?;
        collaborator.export_records(&payload).inspect_err(|e| error!("{e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Gender;
    use crate::pipeline::SortDirection;

    fn sample() -> Vec<ProfileRecord> {
        vec![
            ProfileRecord {
                full_name: Some("A".into()),
                age: Some(30),
                gender: Some(Gender::Male),
                ..Default::default()
            },
            ProfileRecord {
                full_name: Some("B".into()),
                age: None,
                gender: Some(Gender::Female),
                ..Default::default()
            },
            ProfileRecord {
                full_name: Some("C".into()),
                age: Some(25),
                gender: Some(Gender::Male),
                ..Default::default()
            },
        ]
    }

    fn shown_names(session: &mut Session) -> Vec<String> {
        session
            .displayed()
            .iter()
            .map(|r| r.full_name.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_sort_click_sequence() {
        let mut session = Session::default();
        session.set_raw_records(sample());

        session.request_sort(Field::Age);
        assert_eq!(shown_names(&mut session), ["C", "A", "B"]);

        let spec = session.request_sort(Field::Age);
        assert_eq!(spec.direction, SortDirection::Descending);
        assert_eq!(shown_names(&mut session), ["A", "C", "B"]);

        let spec = session.request_sort(Field::FullName);
        assert_eq!(spec, SortSpec::ascending(Field::FullName));
    }

    #[test]
    fn test_query_and_sort_survive_regeneration() {
        let mut session = Session::default();
        session.set_raw_records(sample());
        session.set_query("זכר");
        session.request_sort(Field::Age);
        assert_eq!(shown_names(&mut session), ["C", "A"]);

        let mut next = sample();
        next.reverse();
        session.set_raw_records(next);
        assert_eq!(session.query(), "זכר");
        assert_eq!(shown_names(&mut session), ["C", "A"]);
    }

    #[test]
    fn test_raw_set_is_not_reordered() {
        let mut session = Session::default();
        session.set_raw_records(sample());
        session.request_sort(Field::Age);
        let _ = session.displayed();

        let raw: Vec<_> = session.raw().iter().map(|r| r.full_name.clone().unwrap()).collect();
        assert_eq!(raw, ["A", "B", "C"]);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut session = Session::default();
        session.set_raw_records(sample());
        session.select_last();
        assert_eq!(session.selected(), 2);
        session.select_next();
        assert_eq!(session.selected(), 2);
        session.select_page_up();
        assert_eq!(session.selected(), 0);
    }

    #[test]
    fn test_copy_text_for_selection() {
        let mut session = Session::default();
        session.set_raw_records(sample());
        session.select(1);

        let (text, _) = session.copy_text(CopyTarget::All).unwrap();
        assert_eq!(text, "שם: B\nמגדר: נקבה");
    }

    #[test]
    fn test_failed_generation_keeps_raw_set() {
        let mut session = Session::default();
        session.set_raw_records(sample());

        let result = session.apply_generation(Err(Error::GenerationFailed("HTTP 500".into())));
        assert!(result.is_err());
        assert_eq!(session.raw().len(), 3);
    }

    #[test]
    fn test_empty_export_rejected() {
        let mut session = Session::default();
        assert!(matches!(session.export_payload(), Err(Error::EmptyExport)));

        session.set_raw_records(sample());
        session.set_query("nobody");
        assert!(matches!(session.export_payload(), Err(Error::EmptyExport)));
    }

    #[test]
    fn test_count_adjustment_clamped() {
        let mut session = Session::new(999, FieldVisibility::default(), ViewKind::Table);
        session.adjust_count(10);
        assert_eq!(session.count(), 1000);
        session.set_count(0);
        assert_eq!(session.count(), 1);
        session.adjust_count(-5);
        assert_eq!(session.count(), 1);
    }
}
