use crate::model::{FieldVisibility, ProfileRecord};
use crate::pipeline::filter::Filter;
use crate::pipeline::sort::{sort_indices, SortSpec};
use tracing::debug;

/// Positions (into the raw set) of the displayed records, filter first, then
/// sort. The raw set is never touched.
pub fn project_indices(
    raw: &[ProfileRecord],
    query: &str,
    sort: Option<SortSpec>,
    visibility: &FieldVisibility,
) -> Vec<usize> {
    let filter = Filter::new(query);
    let mut indices: Vec<usize> = raw
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.matches(record, visibility))
        .map(|(i, _)| i)
        .collect();

    sort_indices(raw, &mut indices, sort);
    indices
}

/// The displayed sequence as borrowed records.
pub fn project<'a>(
    raw: &'a [ProfileRecord],
    query: &str,
    sort: Option<SortSpec>,
    visibility: &FieldVisibility,
) -> Vec<&'a ProfileRecord> {
    project_indices(raw, query, sort, visibility)
        .into_iter()
        .map(|i| &raw[i])
        .collect()
}

/// Everything a projection depends on. `raw_revision` stands in for the raw
/// set itself and must change whenever the raw set is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ProjectionKey {
    raw_revision: u64,
    query: String,
    sort: Option<SortSpec>,
    visibility: FieldVisibility,
}

/// Memoizes the last projection.
///
/// The cached result is reused only when all four inputs are identical to the
/// ones it was computed from; any difference recomputes from scratch.
#[derive(Debug, Default)]
pub struct ResultProjector {
    cached: Option<(ProjectionKey, Vec<usize>)>,
    recomputes: u64,
}

impl ResultProjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(
        &mut self,
        raw_revision: u64,
        raw: &[ProfileRecord],
        query: &str,
        sort: Option<SortSpec>,
        visibility: &FieldVisibility,
    ) -> &[usize] {
        let fresh = self.cached.as_ref().is_some_and(|(key, _)| {
            key.raw_revision == raw_revision
                && key.query == query
                && key.sort == sort
                && key.visibility == *visibility
        });

        if !fresh {
            let indices = project_indices(raw, query, sort, visibility);
            self.recomputes += 1;
            debug!(
                raw = raw.len(),
                displayed = indices.len(),
                query,
                ?sort,
                "recomputed projection"
            );
            let key = ProjectionKey {
                raw_revision,
                query: query.to_string(),
                sort,
                visibility: *visibility,
            };
            self.cached = Some((key, indices));
        }

        match &self.cached {
            Some((_, indices)) => indices,
            None => &[],
        }
    }

    /// Drop the cached projection
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Number of times the projection was actually recomputed
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }
}
