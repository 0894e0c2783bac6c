use crate::client::{Collaborator, ExportFile};
use crate::error::Error;
use crate::feedback::{Clipboard, ClipboardFeedback};
use crate::model::{Field, ProfileRecord};
use crate::render::{CopyTarget, TableView, ViewKind};
use crate::session::Session;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Fields,
    Help,
}

/// A collaborator call running on a worker thread.
///
/// Dropping the receiver abandons the call: its result is discarded.
pub enum JobState<T> {
    Idle,
    Running {
        receiver: Receiver<crate::Result<T>>,
        started: Instant,
        /// Error reported if the worker dies without answering
        on_lost: fn(String) -> Error,
    },
}

impl<T: Send + 'static> JobState<T> {
    fn spawn<F>(work: F, on_lost: fn(String) -> Error) -> Self
    where
        F: FnOnce() -> crate::Result<T> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(work());
        });
        JobState::Running {
            receiver: rx,
            started: Instant::now(),
            on_lost,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, JobState::Running { .. })
    }

    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            JobState::Running { started, .. } => Some(started.elapsed()),
            JobState::Idle => None,
        }
    }

    /// Take the finished result, if any, leaving the job idle
    fn poll(&mut self) -> Option<crate::Result<T>> {
        let current = std::mem::replace(self, JobState::Idle);
        match current {
            JobState::Running {
                receiver,
                started,
                on_lost,
            } => match receiver.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => {
                    *self = JobState::Running {
                        receiver,
                        started,
                        on_lost,
                    };
                    None
                }
                Err(TryRecvError::Disconnected) => Some(Err(on_lost(
                    "worker thread terminated unexpectedly".to_string(),
                ))),
            },
            JobState::Idle => None,
        }
    }
}

/// Application state
pub struct App {
    pub session: Session,
    pub mode: Mode,
    /// Mode to return to when help closes
    pub previous_mode: Mode,
    /// Column under the cursor in the table view
    pub column: usize,
    /// Row under the cursor in the fields panel
    pub field_cursor: usize,
    pub status_message: String,
    collaborator: Arc<dyn Collaborator>,
    feedback: ClipboardFeedback<Box<dyn Clipboard>>,
    generation: JobState<Vec<ProfileRecord>>,
    export: JobState<ExportFile>,
    export_dir: PathBuf,
}

impl App {
    pub fn new(
        session: Session,
        collaborator: Arc<dyn Collaborator>,
        clipboard: Box<dyn Clipboard>,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            session,
            mode: Mode::Browse,
            previous_mode: Mode::Browse,
            column: 0,
            field_cursor: 0,
            status_message: "F2: generate profiles".to_string(),
            collaborator,
            feedback: ClipboardFeedback::new(clipboard),
            generation: JobState::Idle,
            export: JobState::Idle,
            export_dir,
        }
    }

    pub fn is_generating(&self) -> bool {
        self.generation.is_running()
    }

    pub fn is_exporting(&self) -> bool {
        self.export.is_running()
    }

    /// How long the pending collaborator call has been running
    pub fn pending_for(&self) -> Option<Duration> {
        self.generation.elapsed().or_else(|| self.export.elapsed())
    }

    /// Acknowledgment currently on screen
    pub fn toast(&self) -> Option<&str> {
        self.feedback.toast().message()
    }

    /// Advance timers and collect finished collaborator calls (call this in event loop)
    pub fn tick(&mut self) {
        self.feedback.toast_mut().tick(Instant::now());

        if let Some(result) = self.generation.poll() {
            match self.session.apply_generation(result) {
                Ok(received) => {
                    self.status_message = format!("{received} profiles generated");
                    self.column = 0;
                }
                Err(e) => {
                    self.feedback.notify(e.user_message());
                }
            }
        }

        if let Some(result) = self.export.poll() {
            match result.and_then(|file| self.save_export(file)) {
                Ok(path) => {
                    let message = format!("Saved {}", path.display());
                    info!("{message}");
                    self.status_message = message.clone();
                    self.feedback.notify(message);
                }
                Err(e) => {
                    self.feedback.notify(e.user_message());
                }
            }
        }
    }

    fn save_export(&self, file: ExportFile) -> crate::Result<PathBuf> {
        let path = self.export_dir.join(&file.file_name);
        std::fs::write(&path, &file.bytes).map_err(|e| Error::ExportFailed(e.to_string()))?;
        Ok(path)
    }

    /// Start a generation unless one is already in flight
    pub fn generate(&mut self) {
        if self.is_generating() {
            return;
        }
        let request = self.session.generate_request();
        let collaborator = Arc::clone(&self.collaborator);
        self.status_message = format!("Generating {} profiles...", request.count);
        self.generation = JobState::spawn(
            move || collaborator.generate(&request),
            Error::GenerationFailed,
        );
    }

    /// Export the displayed sequence unless an export is already in flight
    pub fn export(&mut self) {
        if self.is_exporting() {
            return;
        }
        let payload = match self.session.export_payload() {
            Ok(payload) => payload,
            Err(e) => {
                self.feedback.notify(e.user_message());
                return;
            }
        };
        let collaborator = Arc::clone(&self.collaborator);
        self.status_message = format!("Exporting {} profiles...", payload.len());
        self.export = JobState::spawn(
            move || collaborator.export_records(&payload),
            Error::ExportFailed,
        );
    }

    /// Copy from the selected record
    pub fn copy(&mut self, target: CopyTarget) {
        match self.session.copy_text(target) {
            Some((text, message)) => {
                self.feedback.copy_and_notify(&text, message);
            }
            None => {
                self.status_message = "Nothing to copy".to_string();
            }
        }
    }

    // Table column cursor

    pub fn columns(&self) -> Vec<Field> {
        TableView::columns(self.session.visibility())
    }

    pub fn column_next(&mut self) {
        let count = self.columns().len();
        if count > 0 {
            self.column = (self.column + 1).min(count - 1);
        }
    }

    pub fn column_prev(&mut self) {
        self.column = self.column.saturating_sub(1);
    }

    /// Click the header under the column cursor
    pub fn sort_by_cursor(&mut self) {
        let columns = self.columns();
        let Some(field) = columns.get(self.column.min(columns.len().saturating_sub(1))) else {
            return;
        };
        let spec = self.session.request_sort(*field);
        self.status_message = format!("Sorted by {} {}", field.header(), spec.direction.indicator());
    }

    /// Enter: sort in the table view, copy-all elsewhere
    pub fn activate(&mut self) {
        match self.session.view() {
            ViewKind::Table => self.sort_by_cursor(),
            ViewKind::Cards | ViewKind::Compact => self.copy(CopyTarget::All),
        }
    }

    pub fn cycle_view(&mut self) {
        let view = self.session.cycle_view();
        self.status_message = format!("View: {view}");
    }

    // Fields panel

    pub fn show_fields(&mut self) {
        self.mode = Mode::Fields;
    }

    pub fn hide_fields(&mut self) {
        self.mode = Mode::Browse;
        let count = self.columns().len();
        self.column = self.column.min(count.saturating_sub(1));
    }

    pub fn field_next(&mut self) {
        self.field_cursor = (self.field_cursor + 1).min(Field::TOGGLES.len() - 1);
    }

    pub fn field_prev(&mut self) {
        self.field_cursor = self.field_cursor.saturating_sub(1);
    }

    pub fn toggle_field_at_cursor(&mut self) {
        if let Some(field) = Field::TOGGLES.get(self.field_cursor) {
            self.session.toggle_field(*field);
        } else {
            warn!(cursor = self.field_cursor, "field cursor out of range");
        }
    }

    // Help

    pub fn show_help(&mut self) {
        if self.mode != Mode::Help {
            self.previous_mode = self.mode;
            self.mode = Mode::Help;
        }
    }

    pub fn hide_help(&mut self) {
        if self.mode == Mode::Help {
            self.mode = self.previous_mode;
        }
    }

    /// Delete word backward from query
    pub fn delete_word(&mut self) {
        let mut query = self.session.query().to_string();
        while query.ends_with(' ') {
            query.pop();
        }
        while !query.is_empty() && !query.ends_with(' ') {
            query.pop();
        }
        self.session.set_query(&query);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::MemoryClipboard;
    use crate::model::{FieldVisibility, Gender};
    use std::sync::Mutex;

    /// Collaborator answering from canned data
    struct Canned {
        records: Vec<ProfileRecord>,
        fail: bool,
        exported: Mutex<Vec<usize>>,
    }

    impl Collaborator for Canned {
        fn generate(&self, _request: &crate::client::GenerateRequest) -> crate::Result<Vec<ProfileRecord>> {
            if self.fail {
                Err(Error::GenerationFailed("HTTP 500".into()))
            } else {
                Ok(self.records.clone())
            }
        }

        fn export_records(&self, records: &[ProfileRecord]) -> crate::Result<ExportFile> {
            self.exported.lock().unwrap().push(records.len());
            Ok(ExportFile {
                bytes: b"xlsx".to_vec(),
                file_name: "out.xlsx".into(),
            })
        }
    }

    fn canned(fail: bool) -> Arc<Canned> {
        Arc::new(Canned {
            records: vec![
                ProfileRecord {
                    full_name: Some("Hila Dahan".into()),
                    gender: Some(Gender::Female),
                    age: Some(27),
                    ..Default::default()
                },
                ProfileRecord {
                    full_name: Some("Itay Golan".into()),
                    gender: Some(Gender::Male),
                    age: Some(61),
                    ..Default::default()
                },
            ],
            fail,
            exported: Mutex::new(Vec::new()),
        })
    }

    fn app_with(collaborator: Arc<Canned>, export_dir: PathBuf) -> App {
        App::new(
            Session::new(2, FieldVisibility::default(), ViewKind::Table),
            collaborator,
            Box::new(MemoryClipboard::default()),
            export_dir,
        )
    }

    fn wait_until(app: &mut App, done: impl Fn(&App) -> bool) {
        for _ in 0..200 {
            app.tick();
            if done(app) {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("job did not finish");
    }

    #[test]
    fn test_generation_replaces_raw_set() {
        let mut app = app_with(canned(false), std::env::temp_dir());
        app.generate();
        assert!(app.is_generating());
        wait_until(&mut app, |a| !a.is_generating());

        assert_eq!(app.session.raw().len(), 2);
        assert_eq!(app.status_message, "2 profiles generated");
    }

    #[test]
    fn test_failed_generation_shows_alert() {
        let mut app = app_with(canned(true), std::env::temp_dir());
        app.generate();
        wait_until(&mut app, |a| !a.is_generating());

        assert!(app.session.raw().is_empty());
        assert_eq!(app.toast(), Some("Error generating profiles. Please try again."));
    }

    #[test]
    fn test_export_sends_displayed_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let collaborator = canned(false);
        let mut app = app_with(Arc::clone(&collaborator), dir.path().to_path_buf());

        app.generate();
        wait_until(&mut app, |a| !a.is_generating());
        app.session.set_query("itay");
        app.export();
        wait_until(&mut app, |a| !a.is_exporting());

        assert_eq!(*collaborator.exported.lock().unwrap(), [1]);
        assert!(dir.path().join("out.xlsx").exists());
    }

    #[test]
    fn test_export_without_records_is_rejected() {
        let collaborator = canned(false);
        let mut app = app_with(Arc::clone(&collaborator), std::env::temp_dir());
        app.export();

        assert!(!app.is_exporting());
        assert!(collaborator.exported.lock().unwrap().is_empty());
        assert_eq!(app.toast(), Some("אין נתונים להורדה. אנא צור פרופילים קודם."));
    }

    #[test]
    fn test_sort_by_cursor_on_age_column() {
        let mut app = app_with(canned(false), std::env::temp_dir());
        app.generate();
        wait_until(&mut app, |a| !a.is_generating());

        // Columns: id, name, email, gender, age, city
        for _ in 0..4 {
            app.column_next();
        }
        app.sort_by_cursor();
        app.sort_by_cursor();

        let first = app.session.displayed()[0].full_name.clone();
        assert_eq!(first.as_deref(), Some("Itay Golan"));
    }

    #[test]
    fn test_copy_selected_name() {
        let mut app = app_with(canned(false), std::env::temp_dir());
        app.generate();
        wait_until(&mut app, |a| !a.is_generating());

        app.copy(CopyTarget::Field(Field::FullName));
        assert_eq!(app.toast(), Some("שם הועתק ללוח"));
    }

    #[test]
    fn test_delete_word() {
        let mut app = app_with(canned(false), std::env::temp_dir());
        app.session.set_query("noa levi");
        app.delete_word();
        assert_eq!(app.session.query(), "noa ");
    }
}
