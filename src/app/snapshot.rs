use crate::domain::model::{ColumnDatum, Student, StudentSubmissionGroup, Submission};
use crate::domain::ports::GradebookSink;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;

/// Accumulated page-level content: students, submissions keyed by student,
/// custom column data keyed by column.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GradebookSnapshot {
    pub students: Vec<Student>,
    pub submissions: HashMap<u64, Vec<Submission>>,
    pub column_data: HashMap<u64, Vec<ColumnDatum>>,
}

/// Sink that collects every delivered page into an in-memory snapshot. Used
/// by the CLI to persist the load result and by tests to observe deliveries.
#[derive(Debug, Default)]
pub struct SnapshotSink {
    inner: Mutex<GradebookSnapshot>,
}

impl SnapshotSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> GradebookSnapshot {
        self.inner
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl GradebookSink for SnapshotSink {
    async fn students_page_loaded(&self, students: Vec<Student>) {
        if let Ok(mut snapshot) = self.inner.lock() {
            snapshot.students.extend(students);
        }
    }

    async fn submissions_page_loaded(&self, groups: Vec<StudentSubmissionGroup>) {
        if let Ok(mut snapshot) = self.inner.lock() {
            for group in groups {
                snapshot
                    .submissions
                    .entry(group.user_id)
                    .or_default()
                    .extend(group.submissions);
            }
        }
    }

    async fn custom_column_datum_page_loaded(&self, column_id: u64, data: Vec<ColumnDatum>) {
        if let Ok(mut snapshot) = self.inner.lock() {
            snapshot.column_data.entry(column_id).or_default().extend(data);
        }
    }
}
