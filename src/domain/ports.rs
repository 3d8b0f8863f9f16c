use crate::domain::model::{ColumnDatum, Student, StudentSubmissionGroup};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Receives page-level payloads as they arrive off the wire. Whole-result
/// payloads (assignment groups, modules, custom columns) are returned by the
/// loader instead.
#[async_trait]
pub trait GradebookSink: Send + Sync {
    async fn students_page_loaded(&self, students: Vec<Student>);
    async fn submissions_page_loaded(&self, groups: Vec<StudentSubmissionGroup>);
    async fn custom_column_datum_page_loaded(&self, column_id: u64, data: Vec<ColumnDatum>);
}
