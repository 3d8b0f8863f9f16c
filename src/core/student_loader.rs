use crate::core::dispatch::RequestDispatcher;
use crate::core::endpoints;
use crate::domain::model::{Student, StudentSubmissionGroup};
use crate::domain::ports::GradebookSink;
use crate::utils::error::{LoaderError, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;

#[derive(Debug, Clone)]
pub struct StudentLoaderOptions {
    pub course_id: u64,
    /// Students already present in the caller's gradebook; neither their
    /// records nor their submissions are fetched again.
    pub loaded_student_ids: Vec<u64>,
    pub students_chunk_size: usize,
    pub submissions_chunk_size: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StudentContentStats {
    pub students_loaded: usize,
    pub submission_groups_loaded: usize,
}

/// Loads student records and their submissions in chunks, delivering every
/// page to the sink as it arrives. `load` returning is the signal that all
/// submissions are in.
pub struct StudentContentLoader {
    dispatch: RequestDispatcher,
    options: StudentLoaderOptions,
}

impl StudentContentLoader {
    pub fn new(dispatch: RequestDispatcher, options: StudentLoaderOptions) -> Self {
        Self { dispatch, options }
    }

    pub async fn load(
        &self,
        user_ids: &[u64],
        sink: Arc<dyn GradebookSink>,
    ) -> Result<StudentContentStats> {
        let loaded: HashSet<u64> = self.options.loaded_student_ids.iter().copied().collect();
        let pending: Vec<u64> = user_ids
            .iter()
            .copied()
            .filter(|id| !loaded.contains(id))
            .collect();

        if pending.is_empty() {
            tracing::debug!("no new students to load");
            return Ok(StudentContentStats::default());
        }

        tracing::info!(
            "loading content for {} students ({} chunks of up to {})",
            pending.len(),
            pending.len().div_ceil(self.options.students_chunk_size.max(1)),
            self.options.students_chunk_size.max(1)
        );

        let mut tasks: JoinSet<Result<StudentContentStats>> = JoinSet::new();
        for chunk in pending.chunks(self.options.students_chunk_size.max(1)) {
            let dispatch = self.dispatch.clone();
            let sink = sink.clone();
            let chunk = chunk.to_vec();
            let course_id = self.options.course_id;
            let submissions_chunk_size = self.options.submissions_chunk_size.max(1);
            tasks.spawn(async move {
                load_chunk(dispatch, course_id, chunk, submissions_chunk_size, sink).await
            });
        }

        let mut stats = StudentContentStats::default();
        while let Some(joined) = tasks.join_next().await {
            let chunk_stats = joined.map_err(|e| LoaderError::ProcessingError {
                message: format!("student chunk task failed: {}", e),
            })??;
            stats.students_loaded += chunk_stats.students_loaded;
            stats.submission_groups_loaded += chunk_stats.submission_groups_loaded;
        }

        tracing::info!(
            "student content loaded: {} students, {} submission groups",
            stats.students_loaded,
            stats.submission_groups_loaded
        );
        Ok(stats)
    }
}

/// One chunk: fetch the student records, then the grouped submissions for the
/// same ids.
async fn load_chunk(
    dispatch: RequestDispatcher,
    course_id: u64,
    chunk: Vec<u64>,
    submissions_chunk_size: usize,
    sink: Arc<dyn GradebookSink>,
) -> Result<StudentContentStats> {
    let mut stats = StudentContentStats::default();

    let pages: Vec<Vec<Student>> = dispatch
        .get_pages(
            &endpoints::students_path(course_id),
            &endpoints::students_params(&chunk, chunk.len()),
        )
        .await?;
    for page in pages {
        stats.students_loaded += page.len();
        sink.students_page_loaded(page).await;
    }

    for sub_chunk in chunk.chunks(submissions_chunk_size) {
        let pages: Vec<Vec<StudentSubmissionGroup>> = dispatch
            .get_pages(
                &endpoints::submissions_path(course_id),
                &endpoints::submissions_params(sub_chunk, sub_chunk.len()),
            )
            .await?;
        for page in pages {
            stats.submission_groups_loaded += page.len();
            sink.submissions_page_loaded(page).await;
        }
    }

    Ok(stats)
}
