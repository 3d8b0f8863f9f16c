use crate::core::dispatch::RequestDispatcher;
use crate::core::endpoints;
use crate::core::prefetch::PrefetchStore;
use crate::core::student_loader::{StudentContentLoader, StudentLoaderOptions};
use crate::domain::model::{
    AssignmentGroup, ColumnDatum, ContextModule, CustomColumn, GradingPeriodAssignmentsResponse,
    StudentIdList,
};
use crate::domain::ports::GradebookSink;
use crate::utils::error::{LoaderError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tokio::task::JoinSet;

#[derive(Debug, Clone)]
pub struct LoaderOptions {
    pub course_id: u64,
    /// Chunk size for student fetches, also the page size requested from the
    /// API.
    pub per_page: usize,
    pub submissions_chunk_size: usize,
    pub loaded_student_ids: Vec<u64>,
    pub fetch_assignment_groups: bool,
    pub fetch_grading_period_assignments: bool,
    pub fetch_context_modules: bool,
    /// Column-data URL template carrying a `:id` placeholder. When absent the
    /// column-data stage is skipped entirely.
    pub custom_column_data_path: Option<String>,
    pub custom_column_data_params: Vec<(String, String)>,
    /// Explicit column ids to load data for. When set, the column-data stage
    /// does not wait on the custom-columns fetch.
    pub custom_column_ids: Option<Vec<u64>>,
}

impl LoaderOptions {
    pub fn new(course_id: u64) -> Self {
        Self {
            course_id,
            per_page: 50,
            submissions_chunk_size: 10,
            loaded_student_ids: Vec::new(),
            fetch_assignment_groups: true,
            fetch_grading_period_assignments: true,
            fetch_context_modules: true,
            custom_column_data_path: Some(endpoints::default_column_data_template(course_id)),
            custom_column_data_params: Vec::new(),
            custom_column_ids: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct LoadStats {
    pub students_loaded: usize,
    pub submission_groups_loaded: usize,
    pub column_rows_loaded: usize,
    pub duration: Duration,
}

/// Everything a gradebook needs that is not delivered page-wise through the
/// sink. Disabled optional fetches stay `None`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GradebookData {
    pub student_ids: Vec<u64>,
    pub assignment_groups: Option<Vec<AssignmentGroup>>,
    pub grading_period_assignments: Option<HashMap<String, Vec<u64>>>,
    pub context_modules: Option<Vec<ContextModule>>,
    pub custom_columns: Vec<CustomColumn>,
    pub stats: LoadStats,
}

/// Coordinates the gradebook fetch fan-out.
///
/// Independent fetches overlap freely; custom column data loads strictly
/// last, gated on both the submissions-complete signal and the column-id set.
pub struct DataLoader {
    dispatch: RequestDispatcher,
    prefetch: PrefetchStore,
}

impl DataLoader {
    pub fn new(dispatch: RequestDispatcher) -> Self {
        Self {
            dispatch,
            prefetch: PrefetchStore::new(),
        }
    }

    pub fn with_prefetch(dispatch: RequestDispatcher, prefetch: PrefetchStore) -> Self {
        Self { dispatch, prefetch }
    }

    pub fn dispatcher(&self) -> &RequestDispatcher {
        &self.dispatch
    }

    pub async fn load_gradebook_data(
        &self,
        options: &LoaderOptions,
        sink: Arc<dyn GradebookSink>,
    ) -> Result<GradebookData> {
        let started = Instant::now();
        let (columns_tx, columns_rx) = oneshot::channel::<Vec<u64>>();

        let groups_fut = async {
            if options.fetch_assignment_groups {
                Ok::<_, LoaderError>(Some(self.get_assignment_groups(options.course_id).await?))
            } else {
                Ok(None)
            }
        };

        let periods_fut = async {
            if options.fetch_grading_period_assignments {
                Ok::<_, LoaderError>(Some(
                    self.get_grading_period_assignments(options.course_id).await?,
                ))
            } else {
                Ok(None)
            }
        };

        let modules_fut = async {
            if options.fetch_context_modules {
                Ok::<_, LoaderError>(Some(self.get_context_modules(options.course_id).await?))
            } else {
                Ok(None)
            }
        };

        let columns_fut = async {
            let columns = self.get_custom_columns(options.course_id).await?;
            // Receiver is gone when explicit column ids were supplied.
            let _ = columns_tx.send(columns.iter().map(|c| c.id).collect());
            Ok::<_, LoaderError>(columns)
        };

        let students_fut = async {
            let student_ids = self.get_student_ids(options.course_id).await?;

            let loader = StudentContentLoader::new(
                self.dispatch.clone(),
                StudentLoaderOptions {
                    course_id: options.course_id,
                    loaded_student_ids: options.loaded_student_ids.clone(),
                    students_chunk_size: options.per_page,
                    submissions_chunk_size: options.submissions_chunk_size,
                },
            );
            let content = loader.load(&student_ids, sink.clone()).await?;

            // All submissions are in; column data may start once the column
            // ids are known as well.
            let mut column_rows = 0;
            if let Some(template) = &options.custom_column_data_path {
                let column_ids = match &options.custom_column_ids {
                    Some(ids) => ids.clone(),
                    None => columns_rx.await.map_err(|_| LoaderError::ProcessingError {
                        message: "custom columns fetch ended without a result".to_string(),
                    })?,
                };
                column_rows = self
                    .load_custom_column_data(
                        template,
                        &options.custom_column_data_params,
                        column_ids,
                        sink.clone(),
                    )
                    .await?;
            }

            Ok::<_, LoaderError>((student_ids, content, column_rows))
        };

        let (assignment_groups, grading_period_assignments, context_modules, custom_columns, chain) =
            tokio::try_join!(groups_fut, periods_fut, modules_fut, columns_fut, students_fut)?;
        let (student_ids, content, column_rows_loaded) = chain;

        let stats = LoadStats {
            students_loaded: content.students_loaded,
            submission_groups_loaded: content.submission_groups_loaded,
            column_rows_loaded,
            duration: started.elapsed(),
        };
        tracing::info!(
            "gradebook load complete in {:?}: {} students, {} submission groups, {} column rows",
            stats.duration,
            stats.students_loaded,
            stats.submission_groups_loaded,
            stats.column_rows_loaded
        );

        Ok(GradebookData {
            student_ids,
            assignment_groups,
            grading_period_assignments,
            context_modules,
            custom_columns,
            stats,
        })
    }

    /// Data for a single custom column, delivered page-wise. Also used on its
    /// own when a hidden column is revealed after the initial load.
    pub async fn get_data_for_column(
        &self,
        column_id: u64,
        template: &str,
        params: &[(String, String)],
        sink: &dyn GradebookSink,
    ) -> Result<usize> {
        let path = endpoints::column_data_path(template, column_id);
        let pages: Vec<Vec<ColumnDatum>> = self.dispatch.get_pages(&path, params).await?;
        let mut rows = 0;
        for page in pages {
            rows += page.len();
            sink.custom_column_datum_page_loaded(column_id, page).await;
        }
        Ok(rows)
    }

    async fn load_custom_column_data(
        &self,
        template: &str,
        params: &[(String, String)],
        column_ids: Vec<u64>,
        sink: Arc<dyn GradebookSink>,
    ) -> Result<usize> {
        let mut tasks: JoinSet<Result<usize>> = JoinSet::new();
        for column_id in column_ids {
            let dispatch = self.dispatch.clone();
            let path = endpoints::column_data_path(template, column_id);
            let params = params.to_vec();
            let sink = sink.clone();
            tasks.spawn(async move {
                let pages: Vec<Vec<ColumnDatum>> = dispatch.get_pages(&path, &params).await?;
                let mut rows = 0;
                for page in pages {
                    rows += page.len();
                    sink.custom_column_datum_page_loaded(column_id, page).await;
                }
                Ok(rows)
            });
        }

        let mut total = 0;
        while let Some(joined) = tasks.join_next().await {
            total += joined.map_err(|e| LoaderError::ProcessingError {
                message: format!("column data task failed: {}", e),
            })??;
        }
        Ok(total)
    }

    async fn get_student_ids(&self, course_id: u64) -> Result<Vec<u64>> {
        if let Some(list) = self.prefetch.take_user_ids() {
            tracing::debug!("using {} prefetched student ids", list.user_ids.len());
            return Ok(list.user_ids);
        }
        let list: StudentIdList = self
            .dispatch
            .get_json(&endpoints::user_ids_path(course_id), &[])
            .await?;
        Ok(list.user_ids)
    }

    async fn get_grading_period_assignments(
        &self,
        course_id: u64,
    ) -> Result<HashMap<String, Vec<u64>>> {
        let response: GradingPeriodAssignmentsResponse = self
            .dispatch
            .get_json(&endpoints::grading_period_assignments_path(course_id), &[])
            .await?;
        Ok(response.grading_period_assignments)
    }

    async fn get_assignment_groups(&self, course_id: u64) -> Result<Vec<AssignmentGroup>> {
        self.dispatch
            .get_depaginated(
                &endpoints::assignment_groups_path(course_id),
                &endpoints::assignment_groups_params(),
            )
            .await
    }

    async fn get_context_modules(&self, course_id: u64) -> Result<Vec<ContextModule>> {
        self.dispatch
            .get_depaginated(&endpoints::context_modules_path(course_id), &[])
            .await
    }

    async fn get_custom_columns(&self, course_id: u64) -> Result<Vec<CustomColumn>> {
        self.dispatch
            .get_depaginated(
                &endpoints::custom_columns_path(course_id),
                &endpoints::custom_columns_params(),
            )
            .await
    }
}
