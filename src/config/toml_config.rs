use crate::core::data_loader::LoaderOptions;
use crate::core::endpoints;
use crate::utils::error::{LoaderError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// TOML file configuration, the CLI's alternative to flags.
///
/// ```toml
/// [api]
/// base_url = "https://lms.example.com"
/// course_id = 42
///
/// [fetch]
/// context_modules = false
///
/// [custom_columns]
/// data_url = "/api/v1/courses/42/custom_gradebook_columns/:id/data"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub api: ApiConfig,
    pub fetch: Option<FetchConfig>,
    pub custom_columns: Option<CustomColumnConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub course_id: u64,
    pub per_page: Option<usize>,
    pub submissions_chunk_size: Option<usize>,
    pub concurrent_requests: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub assignment_groups: Option<bool>,
    pub grading_period_assignments: Option<bool>,
    pub context_modules: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomColumnConfig {
    /// Overrides the default `:id` data-URL template.
    pub data_url: Option<String>,
    pub data_params: Option<HashMap<String, String>>,
    /// Explicit column ids; skips waiting on the columns fetch.
    pub column_ids: Option<Vec<u64>>,
    /// Set to false to skip the column-data stage entirely.
    pub load_data: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub filename: Option<String>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| LoaderError::ConfigError {
                message: format!("failed to parse {}: {}", path.as_ref().display(), e),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    pub fn concurrent_requests(&self) -> usize {
        self.api.concurrent_requests.unwrap_or(5)
    }

    pub fn output_path(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.path.as_deref())
            .unwrap_or("./output")
    }

    pub fn output_filename(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.filename.as_deref())
            .unwrap_or("gradebook.json")
    }

    pub fn loader_options(&self) -> LoaderOptions {
        let mut options = LoaderOptions::new(self.api.course_id);
        if let Some(per_page) = self.api.per_page {
            options.per_page = per_page;
        }
        if let Some(chunk) = self.api.submissions_chunk_size {
            options.submissions_chunk_size = chunk;
        }

        if let Some(fetch) = &self.fetch {
            options.fetch_assignment_groups = fetch.assignment_groups.unwrap_or(true);
            options.fetch_grading_period_assignments =
                fetch.grading_period_assignments.unwrap_or(true);
            options.fetch_context_modules = fetch.context_modules.unwrap_or(true);
        }

        if let Some(columns) = &self.custom_columns {
            if !columns.load_data.unwrap_or(true) {
                options.custom_column_data_path = None;
            } else if let Some(data_url) = &columns.data_url {
                options.custom_column_data_path = Some(data_url.clone());
            } else {
                options.custom_column_data_path =
                    Some(endpoints::default_column_data_template(self.api.course_id));
            }
            if let Some(params) = &columns.data_params {
                options.custom_column_data_params = params
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
            }
            options.custom_column_ids = columns.column_ids.clone();
        }

        options
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;
        validation::validate_positive_number("api.course_id", self.api.course_id as usize, 1)?;
        if let Some(per_page) = self.api.per_page {
            validation::validate_positive_number("api.per_page", per_page, 1)?;
        }
        if let Some(chunk) = self.api.submissions_chunk_size {
            validation::validate_positive_number("api.submissions_chunk_size", chunk, 1)?;
        }
        if let Some(concurrent) = self.api.concurrent_requests {
            validation::validate_positive_number("api.concurrent_requests", concurrent, 1)?;
        }
        if let Some(columns) = &self.custom_columns {
            if columns.load_data.unwrap_or(true) {
                if let Some(data_url) = &columns.data_url {
                    validation::validate_column_data_template("custom_columns.data_url", data_url)?;
                }
            }
        }
        Ok(())
    }
}
