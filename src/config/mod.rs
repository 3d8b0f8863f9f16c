pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::data_loader::LoaderOptions;
#[cfg(feature = "cli")]
use crate::core::endpoints;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "gradebook-loader")]
#[command(about = "Loads a course's gradebook data set from a paginated REST API")]
pub struct CliConfig {
    #[arg(long)]
    pub base_url: String,

    #[arg(long)]
    pub course_id: u64,

    #[arg(long, default_value_t = 50)]
    pub per_page: usize,

    #[arg(long, default_value_t = 10)]
    pub submissions_chunk_size: usize,

    #[arg(long, default_value_t = 5)]
    pub concurrent_requests: usize,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Do not fetch assignment groups")]
    pub skip_assignment_groups: bool,

    #[arg(long, help = "Do not fetch grading-period assignments")]
    pub skip_grading_period_assignments: bool,

    #[arg(long, help = "Do not fetch context modules")]
    pub skip_context_modules: bool,

    #[arg(long, help = "Do not fetch custom column data")]
    pub skip_custom_column_data: bool,

    #[arg(long, value_delimiter = ',', help = "Load data for these column ids only")]
    pub custom_column_ids: Vec<u64>,

    #[arg(long, help = "Read configuration from a TOML file instead")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn loader_options(&self) -> LoaderOptions {
        let mut options = LoaderOptions::new(self.course_id);
        options.per_page = self.per_page;
        options.submissions_chunk_size = self.submissions_chunk_size;
        options.fetch_assignment_groups = !self.skip_assignment_groups;
        options.fetch_grading_period_assignments = !self.skip_grading_period_assignments;
        options.fetch_context_modules = !self.skip_context_modules;
        if self.skip_custom_column_data {
            options.custom_column_data_path = None;
        } else {
            options.custom_column_data_path =
                Some(endpoints::default_column_data_template(self.course_id));
        }
        if !self.custom_column_ids.is_empty() {
            options.custom_column_ids = Some(self.custom_column_ids.clone());
        }
        options
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_positive_number("course_id", self.course_id as usize, 1)?;
        validation::validate_positive_number("per_page", self.per_page, 1)?;
        validation::validate_positive_number(
            "submissions_chunk_size",
            self.submissions_chunk_size,
            1,
        )?;
        validation::validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
        validation::validate_non_empty_string("output_path", &self.output_path)?;
        Ok(())
    }
}
