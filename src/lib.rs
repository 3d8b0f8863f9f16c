pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::snapshot::{GradebookSnapshot, SnapshotSink};
pub use crate::config::cli::LocalStorage;
pub use crate::config::toml_config::FileConfig;
pub use crate::core::data_loader::{DataLoader, GradebookData, LoadStats, LoaderOptions};
pub use crate::core::dispatch::RequestDispatcher;
pub use crate::core::prefetch::PrefetchStore;
pub use crate::core::student_loader::{
    StudentContentLoader, StudentContentStats, StudentLoaderOptions,
};
pub use crate::domain::ports::{GradebookSink, Storage};
pub use crate::utils::error::{LoaderError, Result};
