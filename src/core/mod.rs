pub mod data_loader;
pub mod dispatch;
pub mod endpoints;
pub mod prefetch;
pub mod student_loader;

pub use crate::domain::model::{
    Assignment, AssignmentGroup, ColumnDatum, ContextModule, CustomColumn, Enrollment, Student,
    StudentIdList, StudentSubmissionGroup, Submission,
};
pub use crate::domain::ports::{GradebookSink, Storage};
pub use crate::utils::error::Result;
