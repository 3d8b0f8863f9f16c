use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response of the gradebook user-ids endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentIdList {
    pub user_ids: Vec<u64>,
}

/// Grading-period id mapped to the assignment ids visible in that period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingPeriodAssignmentsResponse {
    #[serde(default)]
    pub grading_period_assignments: HashMap<String, Vec<u64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub sortable_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: u64,
    pub user_id: u64,
    #[serde(default)]
    pub course_section_id: Option<u64>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub workflow_state: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentGroup {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub group_weight: Option<f64>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub points_possible: Option<f64>,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submission_types: Vec<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub module_ids: Vec<u64>,
    #[serde(default)]
    pub anonymize_students: bool,
    #[serde(default)]
    pub post_manually: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextModule {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub position: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomColumn {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub teacher_notes: bool,
    #[serde(default)]
    pub read_only: bool,
}

/// One cell of a custom column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDatum {
    pub user_id: u64,
    pub content: String,
}

/// The `grouped=1` submissions shape: one entry per student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentSubmissionGroup {
    pub user_id: u64,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: u64,
    pub user_id: u64,
    pub assignment_id: u64,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub workflow_state: Option<String>,
    #[serde(default)]
    pub excused: Option<bool>,
    #[serde(default)]
    pub late: bool,
    #[serde(default)]
    pub missing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_tolerates_missing_optional_fields() {
        let student: Student = serde_json::from_str(r#"{"id": 7, "name": "A. Student"}"#).unwrap();
        assert_eq!(student.id, 7);
        assert!(student.enrollments.is_empty());
        assert!(student.sortable_name.is_none());
    }

    #[test]
    fn enrollment_type_maps_to_kind() {
        let json = r#"{"id": 1, "user_id": 7, "type": "StudentEnrollment"}"#;
        let enrollment: Enrollment = serde_json::from_str(json).unwrap();
        assert_eq!(enrollment.kind.as_deref(), Some("StudentEnrollment"));
    }

    #[test]
    fn submission_group_defaults_to_empty_submissions() {
        let group: StudentSubmissionGroup = serde_json::from_str(r#"{"user_id": 3}"#).unwrap();
        assert!(group.submissions.is_empty());
    }

    #[test]
    fn submission_parses_timestamps() {
        let json = r#"{
            "id": 10, "user_id": 3, "assignment_id": 5,
            "score": 8.5, "grade": "B",
            "submitted_at": "2024-03-01T12:00:00Z",
            "workflow_state": "graded", "late": true
        }"#;
        let submission: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.score, Some(8.5));
        assert!(submission.submitted_at.is_some());
        assert!(submission.late);
        assert!(!submission.missing);
    }
}
