//! URL paths and canonical query parameter sets for the gradebook endpoints.
//!
//! Array parameters use the Rails convention (`key[]=a&key[]=b`).

pub fn user_ids_path(course_id: u64) -> String {
    format!("/courses/{}/gradebook/user_ids", course_id)
}

pub fn grading_period_assignments_path(course_id: u64) -> String {
    format!("/courses/{}/gradebook/grading_period_assignments", course_id)
}

pub fn assignment_groups_path(course_id: u64) -> String {
    format!("/api/v1/courses/{}/assignment_groups", course_id)
}

/// Fixed parameter set for the assignment-groups fetch: heavyweight response
/// fields are excluded and per-assignment metadata the gradebook needs is
/// included.
pub fn assignment_groups_params() -> Vec<(String, String)> {
    let mut params = Vec::new();
    push_values(
        &mut params,
        "exclude_assignment_submission_types[]",
        &["wiki_page"],
    );
    push_values(
        &mut params,
        "exclude_response_fields[]",
        &[
            "description",
            "in_closed_grading_period",
            "needs_grading_count",
        ],
    );
    push_values(
        &mut params,
        "include[]",
        &[
            "assignment_group_id",
            "assignment_visibility",
            "assignments",
            "grades_published",
            "module_ids",
            "post_manually",
        ],
    );
    params.push(("override_assignment_dates".to_string(), "false".to_string()));
    params
}

pub fn context_modules_path(course_id: u64) -> String {
    format!("/api/v1/courses/{}/modules", course_id)
}

pub fn custom_columns_path(course_id: u64) -> String {
    format!("/api/v1/courses/{}/custom_gradebook_columns", course_id)
}

/// Hidden columns (e.g. teacher notes) are part of the gradebook data set.
pub fn custom_columns_params() -> Vec<(String, String)> {
    vec![("include_hidden".to_string(), "true".to_string())]
}

pub fn default_column_data_template(course_id: u64) -> String {
    format!(
        "/api/v1/courses/{}/custom_gradebook_columns/:id/data",
        course_id
    )
}

/// Substitutes the first `:id` placeholder in a column-data URL template.
pub fn column_data_path(template: &str, column_id: u64) -> String {
    template.replacen(":id", &column_id.to_string(), 1)
}

pub fn students_path(course_id: u64) -> String {
    format!("/api/v1/courses/{}/users", course_id)
}

pub fn students_params(user_ids: &[u64], per_page: usize) -> Vec<(String, String)> {
    let mut params = Vec::new();
    push_ids(&mut params, "user_ids[]", user_ids);
    push_values(&mut params, "enrollment_type[]", &["student", "student_view"]);
    push_values(&mut params, "include[]", &["enrollments", "group_ids"]);
    params.push(("per_page".to_string(), per_page.to_string()));
    params
}

pub fn submissions_path(course_id: u64) -> String {
    format!("/api/v1/courses/{}/students/submissions", course_id)
}

pub fn submissions_params(student_ids: &[u64], per_page: usize) -> Vec<(String, String)> {
    let mut params = Vec::new();
    push_ids(&mut params, "student_ids[]", student_ids);
    push_values(
        &mut params,
        "response_fields[]",
        &[
            "id",
            "user_id",
            "assignment_id",
            "score",
            "grade",
            "submitted_at",
            "posted_at",
            "workflow_state",
            "excused",
            "late",
            "missing",
        ],
    );
    params.push(("grouped".to_string(), "1".to_string()));
    params.push(("per_page".to_string(), per_page.to_string()));
    params
}

fn push_ids(params: &mut Vec<(String, String)>, key: &str, ids: &[u64]) {
    for id in ids {
        params.push((key.to_string(), id.to_string()));
    }
}

fn push_values(params: &mut Vec<(String, String)>, key: &str, values: &[&str]) {
    for value in values {
        params.push((key.to_string(), value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradebook_paths_embed_course_id() {
        assert_eq!(user_ids_path(42), "/courses/42/gradebook/user_ids");
        assert_eq!(
            grading_period_assignments_path(42),
            "/courses/42/gradebook/grading_period_assignments"
        );
        assert_eq!(context_modules_path(42), "/api/v1/courses/42/modules");
    }

    #[test]
    fn assignment_groups_params_exclude_wiki_pages() {
        let params = assignment_groups_params();
        assert!(params.contains(&(
            "exclude_assignment_submission_types[]".to_string(),
            "wiki_page".to_string()
        )));
        assert!(params.contains(&(
            "override_assignment_dates".to_string(),
            "false".to_string()
        )));
        assert!(params.contains(&("include[]".to_string(), "assignments".to_string())));
    }

    #[test]
    fn column_data_path_substitutes_first_id_placeholder() {
        let template = "/api/v1/courses/5/custom_gradebook_columns/:id/data";
        assert_eq!(
            column_data_path(template, 17),
            "/api/v1/courses/5/custom_gradebook_columns/17/data"
        );
    }

    #[test]
    fn column_data_path_leaves_template_without_placeholder_untouched() {
        assert_eq!(column_data_path("/columns/data", 17), "/columns/data");
    }

    #[test]
    fn students_params_repeat_user_ids() {
        let params = students_params(&[1, 2, 3], 50);
        let ids: Vec<_> = params
            .iter()
            .filter(|(k, _)| k == "user_ids[]")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert!(params.contains(&("per_page".to_string(), "50".to_string())));
    }

    #[test]
    fn submissions_params_are_grouped_per_student() {
        let params = submissions_params(&[4, 5], 10);
        assert!(params.contains(&("grouped".to_string(), "1".to_string())));
        assert!(params.contains(&("student_ids[]".to_string(), "4".to_string())));
        assert!(params.contains(&("response_fields[]".to_string(), "score".to_string())));
    }
}
