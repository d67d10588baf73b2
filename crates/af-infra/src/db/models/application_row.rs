use diesel::prelude::*;

use crate::db::schema::t_application;

/// One stored application record. Field order matches the table.
#[derive(Debug, Clone, Queryable)]
#[diesel(table_name = t_application)]
pub struct ApplicationRow {
    pub id: String,
    pub applicant_id: String,
    pub program_id: String,
    pub intake_id: Option<String>,
    pub is_short_course: bool,
    pub current_step: String,
    /// JSON array of step ids.
    pub completed_steps: String,
    pub progress: i32,
    pub basics_complete: bool,
    pub personal_info_complete: bool,
    pub education_complete: bool,
    pub program_info_complete: bool,
    pub documents_complete: bool,
    pub declaration_complete: bool,
    pub status: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = t_application)]
pub struct NewApplicationRow {
    pub id: String,
    pub applicant_id: String,
    pub program_id: String,
    pub intake_id: Option<String>,
    pub is_short_course: bool,
    pub current_step: String,
    pub completed_steps: String,
    pub progress: i32,
    pub basics_complete: bool,
    pub personal_info_complete: bool,
    pub education_complete: bool,
    pub program_info_complete: bool,
    pub documents_complete: bool,
    pub declaration_complete: bool,
    pub status: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}
