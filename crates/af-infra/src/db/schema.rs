diesel::table! {
    t_application (id) {
        id -> Text,
        applicant_id -> Text,
        program_id -> Text,
        intake_id -> Nullable<Text>,
        is_short_course -> Bool,
        current_step -> Text,
        completed_steps -> Text,
        progress -> Integer,
        basics_complete -> Bool,
        personal_info_complete -> Bool,
        education_complete -> Bool,
        program_info_complete -> Bool,
        documents_complete -> Bool,
        declaration_complete -> Bool,
        status -> Text,
        created_at_ms -> BigInt,
        updated_at_ms -> BigInt,
    }
}
