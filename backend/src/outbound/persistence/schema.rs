//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Companies that post jobs, keyed by handle.
    companies (handle) {
        handle -> Varchar,
        name -> Text,
        num_employees -> Nullable<Int4>,
        description -> Text,
        logo_url -> Nullable<Text>,
    }
}

diesel::table! {
    /// Job postings. Rows are removed with their company.
    jobs (id) {
        id -> Int4,
        title -> Text,
        salary -> Nullable<Int4>,
        equity -> Nullable<Numeric>,
        company_handle -> Varchar,
    }
}

diesel::joinable!(jobs -> companies (company_handle));
diesel::allow_tables_to_appear_in_same_query!(companies, jobs);
