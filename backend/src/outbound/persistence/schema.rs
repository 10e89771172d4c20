//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Provisioned user accounts.
    users (id) {
        id -> Uuid,
        /// Unique login name (max 64 characters).
        username -> Varchar,
        /// `sha256$<salt>$<digest>` credential.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Items owned by users. `id` is a `BIGSERIAL`, so values are never reused.
    items (id) {
        id -> Int8,
        owner_id -> Uuid,
        data -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(items -> users (owner_id));
diesel::allow_tables_to_appear_in_same_query!(items, users);
