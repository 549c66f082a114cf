//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Serial task identifier.
        id -> Int4,
        /// Task text.
        text -> Text,
        /// Completion flag; rows written by older clients may hold NULL.
        completed -> Nullable<Bool>,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Free-form priority label.
        priority -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
