//! Diesel schema for the settings table.

diesel::table! {
    /// Global preference rows; exactly one is kept.
    settings (id) {
        /// Serial row identifier.
        id -> Int4,
        /// Dark theme flag; rows written by older clients may hold NULL.
        dark_mode -> Nullable<Bool>,
    }
}
