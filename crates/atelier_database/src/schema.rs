//! Diesel table definitions for the generation store.

diesel::table! {
    /// Generation records: one row per generation request.
    generations (id) {
        /// Unique identity
        id -> Uuid,
        /// Owning user
        user_id -> Uuid,
        /// Original prompt text
        prompt -> Text,
        /// Target framework identifier
        framework -> Text,
        /// Lifecycle status identifier
        status -> Text,
        /// Chosen provider identifier
        provider -> Nullable<Text>,
        /// Chosen model identifier
        model -> Nullable<Text>,
        /// Resulting code, set on completion
        code -> Nullable<Text>,
        /// Aggregate quality score, set on completion
        quality_score -> Nullable<Float4>,
        /// Error message, set on failure
        error_message -> Nullable<Text>,
        /// Parent generation for refinement chains
        parent_generation_id -> Nullable<Uuid>,
        /// Creation timestamp
        created_at -> Timestamptz,
        /// Completion timestamp, set when terminal
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Usage accounting events, one per completed generation.
    usage_events (id) {
        /// Unique identity
        id -> Uuid,
        /// User the event is attributed to
        user_id -> Uuid,
        /// Event kind (currently always "generation")
        kind -> Text,
        /// Event timestamp
        created_at -> Timestamptz,
    }
}
