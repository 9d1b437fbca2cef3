pub mod export;
pub mod markdown;
pub mod note_store;
pub mod query;
pub mod stats;
