// Library root: re-exports the app modules so integration tests can drive the
// full pipeline.

pub mod config;
pub mod output;
pub mod pipeline;
pub mod snapshot;
