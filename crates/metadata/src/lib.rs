pub mod batch;
pub mod omdb;
pub mod provider;

pub use batch::{lookup_many, successes};
pub use cinedeck_core::error::ApiError;
pub use omdb::OmdbClient;
pub use provider::MovieApi;
