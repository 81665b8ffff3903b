use futures::future::join_all;
use tracing::{debug, warn};

use cinedeck_core::error::ApiError;
use cinedeck_core::types::MovieRecord;

use crate::provider::MovieApi;

/// Look up every id concurrently and collect the settled results.
///
/// Results are in input order regardless of completion order. A failing id
/// never cancels the others.
pub async fn lookup_many<S: AsRef<str> + Sync>(
    api: &dyn MovieApi,
    ids: &[S],
) -> Vec<Result<MovieRecord, ApiError>> {
    let results = join_all(ids.iter().map(|id| api.lookup_by_id(id.as_ref()))).await;

    for (id, res) in ids.iter().zip(&results) {
        match res {
            Ok(_) => {}
            Err(e) if e.is_not_found() => debug!(id = id.as_ref(), "lookup: not found"),
            Err(e) => warn!(id = id.as_ref(), error = %e, "lookup failed"),
        }
    }

    results
}

/// Keep the successful records, in order.
pub fn successes(results: Vec<Result<MovieRecord, ApiError>>) -> Vec<MovieRecord> {
    results.into_iter().filter_map(Result::ok).collect()
}
