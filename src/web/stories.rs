//! Best-stories handler.

use crate::models::Story;
use crate::state::AppState;
use crate::web::error::ApiError;
use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use tracing::debug;

/// Maximum number of stories a single request may ask for.
const MAX_COUNT: i64 = 200;

#[derive(Debug, Deserialize)]
pub struct BestStoriesParams {
    count: Option<i64>,
}

/// `GET /api/stories/best?count=N`
///
/// `count` must be an integer in 1..=200. The pipeline itself never fails;
/// fewer stories than requested is a normal response.
pub(super) async fn best_stories(
    State(state): State<AppState>,
    Query(params): Query<BestStoriesParams>,
) -> Result<Json<Vec<Story>>, ApiError> {
    let count = params
        .count
        .ok_or_else(|| ApiError::bad_request("missing required query parameter 'count'"))?;
    if !(1..=MAX_COUNT).contains(&count) {
        return Err(ApiError::bad_request(format!(
            "'count' must be between 1 and {MAX_COUNT}"
        )));
    }

    debug!(count, "best stories requested");
    Ok(Json(state.stories.best_stories(count as usize).await))
}
