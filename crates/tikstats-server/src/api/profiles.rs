use axum::{
    extract::{Path, State},
    Extension, Json,
};
use tikstats_core::ProfileSnapshot;

use crate::middleware::RequestId;

use super::{map_scraper_error, ApiError, AppState};

/// `GET /{username}`: fetches the profile page and returns its snapshot.
pub(super) async fn get_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(username): Path<String>,
) -> Result<Json<ProfileSnapshot>, ApiError> {
    let snapshot = tikstats_scraper::scrape_profile(&state.client, &username)
        .await
        .map_err(|e| map_scraper_error(req_id.0.clone(), &username, &e))?;

    tracing::info!(
        request_id = %req_id.0,
        username = %username,
        followers = snapshot.followers,
        views = snapshot.views,
        videos = snapshot.videos.len(),
        "profile snapshot built"
    );

    Ok(Json(snapshot))
}
