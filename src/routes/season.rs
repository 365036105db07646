use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::catalog::resolve_season;
use crate::errors::AppError;
use crate::models::{Episode, Program, Season};
use crate::store::CatalogStore;
use crate::InnerState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonDetail {
    pub program: Program,
    pub season: Season,
    pub episodes: Vec<Episode>,
}

pub async fn show_season(
    State(inner): State<InnerState>,
    Path((slug, number)): Path<(String, i32)>,
) -> Result<Json<SeasonDetail>, AppError> {
    let InnerState { db, .. } = inner;

    let resolved = resolve_season(&db, &slug, number).await?;

    let season_id = resolved.season.id.clone().unwrap_or_default();
    let episodes = db
        .episodes_of_season(&season_id)
        .await
        .map_err(AppError::Database)?;

    Ok(Json(SeasonDetail {
        program: resolved.program,
        season: resolved.season,
        episodes,
    }))
}
