use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{Actor, Program};
use crate::store::CatalogStore;
use crate::InnerState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorDetail {
    pub actor: Actor,
    pub programs: Vec<Program>,
}

pub async fn all_actors(State(inner): State<InnerState>) -> Result<Json<Vec<Actor>>, AppError> {
    let InnerState { db, .. } = inner;

    let actors = db.actors().await.map_err(AppError::Database)?;

    Ok(Json(actors))
}

pub async fn show_actor(
    State(inner): State<InnerState>,
    Path(id): Path<String>,
) -> Result<Json<ActorDetail>, AppError> {
    let InnerState { db, .. } = inner;

    let actor = db
        .actor_by_id(&id)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::not_found("actor", id.clone()))?;

    let actor_id = actor.id.clone().unwrap_or_default();
    let programs = db
        .programs_of_actor(&actor_id)
        .await
        .map_err(AppError::Database)?;

    Ok(Json(ActorDetail { actor, programs }))
}
