use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;
use uuid::Uuid;

use crate::catalog::resolve_episode;
use crate::errors::AppError;
use crate::models::{Comment, Episode, Program, Season};
use crate::routes::current_user;
use crate::store::CatalogStore;
use crate::InnerState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeDetail {
    pub program: Program,
    pub season: Season,
    pub episode: Episode,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    pub body: String,
}

pub async fn show_episode(
    State(inner): State<InnerState>,
    Path((slug, number, episode_slug)): Path<(String, i32, String)>,
) -> Result<Json<EpisodeDetail>, AppError> {
    let InnerState { db, .. } = inner;

    let resolved = resolve_episode(&db, &slug, number, &episode_slug).await?;

    let episode_id = resolved.episode.id.clone().unwrap_or_default();
    let comments = db
        .comments_of_episode(&episode_id)
        .await
        .map_err(AppError::Database)?;

    Ok(Json(EpisodeDetail {
        program: resolved.program,
        season: resolved.season,
        episode: resolved.episode,
        comments,
    }))
}

#[tracing::instrument(
    name = "Create comment",
    skip(cookies, inner, payload),
    fields(program = %slug, season = number, episode = %episode_slug)
)]
pub async fn create_comment(
    cookies: Cookies,
    State(inner): State<InnerState>,
    Path((slug, number, episode_slug)): Path<(String, i32, String)>,
    Json(payload): Json<CommentPayload>,
) -> Result<Json<Comment>, AppError> {
    let InnerState { db, .. } = inner;

    let user = current_user(&cookies, &db).await?;

    let resolved = resolve_episode(&db, &slug, number, &episode_slug).await?;

    let body = payload.body.trim();
    if body.is_empty() {
        return Err(AppError::Validation(
            "comment body must not be empty".to_string(),
        ));
    }

    let comment = db
        .insert_comment(&Comment {
            id: Some(Uuid::new_v4().to_string()),
            created_at: None,
            updated_at: None,
            body: body.to_string(),
            author_id: user.id.clone().unwrap_or_default(),
            episode_id: resolved.episode.id.clone().unwrap_or_default(),
        })
        .await
        .map_err(AppError::Database)?;

    tracing::debug!(
        "comment id {:?} author {:?} episode {:?}",
        comment.id,
        comment.author_id,
        comment.episode_id
    );

    Ok(Json(comment))
}
