use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use tower_cookies::Cookies;

use crate::catalog::resolve_episode;
use crate::errors::AppError;
use crate::moderation::may_delete_comment;
use crate::routes::current_user;
use crate::store::CatalogStore;
use crate::InnerState;

/// Deletes a comment when the acting user is its author or an admin.
///
/// A denied attempt is not an error on the wire: the response is the same
/// either way and only a warning is logged. The full hierarchy path is
/// resolved first, and the comment must belong to the resolved episode.
#[tracing::instrument(
    name = "Delete comment",
    skip(cookies, inner),
    fields(program = %slug, season = number, episode = %episode_slug, comment = %comment_id)
)]
pub async fn delete_comment(
    cookies: Cookies,
    State(inner): State<InnerState>,
    Path((slug, number, episode_slug, comment_id)): Path<(String, i32, String, String)>,
) -> Result<Json<Value>, AppError> {
    let InnerState { db, .. } = inner;

    let user = current_user(&cookies, &db).await?;

    let resolved = resolve_episode(&db, &slug, number, &episode_slug).await?;

    let comment = db
        .comment_by_id(&comment_id)
        .await
        .map_err(AppError::Database)?
        .filter(|c| Some(c.episode_id.as_str()) == resolved.episode.id.as_deref())
        .ok_or_else(|| AppError::not_found("comment", comment_id.clone()))?;

    let user_id = user.id.clone().unwrap_or_default();
    if may_delete_comment(&user_id, &user.roles(), &comment.author_id) {
        db.delete_comment(&comment_id)
            .await
            .map_err(AppError::Database)?;
    } else {
        tracing::warn!(
            actor = %user_id,
            comment = %comment_id,
            author = %comment.author_id,
            "comment deletion denied, answering as if nothing happened"
        );
    }

    Ok(Json(json!({ "data": "ok" })))
}
