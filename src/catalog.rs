//! Resolution of the program → season → episode containment chain from the
//! public identifiers carried in URLs.

use crate::errors::AppError;
use crate::models::{Episode, Program, Season};
use crate::store::CatalogStore;

#[derive(Debug, Clone)]
pub struct ResolvedSeason {
    pub program: Program,
    pub season: Season,
}

#[derive(Debug, Clone)]
pub struct ResolvedEpisode {
    pub program: Program,
    pub season: Season,
    pub episode: Episode,
}

/// Resolves a season by program slug and season number.
///
/// The program is looked up first; the season lookup is scoped to that
/// program's id, so a season number that only exists under some other
/// program is reported as missing here.
pub async fn resolve_season<S: CatalogStore>(
    store: &S,
    program_slug: &str,
    number: i32,
) -> Result<ResolvedSeason, AppError> {
    let program = store
        .program_by_slug(program_slug)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::not_found("program", program_slug))?;

    let program_id = program.id.clone().unwrap_or_default();
    let season = store
        .season_by_number(&program_id, number)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| {
            AppError::not_found(
                "season",
                format!("season {} of program {}", number, program_slug),
            )
        })?;

    Ok(ResolvedSeason { program, season })
}

/// Resolves an episode by `(program slug, season number, episode slug)`.
///
/// Fails fast at the first missing link: the episode lookup never runs
/// before program and season are confirmed, so an identical episode slug
/// under another program cannot leak through.
pub async fn resolve_episode<S: CatalogStore>(
    store: &S,
    program_slug: &str,
    number: i32,
    episode_slug: &str,
) -> Result<ResolvedEpisode, AppError> {
    let ResolvedSeason { program, season } = resolve_season(store, program_slug, number).await?;

    let season_id = season.id.clone().unwrap_or_default();
    let episode = store
        .episode_by_slug(&season_id, episode_slug)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| {
            AppError::not_found(
                "episode",
                format!(
                    "{} in season {} of program {}",
                    episode_slug, number, program_slug
                ),
            )
        })?;

    Ok(ResolvedEpisode {
        program,
        season,
        episode,
    })
}
