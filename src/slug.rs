//! Slug derivation for programs and episodes.
//!
//! `generate` is pure and deterministic; the `unique_*` guards consult the
//! store and append a counter suffix on collision. Program slugs share one
//! global namespace, episode slugs are scoped to their program.

use anyhow::Result;

use crate::store::CatalogStore;

pub fn generate(title: &str) -> String {
    slug::slugify(title)
}

/// First free slug for a new program, starting from the bare form of the
/// title and appending `-2`, `-3`, ... on collision.
pub async fn unique_program_slug<S: CatalogStore>(store: &S, title: &str) -> Result<String> {
    let base = generate(title);
    let mut candidate = base.clone();
    let mut n = 1u32;
    while store.program_slug_taken(&candidate).await? {
        n += 1;
        candidate = format!("{}-{}", base, n);
    }
    Ok(candidate)
}

/// Same scheme as [`unique_program_slug`], but the collision scope is the
/// set of episodes under `program_id` (episode slugs repeat freely across
/// programs).
pub async fn unique_episode_slug<S: CatalogStore>(
    store: &S,
    program_id: &str,
    title: &str,
) -> Result<String> {
    let base = generate(title);
    let mut candidate = base.clone();
    let mut n = 1u32;
    while store.episode_slug_taken(program_id, &candidate).await? {
        n += 1;
        candidate = format!("{}-{}", base, n);
    }
    Ok(candidate)
}
