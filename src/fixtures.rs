//! Sample catalog data.
//!
//! Seeding is a chain of dependent steps; entities created by one step are
//! handed to the next through an explicit [`References`] map of symbolic
//! names, so no step relies on ambient state. `load_if_empty` makes startup
//! seeding idempotent: an already-populated catalog is left alone.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use uuid::Uuid;

use crate::models::{Actor, Category, Comment, Episode, Program, Season, User};
use crate::moderation::ROLE_ADMIN;
use crate::routes::hash_password;
use crate::slug::{generate, unique_episode_slug};
use crate::store::CatalogStore;

pub const CATEGORIES: [&str; 5] = ["Action", "Aventure", "Animation", "Fantastique", "Horreur"];

pub const ACTORS: [&str; 4] = [
    "Andrew Lincoln",
    "Norman Reedus",
    "Lauren Cohan",
    "Danai Gurira",
];

pub const PROGRAMS: [&str; 5] = [
    "Stranger Things",
    "La Casa de Papel",
    "Maid",
    "The Witcher",
    "Qui a tué Sara ?",
];

pub const SEASONS_PER_PROGRAM: i32 = 2;
pub const EPISODES_PER_SEASON: i32 = 5;

/// Symbolic name → id mapping threaded through the seed steps.
#[derive(Debug, Default)]
pub struct References {
    map: HashMap<String, String>,
}

impl References {
    pub fn add(&mut self, name: impl Into<String>, id: String) {
        self.map.insert(name.into(), id);
    }

    pub fn get(&self, name: &str) -> Result<&str> {
        self.map
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| anyhow!("no seeded reference named {}", name))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn new_id() -> Option<String> {
    Some(Uuid::new_v4().to_string())
}

async fn seed_users<S: CatalogStore>(store: &S, refs: &mut References) -> Result<()> {
    let admin = store
        .insert_user(&User {
            id: new_id(),
            created_at: None,
            updated_at: None,
            email: "admin@example.com".to_string(),
            encrypted_password: hash_password("admin_password"),
            role: ROLE_ADMIN.to_string(),
            display_name: Some("Admin".to_string()),
        })
        .await?;
    refs.add("user_admin", admin.id.unwrap_or_default());

    let contributor = store
        .insert_user(&User {
            id: new_id(),
            created_at: None,
            updated_at: None,
            email: "contributor@example.com".to_string(),
            encrypted_password: hash_password("contributor_password"),
            role: "ROLE_CONTRIBUTOR".to_string(),
            display_name: Some("Contributor".to_string()),
        })
        .await?;
    refs.add("user_contributor", contributor.id.unwrap_or_default());

    Ok(())
}

async fn seed_categories<S: CatalogStore>(store: &S, refs: &mut References) -> Result<()> {
    for (key, name) in CATEGORIES.iter().enumerate() {
        let category = store
            .insert_category(&Category {
                id: new_id(),
                created_at: None,
                updated_at: None,
                name: (*name).to_string(),
            })
            .await?;
        refs.add(format!("category_{}", key), category.id.unwrap_or_default());
    }
    Ok(())
}

async fn seed_actors<S: CatalogStore>(store: &S, refs: &mut References) -> Result<()> {
    for (key, name) in ACTORS.iter().enumerate() {
        let actor = store
            .insert_actor(&Actor {
                id: new_id(),
                created_at: None,
                updated_at: None,
                name: (*name).to_string(),
            })
            .await?;
        refs.add(format!("actor_{}", key), actor.id.unwrap_or_default());
    }
    Ok(())
}

async fn seed_programs<S: CatalogStore>(store: &S, refs: &mut References) -> Result<()> {
    let owner_id = refs.get("user_contributor")?.to_string();
    let category_id = refs.get("category_3")?.to_string();

    let actor_ids: Vec<String> = (0..ACTORS.len())
        .map(|i| refs.get(&format!("actor_{}", i)).map(str::to_string))
        .collect::<Result<_>>()?;

    for (key, title) in PROGRAMS.iter().enumerate() {
        let program = store
            .insert_program(
                &Program {
                    id: new_id(),
                    created_at: None,
                    updated_at: None,
                    title: (*title).to_string(),
                    synopsis: format!("{} synopsis", title),
                    country: format!("{} Country", title),
                    year: 2010,
                    slug: generate(title),
                    category_id: category_id.clone(),
                    owner_id: Some(owner_id.clone()),
                },
                &actor_ids,
            )
            .await?;
        refs.add(format!("program_{}", key), program.id.unwrap_or_default());
    }
    Ok(())
}

async fn seed_seasons<S: CatalogStore>(store: &S, refs: &mut References) -> Result<()> {
    for key in 0..PROGRAMS.len() {
        let program_id = refs.get(&format!("program_{}", key))?.to_string();
        for number in 1..=SEASONS_PER_PROGRAM {
            let season = store
                .insert_season(&Season {
                    id: new_id(),
                    created_at: None,
                    updated_at: None,
                    number,
                    program_id: program_id.clone(),
                })
                .await?;
            refs.add(
                format!("season_{}_{}", key, number),
                season.id.unwrap_or_default(),
            );
        }
    }
    Ok(())
}

async fn seed_episodes<S: CatalogStore>(store: &S, refs: &mut References) -> Result<()> {
    for key in 0..PROGRAMS.len() {
        let program_id = refs.get(&format!("program_{}", key))?.to_string();
        for season_number in 1..=SEASONS_PER_PROGRAM {
            let season_id = refs
                .get(&format!("season_{}_{}", key, season_number))?
                .to_string();
            for number in 1..=EPISODES_PER_SEASON {
                let title = if number == 1 {
                    "Pilot".to_string()
                } else {
                    "Un super episode".to_string()
                };
                let slug = unique_episode_slug(store, &program_id, &title).await?;
                let episode = store
                    .insert_episode(&Episode {
                        id: new_id(),
                        created_at: None,
                        updated_at: None,
                        number,
                        title,
                        slug,
                        synopsis: format!("Episode {}", number),
                        season_id: season_id.clone(),
                    })
                    .await?;
                refs.add(
                    format!("episode_{}_{}_{}", key, season_number, number),
                    episode.id.unwrap_or_default(),
                );
            }
        }
    }
    Ok(())
}

async fn seed_comments<S: CatalogStore>(store: &S, refs: &mut References) -> Result<()> {
    let episode_id = refs.get("episode_0_1_1")?.to_string();
    for (key, (author_ref, body)) in [
        ("user_admin", "Quel pilote !"),
        ("user_contributor", "Vivement la suite."),
    ]
    .into_iter()
    .enumerate()
    {
        let author_id = refs.get(author_ref)?.to_string();
        let comment = store
            .insert_comment(&Comment {
                id: new_id(),
                created_at: None,
                updated_at: None,
                body: body.to_string(),
                author_id,
                episode_id: episode_id.clone(),
            })
            .await?;
        refs.add(format!("comment_{}", key), comment.id.unwrap_or_default());
    }
    Ok(())
}

pub async fn load_all<S: CatalogStore>(store: &S) -> Result<References> {
    let mut refs = References::default();
    seed_users(store, &mut refs).await?;
    seed_categories(store, &mut refs).await?;
    seed_actors(store, &mut refs).await?;
    seed_programs(store, &mut refs).await?;
    seed_seasons(store, &mut refs).await?;
    seed_episodes(store, &mut refs).await?;
    seed_comments(store, &mut refs).await?;
    Ok(refs)
}

/// Startup entry point: seeds only a pristine catalog.
pub async fn load_if_empty<S: CatalogStore>(store: &S) -> Result<Option<References>> {
    if !store.categories().await?.is_empty() {
        tracing::info!("catalog already seeded, skipping fixtures");
        return Ok(None);
    }

    let refs = load_all(store).await?;
    tracing::info!(references = refs.len(), "fixtures loaded");
    Ok(Some(refs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::resolve_episode;
    use crate::moderation::may_delete_comment;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn seeds_the_whole_catalog() {
        let store = MemoryStore::new();
        let refs = load_all(&store).await.unwrap();
        assert!(!refs.is_empty());

        assert_eq!(store.categories().await.unwrap().len(), CATEGORIES.len());
        assert_eq!(store.actors().await.unwrap().len(), ACTORS.len());
        assert_eq!(store.programs().await.unwrap().len(), PROGRAMS.len());

        let sara = store
            .program_by_slug("qui-a-tue-sara")
            .await
            .unwrap()
            .expect("accented title must transliterate");
        assert_eq!(sara.title, "Qui a tué Sara ?");
    }

    #[tokio::test]
    async fn resolver_agrees_with_direct_id_lookup() {
        let store = MemoryStore::new();
        let refs = load_all(&store).await.unwrap();

        let resolved = resolve_episode(&store, "stranger-things", 1, "pilot")
            .await
            .unwrap();

        assert_eq!(
            resolved.program.id.as_deref(),
            Some(refs.get("program_0").unwrap())
        );
        assert_eq!(
            resolved.season.id.as_deref(),
            Some(refs.get("season_0_1").unwrap())
        );
        assert_eq!(
            resolved.episode.id.as_deref(),
            Some(refs.get("episode_0_1_1").unwrap())
        );
    }

    #[tokio::test]
    async fn duplicate_episode_titles_get_scoped_suffixes() {
        let store = MemoryStore::new();
        let refs = load_all(&store).await.unwrap();

        // Season 2's opener collides with season 1's "Pilot" inside the same
        // program and gets a suffix; the same title stays bare elsewhere.
        let season_two = resolve_episode(&store, "stranger-things", 2, "pilot-2")
            .await
            .unwrap();
        assert_eq!(
            season_two.episode.id.as_deref(),
            Some(refs.get("episode_0_2_1").unwrap())
        );

        let other_program = resolve_episode(&store, "the-witcher", 1, "pilot")
            .await
            .unwrap();
        assert_eq!(
            other_program.episode.id.as_deref(),
            Some(refs.get("episode_3_1_1").unwrap())
        );
    }

    #[tokio::test]
    async fn seeded_comments_obey_the_moderation_rule() {
        let store = MemoryStore::new();
        let refs = load_all(&store).await.unwrap();

        let admin = store
            .user_by_id(refs.get("user_admin").unwrap())
            .await
            .unwrap()
            .unwrap();
        let contributor = store
            .user_by_id(refs.get("user_contributor").unwrap())
            .await
            .unwrap()
            .unwrap();
        let admins_comment = store
            .comment_by_id(refs.get("comment_0").unwrap())
            .await
            .unwrap()
            .unwrap();

        let contributor_id = contributor.id.clone().unwrap();
        let admin_id = admin.id.clone().unwrap();

        assert!(!may_delete_comment(
            &contributor_id,
            &contributor.roles(),
            &admins_comment.author_id
        ));
        assert!(may_delete_comment(
            &admin_id,
            &admin.roles(),
            &admins_comment.author_id
        ));
    }

    #[tokio::test]
    async fn load_if_empty_is_idempotent() {
        let store = MemoryStore::new();
        assert!(load_if_empty(&store).await.unwrap().is_some());
        assert!(load_if_empty(&store).await.unwrap().is_none());
        assert_eq!(store.programs().await.unwrap().len(), PROGRAMS.len());
    }
}
