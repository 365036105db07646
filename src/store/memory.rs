//! In-memory [`CatalogStore`] used by the test suite in place of Postgres.

use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{Actor, Category, Comment, Episode, Program, Season, User};
use crate::store::CatalogStore;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    actors: Vec<Actor>,
    programs: Vec<Program>,
    program_actor: Vec<(String, String)>,
    seasons: Vec<Season>,
    episodes: Vec<Episode>,
    comments: Vec<Comment>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn stamp<T, F>(entity: &T, with_id: F) -> T
where
    T: Clone,
    F: FnOnce(&mut T),
{
    let mut copy = entity.clone();
    with_id(&mut copy);
    copy
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn user_by_id(&self, id: &str) -> Result<Option<User>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|u| u.id.as_deref() == Some(id))
            .cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<User> {
        let row = stamp(user, |u| {
            u.id.get_or_insert_with(|| Uuid::new_v4().to_string());
            u.created_at.get_or_insert_with(|| Utc::now().naive_utc());
        });
        self.tables.write().unwrap().users.push(row.clone());
        Ok(row)
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        let mut categories = self.tables.read().unwrap().categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn category_by_id(&self, id: &str) -> Result<Option<Category>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .categories
            .iter()
            .find(|c| c.id.as_deref() == Some(id))
            .cloned())
    }

    async fn category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let tables = self.tables.read().unwrap();
        Ok(tables.categories.iter().find(|c| c.name == name).cloned())
    }

    async fn insert_category(&self, category: &Category) -> Result<Category> {
        let row = stamp(category, |c| {
            c.id.get_or_insert_with(|| Uuid::new_v4().to_string());
            c.created_at.get_or_insert_with(|| Utc::now().naive_utc());
        });
        self.tables.write().unwrap().categories.push(row.clone());
        Ok(row)
    }

    async fn actors(&self) -> Result<Vec<Actor>> {
        let mut actors = self.tables.read().unwrap().actors.clone();
        actors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(actors)
    }

    async fn actor_by_id(&self, id: &str) -> Result<Option<Actor>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .actors
            .iter()
            .find(|a| a.id.as_deref() == Some(id))
            .cloned())
    }

    async fn actors_of_program(&self, program_id: &str) -> Result<Vec<Actor>> {
        let tables = self.tables.read().unwrap();
        let mut actors: Vec<Actor> = tables
            .actors
            .iter()
            .filter(|a| {
                tables.program_actor.iter().any(|(p, act)| {
                    p == program_id && Some(act.as_str()) == a.id.as_deref()
                })
            })
            .cloned()
            .collect();
        actors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(actors)
    }

    async fn insert_actor(&self, actor: &Actor) -> Result<Actor> {
        let row = stamp(actor, |a| {
            a.id.get_or_insert_with(|| Uuid::new_v4().to_string());
            a.created_at.get_or_insert_with(|| Utc::now().naive_utc());
        });
        self.tables.write().unwrap().actors.push(row.clone());
        Ok(row)
    }

    async fn programs(&self) -> Result<Vec<Program>> {
        let mut programs = self.tables.read().unwrap().programs.clone();
        programs.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(programs)
    }

    async fn program_by_slug(&self, slug: &str) -> Result<Option<Program>> {
        let tables = self.tables.read().unwrap();
        Ok(tables.programs.iter().find(|p| p.slug == slug).cloned())
    }

    async fn program_slug_taken(&self, slug: &str) -> Result<bool> {
        let tables = self.tables.read().unwrap();
        Ok(tables.programs.iter().any(|p| p.slug == slug))
    }

    async fn latest_programs_in_category(
        &self,
        category_id: &str,
        limit: i64,
    ) -> Result<Vec<Program>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .programs
            .iter()
            .rev()
            .filter(|p| p.category_id == category_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn programs_of_actor(&self, actor_id: &str) -> Result<Vec<Program>> {
        let tables = self.tables.read().unwrap();
        let mut programs: Vec<Program> = tables
            .programs
            .iter()
            .filter(|p| {
                tables.program_actor.iter().any(|(prog, act)| {
                    act == actor_id && Some(prog.as_str()) == p.id.as_deref()
                })
            })
            .cloned()
            .collect();
        programs.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(programs)
    }

    async fn insert_program(&self, program: &Program, actor_ids: &[String]) -> Result<Program> {
        let row = stamp(program, |p| {
            p.id.get_or_insert_with(|| Uuid::new_v4().to_string());
            p.created_at.get_or_insert_with(|| Utc::now().naive_utc());
        });
        let program_id = row.id.clone().unwrap_or_default();
        let mut tables = self.tables.write().unwrap();
        tables.programs.push(row.clone());
        for actor_id in actor_ids {
            tables.program_actor.push((program_id.clone(), actor_id.clone()));
        }
        Ok(row)
    }

    async fn update_program(&self, program: &Program, actor_ids: &[String]) -> Result<Program> {
        let mut tables = self.tables.write().unwrap();
        let program_id = program.id.clone().unwrap_or_default();
        let existing = tables
            .programs
            .iter_mut()
            .find(|p| p.id.as_deref() == Some(program_id.as_str()))
            .ok_or_else(|| anyhow::anyhow!("no program with id {}", program_id))?;
        existing.title = program.title.clone();
        existing.synopsis = program.synopsis.clone();
        existing.country = program.country.clone();
        existing.year = program.year;
        existing.category_id = program.category_id.clone();
        existing.updated_at = Some(Utc::now().naive_utc());
        let updated = existing.clone();
        tables.program_actor.retain(|(p, _)| p != &program_id);
        for actor_id in actor_ids {
            tables.program_actor.push((program_id.clone(), actor_id.clone()));
        }
        Ok(updated)
    }

    async fn season_by_number(&self, program_id: &str, number: i32) -> Result<Option<Season>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .seasons
            .iter()
            .find(|s| s.program_id == program_id && s.number == number)
            .cloned())
    }

    async fn seasons_of_program(&self, program_id: &str) -> Result<Vec<Season>> {
        let tables = self.tables.read().unwrap();
        let mut seasons: Vec<Season> = tables
            .seasons
            .iter()
            .filter(|s| s.program_id == program_id)
            .cloned()
            .collect();
        seasons.sort_by_key(|s| s.number);
        Ok(seasons)
    }

    async fn insert_season(&self, season: &Season) -> Result<Season> {
        let row = stamp(season, |s| {
            s.id.get_or_insert_with(|| Uuid::new_v4().to_string());
            s.created_at.get_or_insert_with(|| Utc::now().naive_utc());
        });
        self.tables.write().unwrap().seasons.push(row.clone());
        Ok(row)
    }

    async fn episode_by_slug(&self, season_id: &str, slug: &str) -> Result<Option<Episode>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .episodes
            .iter()
            .find(|e| e.season_id == season_id && e.slug == slug)
            .cloned())
    }

    async fn episode_slug_taken(&self, program_id: &str, slug: &str) -> Result<bool> {
        let tables = self.tables.read().unwrap();
        Ok(tables.episodes.iter().any(|e| {
            e.slug == slug
                && tables
                    .seasons
                    .iter()
                    .any(|s| s.id.as_deref() == Some(e.season_id.as_str()) && s.program_id == program_id)
        }))
    }

    async fn episodes_of_season(&self, season_id: &str) -> Result<Vec<Episode>> {
        let tables = self.tables.read().unwrap();
        let mut episodes: Vec<Episode> = tables
            .episodes
            .iter()
            .filter(|e| e.season_id == season_id)
            .cloned()
            .collect();
        episodes.sort_by_key(|e| e.number);
        Ok(episodes)
    }

    async fn insert_episode(&self, episode: &Episode) -> Result<Episode> {
        let row = stamp(episode, |e| {
            e.id.get_or_insert_with(|| Uuid::new_v4().to_string());
            e.created_at.get_or_insert_with(|| Utc::now().naive_utc());
        });
        self.tables.write().unwrap().episodes.push(row.clone());
        Ok(row)
    }

    async fn comment_by_id(&self, id: &str) -> Result<Option<Comment>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .comments
            .iter()
            .find(|c| c.id.as_deref() == Some(id))
            .cloned())
    }

    async fn comments_of_episode(&self, episode_id: &str) -> Result<Vec<Comment>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.episode_id == episode_id)
            .cloned()
            .collect())
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<Comment> {
        let row = stamp(comment, |c| {
            c.id.get_or_insert_with(|| Uuid::new_v4().to_string());
            c.created_at.get_or_insert_with(|| Utc::now().naive_utc());
        });
        self.tables.write().unwrap().comments.push(row.clone());
        Ok(row)
    }

    async fn delete_comment(&self, id: &str) -> Result<()> {
        let mut tables = self.tables.write().unwrap();
        tables.comments.retain(|c| c.id.as_deref() != Some(id));
        Ok(())
    }
}
