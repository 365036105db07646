//! Persistence surface for the catalog.
//!
//! Everything that touches stored entities goes through [`CatalogStore`]:
//! the HTTP handlers, the hierarchy resolver, the slug uniqueness guard and
//! the fixture loader. The production implementation lives in [`pg`] on top
//! of `sqlx::PgPool`; tests run against the in-memory implementation.

mod pg;

#[cfg(test)]
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Actor, Category, Comment, Episode, Program, Season, User};

#[async_trait]
pub trait CatalogStore: Send + Sync {
    // users
    async fn user_by_id(&self, id: &str) -> Result<Option<User>>;
    async fn user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn insert_user(&self, user: &User) -> Result<User>;

    // categories
    async fn categories(&self) -> Result<Vec<Category>>;
    async fn category_by_id(&self, id: &str) -> Result<Option<Category>>;
    async fn category_by_name(&self, name: &str) -> Result<Option<Category>>;
    async fn insert_category(&self, category: &Category) -> Result<Category>;

    // actors
    async fn actors(&self) -> Result<Vec<Actor>>;
    async fn actor_by_id(&self, id: &str) -> Result<Option<Actor>>;
    async fn actors_of_program(&self, program_id: &str) -> Result<Vec<Actor>>;
    async fn insert_actor(&self, actor: &Actor) -> Result<Actor>;

    // programs
    async fn programs(&self) -> Result<Vec<Program>>;
    async fn program_by_slug(&self, slug: &str) -> Result<Option<Program>>;
    async fn program_slug_taken(&self, slug: &str) -> Result<bool>;
    async fn latest_programs_in_category(
        &self,
        category_id: &str,
        limit: i64,
    ) -> Result<Vec<Program>>;
    async fn programs_of_actor(&self, actor_id: &str) -> Result<Vec<Program>>;
    /// Persists the program and its actor link set in one unit of work.
    async fn insert_program(&self, program: &Program, actor_ids: &[String]) -> Result<Program>;
    /// Updates the program row and replaces its actor link set in one unit
    /// of work. The slug column is left untouched.
    async fn update_program(&self, program: &Program, actor_ids: &[String]) -> Result<Program>;

    // seasons
    async fn season_by_number(&self, program_id: &str, number: i32) -> Result<Option<Season>>;
    async fn seasons_of_program(&self, program_id: &str) -> Result<Vec<Season>>;
    async fn insert_season(&self, season: &Season) -> Result<Season>;

    // episodes
    async fn episode_by_slug(&self, season_id: &str, slug: &str) -> Result<Option<Episode>>;
    async fn episode_slug_taken(&self, program_id: &str, slug: &str) -> Result<bool>;
    async fn episodes_of_season(&self, season_id: &str) -> Result<Vec<Episode>>;
    async fn insert_episode(&self, episode: &Episode) -> Result<Episode>;

    // comments
    async fn comment_by_id(&self, id: &str) -> Result<Option<Comment>>;
    async fn comments_of_episode(&self, episode_id: &str) -> Result<Vec<Comment>>;
    async fn insert_comment(&self, comment: &Comment) -> Result<Comment>;
    async fn delete_comment(&self, id: &str) -> Result<()>;
}
