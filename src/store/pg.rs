use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Actor, Category, Comment, Episode, Program, Season, User};
use crate::store::CatalogStore;

fn id_or_new(id: &Option<String>) -> String {
    id.clone().unwrap_or_else(|| Uuid::new_v4().to_string())
}

#[async_trait]
impl CatalogStore for PgPool {
    async fn user_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(self)
            .await?;
        Ok(user)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE email = $1"#)
            .bind(email)
            .fetch_optional(self)
            .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: &User) -> Result<User> {
        let row = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (id, email, encrypted_password, role, display_name) values($1, $2, $3, $4, $5) returning *"#,
        )
        .bind(id_or_new(&user.id))
        .bind(&user.email)
        .bind(&user.encrypted_password)
        .bind(&user.role)
        .bind(&user.display_name)
        .fetch_one(self)
        .await?;
        Ok(row)
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>(r#"SELECT * FROM categories ORDER BY name"#)
                .fetch_all(self)
                .await?;
        Ok(categories)
    }

    async fn category_by_id(&self, id: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(r#"SELECT * FROM categories WHERE id = $1"#)
            .bind(id)
            .fetch_optional(self)
            .await?;
        Ok(category)
    }

    async fn category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let category =
            sqlx::query_as::<_, Category>(r#"SELECT * FROM categories WHERE name = $1"#)
                .bind(name)
                .fetch_optional(self)
                .await?;
        Ok(category)
    }

    async fn insert_category(&self, category: &Category) -> Result<Category> {
        let row = sqlx::query_as::<_, Category>(
            r#"INSERT INTO categories (id, name) values($1, $2) returning *"#,
        )
        .bind(id_or_new(&category.id))
        .bind(&category.name)
        .fetch_one(self)
        .await?;
        Ok(row)
    }

    async fn actors(&self) -> Result<Vec<Actor>> {
        let actors = sqlx::query_as::<_, Actor>(r#"SELECT * FROM actors ORDER BY name"#)
            .fetch_all(self)
            .await?;
        Ok(actors)
    }

    async fn actor_by_id(&self, id: &str) -> Result<Option<Actor>> {
        let actor = sqlx::query_as::<_, Actor>(r#"SELECT * FROM actors WHERE id = $1"#)
            .bind(id)
            .fetch_optional(self)
            .await?;
        Ok(actor)
    }

    async fn actors_of_program(&self, program_id: &str) -> Result<Vec<Actor>> {
        let actors = sqlx::query_as::<_, Actor>(
            r#"SELECT a.* FROM actors a, program_actor pa WHERE pa.actor_id = a.id AND pa.program_id = $1 ORDER BY a.name"#,
        )
        .bind(program_id)
        .fetch_all(self)
        .await?;
        Ok(actors)
    }

    async fn insert_actor(&self, actor: &Actor) -> Result<Actor> {
        let row =
            sqlx::query_as::<_, Actor>(r#"INSERT INTO actors (id, name) values($1, $2) returning *"#)
                .bind(id_or_new(&actor.id))
                .bind(&actor.name)
                .fetch_one(self)
                .await?;
        Ok(row)
    }

    async fn programs(&self) -> Result<Vec<Program>> {
        let programs = sqlx::query_as::<_, Program>(r#"SELECT * FROM programs ORDER BY title"#)
            .fetch_all(self)
            .await?;
        Ok(programs)
    }

    async fn program_by_slug(&self, slug: &str) -> Result<Option<Program>> {
        let program = sqlx::query_as::<_, Program>(r#"SELECT * FROM programs WHERE slug = $1"#)
            .bind(slug)
            .fetch_optional(self)
            .await?;
        Ok(program)
    }

    async fn program_slug_taken(&self, slug: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM programs WHERE slug = $1"#)
            .bind(slug)
            .fetch_one(self)
            .await?;
        Ok(count > 0)
    }

    async fn latest_programs_in_category(
        &self,
        category_id: &str,
        limit: i64,
    ) -> Result<Vec<Program>> {
        let programs = sqlx::query_as::<_, Program>(
            r#"SELECT * FROM programs WHERE category_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2"#,
        )
        .bind(category_id)
        .bind(limit)
        .fetch_all(self)
        .await?;
        Ok(programs)
    }

    async fn programs_of_actor(&self, actor_id: &str) -> Result<Vec<Program>> {
        let programs = sqlx::query_as::<_, Program>(
            r#"SELECT p.* FROM programs p, program_actor pa WHERE pa.program_id = p.id AND pa.actor_id = $1 ORDER BY p.title"#,
        )
        .bind(actor_id)
        .fetch_all(self)
        .await?;
        Ok(programs)
    }

    async fn insert_program(&self, program: &Program, actor_ids: &[String]) -> Result<Program> {
        let mut tx = self.begin().await?;

        let row = sqlx::query_as::<_, Program>(
            r#"INSERT INTO programs (id, title, synopsis, country, year, slug, category_id, owner_id) values($1, $2, $3, $4, $5, $6, $7, $8) returning *"#,
        )
        .bind(id_or_new(&program.id))
        .bind(&program.title)
        .bind(&program.synopsis)
        .bind(&program.country)
        .bind(program.year)
        .bind(&program.slug)
        .bind(&program.category_id)
        .bind(&program.owner_id)
        .fetch_one(&mut *tx)
        .await?;

        let program_id = row.id.clone().unwrap_or_default();
        for actor_id in actor_ids {
            sqlx::query(r#"INSERT INTO program_actor (program_id, actor_id) values($1, $2)"#)
                .bind(&program_id)
                .bind(actor_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(row)
    }

    async fn update_program(&self, program: &Program, actor_ids: &[String]) -> Result<Program> {
        let mut tx = self.begin().await?;

        let row = sqlx::query_as::<_, Program>(
            r#"UPDATE programs SET title = $2, synopsis = $3, country = $4, year = $5, category_id = $6, updated_at = CURRENT_TIMESTAMP WHERE id = $1 returning *"#,
        )
        .bind(&program.id)
        .bind(&program.title)
        .bind(&program.synopsis)
        .bind(&program.country)
        .bind(program.year)
        .bind(&program.category_id)
        .fetch_one(&mut *tx)
        .await?;

        let program_id = row.id.clone().unwrap_or_default();
        sqlx::query(r#"DELETE FROM program_actor WHERE program_id = $1"#)
            .bind(&program_id)
            .execute(&mut *tx)
            .await?;
        for actor_id in actor_ids {
            sqlx::query(r#"INSERT INTO program_actor (program_id, actor_id) values($1, $2)"#)
                .bind(&program_id)
                .bind(actor_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(row)
    }

    async fn season_by_number(&self, program_id: &str, number: i32) -> Result<Option<Season>> {
        let season = sqlx::query_as::<_, Season>(
            r#"SELECT * FROM seasons WHERE program_id = $1 AND number = $2"#,
        )
        .bind(program_id)
        .bind(number)
        .fetch_optional(self)
        .await?;
        Ok(season)
    }

    async fn seasons_of_program(&self, program_id: &str) -> Result<Vec<Season>> {
        let seasons = sqlx::query_as::<_, Season>(
            r#"SELECT * FROM seasons WHERE program_id = $1 ORDER BY number"#,
        )
        .bind(program_id)
        .fetch_all(self)
        .await?;
        Ok(seasons)
    }

    async fn insert_season(&self, season: &Season) -> Result<Season> {
        let row = sqlx::query_as::<_, Season>(
            r#"INSERT INTO seasons (id, number, program_id) values($1, $2, $3) returning *"#,
        )
        .bind(id_or_new(&season.id))
        .bind(season.number)
        .bind(&season.program_id)
        .fetch_one(self)
        .await?;
        Ok(row)
    }

    async fn episode_by_slug(&self, season_id: &str, slug: &str) -> Result<Option<Episode>> {
        let episode = sqlx::query_as::<_, Episode>(
            r#"SELECT * FROM episodes WHERE season_id = $1 AND slug = $2"#,
        )
        .bind(season_id)
        .bind(slug)
        .fetch_optional(self)
        .await?;
        Ok(episode)
    }

    async fn episode_slug_taken(&self, program_id: &str, slug: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM episodes e, seasons s WHERE e.season_id = s.id AND s.program_id = $1 AND e.slug = $2"#,
        )
        .bind(program_id)
        .bind(slug)
        .fetch_one(self)
        .await?;
        Ok(count > 0)
    }

    async fn episodes_of_season(&self, season_id: &str) -> Result<Vec<Episode>> {
        let episodes = sqlx::query_as::<_, Episode>(
            r#"SELECT * FROM episodes WHERE season_id = $1 ORDER BY number"#,
        )
        .bind(season_id)
        .fetch_all(self)
        .await?;
        Ok(episodes)
    }

    async fn insert_episode(&self, episode: &Episode) -> Result<Episode> {
        let row = sqlx::query_as::<_, Episode>(
            r#"INSERT INTO episodes (id, number, title, slug, synopsis, season_id) values($1, $2, $3, $4, $5, $6) returning *"#,
        )
        .bind(id_or_new(&episode.id))
        .bind(episode.number)
        .bind(&episode.title)
        .bind(&episode.slug)
        .bind(&episode.synopsis)
        .bind(&episode.season_id)
        .fetch_one(self)
        .await?;
        Ok(row)
    }

    async fn comment_by_id(&self, id: &str) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(r#"SELECT * FROM comments WHERE id = $1"#)
            .bind(id)
            .fetch_optional(self)
            .await?;
        Ok(comment)
    }

    async fn comments_of_episode(&self, episode_id: &str) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"SELECT * FROM comments WHERE episode_id = $1 ORDER BY created_at"#,
        )
        .bind(episode_id)
        .fetch_all(self)
        .await?;
        Ok(comments)
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<Comment> {
        let row = sqlx::query_as::<_, Comment>(
            r#"INSERT INTO comments (id, body, author_id, episode_id) values($1, $2, $3, $4) returning *"#,
        )
        .bind(id_or_new(&comment.id))
        .bind(&comment.body)
        .bind(&comment.author_id)
        .bind(&comment.episode_id)
        .fetch_one(self)
        .await?;
        Ok(row)
    }

    async fn delete_comment(&self, id: &str) -> Result<()> {
        sqlx::query(r#"DELETE FROM comments WHERE id = $1"#)
            .bind(id)
            .execute(self)
            .await?;
        Ok(())
    }
}
