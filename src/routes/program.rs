use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Actor, Program, Season};
use crate::routes::current_user;
use crate::slug::unique_program_slug;
use crate::store::CatalogStore;
use crate::InnerState;

const NEW_PROGRAM_TEMPLATE_ID: i32 = 35795628;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramPayload {
    pub title: String,
    pub synopsis: String,
    pub country: String,
    pub year: i32,
    pub category_id: String,
    #[serde(default)]
    pub actor_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramDetail {
    pub program: Program,
    pub actors: Vec<Actor>,
    pub seasons: Vec<Season>,
}

impl ProgramPayload {
    fn validate(&self) -> Result<(), AppError> {
        let mut errors: HashMap<String, Vec<String>> = HashMap::new();

        if self.title.trim().is_empty() {
            errors
                .entry("title".to_string())
                .or_default()
                .push("must not be empty".to_string());
        }
        if self.synopsis.trim().is_empty() {
            errors
                .entry("synopsis".to_string())
                .or_default()
                .push("must not be empty".to_string());
        }
        if self.country.trim().is_empty() {
            errors
                .entry("country".to_string())
                .or_default()
                .push("must not be empty".to_string());
        }
        if !(1900..=2100).contains(&self.year) {
            errors
                .entry("year".to_string())
                .or_default()
                .push("must be between 1900 and 2100".to_string());
        }
        if self.category_id.trim().is_empty() {
            errors
                .entry("categoryId".to_string())
                .or_default()
                .push("must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationErrors(errors))
        }
    }
}

/// Confirms the referenced category and actors exist before anything is
/// written.
async fn check_references<S: CatalogStore>(
    store: &S,
    payload: &ProgramPayload,
) -> Result<(), AppError> {
    store
        .category_by_id(&payload.category_id)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::not_found("category", payload.category_id.clone()))?;

    for actor_id in &payload.actor_ids {
        store
            .actor_by_id(actor_id)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::not_found("actor", actor_id.clone()))?;
    }

    Ok(())
}

pub async fn all_programs(State(inner): State<InnerState>) -> Result<Json<Vec<Program>>, AppError> {
    let InnerState { db, .. } = inner;

    let programs = db.programs().await.map_err(AppError::Database)?;

    Ok(Json(programs))
}

#[tracing::instrument(name = "Create program", skip(cookies, inner, payload), fields(title = %payload.title))]
pub async fn create_program(
    cookies: Cookies,
    State(inner): State<InnerState>,
    Json(payload): Json<ProgramPayload>,
) -> Result<Json<Program>, AppError> {
    let InnerState { db, email_client } = inner;

    let user = current_user(&cookies, &db).await?;

    payload.validate()?;
    check_references(&db, &payload).await?;

    // The slug is minted here, once. Later edits keep it as is.
    let slug = unique_program_slug(&db, &payload.title)
        .await
        .map_err(AppError::Database)?;

    let program = db
        .insert_program(
            &Program {
                id: Some(Uuid::new_v4().to_string()),
                created_at: None,
                updated_at: None,
                title: payload.title.trim().to_string(),
                synopsis: payload.synopsis.trim().to_string(),
                country: payload.country.trim().to_string(),
                year: payload.year,
                slug,
                category_id: payload.category_id.clone(),
                owner_id: user.id.clone(),
            },
            &payload.actor_ids,
        )
        .await
        .map_err(AppError::Database)?;

    tracing::debug!(
        "program id {:?} program slug {} owner {:?}",
        program.id,
        program.slug,
        program.owner_id
    );

    send_new_program_email(&email_client, &program).await?;

    Ok(Json(program))
}

#[tracing::instrument(name = "Notify about a newly published program", skip(email_client, program))]
async fn send_new_program_email(
    email_client: &crate::email::EmailClient,
    program: &Program,
) -> Result<(), AppError> {
    let recipient = std::env::var("NEW_PROGRAM_NOTIFY_EMAIL")
        .unwrap_or_else(|_| "admin@telecast.dev".to_owned());

    let mut template_model = HashMap::new();
    template_model.insert("program_title".to_owned(), program.title.clone());
    template_model.insert("program_slug".to_owned(), program.slug.clone());
    template_model.insert(
        "program_url".to_owned(),
        format!("https://telecast.dev/program/{}", program.slug),
    );

    email_client
        .send_email(&recipient, template_model, NEW_PROGRAM_TEMPLATE_ID)
        .await?;

    Ok(())
}

pub async fn show_program(
    State(inner): State<InnerState>,
    Path(slug): Path<String>,
) -> Result<Json<ProgramDetail>, AppError> {
    let InnerState { db, .. } = inner;

    let program = db
        .program_by_slug(&slug)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::not_found("program", slug.clone()))?;

    let program_id = program.id.clone().unwrap_or_default();
    let actors = db
        .actors_of_program(&program_id)
        .await
        .map_err(AppError::Database)?;
    let seasons = db
        .seasons_of_program(&program_id)
        .await
        .map_err(AppError::Database)?;

    Ok(Json(ProgramDetail {
        program,
        actors,
        seasons,
    }))
}

#[tracing::instrument(name = "Edit program", skip(cookies, inner, payload), fields(slug = %slug))]
pub async fn edit_program(
    cookies: Cookies,
    State(inner): State<InnerState>,
    Path(slug): Path<String>,
    Json(payload): Json<ProgramPayload>,
) -> Result<Json<Program>, AppError> {
    let InnerState { db, .. } = inner;

    let user = current_user(&cookies, &db).await?;

    let program = db
        .program_by_slug(&slug)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::not_found("program", slug.clone()))?;

    if program.owner_id != user.id {
        return Err(AppError::AccessDenied {
            action: format!("edit program {}", slug),
        });
    }

    payload.validate()?;
    check_references(&db, &payload).await?;

    let updated = db
        .update_program(
            &Program {
                title: payload.title.trim().to_string(),
                synopsis: payload.synopsis.trim().to_string(),
                country: payload.country.trim().to_string(),
                year: payload.year,
                category_id: payload.category_id.clone(),
                ..program
            },
            &payload.actor_ids,
        )
        .await
        .map_err(AppError::Database)?;

    Ok(Json(updated))
}
