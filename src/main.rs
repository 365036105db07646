mod catalog;
mod db;
mod email;
mod errors;
mod fixtures;
mod models;
mod moderation;
mod routes;
mod slug;
mod store;

use crate::db::init_db;
use crate::email::EmailClient;

use crate::routes::{
    all_actors, all_categories, all_programs, create_category, create_comment, create_program,
    delete_comment, edit_program, health_check, login_user, logout_user, show_actor, show_category,
    show_episode, show_program, show_season,
};

use axum::routing::{delete, get, post};
use axum::Router;
use axum_prometheus::PrometheusMetricLayer;
use sqlx::PgPool;
use std::error::Error;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Clone)]
pub struct InnerState {
    pub db: PgPool,
    pub email_client: EmailClient,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_telecast=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let email_client = EmailClient::new(
        std::env::var("EMAIL_BASE_URL")?,
        std::env::var("EMAIL_SENDER")?,
        std::env::var("EMAIL_TOKEN")?,
    )?;

    let db = init_db().await?;

    let load_fixtures = std::env::var("LOAD_FIXTURES")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);
    if load_fixtures {
        fixtures::load_if_empty(&db).await?;
    }

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app_state = InnerState { db, email_client };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(|| async move { metric_handle.render() }))

        .route("/authorize", post(login_user))
        .route("/logout", post(logout_user))

        .route("/categories", get(all_categories))
        .route("/category", post(create_category))
        .route("/category/:name", get(show_category))

        .route("/programs", get(all_programs))
        .route("/program", post(create_program))
        .route("/program/:slug", get(show_program).put(edit_program))
        .route("/program/:slug/season/:number", get(show_season))
        .route(
            "/program/:slug/season/:number/episode/:episode_slug",
            get(show_episode).post(create_comment),
        )
        .route(
            "/program/:slug/season/:number/episode/:episode_slug/comment/:comment_id",
            delete(delete_comment),
        )

        .route("/actors", get(all_actors))
        .route("/actor/:id", get(show_actor))

        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(prometheus_layer)
        .layer(CookieManagerLayer::new())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3001")
        .await
        .expect("Could not initialize TcpListener");

    tracing::debug!(
        "listening on {}",
        listener
            .local_addr()
            .expect("Could not convert listener address to local address")
    );

    axum::serve(listener, app)
        .await
        .expect("Could not successfully connect");

    Ok(())
}
