use axum::extract::State;
use axum::Json;
use chrono::{Duration, Utc};
use cookie::time::{Duration as CookieDuration, OffsetDateTime};
use cookie::SameSite;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha3::Digest;
use tower_cookies::{Cookie, Cookies};

use crate::errors::AppError;
use crate::models::User;
use crate::store::CatalogStore;
use crate::InnerState;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub user_id: String,
    pub role: String,
    pub exp: usize,
}

#[derive(Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

pub fn hash_password(password: &str) -> String {
    let digest = sha3::Sha3_256::digest(password.as_bytes());
    format!("{:x}", digest)
}

pub async fn login_user(
    cookies: Cookies,
    State(inner): State<InnerState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<Value>, AppError> {
    let InnerState { db, .. } = inner;

    let user = db
        .user_by_email(&form.email)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::Authentication(anyhow::anyhow!("Invalid credentials supplied")))?;

    if hash_password(&form.password) != user.encrypted_password {
        return Err(AppError::Authentication(anyhow::anyhow!(
            "Invalid credentials supplied"
        )));
    }

    let user_id = user.id.clone().unwrap_or_default();
    let token = generate_token(&user.email, &user_id, &user.role)?;

    let mut now = OffsetDateTime::now_utc();
    now += CookieDuration::days(60);

    let domain = std::env::var("TELECAST_HOST").map_err(|e| {
        AppError::Unexpected(anyhow::anyhow!(e).context("TELECAST_HOST env var not set"))
    })?;
    let mut cookie = Cookie::new("auth-token", token);

    cookie.set_domain(domain);
    cookie.set_same_site(SameSite::None);
    cookie.set_secure(true);
    cookie.set_path("/");
    cookie.set_expires(now);
    cookies.add(cookie);

    Ok(Json(json!({ "data": "login completed" })))
}

pub async fn logout_user(cookies: Cookies) -> Result<Json<Value>, AppError> {
    let mut cookie = Cookie::from("auth-token");
    cookie.set_same_site(SameSite::None);
    cookie.make_removal();

    cookies.remove(cookie);
    Ok(Json(json!({ "data": "logout completed" })))
}

fn generate_token(email: &str, user_id: &str, role: &str) -> Result<String, AppError> {
    let key = std::env::var("SECRET_TOKEN").map_err(|e| {
        AppError::Unexpected(anyhow::anyhow!(e).context("SECRET_TOKEN env var not set"))
    })?;

    let expiration = Utc::now() + Duration::days(60);
    let claims = Claims {
        sub: email.to_owned(),
        user_id: user_id.to_owned(),
        role: role.to_owned(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(key.as_ref()),
    )
    .map_err(|e| AppError::Unexpected(anyhow::anyhow!(e).context("Failed to encode token")))
}

pub fn decode_token(token: &str) -> Result<Claims, AppError> {
    let secret = std::env::var("SECRET_TOKEN").map_err(|e| {
        AppError::Unexpected(anyhow::anyhow!(e).context("SECRET_TOKEN env var not set"))
    })?;
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| AppError::Authentication(anyhow::anyhow!(e).context("Failed to decode token")))?;

    Ok(token_data.claims)
}

/// The identity behind the `auth-token` cookie, loaded fresh from the store
/// so role changes take effect without re-login.
pub async fn current_user<S: CatalogStore>(cookies: &Cookies, store: &S) -> Result<User, AppError> {
    let auth_token = cookies
        .get("auth-token")
        .map(|c| c.value().to_string())
        .unwrap_or_default();

    if auth_token.is_empty() {
        return Err(AppError::Authentication(anyhow::anyhow!("Missing token")));
    }

    let claims = decode_token(&auth_token)?;

    store
        .user_by_id(&claims.user_id)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::Authentication(anyhow::anyhow!("Unknown user")))
}
