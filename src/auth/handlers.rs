use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::state::AppState;

use super::{
    dto::{LoginRequest, SignupRequest, TokenResponse, UserResponse},
    extractors::CurrentUser,
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo,
    repo_types::UserDoc,
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email"));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::BadRequest("Password too short"));
    }

    if repo::find_by_email(&state.db, &payload.email)
        .await
        .map_err(ApiError::store)?
        .is_some()
    {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::DuplicateEmail);
    }

    let hashed_password = hash_password(&payload.password)?;
    let user = UserDoc {
        id: None,
        email: payload.email.clone(),
        name: payload.name.clone(),
        hashed_password,
    };
    let id = repo::insert(&state.db, &user)
        .await
        .map_err(ApiError::store)?;

    info!(user_id = %id, email = %payload.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: id.to_hex(),
            email: payload.email,
            name: payload.name,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    // Unknown email and wrong password take the same exit so login
    // failures never reveal which half was wrong.
    let user = repo::find_by_email(&state.db, &payload.email)
        .await
        .map_err(ApiError::store)?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::InvalidCredentials
        })?;

    if !verify_password(&payload.password, &user.hashed_password) {
        warn!(email = %payload.email, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let user_id = user.id.ok_or_else(|| {
        anyhow::anyhow!("stored user record is missing its id")
    })?;
    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(user_id)?;

    info!(user_id = %user_id, email = %payload.email, "user logged in");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".into(),
    }))
}

#[instrument(skip(user))]
pub async fn get_me(user: CurrentUser) -> Json<UserResponse> {
    Json(UserResponse {
        id: user.id.to_hex(),
        email: user.email,
        name: user.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_emails() {
        assert!(is_valid_email("teacher@school.edu"));
        assert!(is_valid_email("a.b+c@x.co"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("two@@x.com"));
        assert!(!is_valid_email("spaces in@x.com"));
    }
}
