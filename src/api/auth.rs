use axum::{body::Bytes, extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use super::{non_blank, parse_body, AppState};
use crate::error::{HubError, Result};
use crate::storage::{new_account, next_user_id};
use crate::types::UserProfile;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    email: Option<String>,
    password: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    message: &'static str,
    access_token: String,
    user: UserProfile,
}

fn required(creds: Credentials) -> Result<(String, String, Option<String>)> {
    match (non_blank(creds.email), creds.password.filter(|p| !p.is_empty())) {
        (Some(email), Some(password)) => Ok((email, password, non_blank(creds.name))),
        _ => Err(HubError::Validation("Email and password are required".into())),
    }
}

pub async fn register(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Json<AuthResponse>> {
    let (email, password, name) = required(parse_body(&body)?)?;

    if state.users.find_by_email(&email).await?.is_some() {
        warn!("Registration for existing account {}", email);
        return Err(HubError::Conflict("User already exists".into()));
    }

    let name = name.unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());
    let user = new_account(
        next_user_id(state.users.as_ref()).await?,
        &name,
        &email,
        state.hasher.hash(&password)?,
    );
    let profile = user.profile();
    state.users.insert(user).await?;

    info!("Registered {} as {}", email, profile.id);
    Ok(Json(AuthResponse {
        message: "User created successfully",
        access_token: state.tokens.issue(&email)?,
        user: profile,
    }))
}

pub async fn login(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Json<AuthResponse>> {
    let (email, password, _) = required(parse_body(&body)?)?;

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| HubError::NotFound("User not found".into()))?;

    if !state.hasher.verify(&password, &user.password_hash) {
        warn!("Failed login for {}", email);
        return Err(HubError::Unauthorized("Incorrect password".into()));
    }

    Ok(Json(AuthResponse {
        message: "Login successful",
        access_token: state.tokens.issue(&email)?,
        user: user.profile(),
    }))
}
