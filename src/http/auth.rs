use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::{AuthGateway, Credentials, GatewayReply, RegisterProfile};
use crate::error::{Error, Result};
use crate::state::AppState;

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<Response> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err(Error::validation("email and password are required"));
    }
    let reply = gateway(&state)?.login(&credentials).await?;
    relay(reply)
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(profile): Json<RegisterProfile>,
) -> Result<Response> {
    if profile.name.trim().is_empty()
        || profile.email.trim().is_empty()
        || profile.password.is_empty()
    {
        return Err(Error::validation("name, email and password are required"));
    }
    if profile.password != profile.confirm_password {
        return Err(Error::validation("passwords do not match"));
    }
    let reply = gateway(&state)?.register(&profile).await?;
    relay(reply)
}

fn gateway(state: &AppState) -> Result<&dyn AuthGateway> {
    state
        .auth
        .as_deref()
        .ok_or_else(|| Error::Gateway("auth gateway is not configured".to_string()))
}

fn relay(reply: GatewayReply) -> Result<Response> {
    let status = StatusCode::from_u16(reply.status)
        .map_err(|_| Error::Gateway(format!("invalid status {} from gateway", reply.status)))?;
    Ok((status, Json(reply.body)).into_response())
}
