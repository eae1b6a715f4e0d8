use obra_types::{ApiEnvelope, User};
use serde::{Deserialize, Serialize};

use super::client::{self, ServiceError};

#[derive(Clone, Debug, Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RegisterPayload {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
struct TokenData {
    token: String,
}

/// Logs in and returns the session token for local bookkeeping. The
/// response also sets the cookie the other services ride on.
pub async fn login(payload: &LoginPayload) -> Result<String, ServiceError> {
    let envelope: ApiEnvelope<TokenData> =
        client::post_envelope("/api/v1/auth/login", payload).await?;
    Ok(envelope.data.ok_or(ServiceError::NoData)?.token)
}

pub async fn register(payload: &RegisterPayload) -> Result<User, ServiceError> {
    let envelope: ApiEnvelope<User> =
        client::post_envelope("/api/v1/auth/register", payload).await?;
    envelope.data.ok_or(ServiceError::NoData)
}

/// Asks the server to clear the session cookie. Local state is dropped
/// by the caller whatever the outcome, so failures are ignored.
pub async fn logout() {
    let _ = reqwest::Client::new()
        .get(client::endpoint("/api/v1/auth/logout"))
        .send()
        .await;
}
