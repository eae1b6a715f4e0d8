use obra_types::ApiEnvelope;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Origin the services talk to. Empty means same origin, the normal
/// deployment where the console serves both the pages and the API. The
/// browser then attaches the session cookie on its own.
const BASE_URL: &str = match option_env!("OBRA_API_BASE") {
    Some(base) => base,
    None => "",
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("response carried no data")]
    NoData,
}

pub fn endpoint(path: &str) -> String {
    format!("{BASE_URL}{path}")
}

// reqwest's Client is not Send on wasm, so there is no shared instance;
// building one per request is what the fetch backend expects.
pub async fn get_envelope<T>(
    path: &str,
    params: &[(String, String)],
) -> Result<ApiEnvelope<T>, ServiceError>
where
    T: DeserializeOwned,
{
    let response = reqwest::Client::new()
        .get(endpoint(path))
        .query(params)
        .send()
        .await?;
    handle(response).await
}

pub async fn post_envelope<B, T>(path: &str, body: &B) -> Result<ApiEnvelope<T>, ServiceError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let response = reqwest::Client::new()
        .post(endpoint(path))
        .json(body)
        .send()
        .await?;
    handle(response).await
}

pub async fn patch_envelope<B, T>(path: &str, body: &B) -> Result<ApiEnvelope<T>, ServiceError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let response = reqwest::Client::new()
        .patch(endpoint(path))
        .json(body)
        .send()
        .await?;
    handle(response).await
}

pub async fn delete_envelope<T>(
    path: &str,
    params: &[(String, String)],
) -> Result<ApiEnvelope<T>, ServiceError>
where
    T: DeserializeOwned,
{
    let response = reqwest::Client::new()
        .delete(endpoint(path))
        .query(params)
        .send()
        .await?;
    handle(response).await
}

async fn handle<T>(response: reqwest::Response) -> Result<ApiEnvelope<T>, ServiceError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    // Error bodies still carry the envelope; fall back to the status
    // line when they do not.
    let message = match response.json::<ApiEnvelope<serde_json::Value>>().await {
        Ok(envelope) => envelope.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };
    Err(ServiceError::Api {
        status: status.as_u16(),
        message,
    })
}
