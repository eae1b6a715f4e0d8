use obra_types::ApiEnvelope;

use super::client::{self, ServiceError};

pub async fn project_count() -> Result<u64, ServiceError> {
    let envelope: ApiEnvelope<u64> = client::get_envelope("/api/v1/stats/projects", &[]).await?;
    envelope.data.ok_or(ServiceError::NoData)
}

pub async fn budget_count() -> Result<u64, ServiceError> {
    let envelope: ApiEnvelope<u64> = client::get_envelope("/api/v1/stats/budgets", &[]).await?;
    envelope.data.ok_or(ServiceError::NoData)
}
