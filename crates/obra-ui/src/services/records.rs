//! One CRUD client shared by every resource; the record type picks the
//! collection path through [`Record::RESOURCE`].

use obra_types::{ApiEnvelope, Record};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::client::{self, ServiceError};

fn collection<T: Record>() -> String {
    format!("/api/v1/{}", T::RESOURCE)
}

/// Full unpaged listing; the dialogs use this to fill their selects.
pub async fn read_all<T>() -> Result<Vec<T>, ServiceError>
where
    T: Record + DeserializeOwned,
{
    let envelope: ApiEnvelope<Vec<T>> = client::get_envelope(&collection::<T>(), &[]).await?;
    envelope.data.ok_or(ServiceError::NoData)
}

/// One page with the table's query attached. Returns the whole envelope
/// so the caller keeps the pagination echo.
pub async fn read_page<T>(params: &[(String, String)]) -> Result<ApiEnvelope<Vec<T>>, ServiceError>
where
    T: Record + DeserializeOwned,
{
    client::get_envelope(&collection::<T>(), params).await
}

pub async fn create<T>(record: &T) -> Result<T, ServiceError>
where
    T: Record + Serialize + DeserializeOwned,
{
    let envelope: ApiEnvelope<T> = client::post_envelope(&collection::<T>(), record).await?;
    envelope.data.ok_or(ServiceError::NoData)
}

pub async fn update<T>(record: &T) -> Result<T, ServiceError>
where
    T: Record + Serialize + DeserializeOwned,
{
    let envelope: ApiEnvelope<T> = client::patch_envelope(&collection::<T>(), record).await?;
    envelope.data.ok_or(ServiceError::NoData)
}

/// Deletes by the record's id and returns the row the server removed.
pub async fn remove<T>(record: &T) -> Result<T, ServiceError>
where
    T: Record + DeserializeOwned,
{
    let id = record.id().ok_or(ServiceError::Api {
        status: 400,
        message: "ID is mandatory".to_string(),
    })?;
    let envelope: ApiEnvelope<T> =
        client::delete_envelope(&collection::<T>(), &[("id".to_string(), id.to_string())]).await?;
    envelope.data.ok_or(ServiceError::NoData)
}
