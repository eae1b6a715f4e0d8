use axum::{
    extract::{Query, State},
    routing, Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, error};

use obra_store::{Store, StoreError, Table};
use obra_types::{
    ApiEnvelope, Budget, Decomposition, Element, ListParams, Measurement, Price, Project, Record,
    Role, Unit, User, Version,
};

use super::{respond, to_json};
use crate::middleware::auth::AppState;

/// A record type the REST layer can serve: ties the shared model to its
/// table in the store.
pub trait Resource: Record + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn table(store: &Store) -> &Table<Self>;
}

macro_rules! impl_resource {
    ($ty:ty, $table:ident) => {
        impl Resource for $ty {
            fn table(store: &Store) -> &Table<Self> {
                &store.$table
            }
        }
    };
}

impl_resource!(Project, projects);
impl_resource!(Budget, budgets);
impl_resource!(User, users);
impl_resource!(Role, roles);
impl_resource!(Unit, units);
impl_resource!(Version, versions);
impl_resource!(Price, prices);
impl_resource!(Element, elements);
impl_resource!(Measurement, measurements);
impl_resource!(Decomposition, decompositions);

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/v1/projects", resource_routes::<Project>())
        .nest("/api/v1/budgets", resource_routes::<Budget>())
        .nest("/api/v1/users", resource_routes::<User>())
        .nest("/api/v1/roles", resource_routes::<Role>())
        .nest("/api/v1/units", resource_routes::<Unit>())
        .nest("/api/v1/versions", resource_routes::<Version>())
        .nest("/api/v1/prices", resource_routes::<Price>())
        .nest("/api/v1/elements", resource_routes::<Element>())
        .nest("/api/v1/measurements", resource_routes::<Measurement>())
        .nest("/api/v1/decompositions", resource_routes::<Decomposition>())
}

fn resource_routes<T: Resource>() -> Router<AppState> {
    Router::new().route(
        "/",
        routing::get(read::<T>)
            .post(create::<T>)
            .patch(update::<T>)
            .delete(remove::<T>),
    )
}

/// One record by `?id=`, a paged listing when any paging, sort, or filter
/// parameter is present, the plain full listing otherwise.
async fn read<T: Resource>(
    State(state): State<AppState>,
    Query(pairs): Query<BTreeMap<String, String>>,
) -> axum::response::Response {
    let params = ListParams::from_pairs(pairs);
    debug!(resource = T::RESOURCE, ?params, "read");

    if let Some(id) = params.id {
        return match T::table(&state.store).get(id) {
            Some(row) => respond(ApiEnvelope::ok("Item found", to_json(&row))),
            None => respond(ApiEnvelope::error(404, format!("Item {} not found", id))),
        };
    }

    if params.is_scoped() {
        let (rows, pagination) = T::table(&state.store).list(&params);
        return respond(ApiEnvelope::ok("results", to_json(&rows)).paged(pagination));
    }

    respond(ApiEnvelope::ok(
        "Items list",
        to_json(&T::table(&state.store).all()),
    ))
}

async fn create<T: Resource>(
    State(state): State<AppState>,
    Json(record): Json<T>,
) -> axum::response::Response {
    let created = T::table(&state.store).create(record);
    respond(ApiEnvelope::created("Item created", to_json(&created)))
}

async fn update<T: Resource>(
    State(state): State<AppState>,
    Json(record): Json<T>,
) -> axum::response::Response {
    match T::table(&state.store).update(record) {
        Ok(row) => respond(ApiEnvelope::ok("Item updated", to_json(&row))),
        Err(StoreError::MissingId) => respond(ApiEnvelope::error(400, "ID is mandatory")),
        Err(e) => {
            error!(resource = T::RESOURCE, error = %e, "update failed");
            respond(ApiEnvelope::error(404, e.to_string()))
        }
    }
}

async fn remove<T: Resource>(
    State(state): State<AppState>,
    Query(pairs): Query<BTreeMap<String, String>>,
) -> axum::response::Response {
    let params = ListParams::from_pairs(pairs);
    let Some(id) = params.id else {
        error!(resource = T::RESOURCE, "delete without id");
        return respond(ApiEnvelope::error(400, "ID is mandatory"));
    };
    match T::table(&state.store).delete(id) {
        Ok(row) => respond(ApiEnvelope::ok("Item deleted", to_json(&row))),
        Err(e) => respond(ApiEnvelope::error(404, e.to_string())),
    }
}
