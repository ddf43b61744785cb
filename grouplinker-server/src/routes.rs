use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use grouplinker_libs::availability::suggest;
use grouplinker_libs::data::{MemberRecord, Suggestion};
use grouplinker_libs::registry::GroupRegistry;
use grouplinker_libs::store::GroupStore;

use crate::error::ApiError;

/// One lock guards the whole registry: mutations take it for writing,
/// reads run concurrently but never interleave a mutation mid-write.
pub type SharedRegistry<S> = Arc<RwLock<GroupRegistry<S>>>;

pub fn router<S>(registry: SharedRegistry<S>) -> Router
where
    S: GroupStore + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(root::<S>))
        .route("/create_group", post(create_group::<S>))
        .route("/groups", get(list_groups::<S>))
        .route("/group/{name}", get(get_group::<S>).delete(delete_group::<S>))
        .route("/group/{name}/add_user", post(add_user::<S>))
        .route("/group/{name}/suggest", get(suggest_for_group::<S>))
        .with_state(registry)
}

#[derive(Deserialize)]
struct CreateGroupRequest {
    group_name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    created_by: String,
}

#[derive(Deserialize)]
struct AddUserRequest {
    name: String,
    available_days: Vec<String>,
    available_times: Vec<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Serialize)]
struct SuggestionResponse {
    group_name: String,
    #[serde(flatten)]
    suggestion: Suggestion,
}

async fn root<S>(State(registry): State<SharedRegistry<S>>) -> Json<Value>
where
    S: GroupStore + Send + Sync + 'static,
{
    let registry = registry.read();

    Json(json!({
        "message": "GroupLinker - AI-Powered Scheduler",
        "total_groups": registry.count(),
        "groups": registry.group_names(),
    }))
}

async fn create_group<S>(
    State(registry): State<SharedRegistry<S>>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<Json<Value>, ApiError>
where
    S: GroupStore + Send + Sync + 'static,
{
    registry
        .write()
        .create(&req.group_name, &req.description, &req.created_by)?;

    Ok(Json(json!({
        "message": format!("Created group '{}' successfully!", req.group_name),
        "group_url": format!("/group/{}", req.group_name),
    })))
}

async fn get_group<S>(
    State(registry): State<SharedRegistry<S>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError>
where
    S: GroupStore + Send + Sync + 'static,
{
    let registry = registry.read();
    let group = registry.get(&name)?;

    Ok(Json(json!({
        "group_name": name,
        "info": &group.info,
        "users": &group.members,
        "user_count": group.member_count(),
        "suggestion": suggest(&name, &group.members),
    })))
}

async fn add_user<S>(
    State(registry): State<SharedRegistry<S>>,
    Path(name): Path<String>,
    Json(req): Json<AddUserRequest>,
) -> Result<Json<Value>, ApiError>
where
    S: GroupStore + Send + Sync + 'static,
{
    let member = MemberRecord {
        name: req.name.clone(),
        email: req.email,
        available_days: req.available_days.into_iter().collect(),
        available_times: req.available_times.into_iter().collect(),
    };

    let total_users = registry.write().add_or_replace_member(&name, member)?;

    Ok(Json(json!({
        "message": format!("Added {} to group '{}'", req.name, name),
        "total_users": total_users,
    })))
}

async fn suggest_for_group<S>(
    State(registry): State<SharedRegistry<S>>,
    Path(name): Path<String>,
) -> Result<Json<SuggestionResponse>, ApiError>
where
    S: GroupStore + Send + Sync + 'static,
{
    let registry = registry.read();
    let group = registry.get(&name)?;

    Ok(Json(SuggestionResponse {
        suggestion: suggest(&name, &group.members),
        group_name: name,
    }))
}

async fn delete_group<S>(
    State(registry): State<SharedRegistry<S>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError>
where
    S: GroupStore + Send + Sync + 'static,
{
    registry.write().delete(&name)?;

    Ok(Json(json!({
        "message": format!("Deleted group '{}'", name),
    })))
}

async fn list_groups<S>(State(registry): State<SharedRegistry<S>>) -> Json<Value>
where
    S: GroupStore + Send + Sync + 'static,
{
    let registry = registry.read();

    Json(json!({
        "groups": registry.list(),
        "total_groups": registry.count(),
    }))
}
