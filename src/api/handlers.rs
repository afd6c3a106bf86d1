use crate::{
    api::models::*,
    auth::api_key::{ApiKey, require_api_key},
    core::{
        models::{
            audit::AppLog,
            group::{Group, GroupMember},
            notification::Notification,
            task::{Task, TaskSummary},
            user::User,
        },
        services::TaskboardService,
    },
    infrastructure::{
        logging::in_memory::InMemoryLogging, notify::in_memory::InMemoryNotifier, storage::in_memory::InMemoryStorage,
    },
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::get,
};
use std::sync::Arc;

pub type AppService = TaskboardService<InMemoryLogging, InMemoryStorage, InMemoryNotifier>;
type SharedService = State<Arc<AppService>>;

/// The `/api` router. When `api_key` is set every route requires it.
pub fn api_routes(service: Arc<AppService>, api_key: Option<ApiKey>) -> Router {
    let routes = Router::new()
        .route("/groups/", get(list_groups).post(create_group))
        .route(
            "/groups/{group_id}/",
            get(get_group).put(rename_group).delete(delete_group),
        )
        .route("/groups/{group_id}/tasks/", get(list_tasks).post(create_task))
        .route(
            "/groups/{group_id}/tasks/{task_id}/",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/groups/{group_id}/summary/", get(task_summary))
        .route("/groups/{group_id}/members/", get(list_members))
        .route("/groups/{group_id}/users/", get(list_group_users))
        .route("/groups/{group_id}/user/", axum::routing::post(assign_user).delete(remove_user))
        .route("/groups/{group_id}/audits/", get(get_group_audits))
        .route("/users/", get(list_users).post(create_user))
        .route(
            "/users/{user_id}/",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/logs/", get(get_app_logs))
        .route("/notifications/", get(get_notifications));

    let routes = match api_key {
        Some(key) => routes.route_layer(middleware::from_fn_with_state(key, require_api_key)),
        None => routes,
    };
    routes.with_state(service)
}

#[utoipa::path(
    get,
    path = "/api/groups/",
    responses(
        (status = 200, description = "All groups in creation order", body = [Group]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_groups(State(service): SharedService) -> Result<Json<Vec<Group>>, ApiError> {
    Ok(Json(service.list_groups().await?))
}

#[utoipa::path(
    post,
    path = "/api/groups/",
    request_body = GroupRequest,
    responses(
        (status = 201, description = "Group created", body = Group),
        (status = 400, description = "Empty or invalid name", body = ErrorResponse)
    )
)]
pub async fn create_group(
    State(service): SharedService,
    Json(req): Json<GroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    let group = service.create_group(&req.name).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/",
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 200, description = "Group detail", body = Group),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_group(State(service): SharedService, Path(group_id): Path<String>) -> Result<Json<Group>, ApiError> {
    Ok(Json(service.get_group(&group_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/groups/{group_id}/",
    request_body = GroupRequest,
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 200, description = "Group renamed", body = Group),
        (status = 400, description = "Empty or invalid name", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn rename_group(
    State(service): SharedService,
    Path(group_id): Path<String>,
    Json(req): Json<GroupRequest>,
) -> Result<Json<Group>, ApiError> {
    Ok(Json(service.rename_group(&group_id, &req.name).await?))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{group_id}/",
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 204, description = "Group, its tasks and memberships deleted"),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn delete_group(State(service): SharedService, Path(group_id): Path<String>) -> Result<StatusCode, ApiError> {
    service.delete_group(&group_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/tasks/",
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 200, description = "Tasks sorted by deadline", body = [Task]),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn list_tasks(State(service): SharedService, Path(group_id): Path<String>) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(service.list_tasks(&group_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/tasks/",
    request_body = CreateTaskRequest,
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Missing field, malformed or past deadline", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 409, description = "Task title already used in the group", body = ErrorResponse)
    )
)]
pub async fn create_task(
    State(service): SharedService,
    Path(group_id): Path<String>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = service
        .create_task(
            &group_id,
            &req.title,
            &req.description,
            req.status.unwrap_or_default(),
            req.deadline.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/tasks/{task_id}/",
    params(
        ("group_id" = String, Path, description = "ID of the group"),
        ("task_id" = String, Path, description = "ID of the task")
    ),
    responses(
        (status = 200, description = "Task detail", body = Task),
        (status = 404, description = "Group or task not found", body = ErrorResponse)
    )
)]
pub async fn get_task(
    State(service): SharedService,
    Path((group_id, task_id)): Path<(String, String)>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(service.get_task(&group_id, &task_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/groups/{group_id}/tasks/{task_id}/",
    request_body = UpdateTaskRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group"),
        ("task_id" = String, Path, description = "ID of the task")
    ),
    responses(
        (status = 200, description = "Task replaced", body = Task),
        (status = 400, description = "Missing field, malformed or past deadline", body = ErrorResponse),
        (status = 404, description = "Group or task not found", body = ErrorResponse),
        (status = 409, description = "Task title already used in the group", body = ErrorResponse)
    )
)]
pub async fn update_task(
    State(service): SharedService,
    Path((group_id, task_id)): Path<(String, String)>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let task = service
        .update_task(
            &group_id,
            &task_id,
            &req.title,
            &req.description,
            req.status,
            req.deadline.as_deref(),
        )
        .await?;
    Ok(Json(task))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{group_id}/tasks/{task_id}/",
    params(
        ("group_id" = String, Path, description = "ID of the group"),
        ("task_id" = String, Path, description = "ID of the task")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "Group or task not found", body = ErrorResponse)
    )
)]
pub async fn delete_task(
    State(service): SharedService,
    Path((group_id, task_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    service.delete_task(&group_id, &task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/summary/",
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 200, description = "Pending and completed counts", body = TaskSummary),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn task_summary(
    State(service): SharedService,
    Path(group_id): Path<String>,
) -> Result<Json<TaskSummary>, ApiError> {
    Ok(Json(service.task_summary(&group_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/members/",
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 200, description = "Members with their roles", body = [GroupMember]),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn list_members(
    State(service): SharedService,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<GroupMember>>, ApiError> {
    Ok(Json(service.list_members(&group_id).await?))
}

/// Older path for the member list, kept for existing clients.
#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/users/",
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 200, description = "Members with their roles", body = [GroupMember]),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn list_group_users(
    state: SharedService,
    path: Path<String>,
) -> Result<Json<Vec<GroupMember>>, ApiError> {
    list_members(state, path).await
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/user/",
    request_body = AssignUserRequest,
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 201, description = "User assigned", body = GroupMember),
        (status = 404, description = "Group or user not found", body = ErrorResponse),
        (status = 409, description = "User already in group", body = ErrorResponse)
    )
)]
pub async fn assign_user(
    State(service): SharedService,
    Path(group_id): Path<String>,
    Json(req): Json<AssignUserRequest>,
) -> Result<(StatusCode, Json<GroupMember>), ApiError> {
    let member = service.assign_user(&group_id, &req.user_id, req.role).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{group_id}/user/",
    request_body = RemoveUserRequest,
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 204, description = "User removed from group"),
        (status = 404, description = "Group or user not found, or user not in group", body = ErrorResponse)
    )
)]
pub async fn remove_user(
    State(service): SharedService,
    Path(group_id): Path<String>,
    Json(req): Json<RemoveUserRequest>,
) -> Result<StatusCode, ApiError> {
    service.remove_user(&group_id, &req.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/audits/",
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 200, description = "Audit entries for the group", body = [AppLog])
    )
)]
pub async fn get_group_audits(
    State(service): SharedService,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<AppLog>>, ApiError> {
    Ok(Json(service.get_group_audits(&group_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/users/",
    responses(
        (status = 200, description = "All users", body = [User])
    )
)]
pub async fn list_users(State(service): SharedService) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(service.list_users().await?))
}

#[utoipa::path(
    post,
    path = "/api/users/",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Missing field or invalid email", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(service): SharedService,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = service.create_user(&req.name, &req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/",
    params(("user_id" = String, Path, description = "ID of the user")),
    responses(
        (status = 200, description = "User detail", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(State(service): SharedService, Path(user_id): Path<String>) -> Result<Json<User>, ApiError> {
    Ok(Json(service.get_user(&user_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}/",
    request_body = UpdateUserRequest,
    params(("user_id" = String, Path, description = "ID of the user")),
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Missing field or invalid email", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(service): SharedService,
    Path(user_id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let user = service
        .update_user(&user_id, &req.name, &req.email, req.password.as_deref())
        .await?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}/",
    params(("user_id" = String, Path, description = "ID of the user")),
    responses(
        (status = 204, description = "User and their memberships deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(State(service): SharedService, Path(user_id): Path<String>) -> Result<StatusCode, ApiError> {
    service.delete_user(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/logs/",
    responses(
        (status = 200, description = "All audit entries", body = [AppLog])
    )
)]
pub async fn get_app_logs(State(service): SharedService) -> Result<Json<Vec<AppLog>>, ApiError> {
    Ok(Json(service.get_app_logs().await?))
}

#[utoipa::path(
    get,
    path = "/api/notifications/",
    responses(
        (status = 200, description = "Notification outbox", body = [Notification])
    )
)]
pub async fn get_notifications(State(service): SharedService) -> Result<Json<Vec<Notification>>, ApiError> {
    Ok(Json(service.get_notifications().await?))
}
