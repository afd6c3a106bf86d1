use utoipa::OpenApi;

use crate::{
    api::models::{
        AssignUserRequest, CreateTaskRequest, CreateUserRequest, ErrorResponse, GroupRequest, RemoveUserRequest,
        UpdateTaskRequest, UpdateUserRequest,
    },
    core::models::{
        audit::AppLog,
        group::{Group, GroupMember, Role},
        notification::Notification,
        task::{Task, TaskSummary},
        user::User,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::list_groups,
        super::handlers::create_group,
        super::handlers::get_group,
        super::handlers::rename_group,
        super::handlers::delete_group,
        super::handlers::list_tasks,
        super::handlers::create_task,
        super::handlers::get_task,
        super::handlers::update_task,
        super::handlers::delete_task,
        super::handlers::task_summary,
        super::handlers::list_members,
        super::handlers::list_group_users,
        super::handlers::assign_user,
        super::handlers::remove_user,
        super::handlers::get_group_audits,
        super::handlers::list_users,
        super::handlers::create_user,
        super::handlers::get_user,
        super::handlers::update_user,
        super::handlers::delete_user,
        super::handlers::get_app_logs,
        super::handlers::get_notifications
    ),
    components(schemas(
        GroupRequest,
        CreateTaskRequest,
        UpdateTaskRequest,
        CreateUserRequest,
        UpdateUserRequest,
        AssignUserRequest,
        RemoveUserRequest,
        ErrorResponse,
        Group,
        GroupMember,
        Role,
        Task,
        TaskSummary,
        User,
        AppLog,
        Notification
    )),
    info(
        title = "Taskboard API",
        description = "API for managing groups, their tasks and members",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
