pub mod constants {
    pub const GROUP_CREATED: &str = "GROUP_CREATED";
    pub const GROUP_RENAMED: &str = "GROUP_RENAMED";
    pub const GROUP_DELETED: &str = "GROUP_DELETED";
    pub const TASK_CREATED: &str = "TASK_CREATED";
    pub const TASK_UPDATED: &str = "TASK_UPDATED";
    pub const TASK_DELETED: &str = "TASK_DELETED";
    pub const USER_ADDED: &str = "USER_ADDED";
    pub const USER_UPDATED: &str = "USER_UPDATED";
    pub const USER_DELETED: &str = "USER_DELETED";
    pub const MEMBER_ADDED: &str = "MEMBER_ADDED";
    pub const MEMBER_REMOVED: &str = "MEMBER_REMOVED";
    pub const DEADLINE_REMINDERS_SENT: &str = "DEADLINE_REMINDERS_SENT";

    /// Header carrying the API key when one is configured.
    pub const API_KEY_HEADER: &str = "task-manager-api-key";
}
