use crate::constants::constants::{GROUP_CREATED, GROUP_DELETED, GROUP_RENAMED};
use crate::core::errors::TaskboardError;
use crate::core::models::{group::Role, task::TaskStatus};
use crate::tests::{create_test_service, future_deadline};

#[tokio::test]
async fn test_create_group_appears_in_list() {
    let service = create_test_service();
    let group = service.create_group("Engineering").await.unwrap();

    let groups = service.list_groups().await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "Engineering");
    assert_eq!(groups[0].id, group.id);

    let logs = service.get_group_audits(&group.id).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, GROUP_CREATED);
}

#[tokio::test]
async fn test_create_group_trims_name() {
    let service = create_test_service();
    let group = service.create_group("  Design  ").await.unwrap();
    assert_eq!(group.name, "Design");
}

#[tokio::test]
async fn test_create_group_blank_name_rejected() {
    let service = create_test_service();
    for name in ["", "    "] {
        let err = service.create_group(name).await.unwrap_err();
        assert!(matches!(err, TaskboardError::InvalidInput(ref field, _) if field == "name"));
        assert_eq!(err.user_message(), "Group name is required.");
    }
    assert!(service.list_groups().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rename_group() {
    let service = create_test_service();
    let group = service.create_group("Engineering").await.unwrap();

    let renamed = service.rename_group(&group.id, "Platform").await.unwrap();
    assert_eq!(renamed.id, group.id);
    assert_eq!(renamed.created_at, group.created_at);
    assert_eq!(service.get_group(&group.id).await.unwrap().name, "Platform");

    let logs = service.get_group_audits(&group.id).await.unwrap();
    assert_eq!(logs.last().unwrap().action, GROUP_RENAMED);
}

#[tokio::test]
async fn test_rename_unknown_group() {
    let service = create_test_service();
    let result = service.rename_group("missing", "Platform").await;
    assert!(matches!(result, Err(TaskboardError::GroupNotFound(_))));
}

#[tokio::test]
async fn test_delete_group_cascades() {
    let deadline = future_deadline();
    let service = create_test_service();
    let group = service.create_group("Engineering").await.unwrap();
    let other = service.create_group("Sales").await.unwrap();
    let user = service.create_user("Ada", "ada@example.com", "secret").await.unwrap();
    service.assign_user(&group.id, &user.id, Role::Admin).await.unwrap();
    service.assign_user(&other.id, &user.id, Role::Viewer).await.unwrap();
    service
        .create_task(&group.id, "Spec", "Write spec", TaskStatus::Pending, Some(deadline.as_str()))
        .await
        .unwrap();
    service
        .create_task(&other.id, "Pitch", "Prepare pitch", TaskStatus::Pending, Some(deadline.as_str()))
        .await
        .unwrap();

    service.delete_group(&group.id).await.unwrap();

    let groups = service.list_groups().await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].id, other.id);
    assert!(matches!(
        service.list_tasks(&group.id).await,
        Err(TaskboardError::GroupNotFound(_))
    ));
    assert_eq!(service.list_tasks(&other.id).await.unwrap().len(), 1);
    assert_eq!(service.list_members(&other.id).await.unwrap().len(), 1);
    // the user survives the group
    assert!(service.get_user(&user.id).await.is_ok());

    let logs = service.get_group_audits(&group.id).await.unwrap();
    assert_eq!(logs.last().unwrap().action, GROUP_DELETED);
}

#[tokio::test]
async fn test_delete_unknown_group() {
    let service = create_test_service();
    assert!(matches!(
        service.delete_group("missing").await,
        Err(TaskboardError::GroupNotFound(_))
    ));
}
