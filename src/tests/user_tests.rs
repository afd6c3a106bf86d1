use crate::constants::constants::{USER_ADDED, USER_DELETED};
use crate::core::errors::TaskboardError;
use crate::core::models::group::Role;
use crate::tests::create_test_service;

#[tokio::test]
async fn test_create_user_hashes_password() {
    let service = create_test_service();
    let user = service
        .create_user(" Ada Lovelace ", "ada@example.com", "analytical")
        .await
        .unwrap();

    assert_eq!(user.name, "Ada Lovelace");
    assert_ne!(user.password, "analytical");
    assert!(bcrypt::verify("analytical", &user.password).unwrap());

    let users = service.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, user.id);

    let logs = service.get_app_logs().await.unwrap();
    assert_eq!(logs.last().unwrap().action, USER_ADDED);
    assert!(logs.last().unwrap().group_id.is_none());
}

#[tokio::test]
async fn test_create_user_missing_fields() {
    let service = create_test_service();
    let cases = [
        ("", "ada@example.com", "pw", "User name is required."),
        ("Ada", "", "pw", "User email is required."),
        ("Ada", "ada@example.com", "", "User password is required."),
    ];
    for (name, email, password, expected) in cases {
        let err = service.create_user(name, email, password).await.unwrap_err();
        assert_eq!(err.user_message(), expected);
    }
    assert!(service.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_user_invalid_email() {
    let service = create_test_service();
    let result = service.create_user("Ada", "invalid", "pw").await;
    assert!(matches!(result, Err(TaskboardError::InvalidEmail(_))));
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let service = create_test_service();
    service.create_user("Ada", "ada@example.com", "pw").await.unwrap();
    let result = service.create_user("Other Ada", "ada@example.com", "pw").await;
    assert!(matches!(result, Err(TaskboardError::EmailAlreadyRegistered(_))));
}

#[tokio::test]
async fn test_update_user_keeps_password_when_absent() {
    let service = create_test_service();
    let user = service.create_user("Ada", "ada@example.com", "first").await.unwrap();

    let updated = service
        .update_user(&user.id, "Ada L.", "ada.l@example.com", None)
        .await
        .unwrap();
    assert_eq!(updated.name, "Ada L.");
    assert_eq!(updated.email, "ada.l@example.com");
    assert_eq!(updated.password, user.password);

    let rehashed = service
        .update_user(&user.id, "Ada L.", "ada.l@example.com", Some("second"))
        .await
        .unwrap();
    assert!(bcrypt::verify("second", &rehashed.password).unwrap());
}

#[tokio::test]
async fn test_update_user_email_taken() {
    let service = create_test_service();
    let ada = service.create_user("Ada", "ada@example.com", "pw").await.unwrap();
    service.create_user("Grace", "grace@example.com", "pw").await.unwrap();

    let result = service.update_user(&ada.id, "Ada", "grace@example.com", None).await;
    assert!(matches!(result, Err(TaskboardError::EmailAlreadyRegistered(_))));
}

#[tokio::test]
async fn test_delete_user_drops_memberships() {
    let service = create_test_service();
    let group = service.create_group("Engineering").await.unwrap();
    let ada = service.create_user("Ada", "ada@example.com", "pw").await.unwrap();
    let grace = service.create_user("Grace", "grace@example.com", "pw").await.unwrap();
    service.assign_user(&group.id, &ada.id, Role::Owner).await.unwrap();
    service.assign_user(&group.id, &grace.id, Role::Editor).await.unwrap();

    service.delete_user(&ada.id).await.unwrap();

    let members = service.list_members(&group.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, grace.id);
    assert!(matches!(
        service.get_user(&ada.id).await,
        Err(TaskboardError::UserNotFound(_))
    ));
    let logs = service.get_app_logs().await.unwrap();
    assert_eq!(logs.last().unwrap().action, USER_DELETED);
}
