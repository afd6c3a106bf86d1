use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::constants::constants::DEADLINE_REMINDERS_SENT;
use crate::core::errors::TaskboardError;
use crate::core::models::{
    group::Role,
    notification::Notification,
    task::{Task, TaskStatus},
};
use crate::core::services::TaskboardService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::notify::Notifier;
use crate::infrastructure::storage::{Storage, in_memory::InMemoryStorage};
use crate::tests::{create_test_service, create_test_service_with_storage, deadline_in, future_deadline};

/// 08:00 UTC on a day far enough ahead that any deadline relative to it
/// passes the not-in-the-past check.
fn future_morning(hour: u32) -> DateTime<Utc> {
    let day = (Utc::now() + Duration::days(100)).date_naive();
    Utc.from_utc_datetime(&day.and_hms_opt(hour, 0, 0).unwrap())
}

struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, notification: Notification) -> Result<(), TaskboardError> {
        Err(TaskboardError::NotificationError(format!(
            "mailbox {} unavailable",
            notification.recipient
        )))
    }

    async fn outbox(&self) -> Result<Vec<Notification>, TaskboardError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_completion_notifies_every_member() {
    let deadline = future_deadline();
    let service = create_test_service();
    let group = service.create_group("Engineering").await.unwrap();
    let ada = service.create_user("Ada", "ada@example.com", "pw").await.unwrap();
    let grace = service.create_user("Grace", "grace@example.com", "pw").await.unwrap();
    service.assign_user(&group.id, &ada.id, Role::Owner).await.unwrap();
    service.assign_user(&group.id, &grace.id, Role::Member).await.unwrap();
    let task = service
        .create_task(&group.id, "Spec", "Write spec", TaskStatus::Pending, Some(deadline.as_str()))
        .await
        .unwrap();

    service
        .update_task(&group.id, &task.id, "Spec", "Write spec", TaskStatus::Completed, Some(deadline.as_str()))
        .await
        .unwrap();

    let outbox = service.get_notifications().await.unwrap();
    let mut recipients: Vec<&str> = outbox.iter().map(|n| n.recipient.as_str()).collect();
    recipients.sort();
    assert_eq!(recipients, ["ada@example.com", "grace@example.com"]);
    assert!(outbox.iter().all(|n| n.subject == "Task 'Spec' is completed!"));

    // staying completed does not notify again
    service
        .update_task(&group.id, &task.id, "Spec", "Write spec v2", TaskStatus::Completed, Some(deadline.as_str()))
        .await
        .unwrap();
    assert_eq!(service.get_notifications().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_failing_notifier_does_not_fail_update() {
    let deadline = future_deadline();
    let _ = env_logger::try_init();
    let service = TaskboardService::new(InMemoryStorage::new(), InMemoryLogging::new(), FailingNotifier)
        .with_password_cost(4);
    let group = service.create_group("Engineering").await.unwrap();
    let ada = service.create_user("Ada", "ada@example.com", "pw").await.unwrap();
    service.assign_user(&group.id, &ada.id, Role::Owner).await.unwrap();
    let task = service
        .create_task(&group.id, "Spec", "Write spec", TaskStatus::Pending, Some(deadline.as_str()))
        .await
        .unwrap();

    let updated = service
        .update_task(&group.id, &task.id, "Spec", "Write spec", TaskStatus::Completed, Some(deadline.as_str()))
        .await
        .unwrap();
    assert!(updated.status.is_completed());

    let tomorrow = deadline_in(1);
    service
        .create_task(&group.id, "Review", "Review spec", TaskStatus::Pending, Some(tomorrow.as_str()))
        .await
        .unwrap();
    // due in one day, but every delivery fails
    let sent = service.check_deadlines(Utc::now()).await.unwrap();
    assert!(sent.is_empty());
}

#[tokio::test]
async fn test_check_deadlines_within_window() {
    let service = create_test_service().with_reminder_window_days(3);
    let group = service.create_group("Engineering").await.unwrap();
    let ada = service.create_user("Ada", "ada@example.com", "pw").await.unwrap();
    service.assign_user(&group.id, &ada.id, Role::Member).await.unwrap();

    let now = future_morning(8);
    for (title, deadline, status) in [
        ("Due soon", now + Duration::days(2) + Duration::hours(9), TaskStatus::Pending),
        ("Due today", now + Duration::hours(15), TaskStatus::Pending),
        ("Far away", now + Duration::days(31), TaskStatus::Pending),
        ("Already done", now + Duration::days(1), TaskStatus::Completed),
    ] {
        let deadline = deadline.to_rfc3339();
        service
            .create_task(&group.id, title, "d", status, Some(deadline.as_str()))
            .await
            .unwrap();
    }

    let sent = service.check_deadlines(now).await.unwrap();

    let mut subjects: Vec<String> = sent.iter().map(|n| n.subject.clone()).collect();
    subjects.sort();
    assert_eq!(
        subjects,
        [
            "Reminder: Deadline for 'Due soon' is due in 2 day(s)",
            "Reminder: Deadline for 'Due today' is due in 0 day(s)",
        ]
    );
    assert!(sent.iter().all(|n| n.recipient == "ada@example.com"));
    assert_eq!(service.get_notifications().await.unwrap().len(), 2);

    let logs = service.get_app_logs().await.unwrap();
    let last = logs.last().unwrap();
    assert_eq!(last.action, DEADLINE_REMINDERS_SENT);
    assert_eq!(last.details["count"], 2);
}

#[tokio::test]
async fn test_check_deadlines_skips_groups_without_members() {
    let tomorrow = deadline_in(1);
    let service = create_test_service();
    let group = service.create_group("Empty").await.unwrap();
    service
        .create_task(&group.id, "Spec", "Write spec", TaskStatus::Pending, Some(tomorrow.as_str()))
        .await
        .unwrap();

    let sent = service.check_deadlines(Utc::now()).await.unwrap();
    assert!(sent.is_empty());
    assert!(service.get_notifications().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_check_deadlines_reminds_once_per_day_count() {
    let service = create_test_service();
    let group = service.create_group("Engineering").await.unwrap();
    let ada = service.create_user("Ada", "ada@example.com", "pw").await.unwrap();
    service.assign_user(&group.id, &ada.id, Role::Member).await.unwrap();

    let midnight = future_morning(0);
    let deadline = (midnight + Duration::days(1)).to_rfc3339();
    service
        .create_task(&group.id, "Spec", "Write spec", TaskStatus::Pending, Some(deadline.as_str()))
        .await
        .unwrap();

    // the reminder loop ticks hourly; a whole day of ticks sends one reminder
    for hour in 0..24 {
        service
            .check_deadlines(midnight + Duration::hours(hour))
            .await
            .unwrap();
    }
    let outbox = service.get_notifications().await.unwrap();
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].subject, "Reminder: Deadline for 'Spec' is due in 1 day(s)");

    // the next day the count drops to zero and a new reminder goes out
    let sent = service
        .check_deadlines(midnight + Duration::days(1))
        .await
        .unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Reminder: Deadline for 'Spec' is due in 0 day(s)");
    assert!(
        service
            .check_deadlines(midnight + Duration::days(1))
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(service.get_notifications().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_check_deadlines_skips_task_of_missing_group() {
    let _ = env_logger::try_init();
    let storage = InMemoryStorage::new();
    let service = create_test_service_with_storage(storage.clone());
    let group = service.create_group("Engineering").await.unwrap();
    let ada = service.create_user("Ada", "ada@example.com", "pw").await.unwrap();
    service.assign_user(&group.id, &ada.id, Role::Member).await.unwrap();

    let now = future_morning(8);
    let deadline = (now + Duration::days(1)).to_rfc3339();
    service
        .create_task(&group.id, "Spec", "Write spec", TaskStatus::Pending, Some(deadline.as_str()))
        .await
        .unwrap();
    // a task left behind by a group deleted while the run is in progress
    storage
        .insert_task(Task {
            id: "orphan".to_string(),
            group_id: "gone".to_string(),
            title: "Orphan".to_string(),
            description: "d".to_string(),
            status: TaskStatus::Pending,
            deadline: now + Duration::hours(2),
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();

    let sent = service.check_deadlines(now).await.unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Reminder: Deadline for 'Spec' is due in 1 day(s)");
    assert_eq!(sent[0].recipient, "ada@example.com");

    let logs = service.get_app_logs().await.unwrap();
    let last = logs.last().unwrap();
    assert_eq!(last.action, DEADLINE_REMINDERS_SENT);
    assert_eq!(last.details["count"], 1);
}
