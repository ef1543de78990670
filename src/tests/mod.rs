pub mod support;

//
// ──────────────────────────────────────────────────────────
// Service scenarios over in-memory storage
// ──────────────────────────────────────────────────────────
//

use std::sync::Arc;

use crate::demo::application::domain::entities::{DemoId, DemoStatus};
use crate::demo::application::ports::incoming::use_cases::{
    CreateDemoCommand, DemoServiceError, DemoUseCases, UpdateDemoCommand,
};
use crate::demo::application::ports::outgoing::{DemoRepository, DemoSearch};
use crate::demo::application::services::DemoService;
use crate::shared::crud::{PageRequest, PatchField};
use crate::user::application::domain::entities::User;
use crate::user::application::ports::incoming::use_cases::{
    CreateUserCommand, UserServiceError, UserUseCases,
};
use crate::user::application::services::UserService;
use support::{InMemoryDemoRepository, InMemoryUserRepository, PlainTextHasher};

struct Services {
    users: UserService<InMemoryUserRepository>,
    demos: DemoService<InMemoryDemoRepository, InMemoryUserRepository>,
    demo_rows: InMemoryDemoRepository,
}

fn services() -> Services {
    let user_rows = InMemoryUserRepository::default();
    let demo_rows = InMemoryDemoRepository::default();

    Services {
        users: UserService::new(user_rows.clone(), Arc::new(PlainTextHasher)),
        demos: DemoService::new(demo_rows.clone(), user_rows),
        demo_rows,
    }
}

async fn register(svc: &Services, email: &str, username: &str) -> User {
    let command = CreateUserCommand::new(
        email,
        Some(username.to_string()),
        "pw123456".to_string(),
        None,
        None,
    )
    .unwrap();
    svc.users.create_user(command).await.unwrap()
}

fn demo(name: &str) -> CreateDemoCommand {
    CreateDemoCommand::new(name, None, Some("active".to_string()), Some(1), None).unwrap()
}

#[tokio::test]
async fn registering_same_email_twice_is_conflict() {
    let svc = services();
    register(&svc, "a@x.com", "a").await;

    let again = CreateUserCommand::new("a@x.com", None, "pw123456".to_string(), None, None)
        .unwrap();
    let result = svc.users.create_user(again).await;

    assert_eq!(result.unwrap_err(), UserServiceError::EmailTaken);
    assert_eq!(svc.users.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn duplicate_demo_name_is_conflict_for_any_user() {
    let svc = services();
    let a = register(&svc, "a@x.com", "a").await;
    let b = register(&svc, "b@x.com", "b").await;

    let created = svc.demos.create_demo(a.id, demo("D1")).await.unwrap();
    assert_eq!(created.owner_id, a.id);
    assert_eq!(created.status, DemoStatus::Active);

    let by_owner = svc.demos.create_demo(a.id, demo("D1")).await;
    let by_other = svc.demos.create_demo(b.id, demo("D1")).await;

    assert_eq!(by_owner.unwrap_err(), DemoServiceError::NameTaken("D1".to_string()));
    assert_eq!(by_other.unwrap_err(), DemoServiceError::NameTaken("D1".to_string()));
}

#[tokio::test]
async fn non_owner_update_is_forbidden_regardless_of_payload() {
    let svc = services();
    let owner = register(&svc, "a@x.com", "a").await;
    let intruder = register(&svc, "b@x.com", "b").await;
    let created = svc.demos.create_demo(owner.id, demo("D1")).await.unwrap();

    let payloads = [
        UpdateDemoCommand::default(),
        UpdateDemoCommand::new(Some("D2".to_string()), PatchField::Null, None, None, None)
            .unwrap(),
        UpdateDemoCommand::new(None, PatchField::Unset, Some("bogus".to_string()), None, None)
            .unwrap(),
    ];

    for command in payloads {
        let result = svc.demos.update_demo(created.id, intruder.id, command).await;
        assert_eq!(result.unwrap_err(), DemoServiceError::NotOwner);
    }
}

#[tokio::test]
async fn soft_deleted_demo_leaves_listing_but_stays_fetchable_directly() {
    let svc = services();
    let owner = register(&svc, "a@x.com", "a").await;
    let keep = svc.demos.create_demo(owner.id, demo("keep")).await.unwrap();
    let gone = svc.demos.create_demo(owner.id, demo("gone")).await.unwrap();

    svc.demos.delete_demo(gone.id, owner.id).await.unwrap();

    let page = svc
        .demos
        .search_demos(DemoSearch::default(), PageRequest::new(0, 20))
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, keep.id);

    assert_eq!(
        svc.demos.get_demo(gone.id).await.unwrap_err(),
        DemoServiceError::DemoNotFound
    );

    let row = svc.demo_rows.find_by_id(gone.id).await.unwrap().unwrap();
    assert!(row.is_deleted);
    assert!(row.deleted_at.is_some());
}

#[tokio::test]
async fn deleted_name_can_be_reused() {
    let svc = services();
    let owner = register(&svc, "a@x.com", "a").await;
    let first = svc.demos.create_demo(owner.id, demo("D1")).await.unwrap();
    svc.demos.delete_demo(first.id, owner.id).await.unwrap();

    let second = svc.demos.create_demo(owner.id, demo("D1")).await.unwrap();

    assert_ne!(second.id, first.id);
}

#[tokio::test]
async fn priority_only_update_leaves_other_fields() {
    let svc = services();
    let owner = register(&svc, "a@x.com", "a").await;
    let command = CreateDemoCommand::new(
        "D1",
        Some("first".to_string()),
        Some("pending".to_string()),
        Some(1),
        Some(true),
    )
    .unwrap();
    let created = svc.demos.create_demo(owner.id, command).await.unwrap();

    let only_priority =
        UpdateDemoCommand::new(None, PatchField::Unset, None, Some(5), None).unwrap();
    let updated = svc
        .demos
        .update_demo(created.id, owner.id, only_priority)
        .await
        .unwrap();

    assert_eq!(updated.priority, 5);
    assert_eq!(updated.name, "D1");
    assert_eq!(updated.description.as_deref(), Some("first"));
    assert_eq!(updated.status, DemoStatus::Pending);
    assert!(updated.is_featured);
}

#[tokio::test]
async fn failed_logins_do_not_lock_the_account() {
    let svc = services();
    let user = register(&svc, "a@x.com", "a").await;

    for _ in 0..3 {
        let result = svc.users.authenticate("a@x.com", "wrong-pass").await.unwrap();
        assert!(result.is_none());
    }

    let signed_in = svc
        .users
        .authenticate("a@x.com", "pw123456")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(signed_in.id, user.id);
    assert_eq!(signed_in.login_count, 1);
    assert!(signed_in.last_login_at.is_some());
}

#[tokio::test]
async fn statistics_ignore_deleted_demos() {
    let svc = services();
    let owner = register(&svc, "a@x.com", "a").await;
    for name in ["one", "two", "three"] {
        svc.demos.create_demo(owner.id, demo(name)).await.unwrap();
    }
    svc.demos
        .update_demo_status(DemoId::from(2), owner.id, "inactive".to_string())
        .await
        .unwrap();
    svc.demos
        .set_demo_featured(DemoId::from(3), owner.id, true)
        .await
        .unwrap();
    svc.demos.delete_demo(DemoId::from(1), owner.id).await.unwrap();

    let stats = svc.demos.get_statistics().await.unwrap();

    assert_eq!(stats.total, 2);
    assert_eq!(stats.active, 1);
    assert_eq!(stats.inactive, 1);
    assert_eq!(stats.pending, 0);
    assert_eq!(stats.featured, 1);
}
