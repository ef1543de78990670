use actix_web::{body::MessageBody, dev::ServiceResponse, test};
use chrono::Utc;

use crate::demo::application::domain::entities::{Demo, DemoId, DemoStatus};
use crate::user::application::domain::entities::{User, UserId};

/// Active user whose password is `pw123456` under [`super::PlainTextHasher`].
pub fn sample_user(id: i64, email: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId::from(id),
        email: email.to_string(),
        username: None,
        hashed_password: "plain:pw123456".to_string(),
        full_name: None,
        phone: None,
        avatar: None,
        bio: None,
        is_active: true,
        is_superuser: false,
        is_verified: false,
        is_deleted: false,
        last_login_at: None,
        login_count: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_demo(id: i64, name: &str, owner_id: i64) -> Demo {
    let now = Utc::now();
    Demo {
        id: DemoId::from(id),
        name: name.to_string(),
        description: None,
        status: DemoStatus::Active,
        priority: 1,
        is_featured: false,
        owner_id: UserId::from(owner_id),
        is_deleted: false,
        deleted_at: None,
        created_at: now,
        updated_at: now,
    }
}

pub async fn read_json<B>(resp: ServiceResponse<B>) -> serde_json::Value
where
    B: MessageBody,
{
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
}
