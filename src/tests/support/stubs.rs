use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::demo::application::domain::entities::{Demo, DemoId, DemoStatus};
use crate::demo::application::ports::outgoing::{
    DemoChanges, DemoRepository, DemoRepositoryError, DemoSearch, NewDemo,
};
use crate::shared::crud::PatchField;
use crate::user::application::domain::entities::{User, UserId};
use crate::user::application::ports::outgoing::{
    HashError, NewUser, PasswordHasher, UniqueField, UserChanges, UserRepository,
    UserRepositoryError,
};

fn lock<T>(rows: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
    rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn window<T>(rows: Vec<T>, skip: u64, limit: u64) -> Vec<T> {
    rows.into_iter()
        .skip(skip as usize)
        .take(limit as usize)
        .collect()
}

// ============================================================
// Password hashing
// ============================================================

/// Stores `plain:{password}` so tests can assert on the stored hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextHasher;

#[async_trait]
impl PasswordHasher for PlainTextHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(format!("plain:{password}"))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(hash.strip_prefix("plain:") == Some(password))
    }
}

// ============================================================
// Users
// ============================================================

/// Shared-state user store. Clones see the same rows.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn get(&self, id: i64) -> Option<User> {
        lock(&self.users)
            .iter()
            .find(|u| u.id.value() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.users).len()
    }

    fn clashes(
        users: &[User],
        id: Option<UserId>,
        email: &str,
        username: Option<&str>,
    ) -> Option<UniqueField> {
        let others: Vec<&User> = users.iter().filter(|u| Some(u.id) != id).collect();
        if others.iter().any(|u| u.email == email) {
            return Some(UniqueField::Email);
        }
        if username.is_some() && others.iter().any(|u| u.username.as_deref() == username) {
            return Some(UniqueField::Username);
        }
        None
    }

    fn modify(&self, id: UserId, f: impl FnOnce(&mut User)) -> Option<User> {
        let mut users = lock(&self.users);
        let user = users.iter_mut().find(|u| u.id == id)?;
        f(user);
        user.updated_at = Utc::now();
        Some(user.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.get(id.value()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        Ok(lock(&self.users).iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(lock(&self.users)
            .iter()
            .find(|u| u.username.as_deref() == Some(username))
            .cloned())
    }

    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<User>, UserRepositoryError> {
        let mut users = lock(&self.users).clone();
        users.sort_by_key(|u| u.id.value());
        Ok(window(users, skip, limit))
    }

    async fn count(&self) -> Result<u64, UserRepositoryError> {
        Ok(self.len() as u64)
    }

    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let mut users = lock(&self.users);
        if let Some(field) = Self::clashes(&users, None, &user.email, user.username.as_deref()) {
            return Err(UserRepositoryError::Duplicate(field));
        }

        let now = Utc::now();
        let id = users.iter().map(|u| u.id.value()).max().unwrap_or(0) + 1;
        let created = User {
            id: UserId::from(id),
            email: user.email,
            username: user.username,
            hashed_password: user.hashed_password,
            full_name: user.full_name,
            phone: user.phone,
            avatar: None,
            bio: None,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            is_verified: user.is_verified,
            is_deleted: false,
            last_login_at: None,
            login_count: 0,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<Option<User>, UserRepositoryError> {
        {
            let users = lock(&self.users);
            let Some(current) = users.iter().find(|u| u.id == id) else {
                return Ok(None);
            };
            let email = changes.email.as_deref().unwrap_or(&current.email);
            let username = match &changes.username {
                PatchField::Value(name) => Some(name.as_str()),
                _ => None,
            };
            if let Some(field) = Self::clashes(&users, Some(id), email, username) {
                return Err(UserRepositoryError::Duplicate(field));
            }
        }

        Ok(self.modify(id, |user| {
            if let Some(email) = changes.email {
                user.email = email;
            }
            if let Some(username) = changes.username.into_change() {
                user.username = username;
            }
            if let Some(full_name) = changes.full_name.into_change() {
                user.full_name = full_name;
            }
            if let Some(phone) = changes.phone.into_change() {
                user.phone = phone;
            }
            if let Some(avatar) = changes.avatar.into_change() {
                user.avatar = avatar;
            }
            if let Some(bio) = changes.bio.into_change() {
                user.bio = bio;
            }
            if let Some(is_active) = changes.is_active {
                user.is_active = is_active;
            }
            if let Some(is_superuser) = changes.is_superuser {
                user.is_superuser = is_superuser;
            }
            if let Some(is_verified) = changes.is_verified {
                user.is_verified = is_verified;
            }
        }))
    }

    async fn update_password(
        &self,
        id: UserId,
        hashed_password: String,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.modify(id, |user| user.hashed_password = hashed_password))
    }

    async fn record_login(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.modify(id, |user| {
            user.last_login_at = Some(Utc::now());
            user.login_count = user.login_count.saturating_add(1);
        }))
    }
}

// ============================================================
// Demos
// ============================================================

/// Shared-state demo store with the same visibility rules as the SQL adapter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDemoRepository {
    demos: Arc<Mutex<Vec<Demo>>>,
}

impl InMemoryDemoRepository {
    pub fn with_demos(demos: Vec<Demo>) -> Self {
        Self {
            demos: Arc::new(Mutex::new(demos)),
        }
    }

    pub fn get(&self, id: i64) -> Option<Demo> {
        lock(&self.demos)
            .iter()
            .find(|d| d.id.value() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.demos).len()
    }

    fn matching(&self, criteria: &DemoSearch) -> Vec<Demo> {
        let mut found: Vec<Demo> = lock(&self.demos)
            .iter()
            .filter(|d| !d.is_deleted)
            .filter(|d| criteria.name.as_deref().map_or(true, |n| d.name.contains(n)))
            .filter(|d| criteria.status.map_or(true, |s| d.status == s))
            .filter(|d| criteria.is_featured.map_or(true, |f| d.is_featured == f))
            .filter(|d| criteria.owner_id.map_or(true, |o| d.owner_id == o))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.priority.cmp(&a.priority));
        found
    }

    fn name_in_use(demos: &[Demo], name: &str, except: Option<DemoId>) -> bool {
        demos
            .iter()
            .any(|d| !d.is_deleted && d.name == name && Some(d.id) != except)
    }
}

#[async_trait]
impl DemoRepository for InMemoryDemoRepository {
    async fn find_by_id(&self, id: DemoId) -> Result<Option<Demo>, DemoRepositoryError> {
        Ok(self.get(id.value()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Demo>, DemoRepositoryError> {
        Ok(lock(&self.demos)
            .iter()
            .find(|d| !d.is_deleted && d.name == name)
            .cloned())
    }

    async fn search(
        &self,
        criteria: &DemoSearch,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Demo>, DemoRepositoryError> {
        Ok(window(self.matching(criteria), skip, limit))
    }

    async fn count(&self, criteria: &DemoSearch) -> Result<u64, DemoRepositoryError> {
        Ok(self.matching(criteria).len() as u64)
    }

    async fn list_by_owner(
        &self,
        owner_id: UserId,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Demo>, DemoRepositoryError> {
        self.search(&DemoSearch::owned_by(owner_id), skip, limit)
            .await
    }

    async fn list_featured(&self, skip: u64, limit: u64) -> Result<Vec<Demo>, DemoRepositoryError> {
        self.search(&DemoSearch::featured(), skip, limit).await
    }

    async fn count_by_status(&self, status: DemoStatus) -> Result<u64, DemoRepositoryError> {
        self.count(&DemoSearch::with_status(status)).await
    }

    async fn create(&self, demo: NewDemo) -> Result<Demo, DemoRepositoryError> {
        let mut demos = lock(&self.demos);
        if Self::name_in_use(&demos, &demo.name, None) {
            return Err(DemoRepositoryError::Duplicate);
        }

        let now = Utc::now();
        let id = demos.iter().map(|d| d.id.value()).max().unwrap_or(0) + 1;
        let created = Demo {
            id: DemoId::from(id),
            name: demo.name,
            description: demo.description,
            status: demo.status,
            priority: demo.priority,
            is_featured: demo.is_featured,
            owner_id: demo.owner_id,
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        demos.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: DemoId,
        changes: DemoChanges,
    ) -> Result<Option<Demo>, DemoRepositoryError> {
        let mut demos = lock(&self.demos);
        if let Some(name) = &changes.name {
            if Self::name_in_use(&demos, name, Some(id)) {
                return Err(DemoRepositoryError::Duplicate);
            }
        }

        let Some(demo) = demos.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            demo.name = name;
        }
        if let Some(description) = changes.description.into_change() {
            demo.description = description;
        }
        if let Some(status) = changes.status {
            demo.status = status;
        }
        if let Some(priority) = changes.priority {
            demo.priority = priority;
        }
        if let Some(is_featured) = changes.is_featured {
            demo.is_featured = is_featured;
        }
        demo.updated_at = Utc::now();
        Ok(Some(demo.clone()))
    }

    async fn soft_delete(&self, id: DemoId) -> Result<Option<Demo>, DemoRepositoryError> {
        let mut demos = lock(&self.demos);
        let Some(demo) = demos.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        let now = Utc::now();
        demo.is_deleted = true;
        demo.deleted_at = Some(now);
        demo.updated_at = now;
        Ok(Some(demo.clone()))
    }
}
