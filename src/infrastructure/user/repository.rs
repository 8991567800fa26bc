//! In-memory user repository implementation

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::user::{NewUser, SafeUser, User, UserId, UserPatch, UserRepository};
use crate::domain::DomainError;

/// Records in insertion order plus the highest id ever handed out
#[derive(Debug, Default)]
struct UserStore {
    users: Vec<User>,
    last_id: u64,
}

impl UserStore {
    fn next_id(&mut self) -> UserId {
        self.last_id += 1;
        UserId::new(self.last_id)
    }

    fn find_index_by_id(&self, id: UserId) -> Option<usize> {
        self.users.iter().position(|u| u.id() == id)
    }

    fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email() == email)
    }
}

/// In-memory implementation of UserRepository
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<UserStore>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial users
    ///
    /// Ids handed out afterwards continue above the highest seeded id.
    pub fn with_users(users: Vec<User>) -> Self {
        let last_id = users.iter().map(|u| u.id().value()).max().unwrap_or(0);

        Self {
            store: Arc::new(RwLock::new(UserStore { users, last_id })),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, data: NewUser) -> Result<SafeUser, DomainError> {
        let mut store = self.store.write().await;

        let id = store.next_id();
        let user = User::new(id, data);
        let safe = user.to_safe();
        store.users.push(user);

        debug!(user_id = %id, "Stored new user");
        Ok(safe)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<SafeUser>, DomainError> {
        let store = self.store.read().await;
        Ok(store
            .find_index_by_id(id)
            .map(|index| store.users[index].to_safe()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<SafeUser>, DomainError> {
        let store = self.store.read().await;
        Ok(store.find_by_email(email).map(User::to_safe))
    }

    async fn find_record_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store
            .find_index_by_id(id)
            .map(|index| store.users[index].clone()))
    }

    async fn find_record_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.find_by_email(email).cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        let store = self.store.read().await;
        Ok(store.find_by_email(email).is_some())
    }

    async fn find_all(&self) -> Result<Vec<SafeUser>, DomainError> {
        let store = self.store.read().await;
        Ok(store.users.iter().map(User::to_safe).collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.store.read().await.users.len())
    }

    async fn update_full(
        &self,
        id: UserId,
        data: NewUser,
    ) -> Result<Option<SafeUser>, DomainError> {
        let mut store = self.store.write().await;

        let Some(index) = store.find_index_by_id(id) else {
            return Ok(None);
        };

        let user = &mut store.users[index];
        user.replace(data);
        Ok(Some(user.to_safe()))
    }

    async fn update_partial(
        &self,
        id: UserId,
        patch: UserPatch,
    ) -> Result<Option<SafeUser>, DomainError> {
        let mut store = self.store.write().await;

        let Some(index) = store.find_index_by_id(id) else {
            return Ok(None);
        };

        let user = &mut store.users[index];
        user.apply(patch);
        Ok(Some(user.to_safe()))
    }

    async fn delete(&self, id: UserId) -> Result<Option<SafeUser>, DomainError> {
        let mut store = self.store.write().await;

        let Some(index) = store.find_index_by_id(id) else {
            return Ok(None);
        };

        let removed = store.users.remove(index);
        debug!(user_id = %id, "Removed user");
        Ok(Some(removed.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser::new(name, email, "secret1")
    }

    #[tokio::test]
    async fn test_create_and_find_by_id() {
        let repo = InMemoryUserRepository::new();

        let created = repo.create(new_user("Ann", "a@x.com")).await.unwrap();
        assert_eq!(created.id, UserId::new(1));

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(new_user("Ann", "a@x.com")).await.unwrap();
        let second = repo.create(new_user("Bob", "b@x.com")).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_deleted_id_is_never_reused() {
        let repo = InMemoryUserRepository::new();

        repo.create(new_user("Ann", "a@x.com")).await.unwrap();
        let second = repo.create(new_user("Bob", "b@x.com")).await.unwrap();

        repo.delete(second.id).await.unwrap();
        let third = repo.create(new_user("Cid", "c@x.com")).await.unwrap();

        assert_eq!(third.id, UserId::new(3));
        assert!(repo.find_by_id(second.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_email_is_exact() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("Ann", "a@x.com")).await.unwrap();

        assert!(repo.find_by_email("a@x.com").await.unwrap().is_some());
        assert!(repo.find_by_email("A@X.COM").await.unwrap().is_none());
        assert!(repo.email_exists("a@x.com").await.unwrap());
        assert!(!repo.email_exists("missing@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_record_carries_password() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("Ann", "a@x.com")).await.unwrap();

        let by_id = repo.find_record_by_id(created.id).await.unwrap().unwrap();
        assert!(by_id.password_matches("secret1"));

        let by_email = repo.find_record_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id(), created.id);
    }

    #[tokio::test]
    async fn test_find_all_in_insertion_order() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("Ann", "a@x.com")).await.unwrap();
        repo.create(new_user("Bob", "b@x.com")).await.unwrap();
        repo.create(new_user("Cid", "c@x.com")).await.unwrap();

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();

        assert_eq!(names, vec!["Ann", "Bob", "Cid"]);
    }

    #[tokio::test]
    async fn test_count_tracks_live_users() {
        let repo = InMemoryUserRepository::new();
        assert_eq!(repo.count().await.unwrap(), 0);

        let ann = repo.create(new_user("Ann", "a@x.com")).await.unwrap();
        repo.create(new_user("Bob", "b@x.com")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);

        repo.delete(ann.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_full_preserves_id_and_created_at() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("Ann", "a@x.com")).await.unwrap();

        let updated = repo
            .update_full(created.id, NewUser::new("Annie", "annie@x.com", "newpass1"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "Annie");
        assert_eq!(updated.email, "annie@x.com");

        let record = repo.find_record_by_id(created.id).await.unwrap().unwrap();
        assert!(record.password_matches("newpass1"));
    }

    #[tokio::test]
    async fn test_update_partial_only_present_fields() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("Ann", "a@x.com")).await.unwrap();

        let updated = repo
            .update_partial(created.id, UserPatch::default().with_email("ann@y.org"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Ann");
        assert_eq!(updated.email, "ann@y.org");
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = InMemoryUserRepository::new();
        let missing = UserId::new(99);

        assert!(repo
            .update_full(missing, new_user("Ann", "a@x.com"))
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .update_partial(missing, UserPatch::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = InMemoryUserRepository::new();
        let ann = repo.create(new_user("Ann", "a@x.com")).await.unwrap();
        let bob = repo.create(new_user("Bob", "b@x.com")).await.unwrap();

        let deleted = repo.delete(ann.id).await.unwrap();
        assert_eq!(deleted, Some(ann.clone()));

        assert!(repo.delete(ann.id).await.unwrap().is_none());
        assert_eq!(repo.find_all().await.unwrap(), vec![bob]);
    }

    #[tokio::test]
    async fn test_with_users_continues_id_sequence() {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let seed = User::with_created_at(
            UserId::new(1),
            NewUser::new("Admin", "admin@email.com", "123456"),
            created_at,
        );

        let repo = InMemoryUserRepository::with_users(vec![seed]);

        let admin = repo.find_by_email("admin@email.com").await.unwrap().unwrap();
        assert_eq!(admin.created_at, created_at);

        let created = repo.create(new_user("Ann", "a@x.com")).await.unwrap();
        assert_eq!(created.id, UserId::new(2));
    }
}
