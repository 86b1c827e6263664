//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): Handles user-related use cases only.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use common::{AppError, AppResult, OptionExt};
use domain::{User, UserResponse, ID_REQUIRED};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
///
/// Every operation re-reads current state from the repository; nothing is
/// cached between calls.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user; the email must not belong to anyone yet
    async fn create_user(&self, name: String, email: String) -> AppResult<UserResponse>;

    /// Get user by ID
    async fn get_user(&self, id: &str) -> AppResult<UserResponse>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<UserResponse>>;

    /// Update name and/or email; absent fields are left alone
    async fn update_user(
        &self,
        id: &str,
        name: Option<String>,
        email: Option<String>,
    ) -> AppResult<UserResponse>;

    /// Permanently delete user
    async fn delete_user(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
///
/// Email uniqueness is a lookup followed by a separate write. Two requests
/// racing on the same address can both pass the lookup.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    fn require_id(id: &str) -> AppResult<()> {
        if id.is_empty() {
            return Err(AppError::validation(ID_REQUIRED));
        }
        Ok(())
    }

    async fn load(&self, id: &str) -> AppResult<User> {
        Self::require_id(id)?;
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<&str>) -> AppResult<()> {
        if let Some(existing) = self.repo.find_by_email(email).await? {
            if owner != Some(existing.id.as_str()) {
                warn!(email, "Rejected duplicate email");
                return Err(AppError::conflict("Email"));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, name: String, email: String) -> AppResult<UserResponse> {
        self.ensure_email_free(&email, None).await?;

        let user = User::new(name, email)?;
        self.repo.save(&user).await?;

        debug!(user_id = %user.id, "Created user");
        Ok(UserResponse::from(user))
    }

    async fn get_user(&self, id: &str) -> AppResult<UserResponse> {
        self.load(id).await.map(UserResponse::from)
    }

    async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.repo.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn update_user(
        &self,
        id: &str,
        name: Option<String>,
        email: Option<String>,
    ) -> AppResult<UserResponse> {
        let mut user = self.load(id).await?;

        if let Some(email) = email.filter(|e| *e != user.email) {
            self.ensure_email_free(&email, Some(&user.id)).await?;
            user.update_email(email)?;
        }

        if let Some(name) = name.filter(|n| *n != user.name) {
            user.update_name(name)?;
        }

        self.repo.save(&user).await?;

        debug!(user_id = %user.id, "Updated user");
        Ok(UserResponse::from(user))
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        self.load(id).await?;
        self.repo.delete(id).await?;

        debug!(user_id = id, "Deleted user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::repository::MockUserRepository;

    fn existing_user() -> User {
        User::new("Ana", "ana@x.com").unwrap()
    }

    fn service(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn create_user_saves_once() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("ana@x.com"))
            .returning(|_| Ok(None));
        repo.expect_save()
            .withf(|u| u.name == "Ana" && u.email == "ana@x.com")
            .times(1)
            .returning(|_| Ok(()));

        let created = assert_ok!(
            service(repo)
                .create_user("Ana".to_string(), "ana@x.com".to_string())
                .await
        );

        assert_eq!(created.name, "Ana");
        assert_eq!(created.email, "ana@x.com");
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn create_user_with_taken_email_does_not_write() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(existing_user())));
        repo.expect_save().never();

        let err = assert_err!(
            service(repo)
                .create_user("Bruno".to_string(), "ana@x.com".to_string())
                .await
        );

        assert!(matches!(err, AppError::Conflict(ref f) if f == "Email"));
    }

    #[tokio::test]
    async fn create_user_with_empty_fields_does_not_write() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_save().never();
        let service = service(repo);

        let err = assert_err!(
            service
                .create_user(String::new(), "ana@x.com".to_string())
                .await
        );
        assert!(matches!(err, AppError::Validation(_)));

        let err = assert_err!(service.create_user("Ana".to_string(), String::new()).await);
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn storage_failure_propagates_unchanged() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_all()
            .returning(|| Err(AppError::internal("connection refused")));

        let err = assert_err!(service(repo).list_users().await);
        assert!(matches!(err, AppError::Internal(ref m) if m == "connection refused"));
    }

    #[tokio::test]
    async fn get_user_with_empty_id_skips_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().never();

        let err = assert_err!(service(repo).get_user("").await);
        assert!(matches!(err, AppError::Validation(ref m) if m == ID_REQUIRED));
    }

    #[tokio::test]
    async fn get_user_missing_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = assert_err!(service(repo).get_user("nope").await);
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn update_with_empty_name_does_not_write() {
        let user = existing_user();
        let id = user.id.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_save().never();

        let err = assert_err!(
            service(repo)
                .update_user(&id, Some(String::new()), None)
                .await
        );
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_with_empty_email_does_not_write() {
        let user = existing_user();
        let id = user.id.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_save().never();

        let err = assert_err!(
            service(repo)
                .update_user(&id, None, Some(String::new()))
                .await
        );
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_to_email_of_another_user_conflicts() {
        let user = existing_user();
        let id = user.id.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_find_by_email()
            .with(eq("bruno@x.com"))
            .returning(|_| Ok(Some(User::new("Bruno", "bruno@x.com").unwrap())));
        repo.expect_save().never();

        let err = assert_err!(
            service(repo)
                .update_user(&id, None, Some("bruno@x.com".to_string()))
                .await
        );
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_with_unchanged_fields_skips_email_lookup() {
        let user = existing_user();
        let id = user.id.clone();
        let before = user.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_find_by_email().never();
        repo.expect_save()
            .withf(move |u| *u == before)
            .times(1)
            .returning(|_| Ok(()));

        assert_ok!(
            service(repo)
                .update_user(&id, Some("Ana".to_string()), Some("ana@x.com".to_string()))
                .await
        );
    }

    #[tokio::test]
    async fn delete_missing_user_does_not_write() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete().never();

        let err = assert_err!(service(repo).delete_user("nope").await);
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn delete_existing_user_deletes_once() {
        let user = existing_user();
        let id = user.id.clone();
        let expected = id.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_delete()
            .withf(move |id| id == expected)
            .times(1)
            .returning(|_| Ok(()));

        assert_ok!(service(repo).delete_user(&id).await);
    }
}
