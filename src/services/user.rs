//! # User Service
//!
//! Plain CRUD over the User store. Deleting a user that still has orders is refused by the
//! store and surfaces as [`ServiceError::DatabaseIntegrityViolation`].

use crate::model::User;
use crate::services::CrudService;
use resource_store::SharedRepository;

#[derive(Clone)]
pub struct UserService {
    users: SharedRepository<User>,
}

impl UserService {
    pub fn new(users: SharedRepository<User>) -> Self {
        Self { users }
    }
}

impl CrudService<User> for UserService {
    fn repository(&self) -> &SharedRepository<User> {
        &self.users
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;
    use crate::services::ServiceError;
    use resource_store::mock::MockStore;
    use resource_store::StoreError;

    fn user(id: u64, name: &str, email: &str, phone: &str, password: &str) -> User {
        let mut user = User::new(name, email, phone, password);
        user.id = Some(UserId(id));
        user
    }

    fn maria() -> User {
        user(1, "Maria Brown", "maria@gmail.com", "988888888", "123456")
    }

    fn alex() -> User {
        user(2, "Alex Green", "alex@gmail.com", "977777777", "1234567")
    }

    #[tokio::test]
    async fn find_all_returns_every_user() {
        let mock = MockStore::<User>::new();
        mock.expect_find_all().return_ok(vec![maria(), alex()]);
        let service = UserService::new(mock.shared());

        let users = service.find_all().await.unwrap();

        assert_eq!(users, vec![maria(), alex()]);
        mock.verify();
    }

    #[tokio::test]
    async fn find_all_propagates_an_unavailable_store() {
        let mock = MockStore::<User>::new();
        mock.expect_find_all().return_err(StoreError::ActorClosed);
        let service = UserService::new(mock.shared());

        assert_eq!(
            service.find_all().await,
            Err(ServiceError::Store(StoreError::ActorClosed))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn find_by_id_returns_the_stored_user() {
        let mock = MockStore::<User>::new();
        mock.expect_find_by_id(UserId(1)).return_ok(Some(maria()));
        let service = UserService::new(mock.shared());

        let found = service.find_by_id(UserId(1)).await.unwrap();

        assert_eq!(found, maria());
        assert_eq!(found.email, "maria@gmail.com");
        mock.verify();
    }

    #[tokio::test]
    async fn find_by_id_of_unknown_id_is_not_found() {
        let mock = MockStore::<User>::new();
        mock.expect_find_by_id(UserId(9)).return_ok(None);
        let service = UserService::new(mock.shared());

        let err = service.find_by_id(UserId(9)).await.unwrap_err();

        assert_eq!(err, ServiceError::not_found("User", 9));
        assert_eq!(err.to_string(), "Resource not found. Id 9");
        mock.verify();
    }

    #[tokio::test]
    async fn insert_saves_a_transient_user() {
        let mock = MockStore::<User>::new();
        mock.expect_save().assign_id(UserId(1));
        let service = UserService::new(mock.shared());

        let saved = service
            .insert(Some(User::new(
                "Maria Brown",
                "maria@gmail.com",
                "988888888",
                "123456",
            )))
            .await
            .unwrap();

        assert_eq!(saved, maria());
        assert_eq!(mock.saved()[0].id, None);
        mock.verify();
    }

    #[tokio::test]
    async fn insert_of_nothing_fails_before_touching_the_store() {
        let mock = MockStore::<User>::new();
        let service = UserService::new(mock.shared());

        let err = service.insert(None).await.unwrap_err();

        assert!(matches!(err, ServiceError::PreconditionFailure(_)));
        assert!(mock.saved().is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn insert_rejects_a_user_that_already_has_an_id() {
        let mock = MockStore::<User>::new();
        let service = UserService::new(mock.shared());

        let err = service.insert(Some(maria())).await.unwrap_err();

        assert!(matches!(err, ServiceError::PreconditionFailure(_)));
        mock.verify();
    }

    #[tokio::test]
    async fn update_merges_onto_the_stored_user() {
        let mock = MockStore::<User>::new();
        mock.expect_find_by_id(UserId(1)).return_ok(Some(maria()));
        mock.expect_save().echo();
        let service = UserService::new(mock.shared());

        let replacement = User::new("Maria Green", "maria@gmail.com", "988888888", "");
        let updated = service.update(UserId(1), Some(replacement)).await.unwrap();

        assert_eq!(updated.id, Some(UserId(1)));
        assert_eq!(updated.name, "Maria Green");
        assert_eq!(updated.email, "maria@gmail.com");
        assert_eq!(updated.phone, "988888888");
        assert_eq!(updated.password, "123456");
        mock.verify();
    }

    #[tokio::test]
    async fn update_with_nothing_fails_before_touching_the_store() {
        let mock = MockStore::<User>::new();
        let service = UserService::new(mock.shared());

        let err = service.update(UserId(1), None).await.unwrap_err();

        assert!(matches!(err, ServiceError::PreconditionFailure(_)));
        mock.verify();
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let mock = MockStore::<User>::new();
        mock.expect_find_by_id(UserId(4)).return_ok(None);
        let service = UserService::new(mock.shared());

        let err = service.update(UserId(4), Some(alex())).await.unwrap_err();

        assert_eq!(err, ServiceError::not_found("User", 4));
        assert!(mock.saved().is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn delete_checks_existence_first() {
        let mock = MockStore::<User>::new();
        mock.expect_exists_by_id(UserId(1)).return_ok(false);
        let service = UserService::new(mock.shared());

        assert_eq!(
            service.delete(UserId(1)).await,
            Err(ServiceError::not_found("User", 1))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn delete_of_referenced_user_is_an_integrity_violation() {
        let mock = MockStore::<User>::new();
        mock.expect_exists_by_id(UserId(1)).return_ok(true);
        mock.expect_delete_by_id(UserId(1))
            .return_err(StoreError::integrity("User 1 is referenced by 2 order(s)"));
        let service = UserService::new(mock.shared());

        let err = service.delete(UserId(1)).await.unwrap_err();

        assert!(matches!(err, ServiceError::DatabaseIntegrityViolation(_)));
        assert_eq!(err.status_code(), 400);
        mock.verify();
    }

    #[tokio::test]
    async fn delete_removes_an_existing_user() {
        let mock = MockStore::<User>::new();
        mock.expect_exists_by_id(UserId(2)).return_ok(true);
        mock.expect_delete_by_id(UserId(2)).return_ok(());
        let service = UserService::new(mock.shared());

        service.delete(UserId(2)).await.unwrap();
        mock.verify();
    }
}
