use async_trait::async_trait;
use opentelemetry::KeyValue;
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    abstract_trait::{DynActivityLogService, DynHashing, DynUserRepository, UserServiceTrait},
    cache::CacheStore,
    domain::{
        context::{RequestContext, Role, UserStatus},
        request::{
            CreateUserRequest, LogAction, NewActivityLog, UpdateUserRequest,
            user::{NewUser, UserChanges},
        },
        response::{ApiResponse, ErrorResponse, user::UserResponse},
    },
    utils::{AppError, Method, Metrics, Observer},
};

const USERS_CACHE_KEY: &str = "users:all";
const USERS_CACHE_TTL: Duration = Duration::from_secs(60 * 5);

#[derive(Clone)]
pub struct UserService {
    repository: DynUserRepository,
    hashing: DynHashing,
    activity_log: DynActivityLogService,
    cache_store: Arc<CacheStore>,
    observer: Observer,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("repository", &"DynUserRepository")
            .field("cache_store", &self.cache_store)
            .finish()
    }
}

impl UserService {
    pub fn new(
        repository: DynUserRepository,
        hashing: DynHashing,
        activity_log: DynActivityLogService,
        cache_store: Arc<CacheStore>,
        metrics: Arc<Mutex<Metrics>>,
    ) -> Self {
        Self {
            repository,
            hashing,
            activity_log,
            cache_store,
            observer: Observer::new("user-service", metrics),
        }
    }

    async fn ensure_username_free(
        &self,
        username: &str,
        except_id: Option<i32>,
    ) -> Result<(), AppError> {
        if self.repository.username_taken(username, except_id).await? {
            return Err(AppError::UsernameAlreadyExists);
        }
        Ok(())
    }

    async fn hash(&self, password: &str) -> Result<String, AppError> {
        Ok(self.hashing.hash_password(password).await?)
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn get_users(
        &self,
        ctx: &RequestContext,
    ) -> Result<ApiResponse<Vec<UserResponse>>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self
            .observer
            .start("GetUsers", vec![KeyValue::new("component", "user")]);

        let result = async {
            ctx.ensure_owner()?;

            if let Some(cached) = self
                .cache_store
                .get_from_cache::<Vec<UserResponse>>(USERS_CACHE_KEY)
                .await
            {
                info!("Found users in cache");
                return Ok(ApiResponse::success("Users retrieved from cache", cached));
            }

            let users: Vec<UserResponse> = self
                .repository
                .find_all()
                .await?
                .into_iter()
                .map(UserResponse::from)
                .collect();

            self.cache_store
                .set_to_cache(USERS_CACHE_KEY, &users, USERS_CACHE_TTL)
                .await;

            Ok::<_, AppError>(ApiResponse::success("Users retrieved successfully", users))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Users retrieved")
            .await
    }

    async fn create_user(
        &self,
        ctx: &RequestContext,
        input: &CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ErrorResponse> {
        let method = Method::Post;
        let tracing_ctx = self.observer.start(
            "CreateUser",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user.username", input.username.clone()),
                KeyValue::new("user.role", input.role.as_str()),
            ],
        );

        let result = async {
            ctx.ensure_owner()?;
            self.ensure_username_free(&input.username, None).await?;

            let new_user = NewUser {
                username: input.username.clone(),
                password_hash: self.hash(&input.password).await?,
                role: input.role,
                status: input.status.unwrap_or(UserStatus::Aktif),
            };

            let user = UserResponse::from(self.repository.create_user(&new_user).await?);

            self.cache_store.delete_from_cache(USERS_CACHE_KEY).await;
            self.activity_log
                .record(
                    NewActivityLog::new(ctx, LogAction::Insert, "users")
                        .record(user.id)
                        .new_values(&user),
                )
                .await;

            Ok::<_, AppError>(ApiResponse::success("User created successfully", user))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "User created")
            .await
    }

    async fn update_user(
        &self,
        ctx: &RequestContext,
        id: i32,
        input: &UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ErrorResponse> {
        let method = Method::Put;
        let tracing_ctx = self.observer.start(
            "UpdateUser",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user.id", id.to_string()),
            ],
        );

        let result = async {
            ctx.ensure_owner()?;

            let old = self
                .repository
                .find_by_id(id)
                .await?
                .map(UserResponse::from)
                .ok_or_else(|| AppError::NotFound(format!("User with id {id} not found")))?;

            self.ensure_username_free(&input.username, Some(id)).await?;

            let password_hash = match input.new_password() {
                Some(password) => Some(self.hash(password).await?),
                None => None,
            };

            let changes = UserChanges {
                username: input.username.clone(),
                role: input.role,
                status: input.status,
                password_hash,
            };

            let user = UserResponse::from(self.repository.update_user(id, &changes).await?);

            self.cache_store.delete_from_cache(USERS_CACHE_KEY).await;
            self.activity_log
                .record(
                    NewActivityLog::new(ctx, LogAction::Update, "users")
                        .record(id)
                        .old_values(&old)
                        .new_values(&user),
                )
                .await;

            Ok::<_, AppError>(ApiResponse::success("User updated successfully", user))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "User updated")
            .await
    }

    async fn delete_user(
        &self,
        ctx: &RequestContext,
        id: i32,
    ) -> Result<ApiResponse<()>, ErrorResponse> {
        let method = Method::Delete;
        let tracing_ctx = self.observer.start(
            "DeleteUser",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user.id", id.to_string()),
            ],
        );

        let result = async {
            ctx.ensure_owner()?;

            if id == ctx.user_id {
                return Err(AppError::BadRequest(
                    "You cannot delete your own account".to_string(),
                ));
            }

            let old = self
                .repository
                .find_by_id(id)
                .await?
                .map(UserResponse::from)
                .ok_or_else(|| AppError::NotFound(format!("User with id {id} not found")))?;

            self.repository.delete_user(id).await?;

            self.cache_store.delete_from_cache(USERS_CACHE_KEY).await;
            self.activity_log
                .record(
                    NewActivityLog::new(ctx, LogAction::Delete, "users")
                        .record(id)
                        .old_values(&old),
                )
                .await;

            Ok::<_, AppError>(ApiResponse::success("User deleted successfully", ()))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "User deleted")
            .await
    }

    async fn bootstrap_owner(&self, username: &str, password: &str) -> Result<bool, AppError> {
        if self.repository.count_owners().await? > 0 {
            return Ok(false);
        }

        let new_user = NewUser {
            username: username.to_string(),
            password_hash: self.hash(password).await?,
            role: Role::Owner,
            status: UserStatus::Aktif,
        };

        let user = self.repository.create_user(&new_user).await?;
        info!("Bootstrapped owner account {}", user.username);

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{
        FakeUserRepository, PlainHashing, RecordingActivityLog, ctx, metrics, user,
    };
    use axum::http::StatusCode;

    fn service(repository: Arc<FakeUserRepository>) -> UserService {
        UserService::new(
            repository,
            Arc::new(PlainHashing),
            Arc::new(RecordingActivityLog::default()),
            Arc::new(CacheStore::disabled()),
            metrics(),
        )
    }

    fn create_request(username: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.into(),
            password: "rahasia1".into(),
            role: Role::Kasir,
            status: None,
        }
    }

    #[tokio::test]
    async fn kasir_cannot_manage_users() {
        let service = service(Arc::new(FakeUserRepository::default()));

        let err = service
            .create_user(&ctx(Role::Kasir, 2), &create_request("eka"))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let repository = Arc::new(FakeUserRepository::with(vec![user(
            1, "bos", "owner", "aktif",
        )]));
        let service = service(repository);

        let err = service
            .create_user(&ctx(Role::Owner, 1), &create_request("bos"))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn owner_cannot_delete_themselves() {
        let repository = Arc::new(FakeUserRepository::with(vec![user(
            1, "bos", "owner", "aktif",
        )]));
        let service = service(repository.clone());

        let err = service
            .delete_user(&ctx(Role::Owner, 1), 1)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(repository.users.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn bootstrap_runs_only_once() {
        let repository = Arc::new(FakeUserRepository::default());
        let service = service(repository.clone());

        assert!(service.bootstrap_owner("bos", "rahasia").await.unwrap());
        assert!(!service.bootstrap_owner("bos2", "rahasia").await.unwrap());

        let users = repository.users.lock().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, "owner");
        assert_eq!(users[0].password, "hashed:rahasia");
    }
}
