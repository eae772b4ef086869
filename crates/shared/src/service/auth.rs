use async_trait::async_trait;
use opentelemetry::KeyValue;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    abstract_trait::{
        AuthServiceTrait, DynActivityLogService, DynHashing, DynJwtService, DynUserRepository,
    },
    domain::{
        context::{ClientMeta, UserStatus},
        request::{LogAction, NewActivityLog, auth::LoginRequest},
        response::{ApiResponse, ErrorResponse, auth::LoginResponse, user::UserResponse},
    },
    utils::{AppError, Method, Metrics, Observer},
};

#[derive(Clone)]
pub struct AuthService {
    repository: DynUserRepository,
    hashing: DynHashing,
    jwt_config: DynJwtService,
    activity_log: DynActivityLogService,
    observer: Observer,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("repository", &"DynUserRepository")
            .field("hashing", &"Hashing")
            .field("jwt_config", &"JwtConfig")
            .finish()
    }
}

impl AuthService {
    pub fn new(
        repository: DynUserRepository,
        hashing: DynHashing,
        jwt_config: DynJwtService,
        activity_log: DynActivityLogService,
        metrics: Arc<Mutex<Metrics>>,
    ) -> Self {
        Self {
            repository,
            hashing,
            jwt_config,
            activity_log,
            observer: Observer::new("auth-service", metrics),
        }
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn login_user(
        &self,
        input: &LoginRequest,
        client: ClientMeta,
    ) -> Result<ApiResponse<LoginResponse>, ErrorResponse> {
        let method = Method::Post;
        let tracing_ctx = self.observer.start(
            "LoginUser",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.username", input.username.clone()),
            ],
        );

        let result = async {
            // username salah dan password salah harus terlihat sama
            let user = self
                .repository
                .find_by_username(&input.username)
                .await?
                .ok_or(AppError::InvalidCredentials)?;

            self.hashing
                .compare_password(&user.password, &input.password)
                .await?;

            if user.status.parse::<UserStatus>()? != UserStatus::Aktif {
                warn!("Login refused for inactive user {}", user.username);
                return Err(AppError::Forbidden("Account is inactive".to_string()));
            }

            let token = self.jwt_config.generate_token(&user)?;

            self.activity_log
                .record(
                    NewActivityLog::for_user(user.user_id, &client, LogAction::Login, "users")
                        .record(user.user_id),
                )
                .await;

            info!("User {} logged in", user.username);

            Ok::<_, AppError>(ApiResponse::success(
                "Login successful",
                LoginResponse {
                    token,
                    user: UserResponse::from(user),
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "User logged in")
            .await
    }

    async fn get_me(&self, id: i32) -> Result<ApiResponse<UserResponse>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self.observer.start(
            "GetMe",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.id", id.to_string()),
            ],
        );

        let result = async {
            let user = self
                .repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("User with id {id} not found")))?;

            Ok::<_, AppError>(ApiResponse::success(
                "User retrieved successfully",
                UserResponse::from(user),
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Current user retrieved")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::JwtConfig,
        service::testing::{FakeUserRepository, PlainHashing, RecordingActivityLog, metrics, user},
    };
    use axum::http::StatusCode;

    fn service(activity_log: Arc<RecordingActivityLog>) -> AuthService {
        let repository = Arc::new(FakeUserRepository::with(vec![
            user(1, "bos", "owner", "aktif"),
            user(2, "dina", "kasir", "nonaktif"),
        ]));

        AuthService::new(
            repository,
            Arc::new(PlainHashing),
            Arc::new(JwtConfig::new("secret")),
            activity_log,
            metrics(),
        )
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_look_the_same() {
        let service = service(Arc::default());

        let unknown = service
            .login_user(&login("nobody", "x"), ClientMeta::default())
            .await
            .unwrap_err();
        let wrong = service
            .login_user(&login("bos", "x"), ClientMeta::default())
            .await
            .unwrap_err();

        assert_eq!(unknown.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.message, wrong.message);
    }

    #[tokio::test]
    async fn inactive_account_is_refused_after_password_check() {
        let service = service(Arc::default());

        let err = service
            .login_user(&login("dina", "dina-pw"), ClientMeta::default())
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.message, "Account is inactive");
    }

    #[tokio::test]
    async fn successful_login_is_logged() {
        let activity_log = Arc::new(RecordingActivityLog::default());
        let service = service(activity_log.clone());

        let response = service
            .login_user(&login("bos", "bos-pw"), ClientMeta::default())
            .await
            .unwrap();

        assert!(!response.data.token.is_empty());
        assert_eq!(response.data.user.id, 1);
        assert_eq!(activity_log.actions(), vec!["LOGIN:users"]);
    }
}
