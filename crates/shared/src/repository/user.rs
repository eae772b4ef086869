use async_trait::async_trait;
use chrono::Utc;
use sea_query::{Asterisk, Expr, Func, Order, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

use crate::{
    abstract_trait::UserRepositoryTrait,
    config::ConnectionPool,
    domain::{
        context::Role,
        request::user::{NewUser, UserChanges},
    },
    model::user::User,
    schema::{saldo::Saldo, user::Users},
    utils::AppError,
};

const USER_COLUMNS: [Users; 7] = [
    Users::UserId,
    Users::Username,
    Users::Password,
    Users::Role,
    Users::Status,
    Users::CreatedAt,
    Users::UpdatedAt,
];

pub struct UserRepository {
    db_pool: ConnectionPool,
}

impl UserRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        info!("Getting all users");

        let (sql, values) = Query::select()
            .columns(USER_COLUMNS)
            .from(Users::Table)
            .order_by(Users::UserId, Order::Asc)
            .build_sqlx(PostgresQueryBuilder);

        let users = sqlx::query_as_with::<_, User, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error fetching users: {e}");
                AppError::SqlxError(e)
            })?;

        info!("Found {} users", users.len());

        Ok(users)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        info!("Finding user by id: {id}");

        let (sql, values) = Query::select()
            .columns(USER_COLUMNS)
            .from(Users::Table)
            .and_where(Expr::col(Users::UserId).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        let user = sqlx::query_as_with::<_, User, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        info!("Finding user by username: {username}");

        let (sql, values) = Query::select()
            .columns(USER_COLUMNS)
            .from(Users::Table)
            .and_where(Expr::col(Users::Username).eq(username))
            .build_sqlx(PostgresQueryBuilder);

        let user = sqlx::query_as_with::<_, User, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(user)
    }

    async fn username_taken(
        &self,
        username: &str,
        except_id: Option<i32>,
    ) -> Result<bool, AppError> {
        let mut query = Query::select();
        query
            .expr(Func::count(Expr::col(Asterisk)))
            .from(Users::Table)
            .and_where(Expr::col(Users::Username).eq(username));

        if let Some(id) = except_id {
            query.and_where(Expr::col(Users::UserId).ne(id));
        }

        let (sql, values) = query.build_sqlx(PostgresQueryBuilder);

        let (count,): (i64,) = sqlx::query_as_with(&sql, values)
            .fetch_one(&self.db_pool)
            .await?;

        Ok(count > 0)
    }

    async fn count_owners(&self) -> Result<i64, AppError> {
        let (sql, values) = Query::select()
            .expr(Func::count(Expr::col(Asterisk)))
            .from(Users::Table)
            .and_where(Expr::col(Users::Role).eq(Role::Owner.as_str()))
            .build_sqlx(PostgresQueryBuilder);

        let (count,): (i64,) = sqlx::query_as_with(&sql, values)
            .fetch_one(&self.db_pool)
            .await?;

        Ok(count)
    }

    async fn create_user(&self, input: &NewUser) -> Result<User, AppError> {
        info!("Creating {} account: {}", input.role, input.username);

        let now = Utc::now().naive_utc();
        let mut tx = self.db_pool.begin().await?;

        let (sql, values) = Query::insert()
            .into_table(Users::Table)
            .columns([
                Users::Username,
                Users::Password,
                Users::Role,
                Users::Status,
                Users::CreatedAt,
                Users::UpdatedAt,
            ])
            .values([
                input.username.clone().into(),
                input.password_hash.clone().into(),
                input.role.as_str().into(),
                input.status.as_str().into(),
                now.into(),
                now.into(),
            ])?
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let user = sqlx::query_as_with::<_, User, _>(&sql, values)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::from_constraint(e, "Username already exists"))?;

        // setiap user baru langsung punya baris saldo 0
        let (sql, values) = Query::insert()
            .into_table(Saldo::Table)
            .columns([
                Saldo::UserId,
                Saldo::TotalSaldo,
                Saldo::CreatedAt,
                Saldo::UpdatedAt,
            ])
            .values([user.user_id.into(), 0i64.into(), now.into(), now.into()])?
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        info!("User created with ID: {}", user.user_id);

        Ok(user)
    }

    async fn update_user(&self, id: i32, input: &UserChanges) -> Result<User, AppError> {
        info!("Updating user ID {id}");

        let mut query = Query::update();
        query
            .table(Users::Table)
            .value(Users::Username, input.username.clone())
            .value(Users::Role, input.role.as_str())
            .value(Users::Status, input.status.as_str())
            .value(Users::UpdatedAt, Utc::now().naive_utc())
            .and_where(Expr::col(Users::UserId).eq(id));

        if let Some(password_hash) = &input.password_hash {
            query.value(Users::Password, password_hash.clone());
        }

        let (sql, values) = query.returning_all().build_sqlx(PostgresQueryBuilder);

        let user = sqlx::query_as_with::<_, User, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| AppError::from_constraint(e, "Username already exists"))?
            .ok_or_else(|| AppError::NotFound(format!("User with id {id} not found")))?;

        info!("User updated with ID: {id}");

        Ok(user)
    }

    async fn delete_user(&self, id: i32) -> Result<(), AppError> {
        let (sql, values) = Query::delete()
            .from_table(Users::Table)
            .and_where(Expr::col(Users::UserId).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Failed to delete user {id}: {e}");
                AppError::from_constraint(
                    e,
                    "User still has transactions; deactivate the account instead",
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {id} not found")));
        }

        info!("User {id} deleted");

        Ok(())
    }
}
