use async_trait::async_trait;
use chrono::Utc;
use sea_query::{Alias, Asterisk, Condition, Expr, Func, Order, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

use crate::{
    abstract_trait::ActivityLogRepositoryTrait,
    config::ConnectionPool,
    domain::request::{FindAllLogRequest, NewActivityLog},
    model::activity_log::ActivityLog,
    schema::{activity_log::Logs, user::Users},
    utils::AppError,
};

fn log_filter(filter: &FindAllLogRequest) -> Condition {
    let created_on = Func::cust(Alias::new("DATE")).arg(Expr::col((Logs::Table, Logs::CreatedAt)));

    let mut cond = Condition::all().add(filter.range().condition(created_on.into()));

    if let Some(action) = filter.action.as_deref().filter(|a| !a.is_empty()) {
        cond = cond.add(Expr::col((Logs::Table, Logs::Action)).eq(action.to_uppercase()));
    }

    if let Some(table_name) = filter.table_name.as_deref().filter(|t| !t.is_empty()) {
        cond = cond.add(Expr::col((Logs::Table, Logs::TableName)).eq(table_name));
    }

    if let Some(user_id) = filter.user_id {
        cond = cond.add(Expr::col((Logs::Table, Logs::UserId)).eq(user_id));
    }

    cond
}

pub struct ActivityLogRepository {
    db_pool: ConnectionPool,
}

impl ActivityLogRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ActivityLogRepositoryTrait for ActivityLogRepository {
    async fn create(&self, entry: &NewActivityLog) -> Result<(), AppError> {
        let (sql, values) = Query::insert()
            .into_table(Logs::Table)
            .columns([
                Logs::UserId,
                Logs::Action,
                Logs::TableName,
                Logs::RecordId,
                Logs::OldValues,
                Logs::NewValues,
                Logs::IpAddress,
                Logs::UserAgent,
                Logs::CreatedAt,
            ])
            .values([
                entry.user_id.into(),
                entry.action.as_str().into(),
                entry.table_name.clone().into(),
                entry.record_id.into(),
                entry.old_values.clone().into(),
                entry.new_values.clone().into(),
                entry.ip_address.clone().into(),
                entry.user_agent.clone().into(),
                Utc::now().naive_utc().into(),
            ])?
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_with(&sql, values)
            .execute(&self.db_pool)
            .await
            .map_err(|e| {
                error!(
                    "Failed to write {} log for {}: {e}",
                    entry.action, entry.table_name
                );
                AppError::SqlxError(e)
            })?;

        Ok(())
    }

    async fn find_all(
        &self,
        filter: &FindAllLogRequest,
    ) -> Result<(Vec<ActivityLog>, i64), AppError> {
        let window = filter.window();
        info!(
            "Getting activity logs - page: {}, limit: {}, filter: {filter:?}",
            window.page, window.limit
        );

        let cond = log_filter(filter);

        let (sql, values) = Query::select()
            .columns([
                (Logs::Table, Logs::LogId),
                (Logs::Table, Logs::UserId),
                (Logs::Table, Logs::Action),
                (Logs::Table, Logs::TableName),
                (Logs::Table, Logs::RecordId),
                (Logs::Table, Logs::OldValues),
                (Logs::Table, Logs::NewValues),
                (Logs::Table, Logs::IpAddress),
                (Logs::Table, Logs::UserAgent),
                (Logs::Table, Logs::CreatedAt),
            ])
            .column((Users::Table, Users::Username))
            .from(Logs::Table)
            .left_join(
                Users::Table,
                Expr::col((Logs::Table, Logs::UserId)).equals((Users::Table, Users::UserId)),
            )
            .cond_where(cond.clone())
            .order_by((Logs::Table, Logs::CreatedAt), Order::Desc)
            .order_by((Logs::Table, Logs::LogId), Order::Desc)
            .limit(window.limit as u64)
            .offset(window.offset())
            .build_sqlx(PostgresQueryBuilder);

        let logs = sqlx::query_as_with::<_, ActivityLog, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error fetching activity logs: {e}");
                AppError::SqlxError(e)
            })?;

        let (count_sql, count_values) = Query::select()
            .expr(Func::count(Expr::col(Asterisk)))
            .from(Logs::Table)
            .cond_where(cond)
            .build_sqlx(PostgresQueryBuilder);

        let (total,) = sqlx::query_as_with::<_, (i64,), _>(&count_sql, count_values)
            .fetch_one(&self.db_pool)
            .await?;

        info!("Found {} logs out of total {total}", logs.len());

        Ok((logs, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_are_combined() {
        let filter: FindAllLogRequest = serde_json::from_value(serde_json::json!({
            "startDate": "2025-06-01",
            "action": "update_status",
            "table_name": "transfer",
            "user_id": 7
        }))
        .unwrap();

        let sql = Query::select()
            .column((Logs::Table, Logs::LogId))
            .from(Logs::Table)
            .cond_where(log_filter(&filter))
            .to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#"DATE("logs"."created_at") >= '2025-06-01'"#));
        assert!(sql.contains(r#""logs"."action" = 'UPDATE_STATUS'"#));
        assert!(sql.contains(r#""logs"."table_name" = 'transfer'"#));
        assert!(sql.contains(r#""logs"."user_id" = 7"#));
    }
}
