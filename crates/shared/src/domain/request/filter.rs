use chrono::NaiveDate;
use sea_query::{Condition, Expr, SimpleExpr};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

pub const MAX_PAGE_SIZE: i32 = 100;

pub(crate) fn default_page() -> i32 {
    1
}

pub(crate) fn default_limit() -> i32 {
    10
}

/// Inclusive date window. Either bound may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn condition(&self, column: SimpleExpr) -> Condition {
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                Condition::all().add(Expr::expr(column).between(start, end))
            }
            (Some(start), None) => Condition::all().add(Expr::expr(column).gte(start)),
            (None, Some(end)) => Condition::all().add(Expr::expr(column).lte(end)),
            (None, None) => Condition::all(),
        }
    }
}

/// Clamped page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i32,
    pub limit: i32,
}

impl PageWindow {
    pub fn new(page: i32, limit: i32) -> Self {
        let page = if page > 0 { page } else { 1 };
        let limit = if limit > 0 {
            limit.min(MAX_PAGE_SIZE)
        } else {
            default_limit()
        };

        Self { page, limit }
    }

    pub fn offset(&self) -> u64 {
        ((self.page - 1) as u64) * self.limit as u64
    }

    pub fn total_pages(&self, total_items: i64) -> i32 {
        ((total_items + self.limit as i64 - 1) / self.limit as i64) as i32
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, IntoParams)]
pub struct ScopeQuery {
    /// Owner only; `all` or a cashier's user id.
    pub cashier_id: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Owner only; `all` or a cashier's user id.
    #[serde(rename = "cashier_id")]
    pub cashier_id: Option<String>,
}

impl DateRangeQuery {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_query::{Alias, PostgresQueryBuilder, Query};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sql_for(range: DateRange) -> String {
        Query::select()
            .column(Alias::new("id"))
            .from(Alias::new("transfer"))
            .cond_where(range.condition(Expr::col(Alias::new("tanggal")).into()))
            .to_string(PostgresQueryBuilder)
    }

    #[test]
    fn date_range_handles_each_bound_combination() {
        let both = sql_for(DateRange::new(Some(date(2025, 6, 1)), Some(date(2025, 6, 30))));
        assert!(both.contains(r#""tanggal" BETWEEN '2025-06-01' AND '2025-06-30'"#));

        let start = sql_for(DateRange::new(Some(date(2025, 6, 1)), None));
        assert!(start.contains(r#""tanggal" >= '2025-06-01'"#));

        let end = sql_for(DateRange::new(None, Some(date(2025, 6, 30))));
        assert!(end.contains(r#""tanggal" <= '2025-06-30'"#));

        let none = sql_for(DateRange::default());
        assert!(!none.contains(r#""tanggal""#));
    }

    #[test]
    fn page_window_is_clamped() {
        let window = PageWindow::new(0, 0);
        assert_eq!(window, PageWindow { page: 1, limit: 10 });
        assert_eq!(window.offset(), 0);

        let window = PageWindow::new(3, 500);
        assert_eq!(window.limit, MAX_PAGE_SIZE);
        assert_eq!(window.offset(), 200);

        assert_eq!(PageWindow::new(1, 10).total_pages(0), 0);
        assert_eq!(PageWindow::new(1, 10).total_pages(21), 3);
    }
}
