use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

use crate::utils::AppError;

/// Chart granularity. Each period covers a fixed number of buckets ending
/// with the one that contains today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChartPeriod {
    /// 7 days, one bucket per day.
    Harian,
    /// 4 weeks, one bucket per ISO week.
    Mingguan,
    /// 6 months, one bucket per month.
    Bulanan,
}

impl FromStr for ChartPeriod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "harian" => Ok(ChartPeriod::Harian),
            "mingguan" => Ok(ChartPeriod::Mingguan),
            "bulanan" => Ok(ChartPeriod::Bulanan),
            other => Err(AppError::BadRequest(format!(
                "Unknown chart period: {other}, expected harian, mingguan or bulanan"
            ))),
        }
    }
}

impl ChartPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartPeriod::Harian => "harian",
            ChartPeriod::Mingguan => "mingguan",
            ChartPeriod::Bulanan => "bulanan",
        }
    }

    /// Unit passed to Postgres `DATE_TRUNC`.
    pub fn trunc_unit(&self) -> &'static str {
        match self {
            ChartPeriod::Harian => "day",
            ChartPeriod::Mingguan => "week",
            ChartPeriod::Bulanan => "month",
        }
    }

    fn bucket_count(&self) -> u32 {
        match self {
            ChartPeriod::Harian => 7,
            ChartPeriod::Mingguan => 4,
            ChartPeriod::Bulanan => 6,
        }
    }

    /// Start of the bucket containing `date`.
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            ChartPeriod::Harian => date,
            ChartPeriod::Mingguan => date
                .checked_sub_days(Days::new(date.weekday().num_days_from_monday() as u64))
                .unwrap_or(date),
            ChartPeriod::Bulanan => date.with_day(1).unwrap_or(date),
        }
    }

    /// Every bucket start of the window ending at `today`, oldest first.
    pub fn buckets(&self, today: NaiveDate) -> Vec<NaiveDate> {
        let last = self.bucket_start(today);
        let count = self.bucket_count();

        (0..count)
            .rev()
            .filter_map(|back| match self {
                ChartPeriod::Harian => last.checked_sub_days(Days::new(back as u64)),
                ChartPeriod::Mingguan => last.checked_sub_days(Days::new(back as u64 * 7)),
                ChartPeriod::Bulanan => last.checked_sub_months(Months::new(back)),
            })
            .collect()
    }

    /// First day included in the chart.
    pub fn since(&self, today: NaiveDate) -> NaiveDate {
        self.buckets(today)
            .first()
            .copied()
            .unwrap_or_else(|| self.bucket_start(today))
    }

    pub fn label(&self, bucket: NaiveDate) -> String {
        match self {
            ChartPeriod::Harian => bucket.format("%Y-%m-%d").to_string(),
            ChartPeriod::Mingguan => format!("Week {}", bucket.iso_week().week()),
            ChartPeriod::Bulanan => bucket.format("%Y-%m").to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, IntoParams)]
pub struct ChartQuery {
    pub cashier_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_chart_covers_the_last_seven_days() {
        let buckets = ChartPeriod::Harian.buckets(date(2025, 3, 2));
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0], date(2025, 2, 24));
        assert_eq!(buckets[6], date(2025, 3, 2));
        assert_eq!(ChartPeriod::Harian.label(buckets[0]), "2025-02-24");
    }

    #[test]
    fn weekly_chart_starts_on_mondays() {
        // 2025-06-12 is a Thursday.
        let buckets = ChartPeriod::Mingguan.buckets(date(2025, 6, 12));
        assert_eq!(
            buckets,
            vec![
                date(2025, 5, 19),
                date(2025, 5, 26),
                date(2025, 6, 2),
                date(2025, 6, 9)
            ]
        );
        assert_eq!(ChartPeriod::Mingguan.label(date(2025, 6, 9)), "Week 24");
        assert_eq!(ChartPeriod::Mingguan.since(date(2025, 6, 12)), date(2025, 5, 19));
    }

    #[test]
    fn monthly_chart_crosses_year_boundary() {
        let buckets = ChartPeriod::Bulanan.buckets(date(2025, 2, 15));
        assert_eq!(buckets.len(), 6);
        assert_eq!(buckets[0], date(2024, 9, 1));
        assert_eq!(ChartPeriod::Bulanan.label(buckets[0]), "2024-09");
        assert_eq!(ChartPeriod::Bulanan.label(buckets[5]), "2025-02");
    }

    #[test]
    fn unknown_period_is_bad_request() {
        assert_eq!("bulanan".parse::<ChartPeriod>().unwrap(), ChartPeriod::Bulanan);
        assert!(matches!(
            "tahunan".parse::<ChartPeriod>(),
            Err(AppError::BadRequest(_))
        ));
    }
}
