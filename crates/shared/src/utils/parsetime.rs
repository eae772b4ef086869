use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub fn to_utc(value: Option<NaiveDateTime>) -> Option<DateTime<Utc>> {
    value.map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_timestamps_are_read_as_utc() {
        assert!(to_utc(None).is_none());

        let naive = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let utc = to_utc(Some(naive)).unwrap();
        assert_eq!(utc.to_rfc3339(), "2025-06-01T08:30:00+00:00");
    }
}
