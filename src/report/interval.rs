use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{ReportError, ReportResult};

const DAY_FORMAT: &str = "%Y-%m-%d";
const MONTH_FORMAT: &str = "%Y-%m";
const YEAR_FORMAT: &str = "%Y";

/// Width of one report bucket.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Granularity {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Granularity {
    /// Ordered labels of every bucket touching `[start, end]`, both ends inclusive.
    ///
    /// `first_day_of_week` is only consulted for weekly buckets (0 = Sunday).
    pub fn sequence(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        first_day_of_week: u8,
    ) -> ReportResult<Vec<String>> {
        if end < start {
            return Err(ReportError::InvalidRange { start, end });
        }
        let last = self.interval_start(end, first_day_of_week);
        let mut cursor = self.interval_start(start, first_day_of_week);
        let mut labels = Vec::new();
        while cursor <= last {
            labels.push(self.format_start(cursor));
            match self.next_start(cursor) {
                Some(next) => cursor = next,
                None => break,
            }
        }
        Ok(labels)
    }

    /// First day of the bucket containing `date`.
    pub fn interval_start(&self, date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
        match self {
            Granularity::Daily => date,
            Granularity::Weekly => week_start(date, first_day_of_week),
            Granularity::Monthly => date.with_day(1).unwrap_or(date),
            Granularity::Yearly => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        }
    }

    /// Label of the bucket containing `date`.
    pub fn label(&self, date: NaiveDate, first_day_of_week: u8) -> String {
        self.format_start(self.interval_start(date, first_day_of_week))
    }

    /// Re-buckets a day label (`YYYY-MM-DD`) into the label of its owning interval.
    pub fn bucket(&self, day: &str, first_day_of_week: u8) -> ReportResult<String> {
        let date = NaiveDate::parse_from_str(day, DAY_FORMAT)
            .map_err(|_| ReportError::InvalidLabel(day.to_string()))?;
        Ok(self.label(date, first_day_of_week))
    }

    /// First calendar day of the bucket a label names.
    pub fn parse_label(&self, label: &str) -> ReportResult<NaiveDate> {
        let parsed = match self {
            Granularity::Daily | Granularity::Weekly => {
                NaiveDate::parse_from_str(label, DAY_FORMAT).ok()
            }
            Granularity::Monthly => {
                NaiveDate::parse_from_str(&format!("{label}-01"), DAY_FORMAT).ok()
            }
            Granularity::Yearly => label
                .parse::<i32>()
                .ok()
                .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1)),
        };
        parsed.ok_or_else(|| ReportError::InvalidLabel(label.to_string()))
    }

    /// Human readable form of a label.
    pub fn display(&self, label: &str) -> ReportResult<String> {
        let date = self.parse_label(label)?;
        let format = match self {
            Granularity::Daily | Granularity::Weekly => "%b %d, %Y",
            Granularity::Monthly => "%b '%y",
            Granularity::Yearly => YEAR_FORMAT,
        };
        Ok(date.format(format).to_string())
    }

    /// Start and end dates of the bucket at `index`, clipped to the report range.
    pub fn interval_bounds(
        &self,
        labels: &[String],
        index: usize,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ReportResult<(NaiveDate, NaiveDate)> {
        let first = if index == 0 {
            start
        } else {
            self.parse_label(&labels[index])?
        };
        let last = match labels.get(index + 1) {
            Some(next) => self.parse_label(next)? - Duration::days(1),
            None => end,
        };
        Ok((first, last))
    }

    /// `YYYYMM` months a bucket spans for budget purposes.
    ///
    /// Days and weeks resolve to the month of their first day.
    pub fn months_covered(&self, label: &str) -> ReportResult<Vec<u32>> {
        let date = self.parse_label(label)?;
        let year = date.year().max(0) as u32;
        Ok(match self {
            Granularity::Yearly => (1..=12).map(|month| year * 100 + month).collect(),
            _ => vec![year * 100 + date.month()],
        })
    }

    fn format_start(&self, start: NaiveDate) -> String {
        let format = match self {
            Granularity::Daily | Granularity::Weekly => DAY_FORMAT,
            Granularity::Monthly => MONTH_FORMAT,
            Granularity::Yearly => YEAR_FORMAT,
        };
        start.format(format).to_string()
    }

    fn next_start(&self, start: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Daily => start.checked_add_signed(Duration::days(1)),
            Granularity::Weekly => start.checked_add_signed(Duration::weeks(1)),
            Granularity::Monthly => start.checked_add_months(Months::new(1)),
            Granularity::Yearly => start.checked_add_months(Months::new(12)),
        }
    }
}

fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - (first_day_of_week % 7) as i64).rem_euclid(7);
    date - Duration::days(offset)
}
