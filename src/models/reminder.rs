use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Reminder {
    pub id: Uuid,
    #[serde(skip)]
    pub user_id: Uuid,
    pub description: String,
    #[serde(serialize_with = "mdy_date::serialize")]
    pub date_of_origin: NaiveDate,
    pub status: ReminderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "reminder_status", rename_all = "lowercase")]
pub enum ReminderStatus {
    Opened,
    Completed,
}

impl ReminderStatus {
    pub const ALL: [&'static str; 2] = ["completed", "opened"];

    /// Status of a reminder dated `origin` as seen on `today`.
    ///
    /// Only day and month take part in the comparison; the year is ignored,
    /// so a reminder dated next year on an earlier day-of-year is already
    /// `Completed`.
    pub fn derive(origin: NaiveDate, today: NaiveDate) -> Self {
        let same_or_later_day = today.day() >= origin.day() && today.month() >= origin.month();
        if same_or_later_day || today.month() > origin.month() {
            ReminderStatus::Completed
        } else {
            ReminderStatus::Opened
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderStatus::Opened => "opened",
            ReminderStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for ReminderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "opened" => Ok(ReminderStatus::Opened),
            "completed" => Ok(ReminderStatus::Completed),
            other => Err(format!("unknown reminder status: {other}")),
        }
    }
}

impl std::fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `date_of_origin` travels as `mm/dd/yyyy`.
mod mdy_date {
    use chrono::NaiveDate;
    use serde::Serializer;

    use crate::validation::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn past_day_in_same_month_is_completed() {
        let today = date(2022, 6, 15);
        assert_eq!(
            ReminderStatus::derive(date(2022, 6, 10), today),
            ReminderStatus::Completed
        );
        assert_eq!(
            ReminderStatus::derive(date(2022, 6, 15), today),
            ReminderStatus::Completed
        );
    }

    #[test]
    fn future_day_in_same_month_is_opened() {
        assert_eq!(
            ReminderStatus::derive(date(2022, 6, 20), date(2022, 6, 15)),
            ReminderStatus::Opened
        );
    }

    #[test]
    fn earlier_month_is_completed_regardless_of_day() {
        assert_eq!(
            ReminderStatus::derive(date(2022, 5, 28), date(2022, 6, 1)),
            ReminderStatus::Completed
        );
    }

    #[test]
    fn later_month_is_opened_even_with_earlier_day() {
        assert_eq!(
            ReminderStatus::derive(date(2022, 7, 1), date(2022, 6, 15)),
            ReminderStatus::Opened
        );
    }

    #[test]
    fn year_does_not_participate() {
        let today = date(2022, 6, 15);
        // Next year, earlier in the calendar: still completed.
        assert_eq!(
            ReminderStatus::derive(date(2023, 3, 1), today),
            ReminderStatus::Completed
        );
        // Last year, later in the calendar: still opened.
        assert_eq!(
            ReminderStatus::derive(date(2021, 12, 31), today),
            ReminderStatus::Opened
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let origin = date(2022, 9, 9);
        let today = date(2022, 8, 30);
        let first = ReminderStatus::derive(origin, today);
        for _ in 0..10 {
            assert_eq!(ReminderStatus::derive(origin, today), first);
        }
    }

    #[test]
    fn status_round_trips_through_str() {
        for raw in ReminderStatus::ALL {
            let status: ReminderStatus = raw.parse().unwrap();
            assert_eq!(status.as_str(), raw);
        }
        assert!("closed".parse::<ReminderStatus>().is_err());
    }

    #[test]
    fn serializes_date_as_month_day_year() {
        let reminder = Reminder {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            description: "Dentist".to_string(),
            date_of_origin: date(2022, 3, 7),
            status: ReminderStatus::Opened,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&reminder).unwrap();
        assert_eq!(value["date_of_origin"], "03/07/2022");
        assert_eq!(value["status"], "opened");
        assert!(value.get("user_id").is_none());
    }
}
