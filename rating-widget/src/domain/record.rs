use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One contest result as served by the history endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RatingRecord {
    pub is_rated: bool,
    pub place: i32,
    pub old_rating: i32,
    pub new_rating: i32,
    pub performance: i32,
    pub inner_performance: i32,
    #[serde(rename = "ContestScreenName")]
    pub contest_id: String,
    pub contest_name: String,
    pub end_time: DateTime<FixedOffset>,
}

impl RatingRecord {
    /// The end of the contest in milliseconds since the Unix epoch.
    pub fn end_time_millis(&self) -> f64 {
        self.end_time.timestamp_millis() as f64
    }
}

#[cfg(test)]
impl RatingRecord {
    /// A rated result ending `day` days after the first contest of 2020.
    pub(crate) fn fixture(day: i64, old_rating: i32, new_rating: i32) -> Self {
        let first = DateTime::parse_from_rfc3339("2020-01-04T22:40:00+09:00").unwrap();
        Self {
            is_rated: true,
            place: 100,
            old_rating,
            new_rating,
            performance: new_rating,
            inner_performance: new_rating,
            contest_id: format!("abc{}", 150 + day),
            contest_name: format!("AtCoder Beginner Contest {}", 150 + day),
            end_time: first + chrono::TimeDelta::days(day),
        }
    }
}
