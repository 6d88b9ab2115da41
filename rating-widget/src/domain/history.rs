use super::RatingRecord;
use crate::error::WidgetError;

/// The rated part of a user's contest history, in the order it was served.
/// Always holds at least [`History::MIN_LEN`] records.
#[derive(Clone, Debug)]
pub struct History {
    records: Vec<RatingRecord>,
}

impl History {
    /// A single point cannot span a domain, so a chart needs two.
    pub const MIN_LEN: usize = 2;

    /// Keeps only the rated records and checks there are enough of them.
    pub fn from_records(records: Vec<RatingRecord>) -> Result<Self, WidgetError> {
        let records: Vec<_> = records.into_iter().filter(|r| r.is_rated).collect();
        if records.len() < Self::MIN_LEN {
            return Err(WidgetError::InsufficientData {
                rated: records.len(),
            });
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[RatingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent rating. A zero `new_rating` on the last record means
    /// the contest left no rating behind, so the one before it is shown.
    pub fn current_rating(&self) -> i32 {
        match self.records.last() {
            Some(last) if last.new_rating != 0 => last.new_rating,
            Some(last) => last.old_rating,
            None => 0,
        }
    }

    pub fn highest_rating(&self) -> i32 {
        self.records
            .iter()
            .map(|r| r.new_rating)
            .fold(0, i32::max)
    }
}
