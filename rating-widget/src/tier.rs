pub const NUM_TIERS: usize = 9;

/// An ordered table of rating brackets. A rating belongs to the first tier
/// whose threshold exceeds it; the last threshold is a sentinel large enough
/// to catch every real rating.
#[derive(Clone, Debug, PartialEq)]
pub struct RatingTiers {
    thresholds: [i32; NUM_TIERS],
    colors: [&'static str; NUM_TIERS],
}

impl RatingTiers {
    /// The colors of the AtCoder rating ladder, from unrated black to red.
    pub const ATCODER: Self = Self {
        thresholds: [0, 400, 800, 1200, 1600, 2000, 2400, 2800, 100_000],
        colors: [
            "#000000", "#808080", "#804000", "#008000", "#00C0C0", "#0000FF", "#C0C000",
            "#FF8000", "#FF0000",
        ],
    };

    pub fn new(
        thresholds: [i32; NUM_TIERS],
        colors: [&'static str; NUM_TIERS],
    ) -> Result<Self, String> {
        if let Some(w) = thresholds.windows(2).find(|w| w[0] >= w[1]) {
            return Err(format!(
                "Tier thresholds must strictly increase, found {} before {}",
                w[0], w[1]
            ));
        }
        Ok(Self { thresholds, colors })
    }

    pub fn thresholds(&self) -> &[i32; NUM_TIERS] {
        &self.thresholds
    }

    pub fn color(&self, index: usize) -> &'static str {
        self.colors[index.min(NUM_TIERS - 1)]
    }

    /// Index of the first tier whose threshold is strictly greater than
    /// `rating`. Non-positive ratings land in tier 0. Returns `None` for NaN
    /// and for ratings at or above the sentinel.
    pub fn index_of(&self, rating: f64) -> Option<usize> {
        if rating <= 0.0 {
            return Some(0);
        }
        self.thresholds
            .iter()
            .position(|&threshold| rating < f64::from(threshold))
    }

    /// Display color for `rating`; anything past the table gets the top color.
    pub fn color_of(&self, rating: f64) -> &'static str {
        self.color(self.index_of(rating).unwrap_or(NUM_TIERS - 1))
    }
}
