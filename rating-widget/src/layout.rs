use crate::domain::History;
use crate::tier::{NUM_TIERS, RatingTiers};

/// Neither side of the viewport is laid out smaller than this many pixels.
pub const MIN_VIEWPORT_EXTENT: f64 = 100.0;

/// Ratings added above and below a flat history so the band rows stay finite.
const FLAT_RATING_MARGIN: f64 = 200.0;

/// Space kept clear around the plot area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    /// The top inset leaves room for the header line.
    pub const CHART: Self = Self {
        top: 34.0,
        right: 10.0,
        bottom: 10.0,
        left: 10.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(MIN_VIEWPORT_EXTENT),
            height: height.max(MIN_VIEWPORT_EXTENT),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Affine map from a closed numeric domain onto a pixel range. The range may
/// be reversed, which is how the rating axis grows upwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    pub fn new(domain_min: f64, domain_max: f64, range_min: f64, range_max: f64) -> Self {
        Self {
            domain_min,
            domain_max,
            range_min,
            range_max,
        }
    }

    /// A collapsed domain maps everything onto the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let d = self.domain_max - self.domain_min;
        if d == 0.0 || !d.is_finite() {
            return (self.range_min + self.range_max) / 2.0;
        }
        let t = (value - self.domain_min) / d;
        self.range_min + t * (self.range_max - self.range_min)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A horizontal stripe covering one tier's rating interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub y: f64,
    pub height: f64,
    pub tier: usize,
}

/// Screen geometry of a history for one viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    points: Vec<Point>,
    threshold_ys: [f64; NUM_TIERS],
}

impl Layout {
    pub fn compute(history: &History, tiers: &RatingTiers, viewport: Viewport) -> Self {
        let records = history.records();
        let (x_min, x_max) = bounds(records.iter().map(|r| r.end_time_millis()));
        let (mut y_min, mut y_max) = bounds(records.iter().map(|r| f64::from(r.new_rating)));
        if y_min == y_max {
            y_min -= FLAT_RATING_MARGIN;
            y_max += FLAT_RATING_MARGIN;
        }

        let pad = Insets::CHART;
        let x_scale = LinearScale::new(x_min, x_max, pad.left, viewport.width() - pad.right);
        let y_scale = LinearScale::new(y_min, y_max, viewport.height() - pad.bottom, pad.top);

        let points = records
            .iter()
            .map(|r| Point {
                x: x_scale.map(r.end_time_millis()),
                y: y_scale.map(f64::from(r.new_rating)),
            })
            .collect();
        let thresholds = *tiers.thresholds();
        let threshold_ys = thresholds.map(|t| y_scale.map(f64::from(t)));

        Self {
            points,
            threshold_ys,
        }
    }

    /// One point per record, in chronological order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Pixel row of every tier threshold.
    pub fn threshold_ys(&self) -> &[f64; NUM_TIERS] {
        &self.threshold_ys
    }

    /// Consecutive point pairs joined by a line.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// The stripe between each pair of adjacent thresholds, painted with the
    /// color of the upper tier.
    pub fn bands(&self) -> impl Iterator<Item = Band> + '_ {
        self.threshold_ys.windows(2).enumerate().map(|(i, w)| Band {
            y: w[1],
            height: w[0] - w[1],
            tier: i + 1,
        })
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
