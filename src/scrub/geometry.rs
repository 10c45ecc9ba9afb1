//! Track geometry and the pointer-to-time mapping.

/// A pointer position in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding rectangle of the scrubbable track.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl TrackRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether `point` lies on the track (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        (self.left..=self.right()).contains(&point.x) && (self.top..=self.bottom()).contains(&point.y)
    }

    /// Fraction of the track at horizontal position `x`, clamped to `[0, 1]`.
    ///
    /// This is the only pointer-to-time conversion; press and drag both use it.
    pub fn fraction_at(&self, x: f64) -> f64 {
        if !(self.width > 0.0) || x.is_nan() {
            return 0.0;
        }
        ((x - self.left) / self.width).clamp(0.0, 1.0)
    }

    /// Media time under `x` for an asset of `duration` seconds.
    pub fn time_at(&self, x: f64, duration: f64) -> f64 {
        self.fraction_at(x) * duration.max(0.0)
    }
}

impl TrackRect {
    /// Track over a block of terminal cells, treating each cell as a point.
    ///
    /// The first column maps to fraction 0 and the last to 1, so a click on
    /// the final cell reaches the end of the media.
    pub fn from_cells(rect: ratatui::layout::Rect) -> Self {
        Self::new(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width.saturating_sub(1)),
            f64::from(rect.height.saturating_sub(1)),
        )
    }
}
