//! Timeline layout
//!
//! Positions are fractions of the track width so the same layout can be
//! painted into any number of terminal columns (or pixels).

use super::Waveform;

/// Minimum spacing between ruler markers, in seconds.
pub const MIN_MARKER_SPACING: f64 = 30.0;

/// Playhead position as a fraction of duration, clamped to `[0, 1]`.
///
/// `0` while duration is unknown.
pub fn playhead_fraction(current_time: f64, duration: f64) -> f64 {
    if !(duration > 0.0) || !current_time.is_finite() {
        return 0.0;
    }
    (current_time / duration).clamp(0.0, 1.0)
}

/// Spacing between ruler markers: a tenth of the duration, at least 30s.
pub fn marker_spacing(duration: f64) -> f64 {
    (duration / 10.0).floor().max(MIN_MARKER_SPACING)
}

/// Ruler marker times, starting at 0 and continuing while `<= duration`.
pub fn marker_times(duration: f64) -> Vec<f64> {
    if !(duration >= 0.0) || !duration.is_finite() {
        return Vec::new();
    }
    let spacing = marker_spacing(duration);
    let count = (duration / spacing).floor() as usize + 1;
    (0..count).map(|i| i as f64 * spacing).collect()
}

/// Horizontal extent as fractions of the track width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub start: f64,
    pub width: f64,
}

impl Extent {
    pub fn end(&self) -> f64 {
        self.start + self.width
    }

    fn contains(&self, fraction: f64) -> bool {
        fraction >= self.start && fraction < self.end()
    }
}

/// One waveform bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub extent: Extent,
    /// Height as a fraction of the track height
    pub height: f32,
}

/// What a thumbnail-track tile shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileContent {
    /// Index into the thumbnail strip
    Thumbnail(usize),
    /// Stand-in while no thumbnails exist
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub extent: Extent,
    pub content: TileContent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub time: f64,
    pub fraction: f64,
}

/// Everything the renderer paints, derived from its inputs alone.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    pub bars: Vec<Bar>,
    pub tiles: Vec<Tile>,
    pub playhead: f64,
    pub markers: Vec<Marker>,
}

impl TimelineLayout {
    pub fn compute(
        waveform: &Waveform,
        thumbnail_count: usize,
        current_time: f64,
        duration: f64,
    ) -> Self {
        let bars = equal_extents(waveform.len())
            .zip(waveform.amplitudes())
            .map(|(extent, &height)| Bar { extent, height })
            .collect();

        // Tiles are uniform regardless of the sampling interval
        let tiles = if thumbnail_count == 0 {
            vec![Tile {
                extent: Extent {
                    start: 0.0,
                    width: 1.0,
                },
                content: TileContent::Placeholder,
            }]
        } else {
            equal_extents(thumbnail_count)
                .enumerate()
                .map(|(i, extent)| Tile {
                    extent,
                    content: TileContent::Thumbnail(i),
                })
                .collect()
        };

        let markers = marker_times(duration)
            .into_iter()
            .map(|time| Marker {
                time,
                fraction: if duration > 0.0 { time / duration } else { 0.0 },
            })
            .collect();

        Self {
            bars,
            tiles,
            playhead: playhead_fraction(current_time, duration),
            markers,
        }
    }

    /// Bar under `fraction` of the track width.
    pub fn bar_at(&self, fraction: f64) -> Option<&Bar> {
        find_at(&self.bars, fraction, |bar| bar.extent)
    }

    /// Tile under `fraction` of the track width.
    pub fn tile_at(&self, fraction: f64) -> Option<&Tile> {
        find_at(&self.tiles, fraction, |tile| tile.extent)
    }
}

/// Column of `fraction` on a track `columns` cells wide, first cell is 0
/// and last is 1.
pub fn column_of(fraction: f64, columns: u16) -> u16 {
    if columns == 0 {
        return 0;
    }
    let last = f64::from(columns - 1);
    (fraction.clamp(0.0, 1.0) * last).round() as u16
}

fn equal_extents(count: usize) -> impl Iterator<Item = Extent> {
    let width = if count == 0 { 0.0 } else { 1.0 / count as f64 };
    (0..count).map(move |i| Extent {
        start: i as f64 * width,
        width,
    })
}

fn find_at<T>(items: &[T], fraction: f64, extent: impl Fn(&T) -> Extent) -> Option<&T> {
    if items.is_empty() || fraction.is_nan() {
        return None;
    }
    let fraction = fraction.clamp(0.0, 1.0);
    let guess = ((fraction * items.len() as f64) as usize).min(items.len() - 1);
    // Rounding can land one slot off at boundaries
    [guess.saturating_sub(1), guess, (guess + 1).min(items.len() - 1)]
        .into_iter()
        .map(|i| &items[i])
        .find(|item| extent(*item).contains(fraction))
        .or_else(|| items.get(guess))
}
