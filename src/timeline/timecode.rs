//! Timecode formatting.

/// Format seconds as `H:MM:SS`.
///
/// Hours are unpadded, minutes and seconds are two digits. Fractional
/// seconds are truncated, never rounded up.
pub fn format_timecode(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let mins = total % 3600 / 60;
    let secs = total % 60;
    format!("{}:{:02}:{:02}", hours, mins, secs)
}
