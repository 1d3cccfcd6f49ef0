//! Small time formatting helpers.

/// Format a millisecond duration for log and narrative text.
///
/// Sub-second values render as `450ms`, everything else as seconds with one
/// decimal, e.g. `30.0s`.
pub fn format_millis(ms: u64) -> String {
    if ms < 1_000 {
        format!("{ms}ms")
    } else {
        format!("{:.1}s", ms as f64 / 1_000.0)
    }
}
