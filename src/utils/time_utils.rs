use crate::sync::Millis;

/// `M:SS`: minutes unpadded, seconds zero-padded, sub-second part dropped.
pub fn format_time(ms: Millis) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}
