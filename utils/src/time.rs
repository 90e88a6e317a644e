//! Duration formatting for log lines and error messages.

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Format a duration in seconds as its two most significant units, e.g. `13d 23h`.
pub fn format_duration(secs: u64) -> String {
    match secs {
        s if s < MINUTE => format!("{}s", s),
        s if s < HOUR => format!("{}m {}s", s / MINUTE, s % MINUTE),
        s if s < DAY => format!("{}h {}m", s / HOUR, (s % HOUR) / MINUTE),
        s => format!("{}d {}h", s / DAY, (s % DAY) / HOUR),
    }
}
