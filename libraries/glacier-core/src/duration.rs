//! Duration string parsing
//!
//! Catalog durations are human strings: `"4:32"` for tracks, `"45 min"` for
//! sessions. Anything else (`"8 hr"`, `"1h 05m"`, missing) falls back to a
//! fixed length so the ticker still has something to count towards.

/// Fallback length (seconds) for durations that cannot be parsed
pub const DEFAULT_DURATION_SECS: u32 = 270;

/// Parse a catalog duration string into whole seconds
///
/// - strings containing `"min"`: leading integer × 60
/// - `M:SS`: minutes × 60 + seconds
/// - everything else, including `None`: `fallback`
///
/// ```rust
/// use glacier_core::parse_duration;
///
/// assert_eq!(parse_duration(Some("4:32"), 270), 272);
/// assert_eq!(parse_duration(Some("45 min"), 270), 2700);
/// assert_eq!(parse_duration(Some("garbage"), 270), 270);
/// assert_eq!(parse_duration(None, 270), 270);
/// ```
pub fn parse_duration(raw: Option<&str>, fallback: u32) -> u32 {
    let Some(raw) = raw else {
        return fallback;
    };

    if raw.contains("min") {
        return leading_integer(raw)
            .and_then(|mins| mins.checked_mul(60))
            .unwrap_or(fallback);
    }

    let parts: Vec<&str> = raw.split(':').collect();
    if let [mins, secs] = parts.as_slice() {
        if let (Some(mins), Some(secs)) = (leading_integer(mins), leading_integer(secs)) {
            return mins
                .checked_mul(60)
                .and_then(|m| m.checked_add(secs))
                .unwrap_or(fallback);
        }
    }

    fallback
}

/// Integer prefix of `s` after leading whitespace, if there is one
fn leading_integer(s: &str) -> Option<u32> {
    let trimmed = s.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
