//! Text formatting used by the preview.

/// Separator between the two ends of a period.
const DASH: &str = "—";

/// Number of indicator slots in a skill row.
pub const SKILL_SLOTS: usize = 5;

/// Date range of a work entry. A current position always ends in "Present".
pub fn format_duration(start: &str, end: &str, current: bool) -> String {
    if current {
        return format!("{} {} Present", start, DASH).trim().to_string();
    }
    format_range(start, end)
}

/// Date range of an education entry.
pub fn format_range(start: &str, end: &str) -> String {
    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{} {} {}", start, DASH, end),
        (false, true) => format!("{} {}", start, DASH),
        (true, false) => format!("{} {}", DASH, end),
        (true, true) => String::new(),
    }
}

/// "City, Country" with empty parts dropped.
pub fn join_locality(city: &str, country: &str) -> String {
    [city, country]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Filled/empty state of the five skill indicators: slot `i` is filled when
/// `i < level`. Levels outside 1..=5 clip naturally.
pub fn skill_slots(level: i32) -> [bool; SKILL_SLOTS] {
    std::array::from_fn(|i| (i as i64) < i64::from(level))
}
