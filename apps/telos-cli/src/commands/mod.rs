pub mod auth;
pub mod goal;
pub mod team;

/// Shorten a string to at most `max` characters for table columns,
/// appending "..." when cut. Counts characters, not bytes — titles are
/// routinely non-ASCII.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}
