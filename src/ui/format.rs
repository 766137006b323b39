//! Text formatting for cards and the profile dialog.

use chrono::{DateTime, Utc};

/// Follower count in thousands with one decimal: 15000 -> "15.0k".
pub fn format_thousands(count: u64) -> String {
    format!("{:.1}k", count as f64 / 1000.0)
}

/// Long-form date: "January 25, 2011".
pub fn format_join_date(created_at: &DateTime<Utc>) -> String {
    created_at.format("%B %-d, %Y").to_string()
}

/// First character uppercased, rest unchanged: "organization" -> "Organization".
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Stand-in for the avatar image: the login's first letter.
pub fn avatar_initial(login: &str) -> String {
    login
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}
