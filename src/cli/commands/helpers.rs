//! Small helpers shared by the CLI commands.

/// Truncate a string to at most `max` characters, appending "..." when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
        assert_eq!(truncate("a much longer string here", 10), "a much ...");
        // Multi-byte characters are not split
        assert_eq!(truncate("héllo wörld wide", 10), "héllo w...");
    }
}
