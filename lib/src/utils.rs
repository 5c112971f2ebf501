use chrono::{DateTime, Utc};
use std::path::PathBuf;

pub fn get_default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("STASH_DATA_DIR") {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(path).join("stash");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local/share/stash");
    }

    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("stash");
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

pub fn get_config_dir() -> PathBuf {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(path).join("stash");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config/stash");
    }

    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("stash");
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Parse a unix timestamp in seconds as written in `ADD_DATE` style attributes.
///
/// Blank, non-numeric and out-of-range values yield `None`.
pub fn parse_unix_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let secs: i64 = value.trim().parse().ok()?;
    DateTime::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1234567890", Some(1234567890))]
    #[case(" 0 ", Some(0))]
    #[case("", None)]
    #[case("yesterday", None)]
    #[case("99999999999999999", None)]
    fn test_parse_unix_timestamp(#[case] input: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_unix_timestamp(input).map(|d| d.timestamp()), expected);
    }
}
