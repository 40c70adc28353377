//! Environment variable parsing with warn-level logging for invalid values.

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    parse_with_default(var, std::env::var(var).ok(), default)
}

fn parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    raw: Option<String>,
    default: T,
) -> T {
    let Some(v) = raw else {
        return default;
    };
    match v.trim().parse() {
        Ok(n) => n,
        Err(_) => {
            tracing::warn!(
                var,
                value = %v,
                default = %default,
                "invalid env var value, using default"
            );
            default
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_parse_valid_value() {
        let result: u32 = parse_with_default("POOL", Some("42".to_owned()), 10);
        assert_eq!(result, 42);
    }

    #[test]
    fn test_env_parse_trims_whitespace() {
        let result: usize = parse_with_default("CAPACITY", Some(" 512\n".to_owned()), 256);
        assert_eq!(result, 512);
    }

    #[test]
    fn test_env_parse_invalid_value() {
        let result: u32 = parse_with_default("POOL", Some("banana".to_owned()), 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_env_parse_empty_value() {
        let result: u32 = parse_with_default("POOL", Some(String::new()), 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_env_parse_missing_var() {
        let result: u32 = env_parse_with_default("BEAR_TRACKS_TEST_UNSET_VAR_48213", 10);
        assert_eq!(result, 10);
    }
}
