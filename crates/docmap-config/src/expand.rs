//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    // Fast path: no expansion needed
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(|cow| cow.into_owned())
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TEST_EXPAND_SIMPLE", "hello");
        }
        let result = expand_env("${TEST_EXPAND_SIMPLE}", "test.field").unwrap();
        assert_eq!(result, "hello");
        unsafe {
            std::env::remove_var("TEST_EXPAND_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("UNSET_EXPAND_TEST");
        }
        let result = expand_env("${UNSET_EXPAND_TEST:-fallback}", "test.field").unwrap();
        assert_eq!(result, "fallback");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_EXPAND_TEST");
        }
        let result = expand_env("${MISSING_EXPAND_TEST}", "test.field");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_EXPAND_TEST"));
        assert!(err.to_string().contains("test.field"));
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TEST_EXPAND_HOST", "example.com");
        }
        let result = expand_env("https://${TEST_EXPAND_HOST}/docs", "test.url").unwrap();
        assert_eq!(result, "https://example.com/docs");
        unsafe {
            std::env::remove_var("TEST_EXPAND_HOST");
        }
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("literal string", "test.field").unwrap();
        assert_eq!(result, "literal string");
    }
}
