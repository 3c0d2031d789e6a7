use thiserror::Error;

/// An environment variable required by the application is not set (or is blank).
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// Values that are empty or only whitespace count as missing, so an exported
/// but blank variable never overrides a configured default.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(MissingEnvVarError(name.to_string())),
    }
}

/// Like [`get_env_var`], for variables that are allowed to be absent.
pub fn get_optional_env_var(name: &str) -> Option<String> {
    get_env_var(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_reports_its_name() {
        let err = get_env_var("SHARED_UTILS_SURELY_UNSET_VARIABLE").unwrap_err();
        assert_eq!(err.0, "SHARED_UTILS_SURELY_UNSET_VARIABLE");
        assert_eq!(
            err.to_string(),
            "Missing environment variable: SHARED_UTILS_SURELY_UNSET_VARIABLE"
        );
    }

    #[test]
    fn optional_lookup_of_unset_variable_is_none() {
        assert_eq!(get_optional_env_var("SHARED_UTILS_SURELY_UNSET_VARIABLE"), None);
    }

    #[test]
    fn present_variable_is_read() {
        // PATH is set in every environment cargo runs tests in.
        assert!(get_env_var("PATH").is_ok());
    }

    #[test]
    fn whitespace_only_value_counts_as_missing() {
        const NAME: &str = "SHARED_UTILS_BLANK_TEST_VARIABLE";
        // SAFETY: no other test reads or writes this variable.
        unsafe { std::env::set_var(NAME, " \t ") };

        let result = get_env_var(NAME);
        unsafe { std::env::remove_var(NAME) };

        assert_eq!(result, Err(MissingEnvVarError(NAME.to_string())));
    }

    #[test]
    fn value_is_trimmed() {
        const NAME: &str = "SHARED_UTILS_PADDED_TEST_VARIABLE";
        // SAFETY: no other test reads or writes this variable.
        unsafe { std::env::set_var(NAME, "  value \n") };

        let result = get_env_var(NAME);
        unsafe { std::env::remove_var(NAME) };

        assert_eq!(result, Ok("value".to_string()));
    }
}
