//! `${VAR}` expansion for URL-like configuration values.
//!
//! - `${VAR}` is replaced by the value of `VAR` and fails if it is unset
//! - `${VAR:-fallback}` uses `fallback` when `VAR` is unset
//!
//! Bare `$VAR` is left alone so URLs containing `$` survive untouched.

use crate::ConfigError;

/// Expand variable references in `value`, reporting failures against `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    // References without a fallback must resolve.
    if let Some(name) = required_refs(value).find(|name| std::env::var(name).is_err()) {
        return Err(unset(field, name));
    }

    shellexpand::env_with_context(value, |name| {
        Ok::<_, UnsetVar>(std::env::var(name).ok())
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| unset(field, &e.var_name))
}

/// Names referenced as `${NAME}` with no `:-` fallback.
fn required_refs(value: &str) -> impl Iterator<Item = &str> {
    value.split("${").skip(1).filter_map(|rest| {
        let inner = &rest[..rest.find('}')?];
        (!inner.contains(":-")).then_some(inner)
    })
}

fn unset(field: &str, name: &str) -> ConfigError {
    ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{name}}} not set"),
    }
}

/// Expand an optional value in place.
pub(crate) fn expand_in_place(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(current) = value.as_deref() {
        *value = Some(expand_env(current, field)?);
    }
    Ok(())
}

/// Lookup never fails; unset variables are reported before expansion.
#[derive(Debug)]
enum UnsetVar {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_site_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_DOMAIN", "book.example.com");
        }
        let result = expand_env("https://${FOLIO_TEST_DOMAIN}", "url").unwrap();
        assert_eq!(result, "https://book.example.com");
        unsafe {
            std::env::remove_var("FOLIO_TEST_DOMAIN");
        }
    }

    #[test]
    fn test_expand_fallback_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_TEST_UNSET_BASE");
        }
        let result = expand_env("${FOLIO_TEST_UNSET_BASE:-/}", "baseUrl").unwrap();
        assert_eq!(result, "/");
    }

    #[test]
    fn test_expand_unset_reports_field_and_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_TEST_MISSING");
        }
        let err = expand_env("${FOLIO_TEST_MISSING}", "navbar.item.href").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("FOLIO_TEST_MISSING"));
        assert!(msg.contains("navbar.item.href"));
    }

    #[test]
    fn test_required_refs_skips_fallbacks() {
        let refs: Vec<_> = required_refs("https://${HOST}/${PREFIX:-book}/${TAIL}").collect();
        assert_eq!(refs, vec!["HOST", "TAIL"]);
    }

    #[test]
    fn test_bare_dollar_left_alone() {
        let result = expand_env("https://example.com/$price", "url").unwrap();
        assert_eq!(result, "https://example.com/$price");
    }

    #[test]
    fn test_expand_in_place_skips_none() {
        let mut value = None;
        expand_in_place(&mut value, "url").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_expand_in_place_rewrites_some() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_PREFIX", "/book/");
        }
        let mut value = Some("${FOLIO_TEST_PREFIX}".to_owned());
        expand_in_place(&mut value, "baseUrl").unwrap();
        assert_eq!(value.as_deref(), Some("/book/"));
        unsafe {
            std::env::remove_var("FOLIO_TEST_PREFIX");
        }
    }
}
