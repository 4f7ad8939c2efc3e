//! `${VAR}` expansion of configuration values.

use crate::ConfigError;

/// Expands `${VAR}` and `${VAR:-default}` in configuration values.
///
/// Values without `${` are left alone, so a literal `$` in a URL prefix
/// survives. Failures name the dotted config field they came from.
pub(crate) struct EnvExpander<F> {
    lookup: F,
}

impl EnvExpander<fn(&str) -> Option<String>> {
    /// Expander reading the process environment.
    pub(crate) fn from_env() -> Self {
        Self {
            lookup: |var| std::env::var(var).ok(),
        }
    }
}

impl<F: Fn(&str) -> Option<String>> EnvExpander<F> {
    pub(crate) fn new(lookup: F) -> Self {
        Self { lookup }
    }

    /// Expand `value` in place.
    pub(crate) fn expand(&self, field: &str, value: &mut String) -> Result<(), ConfigError> {
        if !value.contains("${") {
            return Ok(());
        }
        let expanded = shellexpand::env_with_context(value.as_str(), |var| {
            (self.lookup)(var).map(Some).ok_or(Unset)
        })
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })?
        .into_owned();
        *value = expanded;
        Ok(())
    }

    /// Expand an optional value in place; `None` stays `None`.
    pub(crate) fn expand_optional(
        &self,
        field: &str,
        value: &mut Option<String>,
    ) -> Result<(), ConfigError> {
        match value {
            Some(value) => self.expand(field, value),
            None => Ok(()),
        }
    }
}

struct Unset;
