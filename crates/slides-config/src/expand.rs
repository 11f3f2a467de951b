//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references, then a leading `~`.
///
/// Bare `$VAR` is left alone. An unset variable without a default is an
/// error naming the config field.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = if value.contains("${") {
        shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
            std::env::var(var).map(Some).map_err(|_| LookupError {
                var_name: var.to_owned(),
            })
        })
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.cause.var_name),
        })?
        .into_owned()
    } else {
        value.to_owned()
    };

    Ok(shellexpand::tilde(&expanded).into_owned())
}

struct LookupError {
    var_name: String,
}
