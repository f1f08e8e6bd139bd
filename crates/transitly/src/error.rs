//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use transitly_config::ConfigError;
use transitly_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFIG: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(transitly::not_found),
        help("Run: transitly {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Simulation ───────────────────────────────────────────────────

    #[error("Simulation could not start: {message}")]
    #[diagnostic(code(transitly::simulation))]
    Simulation { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(transitly::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(transitly::config),
        help(
            "Check the config file at: {path}\n\
             Regenerate it with: transitly config init --force"
        )
    )]
    Config { message: String, path: String },

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(transitly::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Config { .. } | Self::ConfigExists { .. } => exit_code::CONFIG,
            Self::Simulation { .. } | Self::Io(_) => exit_code::GENERAL,
        }
    }

    pub fn not_found(resource_type: &str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.into(),
            list_command: format!("{resource_type}s list"),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidConfig { message } => CliError::Config {
                message,
                path: transitly_config::config_path().display().to_string(),
            },
            other @ (CoreError::RuntimeUnavailable { .. } | CoreError::AlreadyRunning { .. }) => {
                CliError::Simulation {
                    message: other.to_string(),
                }
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
                path: transitly_config::config_path().display().to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        assert_eq!(CliError::not_found("bus", "bus9").exit_code(), exit_code::NOT_FOUND);
        assert_eq!(
            CliError::Validation {
                field: "ticks".into(),
                reason: "too many".into()
            }
            .exit_code(),
            exit_code::USAGE
        );
        let cfg: CliError = CoreError::InvalidConfig {
            message: "bad".into(),
        }
        .into();
        assert_eq!(cfg.exit_code(), exit_code::CONFIG);
    }

    #[test]
    fn not_found_points_at_list_command() {
        let CliError::NotFound { list_command, .. } = CliError::not_found("stop", "stop9") else {
            panic!("expected NotFound");
        };
        assert_eq!(list_command, "stops list");
    }
}
