//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parseable)
//! - Catch directory layouts that cannot work (available == enabled)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ManagerConfig → Result<(), Vec<ValidationError>>
//! - Runs before a config is accepted into the system, on startup and reload

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ManagerConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    BadBindAddress(String),

    #[error("sites.{0} must not be empty")]
    EmptyDirectory(&'static str),

    #[error("sites.available_dir and sites.enabled_dir must differ")]
    SameDirectories,

    #[error("nginx.{0} must not be empty")]
    EmptyCommand(&'static str),

    #[error("nginx.command_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("template.{0} must not be empty")]
    EmptyTemplateField(&'static str),

    #[error("observability.metrics_address {0:?} is not a valid socket address")]
    BadMetricsAddress(String),

    #[error("auth.api_key must not be empty when auth is enabled")]
    EmptyApiKey,
}

/// Check a parsed configuration for semantic problems.
pub fn validate_config(config: &ManagerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BadBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.sites.available_dir.is_empty() {
        errors.push(ValidationError::EmptyDirectory("available_dir"));
    }
    if config.sites.enabled_dir.is_empty() {
        errors.push(ValidationError::EmptyDirectory("enabled_dir"));
    }
    if !config.sites.available_dir.is_empty()
        && config.sites.available_dir == config.sites.enabled_dir
    {
        errors.push(ValidationError::SameDirectories);
    }

    if config.nginx.validate_command.is_empty() {
        errors.push(ValidationError::EmptyCommand("validate_command"));
    }
    if config.nginx.reload_command.is_empty() {
        errors.push(ValidationError::EmptyCommand("reload_command"));
    }
    if config.nginx.command_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.template.server_domain.is_empty() {
        errors.push(ValidationError::EmptyTemplateField("server_domain"));
    }
    if config.template.upstream_domain.is_empty() {
        errors.push(ValidationError::EmptyTemplateField("upstream_domain"));
    }
    if config.template.ssl_cert_dir.is_empty() {
        errors.push(ValidationError::EmptyTemplateField("ssl_cert_dir"));
    }
    if config.template.log_dir.is_empty() {
        errors.push(ValidationError::EmptyTemplateField("log_dir"));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::BadMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.auth.enabled && config.auth.api_key.is_empty() {
        errors.push(ValidationError::EmptyApiKey);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
