//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the manager.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the site manager.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ManagerConfig {
    /// API listener configuration.
    pub listener: ListenerConfig,

    /// Location of the site configuration directories.
    pub sites: SitesConfig,

    /// Parameters substituted into generated site configurations.
    pub template: TemplateConfig,

    /// Commands and endpoints of the managed nginx process.
    pub nginx: NginxConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// API authentication settings.
    pub auth: AuthConfig,
}

/// API listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8088").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Maximum request body size in bytes (edited configs arrive here).
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8088".to_string(),
            request_timeout_secs: 30,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Site configuration directory layout.
///
/// One file per site under `available_dir`; one symlink per enabled site
/// under `enabled_dir` pointing at the corresponding available file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SitesConfig {
    pub available_dir: String,
    pub enabled_dir: String,
}

impl Default for SitesConfig {
    fn default() -> Self {
        Self {
            available_dir: "/etc/nginx/sites-available".to_string(),
            enabled_dir: "/etc/nginx/sites-enabled".to_string(),
        }
    }
}

/// Parameters for the generated site configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Public domain suffix for the server_name directive.
    pub server_domain: String,

    /// Domain suffix the generated location proxies to.
    pub upstream_domain: String,

    /// Directory holding per-site certificate and key files.
    pub ssl_cert_dir: String,

    /// Directory nginx writes per-site access and error logs to.
    pub log_dir: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            server_domain: "hostedbroadcasting.com".to_string(),
            upstream_domain: "teve.inc".to_string(),
            ssl_cert_dir: "/etc/nginx/ssl_certs".to_string(),
            log_dir: "/var/log/nginx".to_string(),
        }
    }
}

/// Commands and endpoints of the managed nginx process.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NginxConfig {
    /// Syntax check command; zero exit means the tree is loadable.
    pub validate_command: Vec<String>,

    /// Reload command handed to the service manager.
    pub reload_command: Vec<String>,

    /// Upper bound for either command, in seconds.
    pub command_timeout_secs: u64,

    /// stub_status URL for the status view.
    pub stub_status_url: String,

    /// Timeout for the stub_status fetch, in seconds.
    pub status_timeout_secs: u64,
}

impl Default for NginxConfig {
    fn default() -> Self {
        Self {
            validate_command: vec!["nginx".to_string(), "-t".to_string()],
            reload_command: vec![
                "systemctl".to_string(),
                "reload".to_string(),
                "nginx".to_string(),
            ],
            command_timeout_secs: 10,
            stub_status_url: "http://localhost/nginx-status".to_string(),
            status_timeout_secs: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// API authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Require a Bearer token on mutating routes.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
        }
    }
}
