//! Shared fixtures for integration testing.

use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::TempDir;

use nginx_site_manager::config::ManagerConfig;
use nginx_site_manager::nginx::runner::{NginxController, ReloadResult, ValidationResult};

/// Sandboxed directory layout standing in for /etc/nginx and /var/log/nginx.
pub struct Sandbox {
    /// Held for its Drop; the paths below live inside it.
    #[allow(dead_code)]
    pub root: TempDir,
    pub available: PathBuf,
    pub enabled: PathBuf,
    pub logs: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let available = root.path().join("sites-available");
        let enabled = root.path().join("sites-enabled");
        let logs = root.path().join("log");
        std::fs::create_dir_all(&available).unwrap();
        std::fs::create_dir_all(&enabled).unwrap();
        std::fs::create_dir_all(&logs).unwrap();
        Self {
            root,
            available,
            enabled,
            logs,
        }
    }

    /// A config whose paths point into the sandbox and whose nginx commands
    /// are no-ops that always succeed.
    pub fn config(&self) -> ManagerConfig {
        let mut config = ManagerConfig::default();
        config.sites.available_dir = self.available.display().to_string();
        config.sites.enabled_dir = self.enabled.display().to_string();
        config.template.log_dir = self.logs.display().to_string();
        config.nginx.validate_command = vec!["true".to_string()];
        config.nginx.reload_command = vec!["true".to_string()];
        config.observability.metrics_enabled = false;
        config
    }
}

/// Scripted controller that records call order.
///
/// `on_validate` runs at validation time so tests can observe filesystem
/// state mid-operation (e.g. the delete ordering invariant).
#[allow(dead_code)]
pub struct MockController {
    pub validate_ok: bool,
    pub reload_ok: bool,
    pub calls: Mutex<Vec<&'static str>>,
    pub on_validate: Option<Box<dyn Fn() + Send + Sync>>,
}

#[allow(dead_code)]
impl MockController {
    pub fn new(validate_ok: bool, reload_ok: bool) -> Self {
        Self {
            validate_ok,
            reload_ok,
            calls: Mutex::new(Vec::new()),
            on_validate: None,
        }
    }

    pub fn with_validate_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_validate = Some(Box::new(hook));
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

impl NginxController for MockController {
    async fn validate(&self) -> ValidationResult {
        self.calls.lock().unwrap().push("validate");
        if let Some(hook) = &self.on_validate {
            hook();
        }
        ValidationResult {
            ok: self.validate_ok,
            diagnostic: (!self.validate_ok).then(|| "nginx: configuration test failed".to_string()),
        }
    }

    async fn reload(&self) -> ReloadResult {
        self.calls.lock().unwrap().push("reload");
        ReloadResult { ok: self.reload_ok }
    }
}
