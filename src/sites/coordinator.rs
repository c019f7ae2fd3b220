//! Lifecycle orchestration for site configurations.
//!
//! # Responsibilities
//! - Sequence Create, Edit and Delete across the store, the symlink manager
//!   and the nginx controller
//! - Serialize operations per site name
//! - Convert every internal failure into an OperationOutcome
//!
//! # Design Decisions
//! - The duplicate guard runs before any disk mutation; a rejected create
//!   leaves the store byte-identical
//! - Delete disables the symlink before touching the file; if the link
//!   cannot be removed, the file is left alone so the enabled set never
//!   points at nothing
//! - A failed validation does not roll back a completed write; the outcome
//!   message states what changed so the operator can fix and retry

use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::config::schema::TemplateConfig;
use crate::nginx::runner::NginxController;
use crate::observability::metrics;
use crate::sites::name::SiteName;
use crate::sites::store::SiteStore;
use crate::sites::symlink::SymlinkManager;
use crate::sites::template::render_site_config;
use crate::sites::types::{OperationOutcome, SiteError};

/// Coordinates the configuration lifecycle against a running nginx.
///
/// Owns no site state itself; it sequences calls into the store and the
/// symlink manager and gates the reload on a successful validation.
pub struct LifecycleCoordinator<C> {
    store: SiteStore,
    symlinks: SymlinkManager,
    controller: C,
    template: TemplateConfig,
    /// Per-name advisory locks, held across a whole mutate→validate→reload
    /// sequence so concurrent operations on one site cannot interleave.
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl<C: NginxController> LifecycleCoordinator<C> {
    pub fn new(
        store: SiteStore,
        symlinks: SymlinkManager,
        controller: C,
        template: TemplateConfig,
    ) -> Self {
        Self {
            store,
            symlinks,
            controller,
            template,
            locks: DashMap::new(),
        }
    }

    pub fn store(&self) -> &SiteStore {
        &self.store
    }

    pub fn symlinks(&self) -> &SymlinkManager {
        &self.symlinks
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    async fn lock_name(&self, name: &SiteName) -> tokio::sync::OwnedMutexGuard<()> {
        let cell = self
            .locks
            .entry(name.as_str().to_string())
            .or_default()
            .clone();
        cell.lock_owned().await
    }

    /// Create a configuration for `server_name` proxying to `server_address`
    /// and enable it.
    pub async fn create(&self, server_address: &str, server_name: &str) -> OperationOutcome {
        let start = Instant::now();
        let name = match SiteName::parse(server_name) {
            Ok(name) => name,
            Err(e) => return self.finish("create", start, OperationOutcome::failed(e.to_string())),
        };
        if let Err(reason) = check_address(server_address) {
            return self.finish("create", start, OperationOutcome::failed(reason));
        }

        let _guard = self.lock_name(&name).await;

        // Duplicate guard: reject before anything touches disk.
        if self.store.exists(&name) {
            return self.finish(
                "create",
                start,
                OperationOutcome::failed(SiteError::AlreadyExists(name.to_string()).to_string()),
            );
        }

        let content = render_site_config(&name, server_address, &self.template);
        if let Err(e) = self.store.write(&name, &content) {
            return self.finish(
                "create",
                start,
                OperationOutcome::failed(format!("Failed to write {name} configuration: {e}")),
            );
        }

        if let Err(e) = self.symlinks.enable(&name, &self.store.path_for(&name)) {
            // The written file stays; the site simply is not enabled yet.
            return self.finish(
                "create",
                start,
                OperationOutcome::failed(format!("Failed to enable {name}: {e}")),
            );
        }

        tracing::info!(site = %name, address = %server_address, "Site configuration created");

        let outcome = if self.controller.validate_and_reload().await {
            OperationOutcome::ok(format!(
                "Successfully created configuration for {name}. Configuration has been applied to nginx."
            ))
        } else {
            OperationOutcome::failed(format!(
                "Failed to create {name} configuration. nginx configuration test failed."
            ))
        };
        self.finish("create", start, outcome)
    }

    /// Overwrite the configuration content for `name`.
    ///
    /// The write is unconditional; validation failure leaves the new content
    /// on disk and is reported as drift, not undone.
    pub async fn edit(&self, name: &str, new_content: &str) -> OperationOutcome {
        let start = Instant::now();
        let name = match SiteName::parse(name) {
            Ok(name) => name,
            Err(e) => return self.finish("edit", start, OperationOutcome::failed(e.to_string())),
        };

        let _guard = self.lock_name(&name).await;

        if let Err(e) = self.store.write(&name, new_content) {
            return self.finish(
                "edit",
                start,
                OperationOutcome::failed(format!("Failed to write {name} configuration: {e}")),
            );
        }

        tracing::info!(site = %name, bytes = new_content.len(), "Site configuration updated");

        let outcome = if self.controller.validate_and_reload().await {
            OperationOutcome::ok(format!(
                "Successfully updated {name} configuration. Configuration has been applied to nginx."
            ))
        } else {
            OperationOutcome::failed(format!(
                "Failed to update {name} configuration. nginx configuration test failed. \
                 The edited content remains on disk."
            ))
        };
        self.finish("edit", start, outcome)
    }

    /// Remove the configuration and its enable link.
    ///
    /// Order matters here: the enable link goes first. Removing the file
    /// while the link still exists would leave nginx's enabled set pointing
    /// at nothing, and the next validation would reject the whole tree.
    pub async fn delete(&self, name: &str) -> OperationOutcome {
        let start = Instant::now();
        let name = match SiteName::parse(name) {
            Ok(name) => name,
            Err(e) => return self.finish("delete", start, OperationOutcome::failed(e.to_string())),
        };

        let _guard = self.lock_name(&name).await;

        match self.symlinks.disable(&name) {
            Ok(removed) => {
                if removed {
                    tracing::debug!(site = %name, "Enable link removed");
                }
            }
            Err(e) => {
                // Do not touch the file while the link may still exist.
                return self.finish(
                    "delete",
                    start,
                    OperationOutcome::failed(format!("Failed to remove {name} symlink: {e}")),
                );
            }
        }

        // File removal is best-effort; a failure is reported but does not
        // stop the tree from being validated and reloaded.
        let mut removal_problem = None;
        match self.store.delete(&name) {
            Ok(removed) => {
                if removed {
                    tracing::info!(site = %name, "Site configuration deleted");
                }
            }
            Err(e) => {
                removal_problem = Some(format!(
                    "Failed to delete {name} configuration file: {e}"
                ));
            }
        }

        let applied = self.controller.validate_and_reload().await;

        let outcome = match (removal_problem, applied) {
            (None, true) => {
                OperationOutcome::ok(format!("Successfully deleted {name} configuration."))
            }
            (None, false) => OperationOutcome::failed(format!(
                "Deleted {name} configuration, but the nginx configuration test or reload failed."
            )),
            (Some(problem), true) => OperationOutcome::failed(problem),
            (Some(problem), false) => OperationOutcome::failed(format!(
                "{problem}; the nginx configuration test or reload also failed."
            )),
        };
        self.finish("delete", start, outcome)
    }

    fn finish(
        &self,
        operation: &'static str,
        start: Instant,
        outcome: OperationOutcome,
    ) -> OperationOutcome {
        if !outcome.success {
            tracing::warn!(operation, message = %outcome.message, "Operation failed");
        }
        metrics::record_operation(operation, outcome.success, start);
        outcome
    }
}

/// Upstream addresses share the site-name character set, since they are
/// spliced into the generated config verbatim.
fn check_address(address: &str) -> Result<(), String> {
    let ok = !address.is_empty()
        && address
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if ok {
        Ok(())
    } else {
        Err(format!(
            "Invalid server address {address:?}: only alphanumerics, '.', '_' and '-' are allowed"
        ))
    }
}
