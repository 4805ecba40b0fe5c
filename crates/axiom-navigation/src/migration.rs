//! Legacy address migration
//!
//! Session history written by older versions may reference pages the
//! embedded web server used to serve, or internal pages that still carry an
//! authorization token. [`AddressMigrator`] rewrites such addresses into their
//! current form before they become part of a restored session.
//!
//! Migration never drops an entry: every input address produces exactly one
//! output address, falling back to the best prior value when a rewrite does
//! not yield a parseable URL.

use url::Url;

use crate::config::MigrationConfig;
use crate::internal::InternalUrl;

/// What to do when a rewrite reveals the current prefix nested inside itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedRepair {
    /// Leave the rewritten address as is
    Keep,
    /// Keep only the innermost target and report the original address
    KeepLast,
}

/// One legacy-prefix → current-prefix substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pub legacy_prefix: String,
    pub current_prefix: String,
    pub repair: NestedRepair,
}

impl RewriteRule {
    pub fn new(legacy_prefix: String, current_prefix: String, repair: NestedRepair) -> Self {
        Self {
            legacy_prefix,
            current_prefix,
            repair,
        }
    }

    /// Error pages used to live on the web server and now redirect through
    /// the session-restore page.
    pub fn error_page(config: &MigrationConfig) -> Self {
        Self::new(
            config.legacy_error_page_prefix(),
            config.session_restore_prefix(),
            NestedRepair::KeepLast,
        )
    }

    /// Returns `None` when the rule does not match or the rewrite does not parse
    fn apply(&self, url: &Url, diagnostics: &mut Vec<MigrationDiagnostic>) -> Option<Url> {
        let original = url.as_str();
        if !original.starts_with(&self.legacy_prefix) {
            return None;
        }

        let mut rewritten = original.replace(&self.legacy_prefix, &self.current_prefix);

        if self.repair == NestedRepair::KeepLast {
            let repaired = {
                let parts: Vec<&str> = rewritten.split(self.current_prefix.as_str()).collect();
                match parts.as_slice() {
                    [_, _, .., last] => Some(format!("{}{}", self.current_prefix, last)),
                    _ => None,
                }
            };

            if let Some(repaired) = repaired {
                tracing::warn!(
                    original = %original,
                    "Session urls have nested internal links, keeping the innermost target"
                );
                diagnostics.push(MigrationDiagnostic::NestedInternalLinks {
                    original: original.to_string(),
                });
                rewritten = repaired;
            }
        }

        match Url::parse(&rewritten) {
            Ok(migrated) => Some(migrated),
            Err(e) => {
                tracing::debug!(url = %original, error = %e, "Rewritten url does not parse, keeping original");
                None
            }
        }
    }
}

/// Non-fatal findings worth investigating offline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationDiagnostic {
    /// A stored address contained the session-restore prefix more than once
    NestedInternalLinks { original: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Migration {
    pub urls: Vec<Url>,
    pub diagnostics: Vec<MigrationDiagnostic>,
}

#[derive(Debug, Clone)]
pub struct AddressMigrator {
    config: MigrationConfig,
    rules: Vec<RewriteRule>,
}

impl AddressMigrator {
    pub fn new(config: MigrationConfig) -> Self {
        // TODO: add the reader-mode rule for `<origin>reader-mode/page?url=` once
        // MigrationConfig carries the current reader-mode path; until then
        // those addresses pass through unchanged.
        let rules = vec![RewriteRule::error_page(&config)];
        Self { config, rules }
    }

    /// Rules are applied in order, each seeing the previous rule's output
    pub fn with_rules(config: MigrationConfig, rules: Vec<RewriteRule>) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    pub fn migrate(&self, urls: &[Url]) -> Vec<Url> {
        self.migrate_with_report(urls).urls
    }

    pub fn migrate_with_report(&self, urls: &[Url]) -> Migration {
        let mut diagnostics = Vec::new();
        let urls = urls
            .iter()
            .map(|url| self.migrate_one(url, &mut diagnostics))
            .collect();

        Migration { urls, diagnostics }
    }

    pub fn migrate_url(&self, url: &Url) -> Url {
        self.migrate_one(url, &mut Vec::new())
    }

    fn migrate_one(&self, url: &Url, diagnostics: &mut Vec<MigrationDiagnostic>) -> Url {
        let mut migrated = url.clone();
        for rule in &self.rules {
            if let Some(rewritten) = rule.apply(&migrated, diagnostics) {
                tracing::debug!(from = %migrated, to = %rewritten, "Migrated legacy url");
                migrated = rewritten;
            }
        }

        if let Some(internal) = InternalUrl::new(&migrated, &self.config) {
            if internal.is_authorized() {
                if let Ok(stripped) = Url::parse(&internal.strip_authorization()) {
                    return stripped;
                }
            }
        }

        migrated
    }
}

impl Default for AddressMigrator {
    fn default() -> Self {
        Self::new(MigrationConfig::default())
    }
}
