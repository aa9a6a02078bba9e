// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config port used by the workbench shell and panels.

use tracing::warn;

use crate::config::{ConfigService, ConfigStore};
use crate::prefs::WorkbenchPrefs;

/// Key under which [`WorkbenchPrefs`] are stored.
pub const PREFS_KEY: &str = "prefs";
/// Key under which the document editor saves its text.
pub const DOCUMENT_KEY: &str = "document";

/// Config-facing port for workbench preferences and saved documents.
pub trait ConfigPort {
    /// Load preferences (returns None if missing or unreadable).
    fn load_prefs(&self) -> Option<WorkbenchPrefs>;
    /// Persist preferences. Returns whether the write succeeded.
    fn save_prefs(&self, prefs: &WorkbenchPrefs) -> bool;
    /// Load the saved document text.
    fn load_document(&self) -> Option<String>;
    /// Persist the document text. Returns whether the write succeeded.
    fn save_document(&self, text: &str) -> bool;
}

impl<S: ConfigStore> ConfigPort for ConfigService<S> {
    fn load_prefs(&self) -> Option<WorkbenchPrefs> {
        match self.load(PREFS_KEY) {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!(%err, "prefs unreadable, using defaults");
                None
            }
        }
    }

    fn save_prefs(&self, prefs: &WorkbenchPrefs) -> bool {
        self.save(PREFS_KEY, prefs)
            .map_err(|err| warn!(%err, "failed to save prefs"))
            .is_ok()
    }

    fn load_document(&self) -> Option<String> {
        match self.load(DOCUMENT_KEY) {
            Ok(text) => text,
            Err(err) => {
                warn!(%err, "saved document unreadable");
                None
            }
        }
    }

    fn save_document(&self, text: &str) -> bool {
        self.save(DOCUMENT_KEY, &text)
            .map_err(|err| warn!(%err, "failed to save document"))
            .is_ok()
    }
}
