// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used)]

use mathbench_app_core::config::{ConfigService, ConfigStore};
use mathbench_app_core::config_port::{ConfigPort, PREFS_KEY};
use mathbench_app_core::prefs::WorkbenchPrefs;
use mathbench_config_fs::FsConfigStore;

#[test]
fn prefs_round_trip_through_the_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let svc = ConfigService::new(FsConfigStore::with_base(dir.path().join("cfg")).unwrap());

    let mut prefs = WorkbenchPrefs::default();
    prefs.viewport.slices = 80;
    prefs.editor.debounce_ms = 150;
    assert!(svc.save_prefs(&prefs));

    let path = svc.store().path_for(PREFS_KEY);
    assert!(path.exists());
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.contains("\"debounce_ms\": 150"));

    // A fresh store over the same directory sees the saved file.
    let reopened = ConfigService::new(FsConfigStore::with_base(dir.path().join("cfg")).unwrap());
    assert_eq!(reopened.load_prefs(), Some(prefs));
}

#[test]
fn missing_and_removed_keys_are_not_errors() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::with_base(dir.path()).unwrap();
    assert!(store.remove("never-written").is_ok());

    let svc = ConfigService::new(store);
    assert!(svc.load_document().is_none());
    assert!(svc.save_document("hello"));
    svc.reset("document").unwrap();
    assert!(svc.load_document().is_none());
}
