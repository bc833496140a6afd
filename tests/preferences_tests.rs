//! Dark-mode persistence across store reloads.

use rotychat::preferences::PreferenceStore;
use rotychat::theme::theme_definition;
use rotychat::types::ThemeMode;
use std::fs;

#[test]
fn toggle_twice_restores_original_flag() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut store = PreferenceStore::load(dir.path());
    let original = store.is_dark_mode();

    store.toggle().expect("first toggle");
    store.toggle().expect("second toggle");

    assert_eq!(store.is_dark_mode(), original);
    assert_eq!(
        PreferenceStore::load(dir.path()).is_dark_mode(),
        original
    );
}

#[test]
fn toggle_switches_root_class_and_toggle_icon() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut store = PreferenceStore::load(dir.path());
    assert_eq!(store.theme().root_class(), "light");
    let light_icon = theme_definition(store.theme()).toggle_icon;

    assert!(store.toggle().expect("toggle"));

    assert_eq!(store.theme(), ThemeMode::Dark);
    assert_eq!(store.theme().root_class(), "dark");
    assert_ne!(theme_definition(store.theme()).toggle_icon, light_icon);
}

#[test]
fn flag_survives_reload() {
    let dir = tempfile::tempdir().expect("temp dir");
    {
        let mut store = PreferenceStore::load(dir.path());
        store.set(true).expect("persist dark mode");
    }

    let reloaded = PreferenceStore::load(dir.path());
    assert!(reloaded.is_dark_mode());

    let raw = fs::read_to_string(dir.path().join("isDarkMode.json")).expect("stored file");
    assert_eq!(raw, "true");
}

#[test]
fn garbage_on_disk_loads_as_light_mode() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("isDarkMode.json"), "maybe").expect("seed file");

    let store = PreferenceStore::load(dir.path());
    assert!(!store.is_dark_mode());
}

#[test]
fn storage_dir_is_created_on_first_write() {
    let dir = tempfile::tempdir().expect("temp dir");
    let nested = dir.path().join("rotychat").join("prefs");

    let mut store = PreferenceStore::load(&nested);
    store.toggle().expect("toggle");

    assert!(nested.join("isDarkMode.json").exists());
}
