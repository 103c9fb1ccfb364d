//! Preference persistence tests.

use marketdeck::preferences::{self, PanelKind, Preferences};

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let prefs = preferences::load(&dir.path().join("does-not-exist.json"));
    assert_eq!(prefs, Preferences::default());
    assert_eq!(prefs.current_symbol, "btcusdt");
    assert_eq!(prefs.visible_panels.len(), 4);
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, "{ not json at all").expect("write");

    assert_eq!(preferences::load(&path), Preferences::default());
}

#[test]
fn unknown_panel_name_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("prefs.json");
    std::fs::write(
        &path,
        r#"{"current_symbol":"ethusdt","visible_panels":["ticker","hologram"]}"#,
    )
    .expect("write");

    assert_eq!(preferences::load(&path), Preferences::default());
}

#[test]
fn unknown_symbol_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("prefs.json");
    std::fs::write(
        &path,
        r#"{"current_symbol":"xrpusdt","visible_panels":["ticker","orderbook"]}"#,
    )
    .expect("write");

    let prefs = preferences::load(&path);
    assert_eq!(prefs, Preferences::default());

    // The selector and the data layer must agree on the active symbol;
    // a symbol outside the built-in table would have the UI dropping
    // every delivery the session fetches for it.
    let app = marketdeck::tui::App::new(&prefs);
    assert_eq!(app.current_symbol().code, prefs.current_symbol);
}

#[test]
fn save_and_reload_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("prefs.json");

    let mut prefs = Preferences::default();
    prefs.current_symbol = "dogeusdt".to_string();
    prefs.toggle_panel(PanelKind::Trades);

    preferences::save(&path, &prefs);
    let reloaded = preferences::load(&path);

    assert_eq!(reloaded, prefs);
    assert_eq!(reloaded.current_symbol, "dogeusdt");
    assert!(!reloaded.is_visible(PanelKind::Trades));
    assert!(reloaded.is_visible(PanelKind::Chart));
}

#[test]
fn wire_names_match_legacy_format() {
    let prefs = Preferences::default();
    let json = serde_json::to_string(&prefs).expect("serialize");
    assert!(json.contains("\"ticker\""));
    assert!(json.contains("\"orderbook\""));
    assert!(json.contains("\"technical\""));
    assert!(json.contains("\"market_trade\""));
}

#[test]
fn legacy_file_decodes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("prefs.json");
    std::fs::write(
        &path,
        r#"{"current_symbol":"ethusdt","visible_panels":["orderbook","technical"]}"#,
    )
    .expect("write");

    let prefs = preferences::load(&path);
    assert_eq!(prefs.current_symbol, "ethusdt");
    assert_eq!(
        prefs.visible_panels,
        vec![PanelKind::OrderBook, PanelKind::Chart]
    );
}

#[test]
fn toggle_panel_is_symmetric() {
    let mut prefs = Preferences::default();
    for kind in PanelKind::ALL {
        prefs.toggle_panel(kind);
        assert!(!prefs.is_visible(kind));
        prefs.toggle_panel(kind);
        assert!(prefs.is_visible(kind));
    }
}

#[test]
fn save_to_unwritable_path_is_non_fatal() {
    let prefs = Preferences::default();
    // Directory path, not a file: the write fails but must not panic.
    preferences::save(std::path::Path::new("/"), &prefs);
}
