//! Scenario: layered store config — defaults, override order, strictness.

use oak_config::{load_layered_yaml, load_layered_yaml_from_strings, StoreConfig};

#[test]
fn no_layers_means_defaults() {
    let cfg = load_layered_yaml_from_strings(&[]).unwrap();
    assert_eq!(cfg, StoreConfig::default());
    assert_eq!(cfg.store_name, "Oak Donuts");
    assert_eq!(cfg.database_url, None);
}

#[test]
fn later_layer_overrides_earlier_keys_only() {
    let base = "store_name: Oak Donuts HQ\ndatabase_url: sqlite:hq.db\n";
    let site = "store_name: Oak Donuts Pier 7\n";

    let cfg = load_layered_yaml_from_strings(&[base, site]).unwrap();
    assert_eq!(cfg.store_name, "Oak Donuts Pier 7");
    // Untouched base keys survive the merge.
    assert_eq!(cfg.database_url.as_deref(), Some("sqlite:hq.db"));
}

#[test]
fn empty_layer_is_a_no_op() {
    let base = "store_name: Oak Donuts HQ\n";
    let cfg = load_layered_yaml_from_strings(&[base, ""]).unwrap();
    assert_eq!(cfg.store_name, "Oak Donuts HQ");
}

#[test]
fn unknown_keys_fail_loudly() {
    let err = load_layered_yaml_from_strings(&["store_nmae: typo\n"]).unwrap_err();
    assert!(format!("{err:#}").contains("expected shape"));
}

#[test]
fn missing_file_is_reported_with_its_path() {
    let err = load_layered_yaml(&["/no/such/dir/pos.yaml"]).unwrap_err();
    assert!(format!("{err:#}").contains("/no/such/dir/pos.yaml"));
}

#[test]
fn receipt_footer_is_optional() {
    let cfg = load_layered_yaml_from_strings(&["receipt_footer: thanks, see you tomorrow\n"])
        .unwrap();
    assert_eq!(
        cfg.receipt_footer.as_deref(),
        Some("thanks, see you tomorrow")
    );
}
