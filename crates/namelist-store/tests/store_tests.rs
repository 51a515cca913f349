//! File-level tests for the namelist store.

use namelist_store::{format_value, DocumentFormat, KeyPath, Namelist, StoreError, Value};
use test_utils::{fixtures, TempNamelist};

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_yaml_fixture() {
    let file = TempNamelist::yaml(fixtures::ROOT_ONLY);
    let nl = Namelist::load(file.path()).unwrap();

    assert_eq!(nl.i64("share", "max_dom").unwrap(), 1);
    assert_eq!(nl.string("geogrid", "map_proj").unwrap(), "lambert");
    assert_eq!(nl.f64("geogrid", "dx").unwrap(), 500.0);
    assert_eq!(
        nl.section_names().collect::<Vec<_>>(),
        vec!["share", "geogrid"]
    );
}

#[test]
fn test_load_json_fixture() {
    let file = TempNamelist::new("namelist.json", fixtures::ROOT_ONLY_JSON);
    let nl = Namelist::load(file.path()).unwrap();

    assert_eq!(nl.i64_list("geogrid", "e_we", 1).unwrap(), vec![41]);
    assert_eq!(nl.string_list("geogrid", "geog_data_res", 1).unwrap(), vec!["30s"]);
}

#[test]
fn test_load_missing_file() {
    let file = TempNamelist::yaml(fixtures::ROOT_ONLY);
    let err = Namelist::load(file.sibling("nope.yaml")).unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
}

#[test]
fn test_load_malformed_yaml() {
    let file = TempNamelist::yaml("share: [max_dom: 1\n");
    let err = Namelist::load(file.path()).unwrap_err();
    assert!(matches!(err, StoreError::Yaml(_)));
}

// ============================================================================
// Saving
// ============================================================================

#[test]
fn test_save_preserves_unrelated_keys() {
    let file = TempNamelist::yaml(fixtures::ROOT_ONLY);
    let mut nl = Namelist::load(file.path()).unwrap();
    nl.set("share", "max_dom", Value::from(2));
    nl.save(file.path()).unwrap();

    let reloaded = Namelist::load(file.path()).unwrap();
    assert_eq!(reloaded.i64("share", "max_dom").unwrap(), 2);
    assert_eq!(reloaded.string("share", "wrf_core").unwrap(), "ARW");
    assert_eq!(
        reloaded.string("geogrid", "geog_data_path").unwrap(),
        "/data/geog"
    );
}

#[test]
fn test_save_to_other_path_leaves_input() {
    let file = TempNamelist::yaml(fixtures::ROOT_ONLY);
    let out = file.sibling("out.json");

    let mut nl = Namelist::load(file.path()).unwrap();
    nl.set("share", "max_dom", Value::from(7));
    nl.save(&out).unwrap();

    assert_eq!(file.contents(), fixtures::ROOT_ONLY);
    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.trim_start().starts_with('{'));
    assert_eq!(Namelist::load(&out).unwrap().i64("share", "max_dom").unwrap(), 7);
}

#[test]
fn test_json_keeps_section_order() {
    let nl = Namelist::from_yaml_str(fixtures::THREE_DOMAIN_CHAIN).unwrap();
    let json = nl.to_string_as(DocumentFormat::Json).unwrap();
    assert!(json.find("\"share\"").unwrap() < json.find("\"geogrid\"").unwrap());
    assert!(json.find("\"parent_id\"").unwrap() < json.find("\"truelat2\"").unwrap());
}

// ============================================================================
// Key paths
// ============================================================================

#[test]
fn test_get_path_list_element() {
    let nl = Namelist::from_yaml_str(fixtures::THREE_DOMAIN_CHAIN).unwrap();
    let path: KeyPath = "geogrid:e_we:2".parse().unwrap();
    assert_eq!(format_value(nl.get_path(&path).unwrap()), "51");
}

#[test]
fn test_get_path_out_of_range() {
    let nl = Namelist::from_yaml_str(fixtures::THREE_DOMAIN_CHAIN).unwrap();
    let path: KeyPath = "geogrid:e_we:3".parse().unwrap();
    assert!(matches!(
        nl.get_path(&path),
        Err(StoreError::IndexOutOfRange { index: 3, len: 3, .. })
    ));
}

#[test]
fn test_set_from_str_whole_list() {
    let mut nl = Namelist::from_yaml_str(fixtures::THREE_DOMAIN_CHAIN).unwrap();
    let path: KeyPath = "share:start_date".parse().unwrap();
    nl.set_from_str(&path, "2024-02-01_00:00:00,2024-02-01_00:00:00,").unwrap();
    assert_eq!(
        nl.get("share", "start_date").unwrap(),
        &Value::Sequence(vec![
            Value::from("2024-02-01_00:00:00"),
            Value::from("2024-02-01_00:00:00"),
        ])
    );
}

#[test]
fn test_set_from_str_unknown_key() {
    let mut nl = Namelist::from_yaml_str(fixtures::ROOT_ONLY).unwrap();
    let path: KeyPath = "geogrid:nonsense".parse().unwrap();
    assert!(matches!(
        nl.set_from_str(&path, "1"),
        Err(StoreError::MissingKey(_))
    ));
}
