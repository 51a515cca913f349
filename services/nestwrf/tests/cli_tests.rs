//! Command-line tests for the `nestwrf` and `namelist` binaries.

use assert_cmd::Command;
use namelist_store::Namelist;
use predicates::prelude::*;
use test_utils::{fixtures, NamelistBuilder, TempNamelist};

fn nestwrf() -> Command {
    let mut cmd = Command::cargo_bin("nestwrf").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("NESTWRF_LOG_LEVEL")
        .env_remove("NESTWRF_LOG_FORMAT");
    cmd
}

fn namelist() -> Command {
    let mut cmd = Command::cargo_bin("namelist").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("NESTWRF_LOG_LEVEL")
        .env_remove("NESTWRF_LOG_FORMAT");
    cmd
}

// ============================================================================
// nestwrf: reporting
// ============================================================================

#[test]
fn test_report_is_default() {
    let file = TempNamelist::yaml(fixtures::THREE_DOMAIN_CHAIN);

    nestwrf()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Domain  1 ( 1)"))
        .stdout(predicate::str::contains("Domain  3 ( 2)"))
        .stdout(predicate::str::contains("Parent end                 31           31"));

    assert_eq!(file.contents(), fixtures::THREE_DOMAIN_CHAIN);
}

#[test]
fn test_report_json() {
    let file = TempNamelist::yaml(fixtures::ROOT_ONLY);

    let output = nestwrf()
        .arg(file.path())
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports.as_array().unwrap().len(), 1);
    assert_eq!(reports[0]["e_we"], 41);
    assert_eq!(reports[0]["run_hours"], 36);
}

#[test]
fn test_logs_stay_off_stdout() {
    let file = TempNamelist::yaml(fixtures::ROOT_ONLY);

    let output = nestwrf()
        .arg(file.path())
        .args(["--format", "json", "--log-level", "debug"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(serde_json::from_slice::<serde_json::Value>(&output.stdout).is_ok());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Computed domain extent"));
}

// ============================================================================
// nestwrf: adding nests
// ============================================================================

#[test]
fn test_center_nest_updates_input() {
    let file = TempNamelist::yaml(fixtures::ROOT_ONLY);

    nestwrf()
        .arg(file.path())
        .args(["--center", "5.0", "52.0", "-x", "4", "-y", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added domain 2 (parent 1, ratio 5)"))
        .stdout(predicate::str::contains("i_parent_start:       17"));

    let saved = Namelist::load(file.path()).unwrap();
    assert_eq!(saved.i64("share", "max_dom").unwrap(), 2);
    assert_eq!(saved.i64_list("geogrid", "i_parent_start", 2).unwrap(), vec![1, 17]);
    assert_eq!(saved.i64_list("geogrid", "e_we", 2).unwrap(), vec![41, 41]);
    assert_eq!(saved.string("share", "wrf_core").unwrap(), "ARW");
}

#[test]
fn test_center_with_negative_coordinates() {
    let yaml = NamelistBuilder::new(500.0, 500.0, 41, 41)
        .projection(30.0, 60.0, 40.0, -75.0)
        .to_yaml();
    let file = TempNamelist::yaml(&yaml);

    nestwrf()
        .arg(file.path())
        .args(["-c", "-75", "40", "-x", "4", "-y", "4", "-r", "3"])
        .assert()
        .success();

    let saved = Namelist::load(file.path()).unwrap();
    assert_eq!(saved.i64_list("geogrid", "parent_grid_ratio", 2).unwrap(), vec![1, 3]);
    assert_eq!(saved.i64_list("geogrid", "e_sn", 2).unwrap(), vec![41, 25]);
}

#[test]
fn test_box_nest_to_other_output() {
    let file = TempNamelist::yaml(fixtures::ROOT_ONLY);
    let out = file.sibling("nested.json");

    nestwrf()
        .arg(file.path())
        .args(["--box", "52.05", "4.95", "51.95", "5.05", "-o"])
        .arg(&out)
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"domain\": 2"));

    assert_eq!(file.contents(), fixtures::ROOT_ONLY);
    let saved = Namelist::load(&out).unwrap();
    assert_eq!(saved.i64("share", "max_dom").unwrap(), 2);
    assert_eq!(saved.string_list("geogrid", "geog_data_res", 2).unwrap(), vec!["30s", "30s"]);
}

#[test]
fn test_center_and_box_conflict() {
    let file = TempNamelist::yaml(fixtures::ROOT_ONLY);

    nestwrf()
        .arg(file.path())
        .args(["-c", "5", "52", "-b", "52.05", "4.95", "51.95", "5.05"])
        .assert()
        .failure();
    assert_eq!(file.contents(), fixtures::ROOT_ONLY);
}

// ============================================================================
// nestwrf: errors and exit codes
// ============================================================================

#[test]
fn test_invalid_parent_exit_code() {
    let file = TempNamelist::yaml(fixtures::ROOT_ONLY);

    nestwrf()
        .arg(file.path())
        .args(["-c", "5", "52", "-p", "99"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid parent domain 99"));
    assert_eq!(file.contents(), fixtures::ROOT_ONLY);
}

#[test]
fn test_inverted_box_exit_code() {
    let file = TempNamelist::yaml(fixtures::ROOT_ONLY);

    nestwrf()
        .arg(file.path())
        .args(["-b", "51.95", "4.95", "52.05", "5.05"])
        .assert()
        .code(4);
    assert_eq!(file.contents(), fixtures::ROOT_ONLY);
}

#[test]
fn test_infinite_center_exit_code() {
    let file = TempNamelist::yaml(fixtures::ROOT_ONLY);

    nestwrf()
        .arg(file.path())
        .args(["-c", "inf", "52"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("longitude"));
    assert_eq!(file.contents(), fixtures::ROOT_ONLY);
}

#[test]
fn test_huge_ratio_exit_code() {
    let file = TempNamelist::yaml(fixtures::ROOT_ONLY);

    nestwrf()
        .arg(file.path())
        .args(["-c", "5", "52", "-r", "4611686018427387903"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("too large"));
    assert_eq!(file.contents(), fixtures::ROOT_ONLY);
}

#[test]
fn test_bad_log_format_env_exit_code() {
    let file = TempNamelist::yaml(fixtures::ROOT_ONLY);

    nestwrf()
        .env("NESTWRF_LOG_FORMAT", "xml")
        .arg(file.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("NESTWRF_LOG_FORMAT"));
}

#[test]
fn test_unsupported_projection_exit_code() {
    let file = TempNamelist::yaml(fixtures::POLAR_GRID);

    nestwrf()
        .arg(file.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("polar"));
}

#[test]
fn test_missing_file_exit_code() {
    let file = TempNamelist::yaml(fixtures::ROOT_ONLY);

    nestwrf()
        .arg(file.sibling("missing.yaml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read"));
}

// ============================================================================
// namelist get/set
// ============================================================================

#[test]
fn test_get_scalar_and_element() {
    let file = TempNamelist::yaml(fixtures::THREE_DOMAIN_CHAIN);

    namelist()
        .arg(file.path())
        .args(["get", "share:max_dom"])
        .assert()
        .success()
        .stdout("3\n");

    namelist()
        .arg(file.path())
        .args(["get", "geogrid:e_we:2"])
        .assert()
        .success()
        .stdout("51\n");

    namelist()
        .arg(file.path())
        .args(["get", "geogrid:geog_data_res"])
        .assert()
        .success()
        .stdout("10m, 2m, 30s\n");
}

#[test]
fn test_set_keeps_types() {
    let file = TempNamelist::yaml(fixtures::THREE_DOMAIN_CHAIN);

    namelist()
        .arg(file.path())
        .args(["set", "geogrid:dx", "12000"])
        .assert()
        .success();
    namelist()
        .arg(file.path())
        .args(["set", "geogrid:e_we", "41,61,71,"])
        .assert()
        .success();
    namelist()
        .arg(file.path())
        .args(["set", "geogrid:ref_lon", "-3.5"])
        .assert()
        .success();

    let saved = Namelist::load(file.path()).unwrap();
    assert_eq!(saved.f64("geogrid", "dx").unwrap(), 12000.0);
    assert_eq!(saved.i64_list("geogrid", "e_we", 3).unwrap(), vec![41, 61, 71]);
    assert_eq!(saved.f64("geogrid", "ref_lon").unwrap(), -3.5);
}

#[test]
fn test_set_bad_value_leaves_file() {
    let file = TempNamelist::yaml(fixtures::ROOT_ONLY);

    namelist()
        .arg(file.path())
        .args(["set", "share:max_dom", "three"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("share:max_dom"));
    assert_eq!(file.contents(), fixtures::ROOT_ONLY);
}

#[test]
fn test_get_unknown_key() {
    let file = TempNamelist::yaml(fixtures::ROOT_ONLY);

    namelist()
        .arg(file.path())
        .args(["get", "geogrid:nonsense"])
        .assert()
        .code(2);
}
