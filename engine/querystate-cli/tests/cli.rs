use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn normalize_elides_defaults() {
    cargo_bin_cmd!("querystate")
        .args([
            "normalize",
            "--schema",
            "filter",
            "--schema",
            "list",
            "?minDays=1&q=fur&sort=date&desc=true&junk=1",
        ])
        .assert()
        .success()
        .stdout("q=fur&desc=1\n");
}

#[test]
fn normalize_of_defaults_is_empty() {
    cargo_bin_cmd!("querystate")
        .args(["normalize", "--schema", "map", "center=oops"])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn parse_prints_text_state() {
    cargo_bin_cmd!("querystate")
        .args([
            "parse",
            "--schema",
            "map",
            "https://cons.example/map?center=1.5+2+10",
        ])
        .assert()
        .success()
        .stdout("# map\ncenter = (lat=1.5, lng=2, zoom=10)\n");
}

#[test]
fn parse_prints_json_state() {
    let output = cargo_bin_cmd!("querystate")
        .args(["parse", "--schema", "list", "--json", "sort=name&sort=date"])
        .output()
        .unwrap();
    assert!(output.status.success(), "parse failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "list": { "sort": "name", "desc": false } })
    );
}

#[test]
fn defaults_lists_every_field() {
    cargo_bin_cmd!("querystate")
        .args(["defaults", "--schema", "calendar"])
        .assert()
        .success()
        .stdout("# calendar\ninYourTimeZone = false\n");
}

#[test]
fn describe_prints_types() {
    cargo_bin_cmd!("querystate")
        .args(["describe", "--schema", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "sort: enum<string> date|name|attendees|followed = date",
        ))
        .stdout(predicate::str::contains("desc: boolean = 0"));
}

#[test]
fn is_default_reports_state() {
    cargo_bin_cmd!("querystate")
        .args(["is-default", "--schema", "filter", "maxDays=seven"])
        .assert()
        .success()
        .stdout("default\n");

    cargo_bin_cmd!("querystate")
        .args(["is-default", "--schema", "filter", "maxDays=8"])
        .assert()
        .code(3)
        .stdout("modified\n");
}

#[test]
fn unknown_schema_is_rejected() {
    cargo_bin_cmd!("querystate")
        .args(["parse", "--schema", "grid", "q=x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("grid"));
}

#[test]
fn invalid_url_fails() {
    cargo_bin_cmd!("querystate")
        .args(["parse", "--schema", "filter", "http://[bad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid URL"));
}
