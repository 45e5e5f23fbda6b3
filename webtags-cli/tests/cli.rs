use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn index_arg() -> String {
    fixture_path("index.json").display().to_string()
}

fn run_json(args: &[&str]) -> Value {
    let mut cmd = cargo_bin_cmd!("webtags");
    cmd.arg("--webref-index").arg(index_arg()).args(args);
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout to be JSON")
}

fn names(list: &Value, key: &str) -> Vec<String> {
    list.as_array()
        .expect("array")
        .iter()
        .map(|item| item[key].as_str().expect("string").to_string())
        .collect()
}

#[test]
fn transforms_html_fixture() {
    let specs = run_json(&["--specs", "html"]);
    assert_eq!(specs.as_array().unwrap().len(), 1);

    let html = &specs[0];
    assert_eq!(html["shortname"], "html");
    assert_eq!(html["organization"], "WHATWG");
    assert_eq!(html["url"], "https://html.spec.whatwg.org/multipage/");
    assert_eq!(names(&html["globalAttributes"], "name"), vec!["title", "dir"]);
    assert_eq!(names(&html["globalAttributes"][1]["values"], "value"), vec!["ltr"]);

    assert_eq!(names(&html["elements"], "name"), vec!["a", "area", "marquee"]);
    let a = &html["elements"][0];
    assert_eq!(a["obsolete"], false);
    assert_eq!(names(&a["attributes"], "name"), vec!["href", "target"]);
    assert_eq!(names(&a["attributes"][1]["values"], "value"), vec!["_blank"]);
    assert_eq!(
        a["attributes"][0]["url"],
        "https://html.spec.whatwg.org/multipage/links.html#attr-hyperlink-href"
    );

    let marquee = &html["elements"][2];
    assert_eq!(marquee["obsolete"], true);
    assert_eq!(marquee["attributes"][0]["obsolete"], true);

    assert!(html.get("orphanedAttributes").is_none());
}

#[test]
fn output_follows_index_order() {
    let specs = run_json(&["--specs", "SVG2", "html"]);
    assert_eq!(names(&specs, "shortname"), vec!["html", "SVG2"]);

    let svg = &specs[1];
    assert_eq!(names(&svg["globalAttributes"], "name"), vec!["id"]);
    assert_eq!(names(&svg["elements"][0]["attributes"], "name"), vec!["width"]);
}

#[test]
fn unknown_specs_are_skipped() {
    let specs = run_json(&["--specs", "nonexistent"]);
    assert_eq!(specs, Value::Array(vec![]));
}

#[test]
fn pretty_print_sorts_keys() {
    let mut cmd = cargo_bin_cmd!("webtags");
    cmd.arg("--webref-index")
        .arg(index_arg())
        .args(["--specs", "SVG2", "--pretty-print"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("[\n  {\n    \"date\": \"2023-02-01\""));
}

#[test]
fn compact_output_keeps_field_order() {
    let mut cmd = cargo_bin_cmd!("webtags");
    cmd.arg("--webref-index")
        .arg(index_arg())
        .args(["--specs", "SVG2"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("[{\"organization\":\"W3C\",\"title\":"));
}

#[test]
fn orphans_are_warned_about() {
    let mut cmd = cargo_bin_cmd!("webtags");
    cmd.arg("--webref-index")
        .arg(index_arg())
        .args(["--specs", "html", "--loglevel", "warning"]);

    cmd.assert().success().stderr(
        predicate::str::contains("Orphaned attribute.")
            .and(predicate::str::contains("bgcolor"))
            .and(predicate::str::contains("Orphaned attribute value."))
            .and(predicate::str::contains("_unfencedTop")),
    );
}

#[test]
fn errors_silence_orphan_warnings() {
    let mut cmd = cargo_bin_cmd!("webtags");
    cmd.arg("--webref-index")
        .arg(index_arg())
        .args(["--specs", "html", "--loglevel", "error"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Orphaned").not());
}

#[test]
fn spec_not_in_good_standing_aborts_run() {
    let mut cmd = cargo_bin_cmd!("webtags");
    cmd.arg("--webref-index")
        .arg(index_arg())
        .args(["--specs", "html", "pending"]);

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Crawl result is not in good standing, standing is 'pending'.",
        ));
}

#[test]
fn missing_extract_aborts_run() {
    let mut cmd = cargo_bin_cmd!("webtags");
    cmd.arg("--webref-index")
        .arg(index_arg())
        .args(["--specs", "css-color-4"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing or invalid elements path."));
}

#[test]
fn invalid_definition_aborts_run() {
    let mut cmd = cargo_bin_cmd!("webtags");
    cmd.arg("--webref-index")
        .arg(index_arg())
        .args(["--specs", "invalid"]);

    cmd.assert().failure().stderr(
        predicate::str::contains("Failed to build spec 'invalid'")
            .and(predicate::str::contains("Duplicate `for` values on dfn.")),
    );
}

#[test]
fn keep_going_outputs_the_good_specs() {
    let mut cmd = cargo_bin_cmd!("webtags");
    cmd.arg("--webref-index")
        .arg(index_arg())
        .args(["--specs", "html", "invalid", "pending", "--keep-going"]);

    let assert = cmd
        .assert()
        .failure()
        .stderr(predicate::str::contains("Some specs failed to transform."));
    let specs: Value = serde_json::from_slice(&assert.get_output().stdout).expect("JSON");
    assert_eq!(names(&specs, "shortname"), vec!["html"]);
}

#[test]
fn missing_index_fails() {
    let mut cmd = cargo_bin_cmd!("webtags");
    cmd.arg("--webref-index")
        .arg(fixture_path("missing.json").display().to_string());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load webref index"));
}

#[test]
fn config_file_sets_per_spec_scope() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(
        file,
        "[output]\nspecs = [\"SVG2\"]\n\n[scopes.specs]\nSVG2 = [\"rect\"]"
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("webtags");
    cmd.arg("--webref-index")
        .arg(index_arg())
        .arg("--config")
        .arg(file.path());
    let output = cmd.assert().success().get_output().stdout.clone();
    let specs: Value = serde_json::from_slice(&output).expect("JSON");

    // With `rect` as the only global id, `width` is global and `id` lands nowhere.
    assert_eq!(names(&specs, "shortname"), vec!["SVG2"]);
    assert_eq!(names(&specs[0]["globalAttributes"], "name"), vec!["width"]);
}

#[test]
fn rejects_unknown_log_level() {
    let mut cmd = cargo_bin_cmd!("webtags");
    cmd.args(["--loglevel", "loud"]);
    cmd.assert().failure();
}
