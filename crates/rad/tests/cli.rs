//! CLI integration tests for rad commands.
//!
//! These tests focus on exit codes and the content that matters to a user, not on
//! exact formatting.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// A small dataset covering two annexes.
const DATASET: &str = r#"{
  "metadata": { "cycle": "2511", "version": "1.17", "filename": "RAD_2511.xlsx" },
  "annexes": {
    "annex2b_rules": [
      {
        "id": "LSLF1139C",
        "annex": "2B",
        "type": "Forbidden route",
        "change_indicator": "NEW",
        "point_or_airspace": "OMASI",
        "utilization": "Not available for traffic via OMASI",
        "nas_fab": "LS LF"
      },
      {
        "id": "LS2857",
        "annex": "2B",
        "airway": "UN869",
        "from_point": "GERSA",
        "to_point": "OMASI",
        "nas_fab": "LS",
        "valid_from": "2025-01-01"
      }
    ],
    "annex3b_dct": [
      {
        "id": "EDDM5001",
        "annex": "3B",
        "from_point": "GERSA",
        "to_point": "KPT",
        "nas_fab": "ED"
      }
    ]
  }
}"#;

/// Temp directory with a dataset and a root `.rad.toml` pointing at it.
fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("rad-2511.json"), DATASET).unwrap();
    fs::write(
        dir.path().join(".rad.toml"),
        "root = true\n\n[dataset]\npath = \"rad-2511.json\"\n",
    )
    .unwrap();
    dir
}

/// `rad` run inside `dir` with HOME and environment overrides isolated.
fn rad(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("rad").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("RAD_DATA")
        .env_remove("RUST_LOG");
    cmd
}

/// Strips ANSI escape sequences from a string.
fn strip_ansi(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            output.push(ch);
        }
    }

    output
}

/// Runs `rad` with `args`, asserts success, and returns plain stdout.
fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let assert = rad(dir).args(args).assert().success();
    strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout))
}

/// Runs `rad` with `args` plus `--json`, asserts success, and parses stdout.
fn json_of(dir: &Path, args: &[&str]) -> Value {
    let assert = rad(dir).args(args).arg("--json").assert().success();
    serde_json::from_slice(&assert.get_output().stdout).unwrap()
}

mod search {
    use super::*;

    #[test]
    fn finds_entries_by_point() {
        let dir = workspace();
        let out = stdout_of(dir.path(), &["search", "omasi"]);
        assert!(out.contains("LSLF1139C"));
        assert!(out.contains("LS2857"));
        assert!(!out.contains("EDDM5001"));
    }

    #[test]
    fn applies_filters() {
        let dir = workspace();
        let json = json_of(dir.path(), &["search", "GERSA", "--annex", "3B"]);
        assert_eq!(json["total"], 1);
        assert_eq!(json["results"][0]["entry"]["id"], "EDDM5001");
    }

    #[test]
    fn status_filter_ignores_case() {
        let dir = workspace();
        let json = json_of(dir.path(), &["search", "OMASI", "--status", "new"]);
        assert_eq!(json["total"], 1);
        assert_eq!(json["results"][0]["entry"]["id"], "LSLF1139C");
    }

    #[test]
    fn respects_limit() {
        let dir = workspace();
        let json = json_of(dir.path(), &["search", "OMASI", "-n", "1"]);
        assert_eq!(json["total"], 1);
        assert_eq!(json["results"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn json_includes_match_spans() {
        let dir = workspace();
        let json = json_of(dir.path(), &["search", "UN869"]);
        let result = &json["results"][0];
        assert_eq!(result["entry"]["id"], "LS2857");
        let airway = result["matches"]
            .as_array()
            .unwrap()
            .iter()
            .find(|m| m["field"] == "airway")
            .unwrap();
        assert_eq!(airway["ranges"][0]["offset"], 0);
        assert_eq!(airway["ranges"][0]["length"], 5);
    }

    #[test]
    fn short_query_is_not_an_error() {
        let dir = workspace();
        rad(dir.path())
            .args(["search", "a"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No results found."));
    }
}

mod lookup {
    use super::*;

    #[test]
    fn ref_strips_brackets() {
        let dir = workspace();
        let json = json_of(dir.path(), &["ref", "[lslf1139c]"]);
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["id"], "LSLF1139C");
        assert_eq!(json[0]["type"], "Forbidden route");
    }

    #[test]
    fn unknown_ref_is_empty_not_failure() {
        let dir = workspace();
        rad(dir.path())
            .args(["ref", "[UNKNOWN1]"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No entries found."));
    }

    #[test]
    fn get_prints_plain_text() {
        let dir = workspace();
        let out = stdout_of(dir.path(), &["get", "ls2857"]);
        assert!(out.contains("ID: LS2857"));
        assert!(out.contains("Airway: UN869"));
        assert!(out.contains("Valid: 2025-01-01 -> UFN"));
    }

    #[test]
    fn get_unknown_fails() {
        let dir = workspace();
        rad(dir.path())
            .args(["get", "NOPE1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not found"));
    }

    #[test]
    fn suggest_lists_identifiers() {
        let dir = workspace();
        let json = json_of(dir.path(), &["suggest", "GERSA"]);
        let mut ids: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, ["EDDM5001", "LS2857"]);
    }
}

mod error {
    use super::*;

    const MESSAGE: &str = "RS: TRAFFIC VIA GERSA IS ON FORBIDDEN ROUTE REF:[LSLF1139C] ANNEX 2B";

    #[test]
    fn reference_code_wins() {
        let dir = workspace();
        let json = json_of(dir.path(), &["error", MESSAGE]);
        assert_eq!(json["strategy"], "reference");
        assert_eq!(json["results"].as_array().unwrap().len(), 1);
        assert_eq!(json["results"][0]["entry"]["id"], "LSLF1139C");
    }

    #[test]
    fn falls_back_to_points_in_annex() {
        let dir = workspace();
        let json = json_of(dir.path(), &["error", "DCT GERSA NOT AVAILABLE ANNEX 3B"]);
        assert_eq!(json["strategy"], "points");
        assert_eq!(json["hint"]["category"], "NOT_AVAILABLE");
        assert_eq!(json["results"][0]["entry"]["id"], "EDDM5001");
    }

    #[test]
    fn explain_shows_hints() {
        let dir = workspace();
        let out = stdout_of(dir.path(), &["error", "--explain", MESSAGE]);
        assert!(out.contains("Extracted hints:"));
        assert!(out.contains("LSLF1139C"));
        assert!(out.contains("Lookup: reference code"));
    }

    #[test]
    fn parse_needs_no_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let json = json_of(
            dir.path(),
            &[
                "parse",
                "RS: TRAFFIC VIA OMASI IS ON FORBIDDEN ROUTE REF:[LSLF1139C] ANNEX 2B",
            ],
        );
        assert_eq!(json["reference_code"], "LSLF1139C");
        assert_eq!(json["annex"], "2B");
        assert_eq!(json["points"], serde_json::json!(["OMASI"]));
        assert_eq!(json["category"], "FORBIDDEN");
    }

    #[test]
    fn parse_ignores_broken_config() {
        let dir = workspace();
        fs::write(dir.path().join(".rad.toml"), "[search\n").unwrap();
        let json = json_of(dir.path(), &["parse", "traffic via GERSA ref:[LS2857]"]);
        assert_eq!(json["reference_code"], "LS2857");
        assert_eq!(json["points"], serde_json::json!(["GERSA"]));
    }
}

mod annex {
    use super::*;

    #[test]
    fn lists_annex_entries() {
        let dir = workspace();
        let json = json_of(dir.path(), &["annex", "2B"]);
        let ids: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["LSLF1139C", "LS2857"]);
    }

    #[test]
    fn searches_within_annex() {
        let dir = workspace();
        let json = json_of(dir.path(), &["annex", "2B", "GERSA"]);
        assert_eq!(json["total"], 1);
        assert_eq!(json["results"][0]["entry"]["id"], "LS2857");
    }
}

mod dataset {
    use super::*;

    #[test]
    fn stats_count_everything() {
        let dir = workspace();
        let json = json_of(dir.path(), &["stats"]);
        assert_eq!(json["total"], 3);
        assert_eq!(json["byAnnex"]["2B"], 2);
        assert_eq!(json["byCountry"]["LS"], 2);
        assert_eq!(json["byStatus"]["ACTIVE"], 2);
        assert_eq!(json["byStatus"]["NEW"], 1);
    }

    #[test]
    fn stats_render_tables() {
        let dir = workspace();
        let out = stdout_of(dir.path(), &["stats"]);
        assert!(out.contains("Total entries: 3"));
        assert!(out.contains("By annex:"));
        assert!(out.contains("3B"));
    }

    #[test]
    fn info_shows_metadata() {
        let dir = workspace();
        let out = stdout_of(dir.path(), &["info"]);
        assert!(out.contains("2511"));
        assert!(out.contains("RAD_2511.xlsx"));
        assert!(out.contains("Entries: 3"));
    }

    #[test]
    fn data_flag_overrides_config() {
        let dir = workspace();
        let other = dir.path().join("other.json");
        fs::write(
            &other,
            r#"{ "annexes": { "annex2a": [ { "id": "ZZ1", "annex": "2A" } ] } }"#,
        )
        .unwrap();

        let json = json_of(dir.path(), &["stats", "--data", "other.json"]);
        assert_eq!(json["total"], 1);
    }

    #[test]
    fn data_env_overrides_config() {
        let dir = workspace();
        fs::write(
            dir.path().join("env.json"),
            r#"{ "annexes": { "a": [ { "id": "E1" }, { "id": "E2" } ] } }"#,
        )
        .unwrap();

        let assert = rad(dir.path())
            .env("RAD_DATA", "env.json")
            .args(["stats", "--json"])
            .assert()
            .success();
        let json: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
        assert_eq!(json["total"], 2);
    }

    #[test]
    fn missing_dataset_fails() {
        let dir = tempfile::tempdir().unwrap();
        rad(dir.path())
            .args(["search", "OMASI"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to read dataset"));
    }

    #[test]
    fn dataset_without_annexes_fails() {
        let dir = workspace();
        fs::write(dir.path().join("rad-2511.json"), r#"{ "metadata": {} }"#).unwrap();
        rad(dir.path())
            .args(["stats"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("annexes"));
    }

    #[test]
    fn empty_dataset_fails() {
        let dir = workspace();
        fs::write(dir.path().join("rad-2511.json"), r#"{ "annexes": { "a": [] } }"#).unwrap();
        rad(dir.path())
            .args(["stats"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no entries"));
    }
}

mod config {
    use super::*;

    #[test]
    fn help_points_limits_at_config() {
        let dir = workspace();
        let search = stdout_of(dir.path(), &["search", "--help"]);
        assert!(search.contains("`search.limit` from config"));
        assert!(!search.contains("[default: 50]"));

        let suggest = stdout_of(dir.path(), &["suggest", "--help"]);
        assert!(suggest.contains("`search.suggestion_limit` from config"));
    }

    #[test]
    fn shows_effective_settings() {
        let dir = workspace();
        let out = stdout_of(dir.path(), &["config"]);
        assert!(out.contains("threshold = 0.3"));
        assert!(out.contains("rad-2511.json"));
    }

    #[test]
    fn configured_limit_applies() {
        let dir = workspace();
        fs::write(
            dir.path().join(".rad.toml"),
            "root = true\n\n[dataset]\npath = \"rad-2511.json\"\n\n[search]\nlimit = 1\n",
        )
        .unwrap();
        let json = json_of(dir.path(), &["search", "OMASI"]);
        assert_eq!(json["total"], 1);
    }

    #[test]
    fn invalid_threshold_fails() {
        let dir = workspace();
        fs::write(
            dir.path().join(".rad.toml"),
            "root = true\n\n[search]\nthreshold = 1.5\n",
        )
        .unwrap();
        rad(dir.path())
            .args(["search", "OMASI"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }

    #[test]
    fn malformed_config_fails() {
        let dir = workspace();
        fs::write(dir.path().join(".rad.toml"), "[search\n").unwrap();
        rad(dir.path()).arg("config").assert().failure();
    }
}
