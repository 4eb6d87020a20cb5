// SPDX-License-Identifier: Apache-2.0

use folio_model::ProjectId;
use folio_store::{load_collections, load_project, load_projects, scan_projects, SkipReason};
use std::path::Path;
use tempfile::tempdir;

fn write(dir: &Path, name: &str, body: &str) {
    std::fs::write(dir.join(name), body).expect("write fixture");
}

fn seed_catalog(dir: &Path) {
    write(
        dir,
        "sound-garden.json",
        r#"{"title":"Sound Garden","description":"Interactive audio installation","year":"2022","image":"/images/sound-garden.jpg","tags":["Art","Installation"]}"#,
    );
    write(
        dir,
        "splice-mic.json",
        r#"{"title":"Splice Mic","description":"Voice to verse","year":"2025","video":"https://example.com/v","tags":["Music"],"defaultOrder":1}"#,
    );
    write(
        dir,
        "missing-year.json",
        r#"{"title":"No Year","description":"d","image":"/i.jpg"}"#,
    );
    write(dir, "broken.json", "{ not json");
    write(dir, "notes.txt", "not a project");
}

#[test]
fn valid_files_load_and_invalid_files_are_skipped() {
    let tmp = tempdir().expect("tempdir");
    seed_catalog(tmp.path());

    let report = scan_projects(tmp.path()).expect("scan");
    let ids: Vec<&str> = report.projects.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["sound-garden", "splice-mic"]);

    assert_eq!(report.skipped.len(), 2);
    let reasons: Vec<(&str, SkipReason)> = report
        .skipped
        .iter()
        .map(|s| (s.file.as_str(), s.reason))
        .collect();
    assert!(reasons.contains(&("broken.json", SkipReason::MalformedJson)));
    assert!(reasons.contains(&("missing-year.json", SkipReason::MissingRequiredFields)));
}

#[test]
fn id_comes_from_the_filename_not_the_body() {
    let tmp = tempdir().expect("tempdir");
    write(
        tmp.path(),
        "real-id.json",
        r#"{"title":"T","description":"D","year":"2023","image":"/i.jpg"}"#,
    );
    let projects = load_projects(tmp.path()).expect("load");
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id.as_str(), "real-id");
}

#[test]
fn missing_directory_is_an_empty_catalog() {
    let tmp = tempdir().expect("tempdir");
    let gone = tmp.path().join("never-created");
    let projects = load_projects(&gone).expect("load missing dir");
    assert!(projects.is_empty());
}

#[test]
fn single_project_lookup_matches_scan_semantics() {
    let tmp = tempdir().expect("tempdir");
    seed_catalog(tmp.path());

    let found = load_project(tmp.path(), &ProjectId::parse("splice-mic").expect("id"))
        .expect("load one");
    assert_eq!(found.expect("present").title, "Splice Mic");

    let invalid = load_project(tmp.path(), &ProjectId::parse("missing-year").expect("id"))
        .expect("load invalid");
    assert!(invalid.is_none());

    let absent = load_project(tmp.path(), &ProjectId::parse("nope").expect("id"))
        .expect("load absent");
    assert!(absent.is_none());
}

#[test]
fn collections_default_to_builtin_and_load_from_file() {
    let builtin = load_collections(None).expect("builtin");
    assert!(builtin.get("everything").is_some());

    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("collections.json");
    std::fs::write(
        &path,
        r#"{"collections":[{"id":"live-sets","display_name":"Live Sets","tags":["live"]}]}"#,
    )
    .expect("write config");
    let set = load_collections(Some(&path)).expect("file config");
    assert!(set.get("live-sets").is_some());
    assert!(set.get("everything").is_none(), "file replaces builtin set");

    let bad = tmp.path().join("bad.json");
    std::fs::write(&bad, r#"{"collections":"nope"}"#).expect("write bad config");
    assert!(load_collections(Some(&bad)).is_err());
    assert!(load_collections(Some(&tmp.path().join("absent.json"))).is_err());
}

#[test]
fn mixed_case_configured_ids_stay_reachable() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("collections.json");
    std::fs::write(
        &path,
        r#"{"collections":[{"id":"Live-Sets","display_name":"Live Sets","tags":["live"]}]}"#,
    )
    .expect("write config");

    let set = load_collections(Some(&path)).expect("mixed-case config");
    assert!(set.get("Live-Sets").is_some());
    assert!(set.get("live-sets").is_some());

    let padded = tmp.path().join("padded.json");
    std::fs::write(
        &padded,
        r#"{"collections":[{"id":" padded ","display_name":"P","tags":[]}]}"#,
    )
    .expect("write padded config");
    assert!(load_collections(Some(&padded)).is_err());
}
