// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DOC: &str = "\
|RECORD=31|OWNERINDEX=0
|RECORD=1|OWNERINDEX=0|LIBREFERENCE=LM358|PARTCOUNT=2|DISPLAYMODE=0
|RECORD=2|OWNERINDEX=1|NAME=OUT|OWNERPARTDISPLAYMODE=1
|RECORD=4|OWNERINDEX=1|TEXT=U1
|RECORD=77|OWNERINDEX=0|FOO=bar
";

fn sch(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sch").unwrap();
    cmd.arg("--config-dir").arg(config).env("RUST_LOG", "warn");
    cmd
}

fn fixture() -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("doc.sch");
    fs::write(&file, DOC).unwrap();
    (dir, file)
}

#[test]
fn inspect_prints_tree_and_report() {
    let (dir, file) = fixture();
    sch(dir.path())
        .arg("inspect")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Component (1)"))
        .stdout(predicate::str::contains("Unknown (77)"))
        .stdout(predicate::str::contains("5 loaded, 1 placeholders"));
}

#[test]
fn roundtrip_output_is_a_fixed_point() {
    let (dir, file) = fixture();
    let out = dir.path().join("out.sch");
    sch(dir.path())
        .arg("roundtrip")
        .arg(&file)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("|FOO=bar"));
    assert_eq!(text.lines().count(), 5);

    sch(dir.path())
        .arg("roundtrip")
        .arg(&out)
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains("INDEXINSHEET=1"));
}

#[test]
fn roundtrip_warns_about_vetoed_records() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("veto.sch");
    fs::write(
        &file,
        "|RECORD=31\n|RECORD=2|OWNERINDEX=0\n|RECORD=4|OWNERINDEX=1\n",
    )
    .unwrap();
    let out = dir.path().join("out.sch");
    sch(dir.path())
        .arg("roundtrip")
        .arg(&file)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("1 of 3 records are detached (1 vetoed"));
    assert_eq!(fs::read_to_string(&out).unwrap().lines().count(), 2);
}

#[test]
fn check_fails_on_non_canonical_input() {
    let (dir, file) = fixture();
    sch(dir.path())
        .arg("roundtrip")
        .arg(&file)
        .arg("--check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("round trip changed the document"));
}

#[test]
fn fingerprint_is_hex_and_stable() {
    let (dir, file) = fixture();
    let first = sch(dir.path()).arg("fingerprint").arg(&file).output().unwrap();
    let second = sch(dir.path()).arg("fingerprint").arg(&file).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    let hex = String::from_utf8(first.stdout).unwrap();
    assert_eq!(hex.trim().len(), 64);
    assert!(hex.trim().chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn strict_rejects_unknown_kinds() {
    let (dir, file) = fixture();
    sch(dir.path())
        .arg("--strict")
        .arg("inspect")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown record kind 77"));
}

#[test]
fn options_save_persists_to_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    sch(dir.path())
        .args(["--strict", "options", "--save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"unknown_kinds\": \"abort\""));
    let saved = fs::read_to_string(dir.path().join("load-options.json")).unwrap();
    assert!(saved.contains("\"orphans\": \"abort\""));

    sch(dir.path())
        .arg("options")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"orphans\": \"abort\""));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    sch(dir.path())
        .arg("fingerprint")
        .arg(dir.path().join("absent.sch"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
