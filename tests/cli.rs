use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn mandel() -> Command {
    Command::cargo_bin("mandel").unwrap()
}

#[test]
fn renders_a_png() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("small.png");
    mandel()
        .args(&["-o", out.to_str().unwrap(), "-s", "40x30", "-i", "50", "-n", "2"])
        .args(&["--center", "-2.0,-1.5", "--half-height", "3", "--seed", "1"])
        .assert()
        .success();

    let img = image::open(&out).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (40, 30));
    assert!(img.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn query_string_sets_the_size() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("query.png");
    mandel()
        .args(&["-o", out.to_str().unwrap()])
        .args(&["-q", "?w=24&h=12&px=-2&py=-1&ph=2&iter=40&samples=1"])
        .assert()
        .success();

    let img = image::open(&out).unwrap();
    assert_eq!((img.width(), img.height()), (24, 12));
}

#[test]
fn flags_override_the_preset() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("preset.png");
    mandel()
        .args(&["-o", out.to_str().unwrap(), "-p", "classic", "-s", "16x8"])
        .args(&["-i", "30", "-n", "1", "--gamma-mixing", "-t", "2"])
        .assert()
        .success();

    let img = image::open(&out).unwrap();
    assert_eq!((img.width(), img.height()), (16, 8));
}

#[test]
fn non_positive_values_fall_back_to_defaults() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("clamped.png");
    mandel()
        .args(&["-o", out.to_str().unwrap(), "-s", "8x0", "-i", "20", "-n", "0"])
        .assert()
        .success();

    let img = image::open(&out).unwrap();
    assert_eq!((img.width(), img.height()), (8, 512));
}

#[test]
fn lists_presets() {
    mandel()
        .arg("--list-presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seahorse Valley"))
        .stdout(predicate::str::contains("deep-zoom"));
}

#[test]
fn unknown_preset_fails() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("never.png");
    mandel()
        .args(&["-o", out.to_str().unwrap(), "-p", "atlantis"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown preset"));
    assert!(!out.exists());
}

#[test]
fn bad_size_is_rejected() {
    mandel()
        .args(&["-o", "x.png", "-s", "big"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse output image size"));
}

#[test]
fn output_is_required() {
    mandel().assert().failure();
}
