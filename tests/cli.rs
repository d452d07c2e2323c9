use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn swfpipe() -> Command {
    Command::cargo_bin("swfpipe").unwrap()
}

#[test]
fn test_help_lists_subcommands() {
    swfpipe()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("organize"))
        .stdout(predicate::str::contains("materialize"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_no_arguments_shows_help() {
    swfpipe().assert().failure();
}

#[test]
fn test_generate_config_writes_sample() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("swfpipe.toml");

    swfpipe()
        .arg("generate-config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated sample configuration"));

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[tool]"));
    assert!(content.contains("[extract]"));
    assert!(content.contains("[organize]"));
}

#[test]
fn test_unknown_asset_kind_is_rejected() {
    swfpipe()
        .args(["extract", "--kinds", "sound", "--yes"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown asset kind"));
}

#[test]
fn test_organize_missing_extraction_tree() {
    let temp_dir = tempfile::tempdir().unwrap();
    let missing = temp_dir.path().join("never-extracted");

    swfpipe()
        .args(["--output-format", "plain", "organize", "--extracted"])
        .arg(&missing)
        .arg("--organized")
        .arg(temp_dir.path().join("organized"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No asset directories"));
}

#[test]
fn test_organize_end_to_end() {
    let temp_dir = tempfile::tempdir().unwrap();
    let extracted = temp_dir.path().join("extracted");
    let organized = temp_dir.path().join("organized");

    let images = extracted.join("pet_head_01.swf").join("images");
    fs::create_dir_all(&images).unwrap();
    fs::write(images.join("p.png"), vec![0u8; 128]).unwrap();

    swfpipe()
        .args(["--quiet", "organize", "--copy", "--extracted"])
        .arg(&extracted)
        .arg("--organized")
        .arg(&organized)
        .assert()
        .success();

    assert!(organized.join("pets").join("pet_head_01.swf.png").exists());

    let mapping = fs::read_to_string(organized.join("asset_mapping.json")).unwrap();
    assert!(mapping.contains("pet_head_01.swf"));
    assert!(mapping.contains("\"category\": \"pets\""));
}

#[test]
fn test_lookup_end_to_end() {
    let temp_dir = tempfile::tempdir().unwrap();
    let extracted = temp_dir.path().join("extracted");
    let lookup_dir = temp_dir.path().join("sprites").join("lookup");

    let images = extracted.join("close_icon.swf").join("images");
    fs::create_dir_all(&images).unwrap();
    fs::write(images.join("i.png"), vec![0u8; 16]).unwrap();

    swfpipe()
        .args(["--quiet", "lookup", "--extracted"])
        .arg(&extracted)
        .arg("--dest")
        .arg(&lookup_dir)
        .assert()
        .success();

    let document = temp_dir.path().join("sprites").join("asset_lookup.json");
    let content = fs::read_to_string(document).unwrap();
    assert!(content.contains("close_icon.swf"));
    assert!(content.contains("res://assets/sprites/lookup/close_icon.swf.png"));
}
