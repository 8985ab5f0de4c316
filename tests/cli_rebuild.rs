//! Integration tests for `ksy-manifest` against a fake compiler.
#![cfg(unix)]

mod common;

use std::fs;
use std::time::Duration;

use common::*;

fn library() -> TestEnv {
    let env = TestEnv::new();
    env.write_definition("image/png.ksy", &definition("png", Some("CC0-1.0")));
    env.write_definition("image/gif.ksy", &definition("gif", None));
    env.write_definition("archive/zip.ksy", &definition("zip", Some("MIT")));
    env
}

#[test]
fn test_first_run_writes_manifest() {
    let env = library();

    let result = env.run(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.compiler_calls().len(), 3);

    let manifest = env.read_manifest();
    let keys: Vec<_> = manifest.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["archive/zip.ksy", "image/gif.ksy", "image/png.ksy"]);
    assert_eq!(manifest["image/png.ksy"]["class_name"], "png");
    assert_eq!(manifest["image/png.ksy"]["python_path"], "png.py");
    assert_eq!(manifest["image/png.ksy"]["dependencies"], serde_json::json!([]));
    assert!(env.path("parsers/png.py").exists());
    assert!(result.stdout.contains("Wrote 3 entries"));
}

#[test]
fn test_fresh_manifest_is_left_alone() {
    let env = library();
    assert!(env.run(&[]).success);
    let before = fs::read(env.manifest_path()).unwrap();
    env.clear_compiler_calls();

    let result = env.run(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("is up to date (3 entries)"));
    assert!(env.compiler_calls().is_empty());
    assert_eq!(fs::read(env.manifest_path()).unwrap(), before);
}

#[test]
fn test_edited_definition_triggers_rebuild() {
    let env = library();
    assert!(env.run(&[]).success);
    set_age(&env.manifest_path(), Duration::from_secs(600));
    env.clear_compiler_calls();

    let png = env.path("formats/image/png.ksy");
    fs::write(&png, definition("png", Some("Unlicense"))).unwrap();

    let result = env.run(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.compiler_calls().len(), 3);
}

#[test]
fn test_rebuild_all_flag_forces_compilation() {
    let env = library();
    assert!(env.run(&[]).success);
    env.clear_compiler_calls();

    let result = env.run(&["--rebuild-all"]);
    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.compiler_calls().len(), 3);

    env.clear_compiler_calls();
    let result = env.run(&["-a"]);
    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.compiler_calls().len(), 3);
}

#[test]
fn test_gpl_definitions_are_never_compiled() {
    let env = library();
    env.write_definition("exec/elf.ksy", &definition("elf", Some("GPL-2.0-or-later")));
    env.write_definition("exec/pe.ksy", &definition("pe", Some("[MIT, LGPL-3.0]")));

    let result = env.run(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.compiler_calls().len(), 3);
    let manifest = env.read_manifest();
    assert!(manifest.get("exec/elf.ksy").is_none());
    assert!(manifest.get("exec/pe.ksy").is_none());
    assert!(result.stdout.contains("2 excluded by license"));
}

#[test]
fn test_exclusions_can_be_overridden() {
    let env = library();
    env.write_definition("exec/elf.ksy", &definition("elf", Some("GPL-2.0-or-later")));

    let result = env.run_with_env(&[], &[("KSY_EXCLUDE_LICENSES", "MIT")]);

    assert!(result.success, "{}", result.combined_output());
    let manifest = env.read_manifest();
    assert!(manifest.get("exec/elf.ksy").is_some());
    assert!(manifest.get("archive/zip.ksy").is_none());
}

#[test]
fn test_failed_definition_is_omitted_but_run_succeeds() {
    let env = library();
    env.write_definition("bad_format.ksy", &definition("bad_format", None));

    let result = env.run(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.compiler_calls().len(), 4);
    let manifest = env.read_manifest();
    assert_eq!(manifest.as_object().unwrap().len(), 3);
    assert!(manifest.get("bad_format.ksy").is_none());
    assert!(result.stderr.contains("Failed to compile"));
    assert!(result.stdout.contains("1 failed"));
}

#[test]
fn test_missing_compiler_exits_with_error() {
    let env = library();
    fs::create_dir_all(env.path("parsers")).unwrap();
    fs::write(env.manifest_path(), "{\"old\": true}").unwrap();

    let result = env.run_with_env(
        &["--rebuild-all"],
        &[("KSY_COMPILER", "/nonexistent/ksc"), ("KSY_COMPILER_SCRIPT", "")],
    );

    assert!(!result.success);
    assert_eq!(result.exit_code, 1);
    assert!(
        result.stderr.contains("kaitai-struct-compiler"),
        "stderr should explain the missing compiler; got:\n{}",
        result.stderr
    );
    assert_eq!(
        fs::read_to_string(env.manifest_path()).unwrap(),
        "{\"old\": true}"
    );
}

#[test]
fn test_missing_library_root_exits_with_error() {
    let env = TestEnv::new();

    let result = env.run_with_env(&[], &[("KSY_LIBRARY_ROOT", "does-not-exist")]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("does-not-exist"));
    assert!(!env.manifest_path().exists());
}

#[test]
fn test_project_config_file_is_used() {
    let env = library();
    fs::write(
        env.path("ksy-manifest.toml"),
        "manifest = \"index.json\"\njobs = 1\n",
    )
    .unwrap();

    let result = env.run(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert!(env.path("parsers/index.json").exists());
    assert!(!env.manifest_path().exists());
}
