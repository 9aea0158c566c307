// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Integration tests for the cargo-strgen binary
//!
//! Each test sets up a small crate in a temporary directory and runs the
//! binary in it, the same way `cargo strgen` would.

use cargo_strgen_config::{DEFAULT_CONFIG_FILE, GeneratorConfig};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn cargo_strgen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cargo-strgen"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run cargo-strgen")
}

fn setup_crate(dir: &Path) {
    fs::write(
        dir.join("Cargo.toml"),
        r#"
            [package]
            name = "main-app"
            version = "0.1.0"
            edition = "2024"
        "#,
    )
    .expect("Failed to write Cargo.toml");
    fs::create_dir_all(dir.join("src/model")).unwrap();
    fs::write(dir.join("src/lib.rs"), "pub mod model;\npub mod strgen;\n").unwrap();
    fs::write(dir.join("src/strgen.rs"), "").unwrap();
    fs::write(dir.join("src/model/mod.rs"), "pub mod person;\n").unwrap();
    fs::write(
        dir.join("src/model/person.rs"),
        r#"
            use crate::strgen::GenerateDisplay;

            #[GenerateDisplay]
            pub struct Person {
                pub FirstName: String,
                pub LastName: String,
                pub Age: u32,
                secret: String,
            }
        "#,
    )
    .unwrap();
}

#[test]
fn test_generate_config_writes_defaults() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = cargo_strgen(temp_dir.path(), &["strgen", "generate-config"]);
    assert!(output.status.success());

    let written = fs::read_to_string(temp_dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
    let config: GeneratorConfig = ron::from_str(&written).unwrap();
    assert_eq!(config, GeneratorConfig::default());
}

#[test]
fn test_generate_then_rerun() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let dir = temp_dir.path();
    setup_crate(dir);

    let first = cargo_strgen(dir, &["generate"]);
    assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
    let artifact = dir.join(".strgen/main_app.model.person.Person.g.rs");
    let text = fs::read_to_string(&artifact).unwrap();
    assert!(text.starts_with("// Generation count: 1\n"));
    assert!(text.contains("FirstName:{}; LastName:{}; Age:{}"));
    assert!(!text.contains("secret"));

    let second = cargo_strgen(dir, &["generate"]);
    assert!(second.status.success());
    let stdout = String::from_utf8_lossy(&second.stdout);
    assert!(stdout.contains("0 generated, 1 unchanged, 0 removed"), "{stdout}");
}

#[test]
fn test_print_summaries() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    setup_crate(temp_dir.path());

    let output = cargo_strgen(temp_dir.path(), &["strgen", "print-summaries"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Person"));
    assert!(stdout.contains("FirstName"));
    assert!(!stdout.contains("secret"));
    assert!(!temp_dir.path().join(".strgen").exists());
}

#[test]
fn test_outside_cargo_project() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = cargo_strgen(temp_dir.path(), &["generate"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Not in a Cargo project directory"));
}
