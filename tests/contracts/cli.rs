//! CLI contracts
//!
//! The binary never rewrites a file it only checks, and every write keeps
//! operator comments.

use crate::common::*;

#[test]
fn contract_fmt_check_passes_on_formatted_file() {
    let env = TestEnv::builder()
        .with_file("config.yml", COMMENTED_CONFIG)
        .build();

    let result = env.run(&["fmt", "config.yml", "--check"]);

    assert!(result.success, "fmt --check failed: {}", result.combined_output());
    assert!(result.stdout.contains("already formatted"));
}

#[test]
fn contract_fmt_check_fails_without_writing() {
    let env = TestEnv::builder()
        .with_file("config.yml", UNTIDY_CONFIG)
        .build();

    let result = env.run(&["fmt", "config.yml", "--check"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stdout.contains("would reformat"));
    assert_eq!(env.read("config.yml"), UNTIDY_CONFIG);
}

#[test]
fn contract_fmt_normalizes_file() {
    let env = TestEnv::builder()
        .with_file("config.yml", UNTIDY_CONFIG)
        .build();

    let result = env.run(&["fmt", "config.yml"]);

    assert!(result.success, "fmt failed: {}", result.stderr);
    assert_eq!(env.read("config.yml"), TIDY_CONFIG);
}

#[test]
fn contract_fmt_style_restyles_every_comment() {
    let env = TestEnv::builder()
        .with_file("config.yml", "#Port to listen on\nPort: 1\n")
        .build();

    let result = env.run(&["fmt", "config.yml", "--style", "blocked"]);

    assert!(result.success, "fmt failed: {}", result.stderr);
    assert_eq!(
        env.read("config.yml"),
        "#####################\n# Port to listen on #\n#####################\nPort: 1\n"
    );
}

#[test]
fn contract_fmt_reports_syntax_errors_with_line() {
    let env = TestEnv::builder()
        .with_file("config.yml", "Port: 1\nnot a key\n")
        .build();

    let result = env.run(&["fmt", "config.yml"]);

    assert!(!result.success);
    assert!(
        result.stderr.contains("config.yml:2"),
        "stderr: {}",
        result.stderr
    );
}

#[test]
fn contract_get_prints_json() {
    let env = TestEnv::builder()
        .with_file("config.yml", COMMENTED_CONFIG)
        .build();

    let result = env.run(&["get", "config.yml", "Worlds"]);

    assert!(result.success, "get failed: {}", result.stderr);
    let value: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    assert_eq!(value, serde_json::json!(["world", "world_nether"]));
}

#[test]
fn contract_get_missing_key_fails() {
    let env = TestEnv::builder()
        .with_file("config.yml", COMMENTED_CONFIG)
        .build();

    let result = env.run(&["get", "config.yml", "Settings.Missing"]);

    assert!(!result.success);
    assert!(result.stderr.contains("Settings.Missing"));
}

#[test]
fn contract_set_keeps_existing_comments() {
    let env = TestEnv::builder()
        .with_file("config.yml", COMMENTED_CONFIG)
        .build();

    let result = env.run(&[
        "set",
        "config.yml",
        "Homes.Max",
        "8",
        "--comment",
        "Raised for the event",
    ]);

    assert!(result.success, "set failed: {}", result.stderr);
    let expected = COMMENTED_CONFIG.replace(
        "Homes:\n  Max: 5\n",
        "Homes:\n  # Raised for the event\n  Max: 8\n",
    );
    assert_eq!(env.read("config.yml"), expected);
}

#[test]
fn contract_docs_lists_documents_in_data_dir() {
    let env = TestEnv::builder()
        .with_data_file("kits/daily.json", "{}")
        .with_data_file("kits/weekly.JSON", "{}")
        .with_data_file("kits/notes.txt", "")
        .build();

    let result = env.run(&["docs", "kits"]);

    assert!(result.success, "docs failed: {}", result.stderr);
    assert_eq!(result.stdout, "daily\nweekly\n");
}

#[test]
fn contract_docs_reports_created_directory() {
    let env = TestEnv::builder().build();

    let result = env.run(&["--json", "docs", "rewards"]);

    assert!(result.success, "docs failed: {}", result.stderr);
    let value: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    assert_eq!(value["created"], serde_json::json!(true));
    assert_eq!(value["documents"], serde_json::json!([]));
    assert!(env.data_path("rewards").is_dir());
}

#[test]
fn contract_init_adds_builtins_only_when_missing() {
    let env = TestEnv::builder()
        .with_file("config.yml", COMMENTED_CONFIG)
        .build();

    let result = env.run(&["init", "config.yml"]);

    assert!(result.success, "init failed: {}", result.stderr);
    assert!(result.stdout.contains("Locale: de_DE"));
    assert_eq!(env.read("config.yml"), COMMENTED_CONFIG);
}

#[test]
fn contract_init_without_file_uses_data_dir_template() {
    let env = TestEnv::builder().build();

    let result = env.run(&["init"]);

    assert!(result.success, "init failed: {}", result.stderr);
    assert!(result.stdout.contains("Locale: en_US"));
    assert_eq!(
        std::fs::read_to_string(env.data_path("config.yml")).unwrap(),
        marginalia::DEFAULT_TEMPLATE
    );
}

#[test]
fn contract_init_refuses_to_replace_an_operator_value() {
    let env = TestEnv::builder()
        .with_file("config.yml", "Settings: keep-me\n")
        .build();

    let result = env.run(&["init", "config.yml"]);

    assert!(!result.success);
    assert!(result.stderr.contains("Settings"), "stderr: {}", result.stderr);
    assert_eq!(env.read("config.yml"), "Settings: keep-me\n");
}
