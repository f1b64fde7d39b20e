use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn supportbot_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_supportbot"))
}

fn setup_test_env(catalog: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    fs::write(root.join("faq.toml"), catalog).unwrap();

    let config_content = r#"[engine]
threshold = 0.3

[catalog]
path = "faq.toml"

[logging]
filter = "warn"
"#;
    let config_path = root.join("supportbot.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

const SMALL_CATALOG: &str = r#"
[[entries]]
question = "Where is my order"
answer = "Check My Orders."

[[entries]]
question = "Refund policy"
answer = "Refunds take 7-10 days."

[[entries]]
question = "Free shipping"
answer = "Free over $50."
"#;

fn run_bot(config_path: Option<&Path>, args: &[&str]) -> (String, String, bool) {
    let binary = supportbot_binary();
    let mut cmd = Command::new(&binary);
    if let Some(path) = config_path {
        cmd.arg("--config").arg(path);
    }
    let output = cmd
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run supportbot binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_ask_builtin_catalog() {
    let (stdout, stderr, success) = run_bot(None, &["ask", "Free shipping"]);
    assert!(success, "ask failed: {}", stderr);
    assert!(stdout.contains("FREE shipping on all orders above $50"));
    assert!(stdout.contains("Confidence: 100%"));
}

#[test]
fn test_ask_with_config_catalog() {
    let (_tmp, config) = setup_test_env(SMALL_CATALOG);
    let (stdout, stderr, success) = run_bot(Some(&config), &["ask", "refund policy?"]);
    assert!(success, "ask failed: {}", stderr);
    assert!(stdout.contains("Refunds take 7-10 days."));
}

#[test]
fn test_ask_fallback() {
    let (_tmp, config) = setup_test_env(SMALL_CATALOG);
    let (stdout, _, success) = run_bot(Some(&config), &["ask", "qwerty zxcv"]);
    assert!(success);
    assert!(stdout.contains("Please rephrase your question"));
    assert!(stdout.contains("Confidence: no match"));
}

#[test]
fn test_ask_json_output() {
    let (_tmp, config) = setup_test_env(SMALL_CATALOG);
    let (stdout, stderr, success) =
        run_bot(Some(&config), &["ask", "where is my order", "--json", "--explain"]);
    assert!(success, "ask --json failed: {}", stderr);

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["answer"], "Check My Orders.");
    assert_eq!(value["matched"], 0);
    assert!(value["confidence"].as_f64().unwrap() > 0.99);
    assert_eq!(value["explain"]["best_question"], "Where is my order");
}

#[test]
fn test_ask_threshold_override() {
    let (_tmp, config) = setup_test_env(SMALL_CATALOG);
    let (stdout, _, success) = run_bot(
        Some(&config),
        &["ask", "order", "--threshold", "1.0", "--json"],
    );
    assert!(success);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["confidence"], 0.0);
    assert!(value.get("matched").is_none());

    let (_, stderr, success) = run_bot(Some(&config), &["ask", "order", "--threshold", "2"]);
    assert!(!success);
    assert!(stderr.contains("threshold"));
}

#[test]
fn test_empty_catalog_fails_before_answering() {
    let (_tmp, config) = setup_test_env("entries = []\n");
    let (stdout, stderr, success) = run_bot(Some(&config), &["ask", "hello"]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("empty corpus"), "stderr: {}", stderr);
}

#[test]
fn test_missing_config_file() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.toml");
    let (_, stderr, success) = run_bot(Some(&missing), &["ask", "hello"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}

#[test]
fn test_catalog_listing() {
    let (_tmp, config) = setup_test_env(SMALL_CATALOG);
    let (stdout, _, success) = run_bot(Some(&config), &["catalog"]);
    assert!(success);
    assert!(stdout.contains("  0  Where is my order"));
    assert!(stdout.contains("  2  Free shipping"));
    assert!(stdout.contains("3 entries"));
    assert!(stdout.contains("fingerprint: "));
}

#[test]
fn test_samples_json() {
    let (stdout, stderr, success) = run_bot(None, &["samples", "--json"]);
    assert!(success, "samples failed: {}", stderr);
    let rows: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(rows.len(), 7);
    assert!(rows.iter().all(|r| r["question"].is_string()));
}

#[test]
fn test_chat_from_piped_stdin() {
    let (_tmp, config) = setup_test_env(SMALL_CATALOG);
    let mut child = Command::new(supportbot_binary())
        .arg("--config")
        .arg(&config)
        .arg("chat")
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"free shipping\n/history\n/quit\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("customer support assistant"));
    assert!(stdout.contains("Free over $50."));
    assert!(stdout.contains("you:"));
}

#[test]
fn test_completions() {
    let (stdout, _, success) = run_bot(None, &["completions", "bash"]);
    assert!(success);
    assert!(stdout.contains("supportbot"));
}
