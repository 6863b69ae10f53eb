//! Integration tests for the exgen binary.
//!
//! Every run is non-interactive (`--yes`, piped stdio) and skips the npm and
//! git steps. The config directory points into the temp dir so a developer's
//! own config never leaks in.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn exgen(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("exgen").unwrap();
    cmd.current_dir(cwd)
        .env("XDG_CONFIG_HOME", cwd.join(".config"))
        .env("HOME", cwd)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("EXGEN_TEMPLATES_DIR");
    cmd
}

const OFFLINE: [&str; 3] = ["--yes", "--skip-install", "--skip-git"];

fn package_json(dir: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(dir.join("package.json")).unwrap()).unwrap()
}

// ── meta ──────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_generation_flags() {
    let tmp = TempDir::new().unwrap();
    exgen(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--lang"))
        .stdout(predicate::str::contains("--database"))
        .stdout(predicate::str::contains("--sql-engine"));
}

#[test]
fn version_flag() {
    let tmp = TempDir::new().unwrap();
    exgen(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn shell_completions() {
    let tmp = TempDir::new().unwrap();
    exgen(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exgen"));
}

// ── generation ────────────────────────────────────────────────────────────────

#[test]
fn javascript_defaults_generate_minimal_api() {
    let tmp = TempDir::new().unwrap();
    exgen(tmp.path())
        .args(["hello-world", "--lang", "js"])
        .args(OFFLINE)
        .assert()
        .success()
        .stdout(predicate::str::contains("create : "))
        .stdout(predicate::str::contains("cd hello-world"))
        .stdout(predicate::str::contains("npm start"));

    let root = tmp.path().join("hello-world");
    for file in [
        "server/app.js",
        "server/bin/www.js",
        "server/routes/index.js",
        "server/controllers/userController.js",
        ".babelrc",
        ".eslintrc.js",
        ".gitignore",
        ".env",
    ] {
        assert!(root.join(file).is_file(), "{file}");
    }
    assert!(!root.join("tsconfig.json").exists());

    let pkg = package_json(&root);
    assert_eq!(pkg["name"], "hello-world");
    assert!(pkg["dependencies"]["express"].is_string());
    assert!(pkg["dependencies"].get("mongoose").is_none());
}

#[test]
fn typescript_postgres_redis() {
    let tmp = TempDir::new().unwrap();
    exgen(tmp.path())
        .args([
            "inventory",
            "--lang",
            "ts",
            "--database",
            "sequelize",
            "--sql-engine",
            "postgres",
            "--cache",
            "redis",
        ])
        .args(OFFLINE)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "You must update the `.env` file",
        ));

    let root = tmp.path().join("inventory");
    let pkg = package_json(&root);
    for dep in ["pg", "pg-hstore", "redis", "sequelize"] {
        assert!(pkg["dependencies"][dep].is_string(), "{dep}");
    }
    assert!(root.join("tsconfig.json").is_file());
    assert!(!root.join(".babelrc").exists());
    assert!(root.join("server/config/config.ts").is_file());

    let env = fs::read_to_string(root.join(".env")).unwrap();
    assert!(env.contains("DIALECT=postgres"));
}

#[test]
fn no_gitignore_flag() {
    let tmp = TempDir::new().unwrap();
    exgen(tmp.path())
        .args(["api", "--no-gitignore"])
        .args(OFFLINE)
        .assert()
        .success();
    assert!(!tmp.path().join("api/.gitignore").exists());
}

#[test]
fn current_directory_target_uses_its_name() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("my-service");
    fs::create_dir(&dir).unwrap();

    exgen(&dir).arg(".").args(OFFLINE).assert().success();

    assert_eq!(package_json(&dir)["name"], "my-service");
    assert!(dir.join("server/app.js").is_file());
}

// ── pre-flight ────────────────────────────────────────────────────────────────

#[test]
fn non_empty_target_is_refused_without_force() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("busy");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("keep.txt"), "mine").unwrap();

    exgen(tmp.path())
        .arg("busy")
        .args(OFFLINE)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("not empty"))
        .stderr(predicate::str::contains("--force"));

    assert!(root.join("keep.txt").exists());
    assert!(!root.join("package.json").exists());
}

#[test]
fn force_replaces_non_empty_target() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("busy");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("stale.txt"), "old").unwrap();

    exgen(tmp.path())
        .args(["busy", "--force"])
        .args(OFFLINE)
        .assert()
        .success();

    assert!(!root.join("stale.txt").exists());
    assert!(root.join("package.json").is_file());
}

#[test]
fn dry_run_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    exgen(tmp.path())
        .args(["preview", "--database", "mongoose", "--dry-run"])
        .args(OFFLINE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("package.json"))
        .stdout(predicate::str::contains("server/models"));

    assert!(!tmp.path().join("preview").exists());
}

// ── errors ────────────────────────────────────────────────────────────────────

#[test]
fn typescript_rejects_bare_driver() {
    let tmp = TempDir::new().unwrap();
    exgen(tmp.path())
        .args(["api", "--lang", "ts", "--database", "mongojs"])
        .args(OFFLINE)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Error:"));

    assert!(!tmp.path().join("api").exists());
}

#[test]
fn unknown_option_value_is_a_usage_error() {
    let tmp = TempDir::new().unwrap();
    exgen(tmp.path())
        .args(["api", "--cache", "memcached"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn explicit_missing_config_is_a_config_error() {
    let tmp = TempDir::new().unwrap();
    exgen(tmp.path())
        .args(["--config", "absent.toml", "api"])
        .args(OFFLINE)
        .assert()
        .failure()
        .code(4);
}

// ── configuration ─────────────────────────────────────────────────────────────

#[test]
fn config_init_then_show() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("conf/exgen.toml");
    let path_arg = path.to_str().unwrap();

    exgen(tmp.path())
        .args(["config", "init", "--config", path_arg])
        .assert()
        .success();
    assert!(path.is_file());

    exgen(tmp.path())
        .args(["config", "show", "--config", path_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"))
        .stdout(predicate::str::contains("language = \"javascript\""));

    exgen(tmp.path())
        .args(["config", "path", "--config", path_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("exgen.toml"));
}

#[test]
fn config_file_supplies_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("exgen.toml");
    fs::write(
        &path,
        "[defaults]\nlanguage = \"typescript\"\ndatabase = \"mongoose\"\n",
    )
    .unwrap();

    exgen(tmp.path())
        .args(["--config", path.to_str().unwrap(), "shop"])
        .args(OFFLINE)
        .assert()
        .success();

    let root = tmp.path().join("shop");
    assert!(root.join("server/app.ts").is_file());
    assert!(package_json(&root)["dependencies"]["mongoose"].is_string());
}

#[test]
fn environment_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    exgen(tmp.path())
        .env("EXGEN__DEFAULTS__LANGUAGE", "typescript")
        .arg("typed")
        .args(OFFLINE)
        .assert()
        .success();

    assert!(tmp.path().join("typed/server/app.ts").is_file());
}

// ── output modes ──────────────────────────────────────────────────────────────

#[test]
fn quiet_prints_nothing_on_success() {
    let tmp = TempDir::new().unwrap();
    exgen(tmp.path())
        .args(["-q", "api"])
        .args(OFFLINE)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn json_output_reports_files() {
    let tmp = TempDir::new().unwrap();
    let out = exgen(tmp.path())
        .args(["--output-format", "json", "api"])
        .args(OFFLINE)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let summary: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(summary["project"], "api");
    assert_eq!(summary["installed"], false);
    let files = summary["files"].as_array().unwrap();
    assert!(files
        .iter()
        .any(|f| f.as_str().is_some_and(|s| s.ends_with("package.json"))));
}

#[test]
fn log_file_records_created_paths() {
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("logs/exgen.log");

    exgen(tmp.path())
        .args(["-v", "--log-file", log.to_str().unwrap(), "api"])
        .args(OFFLINE)
        .assert()
        .success();

    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("package.json"));
}
