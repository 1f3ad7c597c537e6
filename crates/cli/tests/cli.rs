use assert_cmd::Command;

fn biblio(config_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("biblio").unwrap();
    cmd.env("BIBLIO_CONFIG_DIR", config_dir)
        .env("BIBLIO_ENV", "local")
        .env_remove("BIBLIO_DATABASE__URL");
    cmd
}

#[test]
fn migrate_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("biblio.db");
    std::fs::write(
        dir.path().join("base.toml"),
        format!("[database]\nurl = \"sqlite://{}\"\n", db_path.display()),
    )
    .unwrap();

    let first = biblio(dir.path()).arg("migrate").assert().success();
    let stdout = String::from_utf8(first.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("applied 2 migration(s)"));

    let second = biblio(dir.path()).arg("migrate").assert().success();
    let stdout = String::from_utf8(second.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("applied 0 migration(s)"));
}

#[test]
fn settings_prints_resolved_configuration() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("local.toml"), "[server]\nport = 9191\n").unwrap();

    let output = biblio(dir.path()).arg("settings").assert().success();
    let settings: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

    assert_eq!(settings["environment"], "local");
    assert_eq!(settings["server"]["port"], 9191);
}

#[test]
fn unknown_environment_fails() {
    let dir = tempfile::tempdir().unwrap();
    biblio(dir.path())
        .env("BIBLIO_ENV", "qa")
        .arg("settings")
        .assert()
        .failure();
}
