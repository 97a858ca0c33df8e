#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn ts() -> Command {
    cargo_bin_cmd!("trainstat")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_trainstat.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write a CSV fixture into the temp dir and return its path
pub fn temp_csv(name: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_fixture.csv", name));
    let p = path.to_string_lossy().to_string();
    fs::write(&p, content).expect("write csv fixture");
    p
}

/// Initialize DB and add a small dataset useful for many tests:
/// one trainer (#1), three members (#1..#3) and one open training (#1).
pub fn init_db_with_data(db_path: &str) {
    ts().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    ts().args(["--db", db_path, "trainer", "add", "Tom", "Trainer"])
        .assert()
        .success();

    for (vorname, nachname) in [("Anna", "Adler"), ("Berta", "Brandt"), ("Carl", "Clauss")] {
        ts().args(["--db", db_path, "member", "add", vorname, nachname])
            .assert()
            .success();
    }

    ts().args([
        "--db",
        db_path,
        "training",
        "add",
        "--date",
        "01.03.2024",
        "--thema",
        "Falltraining",
        "--trainer1",
        "1",
    ])
    .assert()
    .success();
}
