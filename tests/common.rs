#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn mt() -> Command {
    cargo_bin_cmd!("medtracker")
}

/// Command preset with `--db <path> --test`, so the user's config is never read.
pub fn mt_db(db_path: &str) -> Command {
    let mut cmd = mt();
    cmd.args(["--db", db_path, "--test"]);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_medtracker.sqlite", name));
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

/// Initialize DB with two medications:
///   #1 Ibuprofen 200 mg, taken 08:00, 08:05 and 20:00 on 2025-10-04
///   #2 Vitamin D, taken 09:00 on 2025-10-04 and 09:00 on 2025-10-05
pub fn init_db_with_data(db_path: &str) {
    mt_db(db_path).arg("init").assert().success();

    mt_db(db_path)
        .args([
            "med",
            "add",
            "Ibuprofen",
            "--dosage",
            "200 mg",
            "--frequency",
            "Three times a day",
        ])
        .assert()
        .success();

    mt_db(db_path)
        .args(["med", "add", "Vitamin D", "--dosage", "1000 IU"])
        .assert()
        .success();

    for (med, at) in [
        ("1", "2025-10-04 20:00"),
        ("1", "2025-10-04 08:00"),
        ("1", "2025-10-04 08:05"),
        ("2", "2025-10-04 09:00"),
        ("2", "2025-10-05 09:00"),
    ] {
        mt_db(db_path)
            .args(["take", med, "--at", at])
            .assert()
            .success();
    }
}
