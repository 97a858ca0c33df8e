use predicates::str::contains;

mod common;
use common::{setup_test_db, temp_csv, ts};

#[test]
fn test_member_import_skips_rows_with_missing_names() {
    let db_path = setup_test_db("import_members_skip");

    ts().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let csv = temp_csv(
        "import_members_skip",
        "Vorname,Nachname,ID\n,Adler,M1\nBerta,Brandt,M2\nCarl,Clauss,M3\n",
    );

    ts().args([
        "--db",
        &db_path,
        "import",
        "members",
        &csv,
        "--overwrite",
        "never",
    ])
    .assert()
    .success()
    .stdout(contains("Members: 2 imported, 1 skipped."))
    .stdout(contains("line 2: first or last name missing."));

    ts().args(["--db", &db_path, "member", "list"])
        .assert()
        .success()
        .stdout(contains("Brandt"))
        .stdout(contains("Clauss"));
}

#[test]
fn test_member_import_overwrite_policies() {
    let db_path = setup_test_db("import_members_overwrite");

    ts().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let first = temp_csv(
        "import_members_ow_first",
        "Vorname,Nachname,ID\nAnna,Adler,M1\n",
    );
    ts().args([
        "--db",
        &db_path,
        "import",
        "members",
        &first,
        "--overwrite",
        "never",
    ])
    .assert()
    .success()
    .stdout(contains("Members: 1 imported, 0 skipped."));

    let second = temp_csv(
        "import_members_ow_second",
        "Vorname,Nachname,ID\nAnnika,Altmann,M1\n",
    );

    // declined → record untouched
    ts().args([
        "--db",
        &db_path,
        "import",
        "members",
        &second,
        "--overwrite",
        "never",
    ])
    .assert()
    .success()
    .stdout(contains("Members: 0 imported, 1 skipped."));

    ts().args(["--db", &db_path, "member", "list"])
        .assert()
        .success()
        .stdout(contains("Adler"));

    // accepted → updated in place, same id
    ts().args([
        "--db",
        &db_path,
        "import",
        "members",
        &second,
        "--overwrite",
        "always",
    ])
    .assert()
    .success()
    .stdout(contains("Members: 1 imported, 0 skipped."));

    let out = ts()
        .args(["--db", &db_path, "member", "list"])
        .output()
        .expect("run member list");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Altmann"));
    assert!(!stdout.contains("Adler"));
    // still member #1
    assert!(stdout.contains('1'));
}

#[test]
fn test_training_import_resolves_trainer_references() {
    let db_path = setup_test_db("import_trainings");

    ts().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let trainers = temp_csv(
        "import_trainings_trainers",
        "Vorname,Nachname,ID\nTom,Trainer,T1\n",
    );
    ts().args([
        "--db",
        &db_path,
        "import",
        "trainers",
        &trainers,
        "--overwrite",
        "never",
    ])
    .assert()
    .success()
    .stdout(contains("Trainers: 1 imported, 0 skipped."));

    let trainings = temp_csv(
        "import_trainings_rows",
        "Datum,Thema,Trainer1,Trainer2,ID\n\
         01.03.2024,Falltraining,T1,,TR1\n\
         08.03.2024,Bodenarbeit,T9,,TR2\n\
         ,Fallschule,T1,,TR3\n",
    );

    ts().args([
        "--db",
        &db_path,
        "import",
        "trainings",
        &trainings,
        "--overwrite",
        "never",
    ])
    .assert()
    .success()
    .stdout(contains("Trainings: 1 imported, 2 skipped."))
    .stdout(contains("line 3: Trainer1 with ID T9 not found."))
    .stdout(contains("line 4: date, topic or Trainer1 missing."));

    ts().args(["--db", &db_path, "training", "list"])
        .assert()
        .success()
        .stdout(contains("Falltraining"));
}

#[test]
fn test_import_end_to_end_scenario() {
    let db_path = setup_test_db("import_e2e");

    ts().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    // 1) import 3 members, one missing a name
    let members = temp_csv(
        "import_e2e_members",
        "Vorname,Nachname,ID\nAnna,Adler,M1\n,Brandt,M2\nCarl,Clauss,M3\n",
    );
    ts().args([
        "--db",
        &db_path,
        "import",
        "members",
        &members,
        "--overwrite",
        "never",
    ])
    .assert()
    .success()
    .stdout(contains("Members: 2 imported, 1 skipped."))
    .stdout(contains("line 3:"));

    // 2) import a trainer and create a training referencing it
    let trainers = temp_csv(
        "import_e2e_trainers",
        "Vorname,Nachname,ID\nTom,Trainer,T1\n",
    );
    ts().args([
        "--db",
        &db_path,
        "import",
        "trainers",
        &trainers,
        "--overwrite",
        "never",
    ])
    .assert()
    .success();

    ts().args([
        "--db",
        &db_path,
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

    // 3) mark one member present and save
    ts().args([
        "--db", &db_path, "attendance", "set", "1", "--members", "1",
    ])
    .assert()
    .success();

    // 4) statistics for a range including that date
    ts().args([
        "--db",
        &db_path,
        "stats",
        "members",
        "--from",
        "01.01.2024",
        "--to",
        "31.12.2024",
    ])
    .assert()
    .success()
    .stdout(contains("Adler, Anna"))
    .stdout(contains('1'));

    ts().args([
        "--db",
        &db_path,
        "stats",
        "topics",
        "--from",
        "01.01.2024",
        "--to",
        "31.12.2024",
    ])
    .assert()
    .success()
    .stdout(contains("Falltraining"));
}
