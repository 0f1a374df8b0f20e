use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use tempfile::tempdir;

fn contacts_cmd(storage: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("CONTACTS_STORAGE_PATH", storage);
    cmd
}

#[test]
fn export_import() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let storage = dir.path().join("storage.json");

    contacts_cmd(&storage)
        .args([
            "add",
            "--first-name",
            "Alice",
            "--last-name",
            "Smith",
            "--email",
            "alice@example.com",
            "--phone",
            "0803123456",
        ])
        .assert()
        .success()
        .stdout(contains("Contact added successfully"));

    // Export to a temporary CSV file
    let out_path = dir.path().join("out.csv");
    let out_path_str = out_path.to_string_lossy().to_string();

    contacts_cmd(&storage)
        .args(["export", "--des", out_path_str.as_str()])
        .assert()
        .success()
        .stdout(contains("Successfully exported 1 contacts"));

    let exported = fs::read_to_string(&out_path)?;
    assert!(exported.starts_with("id,firstName,lastName,email,phone,address"));
    assert!(exported.contains("Alice"));

    // Import into a fresh storage
    let other_storage = dir.path().join("other.json");
    contacts_cmd(&other_storage)
        .args(["import", "--src", out_path_str.as_str()])
        .assert()
        .success()
        .stdout(contains("Successfully imported 1 contacts"));

    contacts_cmd(&other_storage)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Alice Smith"))
        .stdout(contains("Total Contacts: 1"));

    // Importing the same file again updates instead of duplicating
    contacts_cmd(&storage)
        .args(["import", "--src", out_path_str.as_str()])
        .assert()
        .success()
        .stdout(contains("0 added, 1 updated, 0 skipped"));

    contacts_cmd(&storage)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Total Contacts: 1"));

    Ok(())
}

#[test]
fn import_skips_invalid_rows() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let storage = dir.path().join("storage.json");
    let src = dir.path().join("in.csv");
    fs::write(
        &src,
        "firstName,lastName,email,phone,address\n\
         Bob,Jones,bob@example.com,0123456789,\n\
         Bad,Row,nope,1,\n",
    )?;

    contacts_cmd(&storage)
        .args(["import", "--src", &*src.to_string_lossy()])
        .assert()
        .success()
        .stdout(contains("Successfully imported 1 contacts"))
        .stdout(contains("1 added, 0 updated, 1 skipped"));

    Ok(())
}

#[test]
fn export_rejects_non_csv_destination() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let storage = dir.path().join("storage.json");
    let des = dir.path().join("out.txt");

    contacts_cmd(&storage)
        .args(["export", "--des", &*des.to_string_lossy()])
        .assert()
        .failure()
        .stderr(contains("Export file must be a .csv file"));

    Ok(())
}
