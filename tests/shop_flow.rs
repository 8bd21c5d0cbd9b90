use assert_cmd::Command;
use predicates::prelude::*;

fn milkbar(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("milkbar").unwrap();
    cmd.env("MILKBAR_DIR", dir);
    cmd
}

#[test]
fn stock_follows_deliveries_and_sales() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();

    milkbar(dir)
        .args([
            "product", "add", "Fresh Milk", "--price", "60", "--unit", "liter", "--stock", "100",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product added (1)"));
    milkbar(dir)
        .args(["supplier", "add", "KCC Dairies", "--phone", "0700000001"])
        .assert()
        .success();

    // Delivery of 20 brings stock to 120
    milkbar(dir)
        .args([
            "delivery", "record", "--supplier", "1", "--product", "1", "--quantity", "20",
            "--cost", "45",
        ])
        .assert()
        .success();
    milkbar(dir)
        .args(["product", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("120.00"));

    // Sale of 30 brings stock to 90; receipt totals 30 x 60
    milkbar(dir)
        .args(["sale", "record", "--item", "1:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1800.00"));
    milkbar(dir)
        .args(["product", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("90.00"));

    // Overselling fails and leaves stock unchanged
    milkbar(dir)
        .args(["sale", "record", "--item", "1:200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Insufficient stock"));
    milkbar(dir)
        .args(["product", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("90.00"));
}

#[test]
fn fresh_directory_lists_empty_collections() {
    let temp = tempfile::tempdir().unwrap();

    milkbar(temp.path())
        .args(["product", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No products."));
    milkbar(temp.path())
        .args(["sale", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sales."));
}

#[test]
fn referenced_product_cannot_be_removed() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();

    milkbar(dir)
        .args(["product", "add", "Mala", "--price", "50", "--unit", "packet", "--stock", "10"])
        .assert()
        .success();
    milkbar(dir)
        .args(["sale", "record", "--item", "1:2"])
        .assert()
        .success();

    milkbar(dir)
        .args(["product", "rm", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("referenced by sales"));
    milkbar(dir)
        .args(["product", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mala"));
}

#[test]
fn seed_then_summary_shows_kpis() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();

    milkbar(dir).arg("seed").assert().success();
    milkbar(dir)
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Products: 3"))
        .stdout(predicate::str::contains("Suppliers: 2"));

    // Seeding again must not duplicate
    milkbar(dir).arg("seed").assert().success();
    milkbar(dir)
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Products: 3"));
}

#[test]
fn corrupt_data_file_is_reported() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("data.json"), "{oops").unwrap();

    milkbar(temp.path())
        .args(["product", "ls"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Corrupt data file"));
}

#[test]
fn dir_flag_overrides_environment() {
    let temp_env = tempfile::tempdir().unwrap();
    let temp_flag = tempfile::tempdir().unwrap();

    milkbar(temp_env.path())
        .args(["--dir"])
        .arg(temp_flag.path())
        .args(["product", "add", "Yogurt", "--price", "80", "--unit", "bottle"])
        .assert()
        .success();

    // The flag directory got the data file, the env directory stayed empty
    assert!(temp_flag.path().join("data.json").exists());
    assert!(!temp_env.path().join("data.json").exists());
}
