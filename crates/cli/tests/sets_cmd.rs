//! CLI tests for importing, listing, showing, exporting, and deleting saved
//! label sets and QR sets.

mod common;

use std::fs;

use common::{LABELS_CSV, dun_json, stdout_json, write_file};

fn import_sample(dir: &std::path::Path, store: &std::path::Path) -> String {
    let csv = write_file(dir, "labels.csv", LABELS_CSV);
    let output = dun_json(store)
        .arg("import")
        .arg(&csv)
        .args(["--name", "Pedido 1", "--orientation", "landscape"])
        .output()
        .expect("run import");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stdout));
    let json = stdout_json(&output);
    assert_eq!(json["saved"], 1);
    assert_eq!(json["skipped"], 1);
    json["id"].as_str().expect("id").to_string()
}

#[test]
fn import_then_list_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");
    let id = import_sample(dir.path(), &store);
    assert!(store.join("dun-saved-labels.json").exists());

    let output = dun_json(&store).args(["sets", "list"]).output().unwrap();
    assert!(output.status.success());
    let list = stdout_json(&output);
    assert_eq!(list[0]["id"], id.as_str());
    assert_eq!(list[0]["name"], "Pedido 1");
    assert_eq!(list[0]["labels"], 1);
    assert_eq!(list[0]["orientation"], "landscape");

    let output = dun_json(&store).args(["sets", "show", &id]).output().unwrap();
    assert!(output.status.success());
    let show = stdout_json(&output);
    assert_eq!(show["set"]["labels"][0]["sku"], "D24-ALV26278");
    assert_eq!(
        show["gs1"][0]["humanReadable"],
        "(01)27898971826272(17)991231(10)L2409-A"
    );
}

#[test]
fn store_dir_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("env-store");
    let csv = write_file(dir.path(), "labels.csv", LABELS_CSV);
    let output = std::process::Command::new(assert_cmd::cargo::cargo_bin!("dun"))
        .env("DUNKIT_STORE_DIR", &store)
        .args(["--output", "json", "import"])
        .arg(&csv)
        .args(["--name", "Env"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(store.join("dun-saved-labels.json").exists());
}

#[test]
fn export_csv_to_stdout_and_json_to_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");
    let id = import_sample(dir.path(), &store);

    let output = dun_json(&store)
        .args(["sets", "export", &id, "--csv"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let csv = String::from_utf8_lossy(&output.stdout);
    assert!(csv.starts_with("sku,gtin14,product,qtyPerBox,boxSize,weightKg,lot,expiry\n\""));
    assert!(csv.contains("\"2099-12-31\""));

    let out_dir = dir.path().join("exports");
    fs::create_dir(&out_dir).unwrap();
    let output = dun_json(&store)
        .args(["sets", "export", &id, "-o"])
        .arg(&out_dir)
        .output()
        .unwrap();
    assert!(output.status.success());
    let file = out_dir.join(format!("etiquetas-Pedido 1-{id}.json"));
    let exported: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(exported["id"], id.as_str());
    assert_eq!(exported["labels"][0]["qtyPerBox"], 24);
}

#[test]
fn delete_set_then_deleting_again_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");
    let id = import_sample(dir.path(), &store);

    let output = dun_json(&store).args(["sets", "delete", &id]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["deleted"], true);

    let output = dun_json(&store).args(["sets", "delete", &id]).output().unwrap();
    assert!(!output.status.success());
    assert_eq!(stdout_json(&output)["error"], "command_failed");

    let output = dun_json(&store).args(["sets", "list"]).output().unwrap();
    assert_eq!(stdout_json(&output), serde_json::json!([]));
}

#[test]
fn import_with_no_valid_rows_saves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");
    let csv = write_file(
        dir.path(),
        "bad.csv",
        "sku,gtin14,product,qtyPerBox\nX,123,Y,0\n",
    );
    let output = dun_json(&store)
        .arg("import")
        .arg(&csv)
        .args(["--name", "Nada"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let json = stdout_json(&output);
    assert!(
        json["message"]
            .as_str()
            .is_some_and(|m| m.contains("no valid labels")),
        "unexpected message: {}",
        json["message"]
    );
    assert!(!store.join("dun-saved-labels.json").exists());
}

#[test]
fn qr_import_list_delete() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");
    let csv = write_file(
        dir.path(),
        "qr.csv",
        "label,value\nProduto A,7891234567890\n,https://example.com\nSem valor,\n",
    );
    let settings = write_file(dir.path(), "settings.json", r#"{"widthMm": 50}"#);

    let output = dun_json(&store)
        .args(["qr", "import"])
        .arg(&csv)
        .args(["--name", "Loja", "--settings"])
        .arg(&settings)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stdout));
    let json = stdout_json(&output);
    assert_eq!(json["saved"], 2);
    let id = json["id"].as_str().unwrap().to_string();

    let raw = fs::read_to_string(store.join("qr-saved-sets.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved[0]["settings"]["widthMm"], 50.0);
    assert_eq!(saved[0]["qrList"][1]["value"], "https://example.com");

    let output = dun_json(&store).args(["qr", "list"]).output().unwrap();
    assert_eq!(stdout_json(&output)[0]["entries"], 2);

    let output = dun_json(&store).args(["qr", "delete", &id]).output().unwrap();
    assert!(output.status.success());
}
