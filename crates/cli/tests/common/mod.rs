//! Shared helpers for `dun` CLI tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use assert_cmd::cargo;

/// A label CSV with one valid row and one row failing GTIN and quantity.
pub const LABELS_CSV: &str = "\
sku,gtin14,product,qtyPerBox,boxSize,weightKg,lot,expiry
D24-ALV26278,27898971826272,Pasta de Dente Relax,24,32X25X16,\"3,095\",L2409-A,31/12/2099
BAD,27898971826273,Escova,0,,,,
";

/// A label CSV where every row is valid.
pub const VALID_CSV: &str = "\
sku,gtin14,product,qtyPerBox,lot,expiry
D24-ALV26278,27898971826272,Pasta de Dente,24,L2409-A,2099-12-31
";

/// `dun` with its store pointed at `store`.
pub fn dun(store: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("dun"));
    cmd.arg("--store").arg(store);
    cmd
}

/// `dun` with its store pointed at `store` and JSON output.
pub fn dun_json(store: &Path) -> Command {
    let mut cmd = dun(store);
    cmd.args(["--output", "json"]);
    cmd
}

/// Write `content` to `name` inside `dir` and return the full path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

/// Parse stdout as JSON.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid json ({e}): {stdout}"))
}
