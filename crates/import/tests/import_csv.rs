//! Label CSV import: header aliases, normalization, partitioning, and
//! diagnostics.

use std::fs;

use chrono::NaiveDate;
use dunkit_diagnostics::{Severity, codes};
use dunkit_import::{
    AliasTable, ImportError, export_labels_csv, import_labels_from_path, import_labels_from_str,
    import_labels_on, label_csv_template, load_aliases_from_str,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

const CANONICAL: &str = "\
sku,gtin14,product,qtyPerBox,boxSize,weightKg,lot,expiry
D24-ALV26278,27898971826272,Pasta de Dente,24,32X25X16,\"3,095\",L2409-A,2026-03-31
BAD,27898971826273,Escova,0,,,,
";

#[test]
fn canonical_headers_partition_rows() {
    let imp = import_labels_on(CANONICAL, &AliasTable::default(), today()).unwrap();
    assert_eq!(imp.rows, 2);
    assert_eq!(imp.partition.valid_labels.len(), 1);
    assert_eq!(imp.partition.invalid_labels.len(), 1);

    let ok = &imp.partition.valid_labels[0];
    assert_eq!(ok.weight_kg, "3,095");
    assert_eq!(ok.lot.as_deref(), Some("L2409-A"));

    let bad = &imp.partition.invalid_labels[0];
    assert_eq!(bad.errors, ["GTIN-14 inválido", "Quantidade inválida"]);
    assert_eq!(bad.label.lot, None);
    assert_eq!(bad.label.expiry, None);
}

#[test]
fn row_diagnostics_point_at_the_row() {
    let imp = import_labels_on(CANONICAL, &AliasTable::default(), today()).unwrap();
    let ids: Vec<_> = imp.diagnostics.iter().map(|d| d.id.as_ref()).collect();
    assert_eq!(ids, [codes::GTIN14_INVALID, codes::QUANTITY_INVALID]);
    assert!(imp.has_errors());

    let d = &imp.diagnostics[0];
    let span = d.span.expect("row span");
    assert!(CANONICAL[span.start..span.end].starts_with("BAD,27898971826273"));
    let ctx = d.context.as_ref().unwrap();
    assert_eq!(ctx["row"], "2");
    assert_eq!(ctx["field"], "gtin14");
}

#[test]
fn portuguese_and_uppercase_headers_are_recognized() {
    let csv = "\
SKU,GTIN-14,Produto,QUANTIDADE POR CAIXA,TAMANHO CAIXA,PESO KG,Lote,Validade
ABC-1,27898971826272,Sabonete,\"12,0\",10X10X10,\"1,5\",L1,31/12/2030
";
    let imp = import_labels_on(csv, &AliasTable::default(), today()).unwrap();
    assert!(imp.diagnostics.is_empty(), "{:?}", imp.diagnostics);
    let rec = &imp.partition.valid_labels[0];
    assert_eq!(rec.sku, "ABC-1");
    assert_eq!(rec.qty_per_box, 12);
    assert_eq!(rec.box_size, "10X10X10");
    assert_eq!(rec.weight_kg, "1,5");
    assert_eq!(rec.lot.as_deref(), Some("L1"));
    // DD/MM/YYYY is stored as ISO so the barcode carries AI (17)
    assert_eq!(rec.expiry.as_deref(), Some("2030-12-31"));
    assert!(rec.gs1_strings().human_readable.contains("(17)301231"));
}

#[test]
fn first_non_empty_alias_wins() {
    let csv = "qtyPerBox,qtd,sku,SKU,gtin14,product\n,6,,XYZ,27898971826272,Pote\n";
    let imp = import_labels_on(csv, &AliasTable::default(), today()).unwrap();
    let rec = &imp.partition.valid_labels[0];
    assert_eq!(rec.qty_per_box, 6);
    assert_eq!(rec.sku, "XYZ");
}

#[test]
fn values_are_trimmed() {
    let csv = "sku,gtin14,product,qtyPerBox,lot\n  ABC  , 27898971826272 ,  Pote ,  3 ,   \n";
    let imp = import_labels_on(csv, &AliasTable::default(), today()).unwrap();
    let rec = &imp.partition.valid_labels[0];
    assert_eq!(rec.sku, "ABC");
    assert_eq!(rec.gtin14, "27898971826272");
    assert_eq!(rec.product, "Pote");
    assert_eq!(rec.lot, None);
}

#[test]
fn missing_required_column_is_reported_once() {
    let csv = "sku,product,qtyPerBox\nABC,Pote,1\nDEF,Copo,2\n";
    let imp = import_labels_on(csv, &AliasTable::default(), today()).unwrap();
    let missing: Vec<_> = imp
        .diagnostics
        .iter()
        .filter(|d| d.id == codes::CSV_MISSING_COLUMN)
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].severity, Severity::Warn);
    assert_eq!(missing[0].context.as_ref().unwrap()["field"], "gtin14");
    assert_eq!(imp.partition.invalid_labels.len(), 2);
}

#[test]
fn unparseable_expiry_is_kept_and_rejected() {
    let csv = "sku,gtin14,product,qtyPerBox,expiry\nABC,27898971826272,Pote,1,em breve\n";
    let imp = import_labels_on(csv, &AliasTable::default(), today()).unwrap();
    let inv = &imp.partition.invalid_labels[0];
    assert_eq!(inv.label.expiry.as_deref(), Some("em breve"));
    assert_eq!(inv.errors, ["Data de validade inválida"]);
}

#[test]
fn blank_lines_are_skipped() {
    let csv = "sku,gtin14,product,qtyPerBox\n\nABC,27898971826272,Pote,1\n\n";
    let imp = import_labels_on(csv, &AliasTable::default(), today()).unwrap();
    assert_eq!(imp.rows, 1);
}

#[test]
fn custom_aliases_apply() {
    let aliases = load_aliases_from_str(r#"{"gtin14": ["EAN14"]}"#).unwrap();
    let csv = "sku,EAN14,product,qtyPerBox\nABC,27898971826272,Pote,1\n";
    let imp = import_labels_on(csv, &aliases, today()).unwrap();
    assert_eq!(imp.partition.valid_labels.len(), 1);
}

#[test]
fn empty_input_is_an_error() {
    let err = import_labels_on("", &AliasTable::default(), today()).unwrap_err();
    assert!(matches!(err, ImportError::MissingHeader));
}

#[test]
fn missing_file_is_a_read_error() {
    let err = import_labels_from_path("no/such/file.csv", &AliasTable::default()).unwrap_err();
    assert!(matches!(err, ImportError::Read { .. }));
    assert!(err.to_string().contains("no/such/file.csv"));
}

#[test]
fn export_reimports_to_the_same_records() {
    let imp = import_labels_on(CANONICAL, &AliasTable::default(), today()).unwrap();
    let exported = export_labels_csv(&imp.partition.valid_labels).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labels.csv");
    fs::write(&path, &exported).unwrap();
    let again = import_labels_from_path(&path, &AliasTable::default()).unwrap();
    assert_eq!(again.rows, 1);
    let all: Vec<_> = again
        .partition
        .valid_labels
        .iter()
        .chain(again.partition.invalid_labels.iter().map(|l| &l.label))
        .cloned()
        .collect();
    assert_eq!(all, imp.partition.valid_labels);
}

#[test]
fn spaced_gtin_is_stored_as_digits() {
    let csv = "sku,gtin14,product,qtyPerBox\nABC,2789 8971 8262 72,Pote,1\n";
    let imp = import_labels_on(csv, &AliasTable::default(), today()).unwrap();
    assert_eq!(imp.partition.valid_labels.len(), 1);
    let label = &imp.partition.valid_labels[0];
    assert_eq!(label.gtin14, "27898971826272");
    assert_eq!(label.gs1_strings().value_for_encoding, "0127898971826272");
}

#[test]
fn label_template_imports_as_one_valid_row() {
    let template = label_csv_template().unwrap();
    let imp = import_labels_from_str(&template, &AliasTable::default()).unwrap();
    assert_eq!(imp.rows, 1);
    assert_eq!(imp.partition.valid_labels.len(), 1);
    assert!(imp.partition.invalid_labels.is_empty());
    assert!(imp.diagnostics.is_empty());
}
