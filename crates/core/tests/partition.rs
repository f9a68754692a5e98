//! Batch partitioning tests for `validate_label_list`.
//!
//! Per-field validator edge cases live next to each validator; these tests
//! cover how whole records are split and reported.

use chrono::NaiveDate;
use dunkit_core::sample::dun_sample;
use dunkit_core::{LabelRecord, validate_label_list, validate_label_list_on};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn record(sku: &str, gtin14: &str, qty: i64, expiry: Option<&str>) -> LabelRecord {
    LabelRecord {
        sku: sku.into(),
        gtin14: gtin14.into(),
        product: "Produto".into(),
        qty_per_box: qty,
        expiry: expiry.map(str::to_string),
        ..Default::default()
    }
}

#[test]
fn empty_batch_yields_empty_partition() {
    let p = validate_label_list_on(Vec::new(), today());
    assert!(p.is_empty());
    assert!(p.all_valid());
}

#[test]
fn bad_checksum_and_zero_quantity_report_exactly_those_two() {
    let bad = record("SKU-1", "27898971826273", 0, None);
    let p = validate_label_list_on([bad.clone()], today());
    assert!(p.valid_labels.is_empty());
    assert_eq!(p.invalid_labels.len(), 1);
    let inv = &p.invalid_labels[0];
    assert_eq!(inv.label, bad);
    assert_eq!(inv.errors, ["GTIN-14 inválido", "Quantidade inválida"]);
}

#[test]
fn every_failing_check_is_reported_in_order() {
    let bad = LabelRecord {
        sku: " x ".into(),
        gtin14: "abc".into(),
        product: "".into(),
        qty_per_box: -1,
        expiry: Some("2020-01-01".into()),
        ..Default::default()
    };
    let p = validate_label_list_on([bad], today());
    assert_eq!(
        p.invalid_labels[0].errors,
        [
            "GTIN-14 inválido",
            "SKU inválido",
            "Produto inválido",
            "Quantidade inválida",
            "Data de validade inválida",
        ]
    );
}

#[test]
fn partition_is_total_and_stable() {
    let input = vec![
        record("AAA", "27898971826272", 1, None),
        record("B", "27898971826272", 1, None),
        record("CCC", "27898971826272", 2, Some("31/12/2030")),
        record("DDD", "00000000000000", 0, None),
        record("EEE", "27898971826272", 3, Some("20300101")),
        record("FFF", "27898971826272", 4, Some("2025-06-01")),
    ];
    let n = input.len();
    let p = validate_label_list_on(input, today());
    assert_eq!(p.valid_labels.len() + p.invalid_labels.len(), n);
    assert_eq!(p.len(), n);

    let valid: Vec<_> = p.valid_labels.iter().map(|l| l.sku.as_str()).collect();
    let invalid: Vec<_> = p.invalid_labels.iter().map(|l| l.label.sku.as_str()).collect();
    assert_eq!(valid, ["AAA", "CCC", "EEE"]);
    assert_eq!(invalid, ["B", "DDD", "FFF"]);
}

#[test]
fn valid_records_pass_through_unchanged() {
    let mut r = dun_sample();
    r.expiry = Some("31/12/2099".into());
    let p = validate_label_list_on([r.clone()], today());
    assert_eq!(p.valid_labels, [r]);
}

#[test]
fn all_zero_gtin_has_matching_check_digit() {
    // sum of an all-zero payload is 0, so the check digit is 0
    let p = validate_label_list_on([record("SKU", "00000000000000", 5, None)], today());
    assert!(p.all_valid());
}

#[test]
fn clock_based_partition_rejects_past_expiry() {
    let p = validate_label_list([record("SKU", "27898971826272", 5, Some("20200101"))]);
    assert_eq!(p.invalid_labels[0].errors, ["Data de validade inválida"]);
}

#[test]
fn invalid_label_serializes_flat_with_errors() {
    let p = validate_label_list_on([record("SKU", "1", 5, None)], today());
    let json = serde_json::to_value(&p).unwrap();
    let inv = &json["invalidLabels"][0];
    assert_eq!(inv["sku"], "SKU");
    assert_eq!(inv["gtin14"], "1");
    assert_eq!(inv["qtyPerBox"], 5);
    assert_eq!(inv["errors"][0], "GTIN-14 inválido");
    assert!(json["validLabels"].as_array().unwrap().is_empty());
}
