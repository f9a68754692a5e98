//! Label record validation.
//!
//! A record is checked by five independent validators, always evaluated in
//! the same order: GTIN-14, SKU, product, quantity, expiry. Validation is a
//! pure function of the record's fields and the calendar date used as
//! "today"; nothing is cached between calls, so form front-ends simply call
//! [`validate_label`] again whenever an input changes.

mod batch;
/// Single-field validators for SKU, product, and quantity.
pub mod field;

pub use batch::{InvalidLabel, LabelPartition, validate_label_list, validate_label_list_on};

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::expiry::{local_today, validate_expiry_date_on};
use crate::gtin::validate_gtin14;
use crate::record::LabelRecord;
use dunkit_diagnostics::{Diagnostic, Span, codes};
use field::{validate_product, validate_quantity, validate_sku};

macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// One of the five record validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelCheck {
    /// `gtin14` is a checksum-valid GTIN-14.
    Gtin14,
    /// `sku` has at least 3 characters.
    Sku,
    /// `product` has at least 2 characters.
    Product,
    /// `qtyPerBox` is a positive integer.
    Quantity,
    /// `expiry`, if present, is a future date in an accepted shape.
    Expiry,
}

impl LabelCheck {
    /// All checks in reporting order.
    pub const ALL: [Self; 5] = [
        Self::Gtin14,
        Self::Sku,
        Self::Product,
        Self::Quantity,
        Self::Expiry,
    ];

    /// Whether `record` passes this check, with `today` as the reference
    /// date for expiry.
    pub fn passes_on(self, record: &LabelRecord, today: NaiveDate) -> bool {
        match self {
            Self::Gtin14 => validate_gtin14(&record.gtin14),
            Self::Sku => validate_sku(&record.sku),
            Self::Product => validate_product(&record.product),
            Self::Quantity => validate_quantity(record.qty_per_box),
            Self::Expiry => validate_expiry_date_on(record.expiry.as_deref(), today),
        }
    }

    /// Short message attached to rejected rows of a batch.
    pub fn short_message(self) -> &'static str {
        match self {
            Self::Gtin14 => "GTIN-14 inválido",
            Self::Sku => "SKU inválido",
            Self::Product => "Produto inválido",
            Self::Quantity => "Quantidade inválida",
            Self::Expiry => "Data de validade inválida",
        }
    }

    /// Longer message shown next to a form field while editing.
    pub fn detail_message(self) -> &'static str {
        match self {
            Self::Gtin14 => "GTIN-14 deve conter 14 dígitos válidos",
            Self::Sku => "SKU deve ter pelo menos 3 caracteres",
            Self::Product => "Nome do produto deve ter pelo menos 2 caracteres",
            Self::Quantity => "Quantidade deve ser um número inteiro positivo",
            Self::Expiry => {
                "Data de validade deve ser válida e futura (YYYYMMDD, YYYY-MM-DD ou DD/MM/YYYY)"
            }
        }
    }

    /// Diagnostic code reported for a failure.
    pub fn code(self) -> &'static str {
        match self {
            Self::Gtin14 => codes::GTIN14_INVALID,
            Self::Sku => codes::SKU_INVALID,
            Self::Product => codes::PRODUCT_INVALID,
            Self::Quantity => codes::QUANTITY_INVALID,
            Self::Expiry => codes::EXPIRY_INVALID,
        }
    }

    /// Serialized name of the record field this check covers.
    pub fn field(self) -> &'static str {
        match self {
            Self::Gtin14 => "gtin14",
            Self::Sku => "sku",
            Self::Product => "product",
            Self::Quantity => "qtyPerBox",
            Self::Expiry => "expiry",
        }
    }

    fn value_of(self, record: &LabelRecord) -> String {
        match self {
            Self::Gtin14 => record.gtin14.clone(),
            Self::Sku => record.sku.clone(),
            Self::Product => record.product.clone(),
            Self::Quantity => record.qty_per_box.to_string(),
            Self::Expiry => record.expiry.clone().unwrap_or_default(),
        }
    }
}

/// Checks `record` fails, in reporting order.
pub fn failed_checks_on(record: &LabelRecord, today: NaiveDate) -> Vec<LabelCheck> {
    LabelCheck::ALL
        .into_iter()
        .filter(|check| !check.passes_on(record, today))
        .collect()
}

/// Outcome of validating a single record for live feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// `true` when every check passed.
    pub is_valid: bool,
    /// One detailed message per failing check, in reporting order.
    pub errors: Vec<String>,
}

/// Validate one record against a given "today".
pub fn validate_label_on(record: &LabelRecord, today: NaiveDate) -> ValidationResult {
    let errors: Vec<String> = failed_checks_on(record, today)
        .into_iter()
        .map(|c| c.detail_message().to_string())
        .collect();
    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Validate one record against the local calendar date.
pub fn validate_label(record: &LabelRecord) -> ValidationResult {
    validate_label_on(record, local_today())
}

/// Structured diagnostics for every failing check of `record`.
///
/// Each diagnostic carries `field` and `value` context; `span` locates the
/// record in its source, when it has one.
pub fn label_diagnostics_on(
    record: &LabelRecord,
    today: NaiveDate,
    span: Option<Span>,
) -> Vec<Diagnostic> {
    failed_checks_on(record, today)
        .into_iter()
        .map(|check| {
            Diagnostic::for_code(check.code(), check.detail_message(), span).with_context(ctx!(
                "field" => check.field(),
                "value" => check.value_of(record),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::dun_sample;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn sample_passes_every_check() {
        let r = validate_label_on(&dun_sample(), today());
        assert!(r.is_valid, "{:?}", r.errors);
        assert!(r.errors.is_empty());
    }

    #[test]
    fn detailed_messages_follow_check_order() {
        let mut rec = dun_sample();
        rec.sku = "A".into();
        rec.expiry = Some("2024-12-31".into());
        rec.gtin14 = "123".into();
        let r = validate_label_on(&rec, today());
        assert!(!r.is_valid);
        assert_eq!(
            r.errors,
            [
                LabelCheck::Gtin14.detail_message(),
                LabelCheck::Sku.detail_message(),
                LabelCheck::Expiry.detail_message(),
            ]
        );
    }

    #[test]
    fn same_inputs_same_result() {
        let rec = dun_sample();
        assert_eq!(validate_label_on(&rec, today()), validate_label_on(&rec, today()));
    }

    #[test]
    fn diagnostics_carry_code_field_and_value() {
        let mut rec = dun_sample();
        rec.qty_per_box = 0;
        let diags = label_diagnostics_on(&rec, today(), Some(Span::new(10, 20)));
        assert_eq!(diags.len(), 1);
        let d = &diags[0];
        assert_eq!(d.id, codes::QUANTITY_INVALID);
        assert!(d.is_error());
        assert_eq!(d.span, Some(Span::new(10, 20)));
        let ctx = d.context.as_ref().unwrap();
        assert_eq!(ctx["field"], "qtyPerBox");
        assert_eq!(ctx["value"], "0");
    }

    #[test]
    fn validation_result_serializes_is_valid() {
        let json = serde_json::to_value(validate_label_on(&dun_sample(), today())).unwrap();
        assert_eq!(json["isValid"], true);
    }
}
