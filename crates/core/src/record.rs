//! Label and QR entry records.

use serde::{Deserialize, Serialize};

use crate::expiry::normalize_expiry;
use crate::gs1::{Gs1Input, Gs1Strings, build_gs1_strings};
use crate::gtin::normalize_gtin14;

/// One DUN-14 shipping label.
///
/// Field names serialize in camelCase (`qtyPerBox`, `boxSize`, `weightKg`)
/// so saved label sets keep a stable JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRecord {
    /// Internal stock keeping unit.
    pub sku: String,
    /// 14-digit GTIN, GS1 AI (01).
    pub gtin14: String,
    /// Product description printed on the label.
    pub product: String,
    /// Units per shipping box.
    pub qty_per_box: i64,
    /// Box dimensions, free text (e.g. `32X25X16`).
    #[serde(default)]
    pub box_size: String,
    /// Gross weight as written, e.g. `3,095`. Never parsed, so decimal
    /// commas survive.
    #[serde(default)]
    pub weight_kg: String,
    /// Batch/lot, GS1 AI (10).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot: Option<String>,
    /// Expiry in one of the accepted textual shapes, GS1 AI (17).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
}

impl LabelRecord {
    /// A copy of this record with its expiry rewritten as `YYYY-MM-DD`.
    ///
    /// Expiries that do not parse are kept verbatim so validation still
    /// reports them.
    #[must_use]
    pub fn with_normalized_expiry(&self) -> Self {
        let expiry = self
            .expiry
            .as_deref()
            .map(|e| normalize_expiry(e).unwrap_or_else(|| e.to_string()));
        Self {
            expiry,
            ..self.clone()
        }
    }

    /// A copy of this record with a valid GTIN-14 reduced to its 14 digits.
    ///
    /// A GTIN that does not validate is kept verbatim.
    #[must_use]
    pub fn with_normalized_gtin(&self) -> Self {
        Self {
            gtin14: normalize_gtin14(&self.gtin14).unwrap_or_else(|| self.gtin14.clone()),
            ..self.clone()
        }
    }

    /// GS1 strings for this label.
    pub fn gs1_strings(&self) -> Gs1Strings {
        build_gs1_strings(&Gs1Input::from(self))
    }
}

/// One QR code to print, with an optional caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrEntry {
    /// Caption printed above the code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Encoded payload (URL, GTIN, free text).
    pub value: String,
}

impl QrEntry {
    /// Build an entry; an empty or whitespace-only caption becomes `None`.
    pub fn new(label: Option<&str>, value: impl Into<String>) -> Self {
        Self {
            label: label
                .filter(|l| !l.trim().is_empty())
                .map(str::to_string),
            value: value.into(),
        }
    }
}
