//! CSV export and import templates.

use chrono::{Datelike, NaiveDate};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use dunkit_core::LabelRecord;
use dunkit_core::expiry::local_today;
use dunkit_core::sample::dun_sample;

use crate::aliases::Field;
use crate::error::ImportError;

/// Export labels as CSV: a plain header of canonical names, then one row
/// per label with every cell quoted.
///
/// The result re-imports with the default alias table.
pub fn export_labels_csv(labels: &[LabelRecord]) -> Result<String, ImportError> {
    let mut header = Field::ALL.map(Field::name).join(",");
    header.push('\n');

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(header.into_bytes());
    for label in labels {
        let qty = label.qty_per_box.to_string();
        writer.write_record([
            label.sku.as_str(),
            label.gtin14.as_str(),
            label.product.as_str(),
            qty.as_str(),
            label.box_size.as_str(),
            label.weight_kg.as_str(),
            label.lot.as_deref().unwrap_or_default(),
            label.expiry.as_deref().unwrap_or_default(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

/// An example label CSV with the sample record, ready to fill in.
///
/// The sample expires at the end of the year after next, so the template
/// always validates.
pub fn label_csv_template() -> Result<String, ImportError> {
    label_csv_template_on(local_today())
}

/// [`label_csv_template`] relative to `today`.
pub fn label_csv_template_on(today: NaiveDate) -> Result<String, ImportError> {
    let sample = LabelRecord {
        expiry: NaiveDate::from_ymd_opt(today.year() + 2, 12, 31)
            .map(|d| d.format("%Y-%m-%d").to_string()),
        ..dun_sample()
    };
    export_labels_csv(&[sample])
}

/// An example QR CSV.
pub fn qr_csv_template() -> &'static str {
    "label,value\n\
     \"Produto A\",\"7891234567890\"\n\
     \"Produto B\",\"https://example.com\"\n\
     \"Produto C\",\"https://wa.me/5547999999999\"\n"
}
