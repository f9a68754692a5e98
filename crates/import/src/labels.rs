//! Label CSV import.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::{debug, warn};

use dunkit_core::expiry::local_today;
use dunkit_core::validate::label_diagnostics_on;
use dunkit_core::{LabelPartition, LabelRecord, validate_label_list_on};
use dunkit_diagnostics::{Diagnostic, codes};

use crate::aliases::{AliasTable, Field};
use crate::error::ImportError;
use crate::reader::{csv_reader, header_names, row_span};

/// Result of importing a label CSV.
#[derive(Debug, Clone, Default)]
pub struct LabelImport {
    /// Records split into valid and invalid labels, in file order.
    pub partition: LabelPartition,
    /// Number of data rows read (unreadable rows excluded).
    pub rows: usize,
    /// Column, row, and field problems, in file order.
    pub diagnostics: Vec<Diagnostic>,
}

impl LabelImport {
    /// Whether any error-level diagnostic was produced.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Column index for each field alias, resolved once per file.
struct ColumnMap {
    columns: BTreeMap<Field, Vec<usize>>,
}

impl ColumnMap {
    fn resolve(headers: &[String], aliases: &AliasTable) -> Self {
        let columns = Field::ALL
            .into_iter()
            .map(|field| {
                let idx = aliases
                    .aliases_for(field)
                    .iter()
                    .filter_map(|alias| headers.iter().position(|h| h == alias))
                    .collect();
                (field, idx)
            })
            .collect();
        Self { columns }
    }

    fn has(&self, field: Field) -> bool {
        self.columns.get(&field).is_some_and(|c| !c.is_empty())
    }

    /// First non-empty trimmed value among the field's aliased columns.
    fn value<'r>(&self, row: &'r StringRecord, field: Field) -> Option<&'r str> {
        self.columns
            .get(&field)?
            .iter()
            .filter_map(|&i| row.get(i))
            .map(str::trim)
            .find(|v| !v.is_empty())
    }

    fn text(&self, row: &StringRecord, field: Field) -> String {
        self.value(row, field).unwrap_or_default().to_string()
    }

    fn record(&self, row: &StringRecord) -> LabelRecord {
        LabelRecord {
            sku: self.text(row, Field::Sku),
            gtin14: self.text(row, Field::Gtin14),
            product: self.text(row, Field::Product),
            qty_per_box: parse_quantity(self.value(row, Field::QtyPerBox).unwrap_or_default()),
            box_size: self.text(row, Field::BoxSize),
            weight_kg: self.text(row, Field::WeightKg),
            lot: self.value(row, Field::Lot).map(str::to_string),
            expiry: self.value(row, Field::Expiry).map(str::to_string),
        }
        .with_normalized_expiry()
        .with_normalized_gtin()
    }
}

/// Parse a quantity cell.
///
/// A decimal comma is accepted (`"24,0"`). Empty or non-numeric cells read
/// as `0`, and so do fractional or out-of-range numbers: none of them is a
/// usable quantity and `0` fails validation.
pub fn parse_quantity(cell: &str) -> i64 {
    let cell = cell.trim();
    if cell.is_empty() {
        return 0;
    }
    let Ok(n) = cell.replacen(',', ".", 1).parse::<f64>() else {
        return 0;
    };
    if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        n as i64
    } else {
        0
    }
}

/// Import labels from CSV text, judging expiry against `today`.
///
/// Every readable data row becomes a [`LabelRecord`]: headers are matched
/// through `aliases`, values are trimmed, absent lot/expiry become `None`,
/// and expiries in any accepted shape are rewritten as `YYYY-MM-DD`. The
/// records are then partitioned with
/// [`validate_label_list_on`](dunkit_core::validate_label_list_on).
pub fn import_labels_on(
    input: &str,
    aliases: &AliasTable,
    today: NaiveDate,
) -> Result<LabelImport, ImportError> {
    let mut reader = csv_reader(input);
    let headers = header_names(&mut reader)?;
    let map = ColumnMap::resolve(&headers, aliases);

    let mut diagnostics = Vec::new();
    for field in Field::REQUIRED {
        if !map.has(field) {
            warn!(field = field.name(), "no CSV column matches any alias");
            diagnostics.push(
                Diagnostic::for_code(
                    codes::CSV_MISSING_COLUMN,
                    format!("no column found for {field}"),
                    None,
                )
                .with_context(BTreeMap::from([
                    ("field".into(), field.name().into()),
                    ("aliases".into(), aliases.aliases_for(field).join(", ")),
                ])),
            );
        }
    }

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row_no = idx + 1;
        match result {
            Ok(row) => {
                let span = row.position().map(|p| row_span(input, p.byte() as usize));
                let record = map.record(&row);
                for mut d in label_diagnostics_on(&record, today, span) {
                    d.context
                        .get_or_insert_with(BTreeMap::new)
                        .insert("row".into(), row_no.to_string());
                    diagnostics.push(d);
                }
                records.push(record);
            }
            Err(err) => {
                let span = err
                    .position()
                    .map(|p| row_span(input, p.byte() as usize));
                warn!(row = row_no, error = %err, "skipping unreadable CSV row");
                diagnostics.push(
                    Diagnostic::for_code(codes::CSV_ROW_UNREADABLE, err.to_string(), span)
                        .with_context(BTreeMap::from([("row".into(), row_no.to_string())])),
                );
            }
        }
    }

    let rows = records.len();
    let partition = validate_label_list_on(records, today);
    debug!(
        rows,
        valid = partition.valid_labels.len(),
        invalid = partition.invalid_labels.len(),
        "imported label CSV"
    );
    Ok(LabelImport {
        partition,
        rows,
        diagnostics,
    })
}

/// Import labels from CSV text against the local calendar date.
pub fn import_labels_from_str(input: &str, aliases: &AliasTable) -> Result<LabelImport, ImportError> {
    import_labels_on(input, aliases, local_today())
}

/// Read a CSV file and import its labels.
pub fn import_labels_from_path(
    path: impl AsRef<Path>,
    aliases: &AliasTable,
) -> Result<LabelImport, ImportError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading label CSV");
    let input = fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    import_labels_from_str(&input, aliases)
}
