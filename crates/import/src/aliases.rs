//! CSV header aliases for the canonical label fields.
//!
//! Spreadsheets exported from different systems spell the same column in
//! many ways (`gtin14`, `GTIN-14`, `quantidade`, `QUANTIDADE POR CAIXA`…).
//! Each canonical [`Field`] owns an ordered alias list; when reading a row,
//! the first alias whose column holds a non-empty value wins.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or validating an alias table.
#[derive(Debug, Error)]
pub enum AliasError {
    /// JSON deserialization failed.
    #[error("invalid alias JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field's alias list is unusable.
    #[error("invalid aliases for {field}: {reason}")]
    InvalidField {
        /// The canonical field whose aliases failed validation.
        field: Field,
        /// A human-readable explanation.
        reason: String,
    },
}

/// Canonical label fields, named as they serialize on a `LabelRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Stock keeping unit.
    Sku,
    /// GTIN-14.
    Gtin14,
    /// Product description.
    Product,
    /// Units per box.
    QtyPerBox,
    /// Box dimensions.
    BoxSize,
    /// Weight as written.
    WeightKg,
    /// Batch/lot.
    Lot,
    /// Expiry date.
    Expiry,
}

impl Field {
    /// Every field, in record order.
    pub const ALL: [Self; 8] = [
        Self::Sku,
        Self::Gtin14,
        Self::Product,
        Self::QtyPerBox,
        Self::BoxSize,
        Self::WeightKg,
        Self::Lot,
        Self::Expiry,
    ];

    /// Fields every label needs; a file lacking any of these columns is
    /// reported.
    pub const REQUIRED: [Self; 4] = [Self::Sku, Self::Gtin14, Self::Product, Self::QtyPerBox];

    /// The serialized field name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sku => "sku",
            Self::Gtin14 => "gtin14",
            Self::Product => "product",
            Self::QtyPerBox => "qtyPerBox",
            Self::BoxSize => "boxSize",
            Self::WeightKg => "weightKg",
            Self::Lot => "lot",
            Self::Expiry => "expiry",
        }
    }

    fn default_aliases(self) -> &'static [&'static str] {
        match self {
            Self::Sku => &["sku", "SKU"],
            Self::Gtin14 => &["gtin14", "GTIN14", "GTIN-14"],
            Self::Product => &["product", "produto", "Produto"],
            Self::QtyPerBox => &[
                "qtyPerBox",
                "qtdPerBox",
                "qtd_caixa",
                "qtd",
                "QUANTIDADE POR CAIXA",
                "quantidade",
                "Quantidade",
            ],
            Self::BoxSize => &["boxSize", "tamCaixa", "tam_caixa", "TAMANHO CAIXA"],
            Self::WeightKg => &["weightKg", "pesoKg", "PESO KG"],
            Self::Lot => &["lot", "Lote", "lote"],
            Self::Expiry => &["expiry", "validade", "Validade"],
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered header aliases per canonical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasTable {
    aliases: BTreeMap<Field, Vec<String>>,
}

impl Default for AliasTable {
    fn default() -> Self {
        let aliases = Field::ALL
            .into_iter()
            .map(|f| {
                let list = f.default_aliases().iter().map(|a| a.to_string()).collect();
                (f, list)
            })
            .collect();
        Self { aliases }
    }
}

impl AliasTable {
    /// Aliases for `field`, highest priority first.
    pub fn aliases_for(&self, field: Field) -> &[String] {
        self.aliases.get(&field).map_or(&[], Vec::as_slice)
    }

    /// Replace the alias list of one field.
    pub fn set(&mut self, field: Field, aliases: Vec<String>) {
        self.aliases.insert(field, aliases);
    }

    /// Check the table's invariants: every field has at least one
    /// non-empty alias and no alias belongs to two fields.
    pub fn validate(&self) -> Result<(), AliasError> {
        let mut owner: HashMap<&str, Field> = HashMap::new();
        for field in Field::ALL {
            let list = self.aliases_for(field);
            if list.is_empty() {
                return Err(AliasError::InvalidField {
                    field,
                    reason: "must list at least one alias".into(),
                });
            }
            for alias in list {
                let alias = alias.trim();
                if alias.is_empty() {
                    return Err(AliasError::InvalidField {
                        field,
                        reason: "aliases must not be empty".into(),
                    });
                }
                if let Some(other) = owner.insert(alias, field)
                    && other != field
                {
                    return Err(AliasError::InvalidField {
                        field,
                        reason: format!("alias '{alias}' is already used by {other}"),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Load an alias table from JSON and validate it.
///
/// The JSON object maps field names to alias lists. Fields it omits keep
/// their built-in aliases:
///
/// ```
/// let table = dunkit_import::load_aliases_from_str(r#"{ "gtin14": ["EAN14", "gtin14"] }"#)
///     .unwrap();
/// assert_eq!(table.aliases_for(dunkit_import::Field::Gtin14)[0], "EAN14");
/// assert_eq!(table.aliases_for(dunkit_import::Field::Sku)[0], "sku");
/// ```
pub fn load_aliases_from_str(s: &str) -> Result<AliasTable, AliasError> {
    let overrides: BTreeMap<Field, Vec<String>> = serde_json::from_str(s)?;
    let mut table = AliasTable::default();
    for (field, aliases) in overrides {
        table.set(
            field,
            aliases.into_iter().map(|a| a.trim().to_string()).collect(),
        );
    }
    table.validate()?;
    Ok(table)
}
