//! Reference label used by documentation, templates, and tests.

use crate::record::LabelRecord;

/// A complete, valid-checksum DUN-14 label.
pub fn dun_sample() -> LabelRecord {
    LabelRecord {
        sku: "D24-ALV26278".into(),
        gtin14: "27898971826272".into(),
        product: "Pasta de Dente Relax - Limão e Canela Vegano Alva 90g".into(),
        qty_per_box: 24,
        box_size: "32X25X16".into(),
        weight_kg: "3,095".into(),
        lot: Some("L2409-A".into()),
        expiry: Some("2026-03-31".into()),
    }
}
