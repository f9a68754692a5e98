//! Persisted record shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dunkit_core::{LabelRecord, QrEntry};

/// Page orientation for a printed set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Tall page (default).
    #[default]
    Portrait,
    /// Wide page.
    Landscape,
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" | "retrato" => Ok(Self::Portrait),
            "landscape" | "paisagem" => Ok(Self::Landscape),
            other => Err(format!("unknown orientation '{other}'")),
        }
    }
}

/// A named, saved list of label records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLabelSet {
    /// Unique id (milliseconds since the epoch at save time).
    pub id: String,
    /// Display name.
    pub name: String,
    /// The labels, in import order.
    pub labels: Vec<LabelRecord>,
    /// Save time.
    pub created_at: DateTime<Utc>,
    /// Page orientation.
    #[serde(default)]
    pub orientation: Orientation,
}

/// A named, saved list of QR entries with its print settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQrSet {
    /// Unique id (milliseconds since the epoch at save time).
    pub id: String,
    /// Display name.
    pub name: String,
    /// The QR entries, in import order.
    pub qr_list: Vec<QrEntry>,
    /// Save time.
    pub created_at: DateTime<Utc>,
    /// Page orientation.
    #[serde(default)]
    pub orientation: Orientation,
    /// Print layout.
    #[serde(default)]
    pub settings: QrSettings,
}

/// Print layout for QR labels. Dimensions are millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrSettings {
    /// Foreground color, `#RRGGBB`.
    pub color: String,
    /// Background color, `#RRGGBB`.
    pub bg_color: String,
    /// Label width.
    pub width_mm: f64,
    /// Label height.
    pub height_mm: f64,
    /// QR side as a percentage of the smaller label dimension.
    pub qr_size_percent: u8,
    /// Caption font size in points.
    pub label_font_size: f64,
    /// Value font size in points.
    pub value_font_size: f64,
    /// Derive font sizes from the label height.
    pub auto_font: bool,
    /// Print the caption.
    pub show_labels: bool,
    /// Print the encoded value.
    pub show_values: bool,
    /// Paper format.
    pub paper_size: PaperSize,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            color: "#000000".into(),
            bg_color: "#FFFFFF".into(),
            width_mm: 60.0,
            height_mm: 40.0,
            qr_size_percent: 70,
            label_font_size: 10.0,
            value_font_size: 8.0,
            auto_font: false,
            show_labels: true,
            show_values: true,
            paper_size: PaperSize::default(),
        }
    }
}

/// Paper formats the QR sheet can be printed on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    /// One label per page, page sized to the label.
    #[default]
    #[serde(rename = "label")]
    Label,
    /// ISO A4 sheet.
    #[serde(rename = "A4")]
    A4,
    /// US Letter sheet.
    #[serde(rename = "letter")]
    Letter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_parses_both_languages() {
        assert_eq!("Landscape".parse::<Orientation>(), Ok(Orientation::Landscape));
        assert_eq!("retrato".parse::<Orientation>(), Ok(Orientation::Portrait));
        assert!("diagonal".parse::<Orientation>().is_err());
    }

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let s: QrSettings = serde_json::from_str(r#"{"widthMm": 50, "paperSize": "A4"}"#).unwrap();
        assert_eq!(s.width_mm, 50.0);
        assert_eq!(s.height_mm, 40.0);
        assert_eq!(s.paper_size, PaperSize::A4);
        assert!(s.show_labels);
    }

    #[test]
    fn saved_set_without_orientation_defaults_to_portrait() {
        let json = r#"{"id":"1","name":"a","labels":[],"createdAt":"2025-01-02T03:04:05.678Z"}"#;
        let set: SavedLabelSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.orientation, Orientation::Portrait);
    }
}
