//! Detail view of one selected tree.
//!
//! # Responsibility
//! - Project a `TreeRecord` plus its `QrTarget` into display-ready fields.
//! - Recover silently from QR image load failure with an embedded placeholder.
//!
//! # Invariants
//! - Rendering never fails; unparseable dates fall back to the raw string.
//! - The maintenance section is omitted when notes are absent or blank.

use crate::model::tree::TreeRecord;
use crate::search::filter::pluralize;
use crate::service::qr::QrTarget;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::debug;
use once_cell::sync::Lazy;
use std::fmt::Write as _;

const DISPLAY_DATE_FORMAT: &str = "%-m/%-d/%Y";

const FALLBACK_QR_SVG: &str = r##"<svg width="128" height="128" viewBox="0 0 128 128" fill="none" xmlns="http://www.w3.org/2000/svg">
<rect width="128" height="128" fill="#F0F9F0"/>
<rect x="16" y="16" width="96" height="96" stroke="#2D5A2D" stroke-width="2" fill="none"/>
<text x="64" y="70" text-anchor="middle" fill="#2D5A2D" font-family="Arial" font-size="12">QR Code</text>
</svg>"##;

static FALLBACK_QR_DATA_URI: Lazy<String> = Lazy::new(|| {
    format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(FALLBACK_QR_SVG.as_bytes())
    )
});

/// Embedded placeholder shown when the QR renderer is unreachable.
pub fn fallback_qr_data_uri() -> &'static str {
    FALLBACK_QR_DATA_URI.as_str()
}

/// QR image slot with placeholder fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    src: String,
    alt: String,
    fell_back: bool,
}

impl QrImage {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            fell_back: false,
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn alt(&self) -> &str {
        &self.alt
    }

    pub fn is_placeholder(&self) -> bool {
        self.fell_back
    }

    /// Swaps in the embedded placeholder. Repeated calls are no-ops.
    pub fn on_load_error(&mut self) {
        if self.fell_back {
            return;
        }
        debug!("event=qr_image module=view status=fallback");
        self.src = fallback_qr_data_uri().to_string();
        self.fell_back = true;
    }
}

/// Display-ready projection of one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeDetail {
    pub id: String,
    pub common_name: String,
    pub scientific_name: String,
    pub description: String,
    pub location: String,
    pub planted_date: String,
    pub height: String,
    pub age_label: String,
    pub carbon_offset: String,
    pub benefits: Vec<String>,
    pub qr_link_label: String,
    pub qr_image: QrImage,
    pub maintenance_notes: Option<String>,
}

impl TreeDetail {
    pub fn from_record(record: &TreeRecord, qr: &QrTarget) -> Self {
        let planted_date = record
            .planted_on()
            .map(|date| date.format(DISPLAY_DATE_FORMAT).to_string())
            .unwrap_or_else(|_| record.planted_date.clone());

        Self {
            id: record.id.to_string(),
            common_name: record.common_name.clone(),
            scientific_name: record.scientific_name.clone(),
            description: record.description.clone(),
            location: record.location.clone(),
            planted_date,
            height: record.height.clone(),
            age_label: age_label(record.age),
            carbon_offset: record.carbon_offset.clone(),
            benefits: record.benefits.clone(),
            qr_link_label: qr.display_link().to_string(),
            qr_image: QrImage::new(
                qr.image_url.clone(),
                format!("QR code for {}", record.common_name),
            ),
            maintenance_notes: record.maintenance_notes().map(str::to_string),
        }
    }

    /// Terminal rendering of all sections.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} ({})", self.common_name, self.scientific_name);
        let _ = writeln!(out, "ID: {}", self.id);
        let _ = writeln!(out, "\nAbout This Tree\n  {}", self.description);
        let _ = writeln!(out, "\nTree Information");
        let _ = writeln!(out, "  Location:       {}", self.location);
        let _ = writeln!(out, "  Planted Date:   {}", self.planted_date);
        let _ = writeln!(out, "  Current Height: {}", self.height);
        let _ = writeln!(out, "  Age:            {}", self.age_label);
        let _ = writeln!(out, "\nEnvironmental Impact");
        let _ = writeln!(out, "  Carbon Offset:  {}", self.carbon_offset);
        let _ = writeln!(out, "  Benefits:       {}", self.benefits.join(", "));
        let _ = writeln!(out, "\nTree QR Code");
        let _ = writeln!(out, "  QR Code links to: {}", self.qr_link_label);
        let _ = writeln!(out, "  Image: {}", self.qr_image.src());
        if let Some(notes) = &self.maintenance_notes {
            let _ = writeln!(out, "\nMaintenance Notes\n  {notes}");
        }
        out
    }
}

fn age_label(age: u32) -> String {
    format!("{age} {}", pluralize(age as usize, "year", "years"))
}

#[cfg(test)]
mod tests {
    use super::{age_label, fallback_qr_data_uri, QrImage};

    #[test]
    fn age_label_pluralizes() {
        assert_eq!(age_label(0), "0 years");
        assert_eq!(age_label(1), "1 year");
        assert_eq!(age_label(12), "12 years");
    }

    #[test]
    fn load_error_swaps_to_placeholder_once() {
        let mut image = QrImage::new("https://qr.example/broken", "QR code for Oak Tree");
        image.on_load_error();
        image.on_load_error();
        assert!(image.is_placeholder());
        assert_eq!(image.src(), fallback_qr_data_uri());
        assert_eq!(image.alt(), "QR code for Oak Tree");
    }

    #[test]
    fn placeholder_is_base64_svg() {
        assert!(fallback_qr_data_uri().starts_with("data:image/svg+xml;base64,PHN2Zy"));
    }
}
