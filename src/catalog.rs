//! Catalog of supported e-ink display panels.
//!
//! The catalog is a fixed table compiled into the binary. Entries do not
//! share a common set of optional attributes: a grayscale panel reports gray
//! levels and contrast, a color panel reports its color count and technology.
//! Absent attributes are omitted from the JSON output entirely.

use serde::Serialize;

/// Hardware descriptor for one supported display panel.
///
/// # Example
///
/// ```
/// use reflective_display::list_displays;
///
/// let carta = &list_displays()[0];
/// let json = serde_json::to_string(carta).unwrap();
///
/// assert!(json.contains("\"type\":\"E-Ink Carta 1200\""));
/// assert!(json.contains("\"grayLevels\":16"));
/// assert!(!json.contains("colors"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayDescriptor {
    /// Panel model name
    #[serde(rename = "type")]
    pub display_type: &'static str,

    /// Pixel density (e.g., "300ppi")
    pub resolution: &'static str,

    /// Maximum refresh rate (e.g., "15fps")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_rate: Option<&'static str>,

    /// Number of grayscale levels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gray_levels: Option<u32>,

    /// Contrast ratio (e.g., "15:1")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast_ratio: Option<&'static str>,

    /// Number of displayable colors (color panels only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<u32>,

    /// Color filter technology (color panels only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology: Option<&'static str>,
}

impl DisplayDescriptor {
    /// Whether the panel renders color rather than grayscale only.
    pub fn is_color(&self) -> bool {
        self.colors.is_some()
    }
}

static SUPPORTED_DISPLAYS: [DisplayDescriptor; 2] = [
    DisplayDescriptor {
        display_type: "E-Ink Carta 1200",
        resolution: "300ppi",
        refresh_rate: Some("15fps"),
        gray_levels: Some(16),
        contrast_ratio: Some("15:1"),
        colors: None,
        technology: None,
    },
    DisplayDescriptor {
        display_type: "E-Ink Kaleido Plus",
        resolution: "227ppi",
        refresh_rate: None,
        gray_levels: None,
        contrast_ratio: None,
        colors: Some(4096),
        technology: Some("Print-Color Technology"),
    },
];

/// List every supported display, in catalog order.
///
/// Always returns the same slice; there is no failure mode.
pub fn list_displays() -> &'static [DisplayDescriptor] {
    &SUPPORTED_DISPLAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_contents() {
        let displays = list_displays();
        assert_eq!(displays.len(), 2);

        assert_eq!(displays[0].display_type, "E-Ink Carta 1200");
        assert_eq!(displays[0].gray_levels, Some(16));
        assert!(!displays[0].is_color());

        assert_eq!(displays[1].display_type, "E-Ink Kaleido Plus");
        assert_eq!(displays[1].colors, Some(4096));
        assert!(displays[1].is_color());
    }

    #[test]
    fn test_catalog_is_stable() {
        assert_eq!(list_displays(), list_displays());
        assert!(std::ptr::eq(list_displays(), list_displays()));
    }

    #[test]
    fn test_catalog_serialization() {
        let json = serde_json::to_value(list_displays()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {
                    "type": "E-Ink Carta 1200",
                    "resolution": "300ppi",
                    "refreshRate": "15fps",
                    "grayLevels": 16,
                    "contrastRatio": "15:1"
                },
                {
                    "type": "E-Ink Kaleido Plus",
                    "resolution": "227ppi",
                    "colors": 4096,
                    "technology": "Print-Color Technology"
                }
            ])
        );
    }
}
