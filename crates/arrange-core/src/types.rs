use serde::{Deserialize, Serialize};

/// A logical design to be printed, with its physical size and copy count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignItem {
    pub id: String,
    pub width_mm: f64,
    pub height_mm: f64,
    #[serde(default = "default_copies")]
    pub copies: u32,
    /// Ordering hint: lower values are expanded first. Never a hard constraint.
    #[serde(default)]
    pub priority: i32,
    /// Whether the engine may rotate this design by 90 degrees.
    #[serde(default = "default_rotation")]
    pub rotation_allowed: bool,
}

fn default_copies() -> u32 {
    1
}

fn default_rotation() -> bool {
    true
}

impl DesignItem {
    /// Builds an item from the dimensions reported by the analysis service.
    pub fn from_analysis(id: impl Into<String>, analysis: &DesignAnalysis, copies: u32) -> Self {
        Self {
            id: id.into(),
            width_mm: analysis.width_mm,
            height_mm: analysis.height_mm,
            copies,
            priority: 0,
            rotation_allowed: true,
        }
    }
}

/// Physical dimensions of an uploaded design, as reported by the external
/// file analysis service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DesignAnalysis {
    pub width_mm: f64,
    pub height_mm: f64,
    /// How certain the analyzer is about the reported size, 0.0 to 1.0.
    pub confidence: f64,
}

/// Analyses below this confidence should be confirmed by the customer
/// before printing.
pub const RELIABLE_CONFIDENCE: f64 = 0.7;

impl DesignAnalysis {
    pub fn is_reliable(&self) -> bool {
        self.confidence >= RELIABLE_CONFIDENCE
    }
}

/// Standard page sizes, in portrait orientation millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    A3,
    A4,
    A5,
    Letter,
}

impl PageSize {
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PageSize::A3 => (297.0, 420.0),
            PageSize::A4 => (210.0, 297.0),
            PageSize::A5 => (148.0, 210.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// The fixed physical canvas designs are packed onto.
///
/// Orientation is already resolved: `sheet_width_mm`/`sheet_height_mm` are
/// the final outer dimensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SheetSpec {
    pub sheet_width_mm: f64,
    pub sheet_height_mm: f64,
    /// Uniform border kept empty on all four sides.
    #[serde(default)]
    pub margin_mm: f64,
    /// Minimum horizontal gap between adjacent placements.
    #[serde(default)]
    pub spacing_x_mm: f64,
    /// Minimum vertical gap between adjacent placements.
    #[serde(default)]
    pub spacing_y_mm: f64,
}

impl SheetSpec {
    /// Builds a spec for a standard page size, applying the orientation swap.
    pub fn for_page(
        size: PageSize,
        orientation: Orientation,
        margin_mm: f64,
        spacing_x_mm: f64,
        spacing_y_mm: f64,
    ) -> Self {
        let (mut width, mut height) = size.dimensions_mm();
        if orientation == Orientation::Landscape {
            std::mem::swap(&mut width, &mut height);
        }
        Self {
            sheet_width_mm: width,
            sheet_height_mm: height,
            margin_mm,
            spacing_x_mm,
            spacing_y_mm,
        }
    }

    pub fn usable_width(&self) -> f64 {
        self.sheet_width_mm - 2.0 * self.margin_mm
    }

    pub fn usable_height(&self) -> f64 {
        self.sheet_height_mm - 2.0 * self.margin_mm
    }

    pub fn usable_area(&self) -> f64 {
        self.usable_width() * self.usable_height()
    }
}

/// Input: the design catalog and the sheet to arrange it on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrangementRequest {
    pub items: Vec<DesignItem>,
    pub sheet: SheetSpec,
}

/// One physical placement of one copy of one design.
///
/// Coordinates are offsets from the top-left corner of the usable area;
/// the renderer adds the sheet margin when stamping content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedUnit {
    pub item_id: String,
    /// 1-based index of this copy within its item.
    pub copy_index: u32,
    pub x_mm: f64,
    pub y_mm: f64,
    /// As-placed width; swapped with height when rotated.
    pub width_mm: f64,
    pub height_mm: f64,
    pub rotated: bool,
    pub sheet_index: usize,
}

/// A single packed sheet and its utilization figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetLayout {
    pub sheet_index: usize,
    pub placements: Vec<PlacedUnit>,
    pub statistics: Statistics,
}

/// Why a copy could not be placed on any sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnplacedReason {
    /// The design exceeds the usable sheet area in every permitted orientation.
    ExceedsUsableArea,
    /// A sheet iteration placed nothing although copies remained.
    NoProgress,
}

impl std::fmt::Display for UnplacedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnplacedReason::ExceedsUsableArea => write!(f, "exceeds-usable-area"),
            UnplacedReason::NoProgress => write!(f, "no-progress"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnplacedUnit {
    pub item_id: String,
    pub copy_index: u32,
    pub reason: UnplacedReason,
}

/// Utilization figures for one sheet or for the whole arrangement.
///
/// The denominator is always the usable (post-margin) area. Zero-division
/// cases yield 0 rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statistics {
    pub used_area_mm2: f64,
    pub available_area_mm2: f64,
    pub efficiency_percent: f64,
    pub item_count: u32,
    pub waste_area_mm2: f64,
    pub average_item_area_mm2: f64,
}

/// Output: placements per sheet, copies that did not fit, and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrangementResult {
    /// The resolved sheet spec the arrangement was computed against.
    pub sheet_spec: SheetSpec,
    pub sheets: Vec<SheetLayout>,
    /// Copies that could not be placed. Always reported, never dropped.
    pub unplaced: Vec<UnplacedUnit>,
    /// Aggregate over all sheets.
    pub statistics: Statistics,
}

/// Error type for arrangement requests.
#[derive(Debug, thiserror::Error)]
pub enum ArrangeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ArrangeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_swaps_page_dimensions() {
        let spec = SheetSpec::for_page(PageSize::A4, Orientation::Landscape, 5.0, 2.0, 2.0);
        assert_eq!(spec.sheet_width_mm, 297.0);
        assert_eq!(spec.sheet_height_mm, 210.0);
        assert_eq!(spec.usable_width(), 287.0);
        assert_eq!(spec.usable_height(), 200.0);
    }

    #[test]
    fn low_confidence_analysis_is_flagged() {
        let analysis = DesignAnalysis {
            width_mm: 90.0,
            height_mm: 50.0,
            confidence: 0.5,
        };
        assert!(!analysis.is_reliable());

        let item = DesignItem::from_analysis("card", &analysis, 4);
        assert_eq!(item.width_mm, 90.0);
        assert_eq!(item.copies, 4);
        assert!(item.rotation_allowed);
    }

    #[test]
    fn unplaced_reasons_serialize_kebab_case() {
        let json = serde_json::to_string(&UnplacedReason::ExceedsUsableArea).unwrap();
        assert_eq!(json, "\"exceeds-usable-area\"");
        let json = serde_json::to_string(&UnplacedReason::NoProgress).unwrap();
        assert_eq!(json, "\"no-progress\"");
    }
}
