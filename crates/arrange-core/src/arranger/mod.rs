use crate::types::*;

mod shelf;
mod stats;
mod strategy;
#[cfg(test)]
mod tests;

/// One copy of a design item, expanded for placement.
#[derive(Debug, Clone)]
pub(crate) struct Unit {
    pub item_id: String,
    pub copy_index: u32,
    pub width_mm: f64,
    pub height_mm: f64,
    pub rotation_allowed: bool,
    /// Position in the expanded catalog, used as a deterministic tie-break.
    pub order: usize,
}

impl Unit {
    pub fn area(&self) -> f64 {
        self.width_mm * self.height_mm
    }
}

/// `true` when a `w` x `h` rectangle fits the given available space.
pub(crate) fn fits(w: f64, h: f64, avail_w: f64, avail_h: f64) -> bool {
    w <= avail_w && h <= avail_h
}

/// Packs design items onto sheets using a shelf heuristic evaluated under
/// several candidate orderings.
pub struct Arranger {
    request: ArrangementRequest,
}

impl Arranger {
    /// Validates the request and builds a new arranger instance.
    pub fn new(request: ArrangementRequest) -> Result<Self> {
        if request.items.is_empty() {
            return Err(ArrangeError::InvalidInput(
                "At least one design item must be provided".to_string(),
            ));
        }

        for item in &request.items {
            if item.width_mm <= 0.0 || item.height_mm <= 0.0 {
                return Err(ArrangeError::InvalidInput(format!(
                    "Design '{}' has non-positive dimensions",
                    item.id
                )));
            }
            if item.copies == 0 {
                return Err(ArrangeError::InvalidInput(format!(
                    "Design '{}' requests zero copies",
                    item.id
                )));
            }
        }

        let sheet = &request.sheet;
        if sheet.margin_mm < 0.0 || sheet.spacing_x_mm < 0.0 || sheet.spacing_y_mm < 0.0 {
            return Err(ArrangeError::InvalidInput(
                "Margin and spacing must not be negative".to_string(),
            ));
        }
        if sheet.usable_width() <= 0.0 || sheet.usable_height() <= 0.0 {
            return Err(ArrangeError::InvalidInput(
                "Margins leave no usable area on the sheet".to_string(),
            ));
        }

        Ok(Self { request })
    }

    /// Arranges every copy of every design, allocating sheets as needed.
    ///
    /// Copies that fit no sheet are reported in `unplaced`; the call itself
    /// always returns a best-effort result.
    pub fn arrange(&self) -> ArrangementResult {
        let (mut pending, mut unplaced) = self.expand_units();
        let mut sheets: Vec<SheetLayout> = Vec::new();

        while !pending.is_empty() {
            let sheet_index = sheets.len();
            let outcome = self.pack_sheet(&pending, sheet_index);

            if outcome.placements.is_empty() {
                // Nothing fit this sheet, so nothing will fit the next one
                // either. Stop instead of allocating empty sheets forever.
                unplaced.extend(outcome.leftover.into_iter().map(|unit| UnplacedUnit {
                    item_id: unit.item_id,
                    copy_index: unit.copy_index,
                    reason: UnplacedReason::NoProgress,
                }));
                break;
            }

            pending = outcome.leftover;
            let statistics = self.sheet_statistics(&outcome.placements);
            sheets.push(SheetLayout {
                sheet_index,
                placements: outcome.placements,
                statistics,
            });
        }

        let statistics = self.aggregate_statistics(&sheets);
        ArrangementResult {
            sheet_spec: self.request.sheet,
            sheets,
            unplaced,
            statistics,
        }
    }

    /// Expands the catalog into one unit per copy, ordered by priority and
    /// then declaration order. Copies that cannot fit the usable area in any
    /// permitted orientation are rejected up front.
    fn expand_units(&self) -> (Vec<Unit>, Vec<UnplacedUnit>) {
        let sheet = &self.request.sheet;
        let usable_w = sheet.usable_width();
        let usable_h = sheet.usable_height();

        let mut catalog: Vec<&DesignItem> = self.request.items.iter().collect();
        catalog.sort_by_key(|item| item.priority);

        let mut units = Vec::new();
        let mut unplaced = Vec::new();

        for item in catalog {
            let placeable = fits(item.width_mm, item.height_mm, usable_w, usable_h)
                || (item.rotation_allowed
                    && fits(item.height_mm, item.width_mm, usable_w, usable_h));

            for copy_index in 1..=item.copies {
                if !placeable {
                    unplaced.push(UnplacedUnit {
                        item_id: item.id.clone(),
                        copy_index,
                        reason: UnplacedReason::ExceedsUsableArea,
                    });
                    continue;
                }
                units.push(Unit {
                    item_id: item.id.clone(),
                    copy_index,
                    width_mm: item.width_mm,
                    height_mm: item.height_mm,
                    rotation_allowed: item.rotation_allowed,
                    order: units.len(),
                });
            }
        }

        (units, unplaced)
    }

    pub(crate) fn sheet(&self) -> &SheetSpec {
        &self.request.sheet
    }
}
