use super::*;

/// Result of packing one ordered unit sequence onto a single sheet.
#[derive(Debug)]
pub(crate) struct ShelfOutcome {
    pub placements: Vec<PlacedUnit>,
    /// Units that did not fit this sheet, for the next sheet attempt.
    pub leftover: Vec<Unit>,
    pub used_area_mm2: f64,
}

impl Arranger {
    /// Packs units in the given order onto one sheet using left-to-right,
    /// top-to-bottom shelf rows.
    ///
    /// Single pass, no backtracking: packing quality comes from evaluating
    /// several input orderings, not from per-item search. Rotation is decided
    /// per unit against the remaining row and sheet space.
    pub(crate) fn pack_shelves(&self, units: &[Unit], sheet_index: usize) -> ShelfOutcome {
        let sheet = self.sheet();
        let usable_w = sheet.usable_width();
        let usable_h = sheet.usable_height();

        let mut placements = Vec::new();
        let mut leftover = Vec::new();
        let mut used_area_mm2 = 0.0;

        let mut cursor_x = 0.0_f64;
        let mut cursor_y = 0.0_f64;
        let mut row_height = 0.0_f64;

        for unit in units {
            let (mut w, mut h, mut rotated) =
                orient(unit, usable_w - cursor_x, usable_h - cursor_y, row_height);

            if cursor_x + w > usable_w && cursor_x > 0.0 {
                // Close the row and re-decide the orientation, since the
                // first decision was made against the old row remainder.
                cursor_x = 0.0;
                cursor_y += row_height + sheet.spacing_y_mm;
                row_height = 0.0;
                (w, h, rotated) = orient(unit, usable_w, usable_h - cursor_y, row_height);
            }

            if cursor_x + w > usable_w || cursor_y + h > usable_h {
                // Does not fit this sheet in the chosen orientation; keep it
                // for the next sheet and carry on with the remaining units.
                leftover.push(unit.clone());
                continue;
            }

            debug_assert!(
                cursor_x >= 0.0 && cursor_y >= 0.0 && cursor_x + w <= usable_w && cursor_y + h <= usable_h,
                "placement escaped the usable area"
            );

            placements.push(PlacedUnit {
                item_id: unit.item_id.clone(),
                copy_index: unit.copy_index,
                x_mm: cursor_x,
                y_mm: cursor_y,
                width_mm: w,
                height_mm: h,
                rotated,
                sheet_index,
            });

            used_area_mm2 += w * h;
            cursor_x += w + sheet.spacing_x_mm;
            row_height = row_height.max(h);
        }

        ShelfOutcome {
            placements,
            leftover,
            used_area_mm2,
        }
    }
}

/// Decides the as-placed orientation of a unit against the remaining row
/// width and sheet height.
///
/// Rotation is only considered for landscape units that may rotate. When
/// both orientations fit, the one whose height is closer to the current row
/// height wins, so the row wastes less vertical space. When neither fits,
/// the declared orientation is kept and the caller handles the overflow.
fn orient(unit: &Unit, remaining_w: f64, remaining_h: f64, row_height: f64) -> (f64, f64, bool) {
    let (w, h) = (unit.width_mm, unit.height_mm);
    if !unit.rotation_allowed || w <= h {
        return (w, h, false);
    }

    let declared_fits = fits(w, h, remaining_w, remaining_h);
    let rotated_fits = fits(h, w, remaining_w, remaining_h);

    match (declared_fits, rotated_fits) {
        (true, false) | (false, false) => (w, h, false),
        (false, true) => (h, w, true),
        (true, true) => {
            // Rotated height is the declared width.
            if (h - row_height).abs() <= (w - row_height).abs() {
                (w, h, false)
            } else {
                (h, w, true)
            }
        }
    }
}
