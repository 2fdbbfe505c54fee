use super::*;

impl Arranger {
    /// Computes utilization figures for a single packed sheet.
    pub(crate) fn sheet_statistics(&self, placements: &[PlacedUnit]) -> Statistics {
        let used: f64 = placements.iter().map(|p| p.width_mm * p.height_mm).sum();
        statistics(used, self.sheet().usable_area(), placements.len() as u32)
    }

    /// Computes the aggregate over every sheet of a finished arrangement.
    pub(crate) fn aggregate_statistics(&self, sheets: &[SheetLayout]) -> Statistics {
        let available = self.sheet().usable_area() * sheets.len() as f64;
        let used: f64 = sheets.iter().map(|s| s.statistics.used_area_mm2).sum();
        let count: u32 = sheets.iter().map(|s| s.placements.len() as u32).sum();
        statistics(used, available, count)
    }
}

fn statistics(used_area_mm2: f64, available_area_mm2: f64, item_count: u32) -> Statistics {
    let efficiency_percent = if available_area_mm2 > 0.0 {
        used_area_mm2 / available_area_mm2 * 100.0
    } else {
        0.0
    };
    let average_item_area_mm2 = if item_count > 0 {
        used_area_mm2 / item_count as f64
    } else {
        0.0
    };

    Statistics {
        used_area_mm2,
        available_area_mm2,
        efficiency_percent,
        item_count,
        waste_area_mm2: available_area_mm2 - used_area_mm2,
        average_item_area_mm2,
    }
}
