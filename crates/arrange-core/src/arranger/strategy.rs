use super::shelf::ShelfOutcome;
use super::*;
use std::cmp::Ordering;

/// Candidate orderings tried for every sheet. Each is a total order over the
/// unit multiset; ties fall back to the expansion index so repeated runs
/// produce identical layouts.
#[derive(Debug, Clone, Copy)]
enum OrderingStrategy {
    HeightDesc,
    WidthDesc,
    AreaDesc,
    AreaAsc,
}

const STRATEGIES: [OrderingStrategy; 4] = [
    OrderingStrategy::HeightDesc,
    OrderingStrategy::WidthDesc,
    OrderingStrategy::AreaDesc,
    OrderingStrategy::AreaAsc,
];

impl OrderingStrategy {
    fn apply(self, units: &mut [Unit]) {
        units.sort_by(|a, b| {
            let key = match self {
                OrderingStrategy::HeightDesc => b
                    .height_mm
                    .partial_cmp(&a.height_mm)
                    .unwrap_or(Ordering::Equal),
                OrderingStrategy::WidthDesc => b
                    .width_mm
                    .partial_cmp(&a.width_mm)
                    .unwrap_or(Ordering::Equal),
                OrderingStrategy::AreaDesc => {
                    b.area().partial_cmp(&a.area()).unwrap_or(Ordering::Equal)
                }
                OrderingStrategy::AreaAsc => {
                    a.area().partial_cmp(&b.area()).unwrap_or(Ordering::Equal)
                }
            };
            key.then(a.order.cmp(&b.order))
        });
    }
}

impl Arranger {
    /// Packs one sheet by running the shelf packer under every candidate
    /// ordering and keeping the result that covers the most area.
    ///
    /// The first strategy evaluated wins ties, so the selection is stable.
    /// Rotation is not a strategy of its own: it is decided per unit inside
    /// the shelf packer, so every ordering already benefits from it.
    pub(crate) fn pack_sheet(&self, units: &[Unit], sheet_index: usize) -> ShelfOutcome {
        let mut ordered = units.to_vec();
        STRATEGIES[0].apply(&mut ordered);
        let mut best = self.pack_shelves(&ordered, sheet_index);

        for strategy in &STRATEGIES[1..] {
            let mut ordered = units.to_vec();
            strategy.apply(&mut ordered);
            let outcome = self.pack_shelves(&ordered, sheet_index);
            if outcome.used_area_mm2 > best.used_area_mm2 {
                best = outcome;
            }
        }

        // Leftovers come back in strategy order; restore the expansion order
        // expected by the next sheet attempt.
        best.leftover.sort_by_key(|unit| unit.order);
        best
    }
}
