use super::*;

fn item(id: &str, width: f64, height: f64, copies: u32, rotation_allowed: bool) -> DesignItem {
    DesignItem {
        id: id.to_string(),
        width_mm: width,
        height_mm: height,
        copies,
        priority: 0,
        rotation_allowed,
    }
}

fn sheet(width: f64, height: f64, margin: f64, spacing: f64) -> SheetSpec {
    SheetSpec {
        sheet_width_mm: width,
        sheet_height_mm: height,
        margin_mm: margin,
        spacing_x_mm: spacing,
        spacing_y_mm: spacing,
    }
}

fn arrange(items: Vec<DesignItem>, sheet: SheetSpec) -> ArrangementResult {
    Arranger::new(ArrangementRequest { items, sheet })
        .unwrap()
        .arrange()
}

fn placed_count(result: &ArrangementResult) -> usize {
    result.sheets.iter().map(|s| s.placements.len()).sum()
}

fn overlaps(a: &PlacedUnit, b: &PlacedUnit) -> bool {
    a.x_mm < b.x_mm + b.width_mm
        && b.x_mm < a.x_mm + a.width_mm
        && a.y_mm < b.y_mm + b.height_mm
        && b.y_mm < a.y_mm + a.height_mm
}

/// Containment and pairwise non-overlap, on every sheet of the result.
fn assert_layout_invariants(result: &ArrangementResult) {
    let usable_w = result.sheet_spec.usable_width();
    let usable_h = result.sheet_spec.usable_height();

    for sheet in &result.sheets {
        for p in &sheet.placements {
            assert!(p.x_mm >= 0.0 && p.y_mm >= 0.0);
            assert!(
                p.x_mm + p.width_mm <= usable_w && p.y_mm + p.height_mm <= usable_h,
                "{} copy {} exceeds the usable area",
                p.item_id,
                p.copy_index
            );
            assert_eq!(p.sheet_index, sheet.sheet_index);
        }
        for (i, a) in sheet.placements.iter().enumerate() {
            for b in &sheet.placements[i + 1..] {
                assert!(
                    !overlaps(a, b),
                    "{} copy {} overlaps {} copy {}",
                    a.item_id,
                    a.copy_index,
                    b.item_id,
                    b.copy_index
                );
            }
        }
    }
}

#[test]
fn six_copies_fit_on_one_sheet() {
    // Usable area 210x297 after the 5 mm margin.
    let result = arrange(
        vec![item("flyer", 100.0, 50.0, 6, true)],
        sheet(220.0, 307.0, 5.0, 5.0),
    );

    assert_eq!(result.sheets.len(), 1);
    assert_eq!(placed_count(&result), 6);
    assert!(result.unplaced.is_empty());
    assert!(result.statistics.efficiency_percent > 0.0);
    assert!(result.statistics.efficiency_percent <= 100.0);
    assert_layout_invariants(&result);
}

#[test]
fn oversized_item_is_rejected_before_packing() {
    let result = arrange(
        vec![item("banner", 400.0, 400.0, 1, true)],
        sheet(210.0, 297.0, 5.0, 5.0),
    );

    assert!(result.sheets.is_empty());
    assert_eq!(result.unplaced.len(), 1);
    assert_eq!(result.unplaced[0].copy_index, 1);
    assert_eq!(result.unplaced[0].reason, UnplacedReason::ExceedsUsableArea);

    // Aggregate statistics over zero sheets fall back to zero sentinels.
    assert_eq!(result.statistics.efficiency_percent, 0.0);
    assert_eq!(result.statistics.item_count, 0);
    assert_eq!(result.statistics.average_item_area_mm2, 0.0);
}

#[test]
fn second_item_moves_to_a_new_row() {
    let result = arrange(
        vec![
            item("a", 100.0, 100.0, 1, false),
            item("b", 100.0, 100.0, 1, false),
        ],
        sheet(150.0, 250.0, 0.0, 0.0),
    );

    assert_eq!(result.sheets.len(), 1);
    assert_eq!(placed_count(&result), 2);
    assert!(result.unplaced.is_empty());
    assert_layout_invariants(&result);

    // 150 mm of row width cannot hold two 100 mm items side by side.
    let rows: Vec<f64> = result.sheets[0].placements.iter().map(|p| p.y_mm).collect();
    assert_ne!(rows[0], rows[1]);
}

#[test]
fn overflow_paginates_onto_additional_sheets() {
    let result = arrange(
        vec![item("square", 100.0, 100.0, 10, false)],
        sheet(210.0, 297.0, 0.0, 0.0),
    );

    assert!(result.sheets.len() >= 2);
    assert_eq!(placed_count(&result), 10);
    assert!(result.unplaced.is_empty());
    assert_layout_invariants(&result);

    // Sheets are filled in order and indexed contiguously.
    for (index, sheet) in result.sheets.iter().enumerate() {
        assert_eq!(sheet.sheet_index, index);
        assert!(!sheet.placements.is_empty());
    }
}

#[test]
fn conservation_over_mixed_catalog() {
    let result = arrange(
        vec![
            item("poster", 120.0, 80.0, 3, true),
            item("card", 60.0, 40.0, 5, true),
            item("strip", 200.0, 10.0, 2, false),
        ],
        sheet(210.0, 297.0, 5.0, 3.0),
    );

    let total_copies = 3 + 5 + 2;
    assert_eq!(placed_count(&result) + result.unplaced.len(), total_copies);
    assert_layout_invariants(&result);
}

#[test]
fn rotation_never_applied_when_disallowed() {
    let result = arrange(
        vec![item("label", 150.0, 30.0, 4, false)],
        sheet(210.0, 297.0, 0.0, 5.0),
    );

    assert_eq!(placed_count(&result), 4);
    for sheet in &result.sheets {
        for p in &sheet.placements {
            assert!(!p.rotated);
            assert_eq!(p.width_mm, 150.0);
            assert_eq!(p.height_mm, 30.0);
        }
    }
}

#[test]
fn declared_orientation_kept_when_row_fits() {
    // Usable 210x297: both copies fit side by side as declared, so the
    // rotation tie-break keeps the declared orientation.
    let result = arrange(
        vec![item("wide", 100.0, 50.0, 2, true)],
        sheet(210.0, 297.0, 0.0, 0.0),
    );

    assert_eq!(result.sheets.len(), 1);
    let placements = &result.sheets[0].placements;
    assert_eq!(placements.len(), 2);
    assert!(!placements[0].rotated);
    assert_eq!(placements[0].width_mm, 100.0);
    assert!(!placements[1].rotated);
    assert_layout_invariants(&result);
}

#[test]
fn rotated_unit_swaps_placed_dimensions() {
    // Usable 160x297: a 100x50 pair. After the first declared placement
    // only 60 mm of row width remains, so the second copy is rotated.
    let result = arrange(
        vec![item("wide", 100.0, 50.0, 2, true)],
        sheet(160.0, 297.0, 0.0, 0.0),
    );

    let placements = &result.sheets[0].placements;
    assert_eq!(placements.len(), 2);
    assert!(!placements[0].rotated);
    assert!(placements[1].rotated);
    assert_eq!(placements[1].width_mm, 50.0);
    assert_eq!(placements[1].height_mm, 100.0);
    assert_layout_invariants(&result);
}

#[test]
fn arrangement_is_deterministic() {
    let build = || {
        arrange(
            vec![
                item("a", 80.0, 60.0, 3, true),
                item("b", 60.0, 80.0, 3, true),
                item("c", 48.0, 100.0, 2, false),
            ],
            sheet(210.0, 297.0, 5.0, 4.0),
        )
    };

    let first = serde_json::to_string(&build()).unwrap();
    let second = serde_json::to_string(&build()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn zero_spacing_never_reduces_efficiency() {
    let catalog = || vec![item("square", 100.0, 100.0, 4, false)];

    let spaced = arrange(catalog(), sheet(200.0, 200.0, 0.0, 5.0));
    let tight = arrange(catalog(), sheet(200.0, 200.0, 0.0, 0.0));

    assert!(
        tight.statistics.efficiency_percent >= spaced.statistics.efficiency_percent,
        "{} < {}",
        tight.statistics.efficiency_percent,
        spaced.statistics.efficiency_percent
    );
    // With zero spacing the four squares tile the sheet completely.
    assert_eq!(tight.sheets.len(), 1);
    assert_eq!(tight.statistics.efficiency_percent, 100.0);
}

#[test]
fn priority_orders_the_expansion() {
    let mut early = item("early", 50.0, 50.0, 1, false);
    let mut late = item("late", 50.0, 50.0, 1, false);
    early.priority = 0;
    late.priority = 1;

    // Declared in reverse priority order on purpose.
    let result = arrange(vec![late, early], sheet(210.0, 297.0, 0.0, 0.0));

    let first = &result.sheets[0].placements[0];
    assert_eq!(first.item_id, "early");
    assert_eq!((first.x_mm, first.y_mm), (0.0, 0.0));
}

#[test]
fn no_progress_is_reported_instead_of_looping() {
    // Fits the usable area only rotated, but the shelf packer never rotates
    // portrait units, so no sheet iteration can place it.
    let result = arrange(
        vec![item("tall", 50.0, 250.0, 1, true)],
        sheet(260.0, 240.0, 0.0, 0.0),
    );

    assert!(result.sheets.is_empty());
    assert_eq!(result.unplaced.len(), 1);
    assert_eq!(result.unplaced[0].reason, UnplacedReason::NoProgress);
}

#[test]
fn per_sheet_statistics_are_consistent() {
    let result = arrange(
        vec![item("card", 90.0, 50.0, 8, true)],
        sheet(210.0, 297.0, 5.0, 3.0),
    );

    for sheet in &result.sheets {
        let stats = &sheet.statistics;
        let used: f64 = sheet
            .placements
            .iter()
            .map(|p| p.width_mm * p.height_mm)
            .sum();
        assert!((stats.used_area_mm2 - used).abs() < 1e-9);
        assert_eq!(stats.available_area_mm2, result.sheet_spec.usable_area());
        assert_eq!(stats.item_count as usize, sheet.placements.len());
        assert!((stats.waste_area_mm2 - (stats.available_area_mm2 - used)).abs() < 1e-9);
    }

    let aggregate = &result.statistics;
    assert_eq!(aggregate.item_count as usize, placed_count(&result));
    assert_eq!(
        aggregate.available_area_mm2,
        result.sheet_spec.usable_area() * result.sheets.len() as f64
    );
}

#[test]
fn rejects_empty_catalog() {
    let request = ArrangementRequest {
        items: vec![],
        sheet: sheet(210.0, 297.0, 5.0, 5.0),
    };
    assert!(matches!(
        Arranger::new(request),
        Err(ArrangeError::InvalidInput(_))
    ));
}

#[test]
fn rejects_non_positive_dimensions() {
    let request = ArrangementRequest {
        items: vec![item("broken", 0.0, 50.0, 1, true)],
        sheet: sheet(210.0, 297.0, 5.0, 5.0),
    };
    assert!(matches!(
        Arranger::new(request),
        Err(ArrangeError::InvalidInput(_))
    ));
}

#[test]
fn rejects_zero_copies() {
    let request = ArrangementRequest {
        items: vec![item("none", 50.0, 50.0, 0, true)],
        sheet: sheet(210.0, 297.0, 5.0, 5.0),
    };
    assert!(matches!(
        Arranger::new(request),
        Err(ArrangeError::InvalidInput(_))
    ));
}

#[test]
fn rejects_margins_consuming_the_sheet() {
    let request = ArrangementRequest {
        items: vec![item("card", 50.0, 50.0, 1, true)],
        sheet: sheet(100.0, 100.0, 50.0, 0.0),
    };
    assert!(matches!(
        Arranger::new(request),
        Err(ArrangeError::InvalidInput(_))
    ));
}

#[test]
fn rejects_negative_spacing() {
    let request = ArrangementRequest {
        items: vec![item("card", 50.0, 50.0, 1, true)],
        sheet: sheet(210.0, 297.0, 5.0, -1.0),
    };
    assert!(matches!(
        Arranger::new(request),
        Err(ArrangeError::InvalidInput(_))
    ));
}

#[test]
fn oversized_copies_do_not_block_the_rest() {
    let result = arrange(
        vec![
            item("banner", 400.0, 400.0, 2, true),
            item("card", 90.0, 50.0, 4, true),
        ],
        sheet(210.0, 297.0, 5.0, 3.0),
    );

    assert_eq!(placed_count(&result), 4);
    assert_eq!(result.unplaced.len(), 2);
    for unplaced in &result.unplaced {
        assert_eq!(unplaced.item_id, "banner");
        assert_eq!(unplaced.reason, UnplacedReason::ExceedsUsableArea);
    }
    assert_layout_invariants(&result);
}
