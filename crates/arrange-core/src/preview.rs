//! SVG preview of a finished arrangement.
//!
//! Draws placement rectangles and labels only; stamping the actual design
//! content into the layout is the job of the downstream composition service.

use crate::types::ArrangementResult;
use std::fmt::Write;

const SCALE: f64 = 2.0;
const CANVAS_MARGIN: f64 = 20.0;
const SHEET_SPACING: f64 = 40.0;

/// Renders every sheet of the result, stacked vertically, as one SVG image.
pub fn render_svg(result: &ArrangementResult) -> String {
    let spec = &result.sheet_spec;
    let sheet_w = spec.sheet_width_mm / SCALE;
    let sheet_h = spec.sheet_height_mm / SCALE;

    let svg_width = sheet_w + 2.0 * CANVAS_MARGIN;
    let svg_height =
        (sheet_h + SHEET_SPACING) * result.sheets.len() as f64 + 2.0 * CANVAS_MARGIN;

    let mut svg = String::new();
    writeln!(&mut svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#).unwrap();
    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        svg_width, svg_height, svg_width, svg_height
    )
    .unwrap();
    writeln!(
        &mut svg,
        r##"  <rect width="100%" height="100%" fill="#f5f5f5"/>"##
    )
    .unwrap();

    let mut y_offset = CANVAS_MARGIN;

    for sheet in &result.sheets {
        let x = CANVAS_MARGIN;
        let margin = spec.margin_mm / SCALE;

        // Sheet outline and the usable area inside the margin.
        writeln!(
            &mut svg,
            r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="#ffffff" stroke="#333" stroke-width="2"/>"##,
            x, y_offset, sheet_w, sheet_h
        )
        .unwrap();
        writeln!(
            &mut svg,
            r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="#bbb" stroke-width="0.5" stroke-dasharray="4 2"/>"##,
            x + margin,
            y_offset + margin,
            sheet_w - 2.0 * margin,
            sheet_h - 2.0 * margin
        )
        .unwrap();

        writeln!(
            &mut svg,
            r##"  <text x="{}" y="{}" font-family="Arial" font-size="14" fill="#333">Sheet {} — {:.1}%</text>"##,
            x,
            y_offset - 5.0,
            sheet.sheet_index + 1,
            sheet.statistics.efficiency_percent
        )
        .unwrap();

        for placement in &sheet.placements {
            let px = x + margin + placement.x_mm / SCALE;
            let py = y_offset + margin + placement.y_mm / SCALE;
            let pw = placement.width_mm / SCALE;
            let ph = placement.height_mm / SCALE;

            writeln!(
                &mut svg,
                r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="#4CAF50" stroke="#2E7D32" stroke-width="1" opacity="0.7"/>"##,
                px, py, pw, ph
            )
            .unwrap();

            let label = if placement.rotated {
                format!("{} (R)", placement.item_id)
            } else {
                placement.item_id.clone()
            };
            writeln!(
                &mut svg,
                r##"  <text x="{}" y="{}" font-family="Arial" font-size="10" fill="#fff" text-anchor="middle">{}</text>"##,
                px + pw / 2.0,
                py + ph / 2.0 + 3.0,
                label
            )
            .unwrap();
        }

        y_offset += sheet_h + SHEET_SPACING;
    }

    writeln!(
        &mut svg,
        r##"  <text x="{}" y="{}" font-family="Arial" font-size="12" fill="#666">Sheets: {} | Efficiency: {:.1}% | Unplaced: {}</text>"##,
        CANVAS_MARGIN,
        svg_height - 5.0,
        result.sheets.len(),
        result.statistics.efficiency_percent,
        result.unplaced.len()
    )
    .unwrap();

    writeln!(&mut svg, "</svg>").unwrap();
    svg
}
