//! Sheet layout planning. Given a piece size and cut class, finds the
//! cheaper of the two grid orientations on a sheet, trying A4 before A3.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order::{CutClass, Shape, SheetSize};
use crate::errors::QuoteError;

/// Margin added around each piece when the plotter cuts it.
pub const BLEED_MM: u32 = 3;

/// Cost shape of one (sheet, cut class) pair. Printable area is the sheet
/// minus gripper and registration margins, so it differs from the ISO size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CutProfile {
    pub processing_fee_cents: i64,
    pub per_stroke_cents: i64,
    pub printable_w_mm: u32,
    pub printable_h_mm: u32,
}

const A4_STRAIGHT: CutProfile = CutProfile {
    processing_fee_cents: 780,
    per_stroke_cents: 13,
    printable_w_mm: 287,
    printable_h_mm: 200,
};
const A4_ROUNDED: CutProfile = CutProfile {
    processing_fee_cents: 980,
    per_stroke_cents: 19,
    printable_w_mm: 277,
    printable_h_mm: 190,
};
const A4_CUSTOM: CutProfile = CutProfile {
    processing_fee_cents: 1_200,
    per_stroke_cents: 23,
    printable_w_mm: 277,
    printable_h_mm: 190,
};
const A3_STRAIGHT: CutProfile = CutProfile {
    processing_fee_cents: 780,
    per_stroke_cents: 26,
    printable_w_mm: 277,
    printable_h_mm: 392,
};
const A3_ROUNDED: CutProfile = CutProfile {
    processing_fee_cents: 980,
    per_stroke_cents: 38,
    printable_w_mm: 277,
    printable_h_mm: 392,
};
const A3_CUSTOM: CutProfile = CutProfile {
    processing_fee_cents: 1_200,
    per_stroke_cents: 46,
    printable_w_mm: 277,
    printable_h_mm: 392,
};

impl CutProfile {
    pub fn select(sheet: SheetSize, class: CutClass) -> CutProfile {
        match (sheet, class) {
            (SheetSize::A4, CutClass::Straight) => A4_STRAIGHT,
            (SheetSize::A4, CutClass::Rounded) => A4_ROUNDED,
            (SheetSize::A4, CutClass::Custom) => A4_CUSTOM,
            (SheetSize::A3, CutClass::Straight) => A3_STRAIGHT,
            (SheetSize::A3, CutClass::Rounded) => A3_ROUNDED,
            (SheetSize::A3, CutClass::Custom) => A3_CUSTOM,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    AsGiven,
    Rotated,
}

/// Winning grid for one sheet. `unit_cost_cents` is the exact per-piece
/// share of sheet and stroke cost, kept unrounded for the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutResult {
    pub unit_cost_cents: Decimal,
    pub pieces_per_sheet: u32,
    pub strokes_used: u32,
    pub orientation: Orientation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetPlan {
    pub sheet: SheetSize,
    pub layout: LayoutResult,
}

/// Plans the cheapest feasible sheet for the piece: A4 first, A3 when the
/// piece overflows A4 in both orientations. Fails loudly when even A3
/// cannot hold a single piece.
pub fn plan_sheet(
    width_mm: u32,
    height_mm: u32,
    shape: Shape,
    prices: crate::pricing::materials::SheetPriceEntry,
) -> Result<SheetPlan, QuoteError> {
    let class = shape.cut_class();
    for sheet in [SheetSize::A4, SheetSize::A3] {
        if let Some(layout) =
            evaluate_sheet(sheet, class, width_mm, height_mm, prices.price_cents(sheet))
        {
            return Ok(SheetPlan { sheet, layout });
        }
    }
    Err(QuoteError::LayoutInfeasible { width_mm, height_mm, shape })
}

fn evaluate_sheet(
    sheet: SheetSize,
    class: CutClass,
    width_mm: u32,
    height_mm: u32,
    sheet_price_cents: i64,
) -> Option<LayoutResult> {
    let profile = CutProfile::select(sheet, class);
    let (piece_w, piece_h) = match class {
        CutClass::Straight => (width_mm, height_mm),
        CutClass::Rounded | CutClass::Custom => (width_mm + BLEED_MM, height_mm + BLEED_MM),
    };

    let as_given = grid_layout(&profile, piece_w, piece_h, sheet_price_cents, Orientation::AsGiven);
    let rotated = grid_layout(&profile, piece_h, piece_w, sheet_price_cents, Orientation::Rotated);

    match (as_given, rotated) {
        (Some(a), Some(b)) => Some(if a.unit_cost_cents <= b.unit_cost_cents { a } else { b }),
        (a, b) => a.or(b),
    }
}

fn grid_layout(
    profile: &CutProfile,
    piece_w: u32,
    piece_h: u32,
    sheet_price_cents: i64,
    orientation: Orientation,
) -> Option<LayoutResult> {
    if piece_w == 0 || piece_h == 0 {
        return None;
    }
    let across = profile.printable_w_mm / piece_w;
    let down = profile.printable_h_mm / piece_h;
    let pieces = across * down;
    if pieces == 0 {
        return None;
    }

    // One stroke per cut line on each axis, plus two closing strokes.
    let strokes = across + down;
    let stroke_cost_cents = i64::from(strokes + 2) * profile.per_stroke_cents;
    let unit_cost_cents =
        Decimal::from(sheet_price_cents + stroke_cost_cents) / Decimal::from(pieces);

    Some(LayoutResult { unit_cost_cents, pieces_per_sheet: pieces, strokes_used: strokes, orientation })
}
