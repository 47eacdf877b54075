use rust_decimal::Decimal;

use crate::domain::order::OrderSpec;
use crate::domain::quote::{QuoteBreakdown, StickerQuote, WhiteInkLine};
use crate::errors::QuoteError;
use crate::pricing::layout::{plan_sheet, CutProfile};
use crate::pricing::materials::resolve_material;
use crate::pricing::quantity::parse_quantity_expr;
use crate::pricing::{
    dollars, round_2dp, round_3dp, MINIMUM_ORDER_CENTS, SMALL_ORDER_SURCHARGE_CENTS,
};

/// Artwork processing fee for each design beyond the first.
pub const SUBSEQUENT_DESIGN_FEE_CENTS: i64 = 300;
/// Per-piece add-on for cutting pieces apart individually.
pub const INDIVIDUAL_CUT_CENTS: i64 = 20;
/// Per-piece add-on for die cutting. Stacks with the individual cut.
pub const DIE_CUT_CENTS: i64 = 25;

pub trait StickerPricing: Send + Sync {
    fn price(&self, spec: &OrderSpec) -> Result<StickerQuote, QuoteError>;
}

/// Table-driven pricer. Same spec in, same quote out, no ambient state.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeterministicStickerPricer;

impl StickerPricing for DeterministicStickerPricer {
    fn price(&self, spec: &OrderSpec) -> Result<StickerQuote, QuoteError> {
        price_sticker(spec)
    }
}

pub fn price_sticker(spec: &OrderSpec) -> Result<StickerQuote, QuoteError> {
    let parsed = parse_quantity_expr(&spec.quantity_expr)?;
    let material = resolve_material(&spec.material_id)?;
    let plan = plan_sheet(spec.width_mm, spec.height_mm, spec.shape, material.sheet_prices())?;
    let profile = CutProfile::select(plan.sheet, spec.shape.cut_class());

    let qty = Decimal::from(parsed.qty);
    let unit_no_finishing = round_3dp(plan.layout.unit_cost_cents / Decimal::ONE_HUNDRED);

    let mut finishing_cents = 0;
    if spec.individual_cut {
        finishing_cents += INDIVIDUAL_CUT_CENTS;
    }
    if spec.die_cut {
        finishing_cents += DIE_CUT_CENTS;
    }
    let per_piece_finishing = dollars(finishing_cents);
    let unit_price = round_3dp(unit_no_finishing + per_piece_finishing);

    let processing_fee = dollars(profile.processing_fee_cents);
    let subsequent_fee = dollars(SUBSEQUENT_DESIGN_FEE_CENTS);
    let extra_designs_fee = Decimal::from(parsed.extra_count) * subsequent_fee;

    let line_total = unit_price * qty;
    // The minimum-order check prices the order as if no finishing or white
    // ink were requested, so those add-ons never waive the surcharge.
    let mut shadow_total = processing_fee + extra_designs_fee + unit_no_finishing * qty;

    let white_ink = if material.is_transparent() {
        let unit_half = round_3dp(unit_no_finishing / Decimal::TWO);
        let white_line = round_3dp(unit_half * qty);
        Some(WhiteInkLine {
            processing_fee,
            unit_half,
            quantity: parsed.qty,
            line_total: white_line,
            total: round_3dp(processing_fee + white_line),
        })
    } else {
        None
    };
    let white_ink_total = white_ink.as_ref().map_or(Decimal::ZERO, |line| line.total);

    let mut total = processing_fee + extra_designs_fee + line_total + white_ink_total;

    let mut surcharge_applied = false;
    if shadow_total < dollars(MINIMUM_ORDER_CENTS) {
        let surcharge = dollars(SMALL_ORDER_SURCHARGE_CENTS);
        shadow_total += surcharge;
        total += surcharge;
        surcharge_applied = true;
    }

    Ok(StickerQuote {
        material_label: material.label().to_owned(),
        sheet: plan.sheet,
        width_mm: spec.width_mm,
        height_mm: spec.height_mm,
        shape: spec.shape,
        unit_price,
        processing_fee,
        subsequent_fee,
        extra_design_count: parsed.extra_count,
        quantity: parsed.qty,
        design_count: parsed.designs,
        quantity_display: parsed.display,
        total: round_2dp(total),
        surcharge_applied,
        white_ink,
        breakdown: QuoteBreakdown {
            sheet_base_price: dollars(material.sheet_prices().price_cents(plan.sheet)),
            per_stroke_cost: dollars(profile.per_stroke_cents),
            strokes_used: plan.layout.strokes_used,
            pieces_per_sheet: plan.layout.pieces_per_sheet,
            per_piece_finishing,
            individual_cut: spec.individual_cut,
            die_cut: spec.die_cut,
            unit_price_no_finishing: unit_no_finishing,
            shadow_total: round_2dp(shadow_total),
        },
    })
}
