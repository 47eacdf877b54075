use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order::{Shape, SheetSize};

/// Fully priced sticker line. Money fields are dollars: unit prices carry
/// three decimal places, fees and totals two.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerQuote {
    pub material_label: String,
    pub sheet: SheetSize,
    pub width_mm: u32,
    pub height_mm: u32,
    pub shape: Shape,
    pub unit_price: Decimal,
    pub processing_fee: Decimal,
    pub subsequent_fee: Decimal,
    pub extra_design_count: u32,
    pub quantity: u32,
    pub design_count: u32,
    pub quantity_display: String,
    pub total: Decimal,
    pub surcharge_applied: bool,
    pub white_ink: Option<WhiteInkLine>,
    pub breakdown: QuoteBreakdown,
}

/// How the unit price came to be, for itemized display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    pub sheet_base_price: Decimal,
    pub per_stroke_cost: Decimal,
    pub strokes_used: u32,
    pub pieces_per_sheet: u32,
    pub per_piece_finishing: Decimal,
    pub individual_cut: bool,
    pub die_cut: bool,
    pub unit_price_no_finishing: Decimal,
    /// What the order would cost with no finishing add-ons and no white ink.
    /// The minimum-order check reads this figure, so add-ons alone never
    /// lift an order past the threshold.
    pub shadow_total: Decimal,
}

/// Companion white-ink run quoted alongside transparent materials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhiteInkLine {
    pub processing_fee: Decimal,
    pub unit_half: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
    pub total: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardBoxLine {
    pub quantity_requested: u32,
    pub pack: u32,
    pub front: Decimal,
}

/// One back print shared by every box in the order, charged as the
/// double-sided increment at the combined pack size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedBackLine {
    pub combined_quantity_requested: u32,
    pub combined_pack: u32,
    pub back_increment: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardQuote {
    pub boxes: Vec<CardBoxLine>,
    pub shared_back: Option<SharedBackLine>,
    pub subtotal_fronts: Decimal,
    pub total: Decimal,
    pub surcharge_applied: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourierFee {
    pub postal_prefix: String,
    pub fee: Decimal,
}
