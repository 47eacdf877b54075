//! Variant fan-out. An enquiry that lists several materials, sizes, or
//! shapes becomes one quote per option along a single axis; the other
//! attributes hold at their base values. Axes never cross-multiply.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order::{OrderSpec, Shape};
use crate::domain::quote::{CourierFee, StickerQuote};
use crate::errors::QuoteError;
use crate::intake::cues::{detect_transparency, quantity_expr_from_text, wants_courier};
use crate::intake::fields::ExtractedFields;
use crate::pricing::delivery::{resolve_courier, DEFAULT_COURIER_FEE_CENTS};
use crate::pricing::sticker::{DeterministicStickerPricer, StickerPricing};
use crate::pricing::{dollars, round_2dp};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantAxis {
    Material,
    Size,
    Shape,
    Single,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantCombo {
    pub material_id: String,
    pub width_mm: u32,
    pub height_mm: u32,
    pub shape: Shape,
}

/// The full response for one enquiry: every variant quote, the axis they
/// vary along, and the courier line when the enquiry asks for delivery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderQuote {
    pub quotes: Vec<StickerQuote>,
    pub axis: VariantAxis,
    pub grand_total: Decimal,
    pub courier: Option<CourierFee>,
    pub total_payable: Decimal,
}

/// Material beats size beats shape. A list needs at least two entries to
/// count as an axis.
pub fn variant_axis(fields: &ExtractedFields) -> VariantAxis {
    if fields.material_variants.len() > 1 {
        VariantAxis::Material
    } else if fields.size_variants.len() > 1 {
        VariantAxis::Size
    } else if fields.shape_variants.len() > 1 {
        VariantAxis::Shape
    } else {
        VariantAxis::Single
    }
}

pub fn build_combos(fields: &ExtractedFields) -> Vec<VariantCombo> {
    let base_material = fields.base_material().to_lowercase();
    let (base_w, base_h) = fields.base_size();
    let base_shape = fields.base_shape();

    match variant_axis(fields) {
        VariantAxis::Material => fields
            .material_variants
            .iter()
            .map(|material| VariantCombo {
                material_id: material.to_lowercase(),
                width_mm: base_w,
                height_mm: base_h,
                shape: base_shape,
            })
            .collect(),
        VariantAxis::Size => fields
            .size_variants
            .iter()
            .map(|size| VariantCombo {
                material_id: base_material.clone(),
                width_mm: size.width_mm,
                height_mm: size.height_mm,
                shape: base_shape,
            })
            .collect(),
        VariantAxis::Shape => fields
            .shape_variants
            .iter()
            .map(|shape| VariantCombo {
                material_id: base_material.clone(),
                width_mm: base_w,
                height_mm: base_h,
                shape: Shape::parse(shape),
            })
            .collect(),
        VariantAxis::Single => vec![VariantCombo {
            material_id: base_material,
            width_mm: base_w,
            height_mm: base_h,
            shape: base_shape,
        }],
    }
}

/// Turns an extraction record into a priced response, generic over the
/// sticker pricer so callers can swap the engine at the seam.
pub struct QuoteBuilder<P> {
    pricer: P,
    courier_default_fee: Decimal,
}

impl Default for QuoteBuilder<DeterministicStickerPricer> {
    fn default() -> Self {
        Self::new(DeterministicStickerPricer)
    }
}

impl<P: StickerPricing> QuoteBuilder<P> {
    pub fn new(pricer: P) -> Self {
        Self { pricer, courier_default_fee: dollars(DEFAULT_COURIER_FEE_CENTS) }
    }

    pub fn with_courier_default_fee(mut self, fee: Decimal) -> Self {
        self.courier_default_fee = fee;
        self
    }

    /// Prices every variant combo, or fails as a whole: either the caller
    /// gets a complete response or an error naming the first problem.
    pub fn build(&self, fields: &ExtractedFields) -> Result<OrderQuote, QuoteError> {
        let source_text = fields.source_text.as_deref().unwrap_or("");
        let flags = detect_transparency(source_text);
        let quantity_expr = quantity_expr_from_text(source_text)
            .unwrap_or_else(|| fields.normalized_quantity_expr());
        let individual_cut = fields.wants_individual_cut();
        let die_cut = fields.wants_die_cut();

        let axis = variant_axis(fields);
        let combos = build_combos(fields);

        let mut quotes = Vec::with_capacity(combos.len());
        for combo in &combos {
            let spec = OrderSpec::new(
                combo.width_mm,
                combo.height_mm,
                combo.shape,
                combo.material_id.clone(),
                quantity_expr.clone(),
                individual_cut,
                die_cut,
                flags,
            );
            quotes.push(self.pricer.price(&spec)?);
        }

        let grand_total = round_2dp(quotes.iter().map(|q| q.total).sum());
        let courier = wants_courier(source_text).then(|| {
            resolve_courier(fields.postal_code.as_deref().unwrap_or(""), self.courier_default_fee)
        });
        let courier_fee = courier.as_ref().map_or(Decimal::ZERO, |line| line.fee);

        Ok(OrderQuote {
            quotes,
            axis,
            grand_total,
            courier,
            total_payable: round_2dp(grand_total + courier_fee),
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::{variant_axis, QuoteBuilder, VariantAxis};
    use crate::domain::order::{OrderSpec, Shape};
    use crate::domain::quote::StickerQuote;
    use crate::errors::QuoteError;
    use crate::intake::fields::{ExtractedFields, SizeVariant};
    use crate::pricing::sticker::StickerPricing;

    fn base_fields() -> ExtractedFields {
        ExtractedFields {
            material: Some("mirrorkote".to_owned()),
            width_mm: Some(50),
            height_mm: Some(30),
            shape: Some("Rectangle".to_owned()),
            quantity_expr: Some("100".to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn material_list_fans_out_one_quote_per_material() {
        let fields = ExtractedFields {
            material_variants: vec!["Mirrorkote".to_owned(), "Synthetic".to_owned()],
            ..base_fields()
        };

        let order = QuoteBuilder::default().build(&fields).expect("quotable");

        assert_eq!(order.axis, VariantAxis::Material);
        assert_eq!(order.quotes.len(), 2);
        assert_eq!(order.quotes[0].material_label, "Mirrorkote");
        assert_eq!(order.quotes[1].material_label, "Synthetic");
        assert_eq!(order.quotes[0].total, dec!(26.30));
        assert_eq!(order.quotes[1].total, dec!(29.60));
        assert_eq!(order.grand_total, dec!(55.90));
        assert_eq!(order.total_payable, dec!(55.90));
        assert!(order.courier.is_none());
    }

    #[test]
    fn material_axis_outranks_size_and_shape_lists() {
        let fields = ExtractedFields {
            material_variants: vec!["mirrorkote".to_owned(), "synthetic".to_owned()],
            size_variants: vec![
                SizeVariant { width_mm: 40, height_mm: 40 },
                SizeVariant { width_mm: 70, height_mm: 70 },
            ],
            shape_variants: vec!["round".to_owned(), "square".to_owned()],
            ..base_fields()
        };

        let order = QuoteBuilder::default().build(&fields).expect("quotable");

        assert_eq!(order.axis, VariantAxis::Material);
        assert_eq!(order.quotes.len(), 2);
        // Size holds at the first listed size, never a cross product.
        assert!(order.quotes.iter().all(|q| q.width_mm == 40 && q.height_mm == 40));
    }

    #[test]
    fn size_list_fans_out_against_the_base_material() {
        let fields = ExtractedFields {
            size_variants: vec![
                SizeVariant { width_mm: 50, height_mm: 30 },
                SizeVariant { width_mm: 70, height_mm: 40 },
            ],
            ..base_fields()
        };

        let order = QuoteBuilder::default().build(&fields).expect("quotable");

        assert_eq!(order.axis, VariantAxis::Size);
        assert_eq!(order.quotes.len(), 2);
        assert!(order.quotes.iter().all(|q| q.material_label == "Mirrorkote"));
        assert_eq!(order.quotes[0].total, dec!(26.30));
        assert_eq!(order.quotes[1].total, dec!(30.50));
        assert_eq!(order.grand_total, dec!(56.80));
    }

    #[test]
    fn shape_list_fans_out_with_size_held_at_base() {
        let fields = ExtractedFields {
            width_mm: Some(50),
            height_mm: Some(50),
            shape_variants: vec!["round".to_owned(), "square".to_owned()],
            ..base_fields()
        };

        let order = QuoteBuilder::default().build(&fields).expect("quotable");

        assert_eq!(order.axis, VariantAxis::Shape);
        assert_eq!(order.quotes[0].shape, Shape::Round);
        assert_eq!(order.quotes[1].shape, Shape::Square);
        assert_eq!(order.quotes[0].total, dec!(39.80));
        assert_eq!(order.quotes[1].total, dec!(30.50));
        assert_eq!(order.grand_total, dec!(70.30));
    }

    #[test]
    fn lone_field_set_quotes_a_single_line() {
        let order = QuoteBuilder::default().build(&base_fields()).expect("quotable");

        assert_eq!(order.axis, VariantAxis::Single);
        assert_eq!(order.quotes.len(), 1);
        assert_eq!(order.grand_total, order.quotes[0].total);
    }

    #[test]
    fn courier_wording_adds_the_fee_once() {
        let fields = ExtractedFields {
            material_variants: vec!["mirrorkote".to_owned(), "synthetic".to_owned()],
            postal_code: Some("460001".to_owned()),
            source_text: Some("please courier to our office".to_owned()),
            ..base_fields()
        };

        let order = QuoteBuilder::default().build(&fields).expect("quotable");

        let courier = order.courier.expect("courier line");
        assert_eq!(courier.fee, dec!(10.00));
        assert_eq!(order.grand_total, dec!(55.90));
        assert_eq!(order.total_payable, dec!(65.90));
    }

    #[test]
    fn quantity_wording_in_the_enquiry_text_overrides_the_field() {
        let fields = ExtractedFields {
            source_text: Some("we need 3 x 200 please".to_owned()),
            ..base_fields()
        };

        let order = QuoteBuilder::default().build(&fields).expect("quotable");

        assert_eq!(order.quotes[0].quantity, 600);
        assert_eq!(order.quotes[0].design_count, 3);
    }

    #[test]
    fn white_ink_wording_alone_does_not_add_a_white_ink_line() {
        let fields = ExtractedFields {
            source_text: Some("opaque label, white ink behind logo".to_owned()),
            ..base_fields()
        };

        let order = QuoteBuilder::default().build(&fields).expect("quotable");

        // The cue is advisory; the run follows the resolved material.
        assert!(order.quotes[0].white_ink.is_none());
    }

    #[test]
    fn one_bad_variant_fails_the_whole_response() {
        let fields = ExtractedFields {
            material_variants: vec!["mirrorkote".to_owned(), "granite".to_owned()],
            ..base_fields()
        };

        let err = QuoteBuilder::default().build(&fields).expect_err("granite is unquotable");

        assert!(matches!(err, QuoteError::UnsupportedMaterial { .. }));
    }

    #[test]
    fn axis_detection_requires_two_entries() {
        let fields = ExtractedFields {
            material_variants: vec!["pvc".to_owned()],
            ..base_fields()
        };

        assert_eq!(variant_axis(&fields), VariantAxis::Single);
    }

    #[test]
    fn builder_accepts_a_custom_pricer_at_the_seam() {
        struct RejectEverything;

        impl StickerPricing for RejectEverything {
            fn price(&self, spec: &OrderSpec) -> Result<StickerQuote, QuoteError> {
                Err(QuoteError::UnsupportedMaterial { material_id: spec.material_id.clone() })
            }
        }

        let err = QuoteBuilder::new(RejectEverything)
            .build(&base_fields())
            .expect_err("custom pricer rejects all");

        assert!(matches!(err, QuoteError::UnsupportedMaterial { .. }));
    }
}
