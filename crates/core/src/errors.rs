use thiserror::Error;

use crate::domain::order::Shape;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error("invalid quantity expression `{expr}`: {reason}")]
    InvalidQuantity { expr: String, reason: String },
    #[error("unsupported material for sheet pricing: {material_id}")]
    UnsupportedMaterial { material_id: String },
    #[error("no sheet layout fits a {width_mm}x{height_mm}mm {shape:?} piece")]
    LayoutInfeasible { width_mm: u32, height_mm: u32, shape: Shape },
    #[error("invalid business card order: {reason}")]
    InvalidCardOrder { reason: String },
}

impl QuoteError {
    pub fn class(&self) -> &'static str {
        match self {
            Self::InvalidQuantity { .. } => "invalid_quantity",
            Self::UnsupportedMaterial { .. } => "unsupported_material",
            Self::LayoutInfeasible { .. } => "layout_infeasible",
            Self::InvalidCardOrder { .. } => "invalid_card_order",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidQuantity { .. } => {
                "The quantity could not be understood. Use forms like `100` or `3x50+100`."
            }
            Self::UnsupportedMaterial { .. } => {
                "The requested material has no sheet rate. Check the material name."
            }
            Self::LayoutInfeasible { .. } => {
                "The piece does not fit on any supported sheet size."
            }
            Self::InvalidCardOrder { .. } => {
                "The card order could not be processed. Check box quantities."
            }
        }
    }
}
