pub mod config;
pub mod domain;
pub mod errors;
pub mod fanout;
pub mod intake;
pub mod pricing;

pub use domain::order::{CutClass, OrderFlags, OrderSpec, Shape, SheetSize};
pub use domain::quote::{
    CardBoxLine, CardQuote, CourierFee, QuoteBreakdown, SharedBackLine, StickerQuote, WhiteInkLine,
};
pub use errors::QuoteError;
pub use fanout::{OrderQuote, QuoteBuilder, VariantAxis, VariantCombo};
pub use intake::fields::{ExtractedFields, SizeVariant};
pub use pricing::cards::{
    CardBox, CardBoxOverrides, CardOrder, CardPricing, DeterministicCardPricer,
};
pub use pricing::layout::{CutProfile, LayoutResult, Orientation, SheetPlan};
pub use pricing::materials::{Material, SheetPriceEntry};
pub use pricing::quantity::ParsedQuantity;
pub use pricing::sticker::{DeterministicStickerPricer, StickerPricing};
