//! Sheet material catalog: canonical materials, their per-sheet rates in
//! cents, and the alias index that maps storefront wording onto them.
//!
//! Aliases are matched case-insensitively after trimming. The index also
//! answers for each material's own label, so a previously quoted label
//! round-trips through resolution unchanged.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::domain::order::SheetSize;
use crate::errors::QuoteError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    Mirrorkote,
    Synthetic,
    SyntheticTransparent,
    PvcWhite,
    PvcTransparent,
    RemovableSynthetic,
    RemovablePvcWhite,
    RemovablePvcTransparent,
    SilverSynthetic,
    SilverPvc,
    HologramSynthetic,
    HologramPvc,
    WindowSticker,
    FloorSticker,
}

/// Rate for one printed sheet, per sheet size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetPriceEntry {
    pub a4_cents: i64,
    pub a3_cents: i64,
}

impl SheetPriceEntry {
    pub fn price_cents(&self, sheet: SheetSize) -> i64 {
        match sheet {
            SheetSize::A4 => self.a4_cents,
            SheetSize::A3 => self.a3_cents,
        }
    }
}

impl Material {
    pub const ALL: [Material; 14] = [
        Material::Mirrorkote,
        Material::Synthetic,
        Material::SyntheticTransparent,
        Material::PvcWhite,
        Material::PvcTransparent,
        Material::RemovableSynthetic,
        Material::RemovablePvcWhite,
        Material::RemovablePvcTransparent,
        Material::SilverSynthetic,
        Material::SilverPvc,
        Material::HologramSynthetic,
        Material::HologramPvc,
        Material::WindowSticker,
        Material::FloorSticker,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Material::Mirrorkote => "Mirrorkote",
            Material::Synthetic => "Synthetic",
            Material::SyntheticTransparent => "Synthetic (Transparent)",
            Material::PvcWhite => "PVC (White-base)",
            Material::PvcTransparent => "PVC (Transparent)",
            Material::RemovableSynthetic => "Removable Synthetic",
            Material::RemovablePvcWhite => "Removable PVC (White-base)",
            Material::RemovablePvcTransparent => "Removable PVC (Transparent)",
            Material::SilverSynthetic => "Silver Synthetic",
            Material::SilverPvc => "Silver PVC",
            Material::HologramSynthetic => "Hologram Synthetic",
            Material::HologramPvc => "Hologram PVC",
            Material::WindowSticker => "Window Sticker (White-base)",
            Material::FloorSticker => "Floor Sticker",
        }
    }

    pub fn sheet_prices(&self) -> SheetPriceEntry {
        match self {
            Material::Mirrorkote => SheetPriceEntry { a4_cents: 110, a3_cents: 220 },
            Material::Synthetic | Material::SyntheticTransparent => {
                SheetPriceEntry { a4_cents: 230, a3_cents: 460 }
            }
            Material::PvcWhite | Material::PvcTransparent | Material::RemovableSynthetic => {
                SheetPriceEntry { a4_cents: 380, a3_cents: 760 }
            }
            Material::RemovablePvcWhite | Material::RemovablePvcTransparent => {
                SheetPriceEntry { a4_cents: 530, a3_cents: 1_060 }
            }
            Material::SilverSynthetic => SheetPriceEntry { a4_cents: 380, a3_cents: 760 },
            Material::SilverPvc => SheetPriceEntry { a4_cents: 530, a3_cents: 1_060 },
            Material::HologramSynthetic => SheetPriceEntry { a4_cents: 380, a3_cents: 760 },
            Material::HologramPvc => SheetPriceEntry { a4_cents: 350, a3_cents: 1_060 },
            Material::WindowSticker | Material::FloorSticker => {
                SheetPriceEntry { a4_cents: 1_200, a3_cents: 1_460 }
            }
        }
    }

    /// Transparent stock triggers the companion white-ink run.
    pub fn is_transparent(&self) -> bool {
        matches!(
            self,
            Material::SyntheticTransparent
                | Material::PvcTransparent
                | Material::RemovablePvcTransparent
        )
    }

    /// Storefront wording that resolves to this material, lowercase. The
    /// material's own label answers too and is not repeated here. Paper-like
    /// specialty stocks and a few discontinued listings price as their
    /// nearest surviving stock.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Material::Mirrorkote => &[],
            Material::Synthetic => &[
                "synthetic_pp",
                "pp",
                "none",
                "none (default)",
                "default",
                "unknown",
                "paper",
                "sticker",
                "washi",
                "washi paper",
                "kraft",
                "kraft paper",
                "fluorescent paper",
                "fluorescent paper (green)",
                "fluorescent paper (orange)",
                "fluorescent paper (red)",
                "gold speckled paper",
                "gold speckled (vintage)",
                "gold speckled (white)",
                "gold speckled (red)",
                "sand gold paper",
                "textured paper",
                "textured paper (laid - cool white)",
                "textured paper (laid - warm white)",
                "textured paper (rough - grey)",
                "textured paper (rough - yellow)",
                "gold paper",
                "gold paper (kiss-cut without printing only)",
                "temp tattoo",
            ],
            Material::SyntheticTransparent => &["synthetic(transparent)", "transparent material"],
            Material::PvcWhite => &[
                "pvc",
                "vinyl",
                "pvc (white)",
                "white pvc",
                "pvc [white & transparent]",
                "anti-slip rough pvc",
            ],
            Material::PvcTransparent => &["pvc(transparent)"],
            Material::RemovableSynthetic => &[
                "frosted synthetic",
                "frosted synthetic (+removable)",
                "synthetic [white] (+removable)",
            ],
            Material::RemovablePvcWhite => &[
                "removable pvc",
                "pvc [white & transparent] (+removable)",
                "pvc [white & trans] (+remove) (+reverse)",
            ],
            Material::RemovablePvcTransparent => &[],
            Material::SilverSynthetic => &["silver foil synthetic"],
            Material::SilverPvc => &[
                "silver foil pvc",
                "silver waterproof",
                "waterproof silver",
                "silver chrome pvc",
                "gold foil pvc",
            ],
            Material::HologramSynthetic => &["holographic synthetic"],
            Material::HologramPvc => &["holographic pvc"],
            Material::WindowSticker => &["window sticker"],
            Material::FloorSticker => &[],
        }
    }
}

static ALIAS_INDEX: LazyLock<HashMap<String, Material>> = LazyLock::new(build_alias_index);

fn build_alias_index() -> HashMap<String, Material> {
    let mut index = HashMap::new();
    for material in Material::ALL {
        for key in std::iter::once(material.label())
            .chain(material.aliases().iter().copied())
            .map(str::to_ascii_lowercase)
        {
            let prior = index.insert(key.clone(), material);
            debug_assert!(
                prior.map_or(true, |p| p == material),
                "alias `{key}` claimed by {prior:?} and {material:?}",
            );
        }
    }
    index
}

/// Resolves free-form material wording to a catalog entry.
pub fn resolve_material(material_id: &str) -> Result<Material, QuoteError> {
    let key = material_id.trim().to_ascii_lowercase();
    ALIAS_INDEX
        .get(&key)
        .copied()
        .ok_or_else(|| QuoteError::UnsupportedMaterial { material_id: material_id.to_owned() })
}
