use serde::{Deserialize, Serialize};

/// Smallest edge length the price tables are calibrated for.
pub const MIN_DIMENSION_MM: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Round,
    Rectangle,
    RectangleRounded,
    Square,
    SquareRounded,
    Oval,
    Custom,
}

/// Cutting difficulty tiers. Straight edges run on the guillotine,
/// rounded corners and free-form outlines go through the plotter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CutClass {
    Straight,
    Rounded,
    Custom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetSize {
    A4,
    A3,
}

impl Shape {
    /// Maps free-form shape wording ("circle", "rounded  SQUARE", "die cut
    /// blob") onto the canonical set. Unrecognized wording lands on `Custom`.
    pub fn parse(label: &str) -> Shape {
        let v = label.trim().to_ascii_lowercase();
        if v == "round" || v.contains("circular") || v.contains("circle") {
            Shape::Round
        } else if v == "square-rounded" || follows(&v, "square", "rounded") {
            Shape::SquareRounded
        } else if v == "rect-rounded" || follows(&v, "rectangle", "rounded") {
            Shape::RectangleRounded
        } else if v == "square-straight" || v == "square" {
            Shape::Square
        } else if v == "rect-straight" || v.starts_with("rect") {
            Shape::Rectangle
        } else if v.contains("oval") {
            Shape::Oval
        } else {
            Shape::Custom
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Shape::Round => "Round",
            Shape::Rectangle => "Rectangle",
            Shape::RectangleRounded => "Rectangle (Rounded corners)",
            Shape::Square => "Square",
            Shape::SquareRounded => "Square (Rounded corners)",
            Shape::Oval => "Oval",
            Shape::Custom => "Custom-shape",
        }
    }

    pub fn cut_class(&self) -> CutClass {
        match self {
            Shape::Rectangle | Shape::Square => CutClass::Straight,
            Shape::Round | Shape::RectangleRounded | Shape::SquareRounded | Shape::Oval => {
                CutClass::Rounded
            }
            Shape::Custom => CutClass::Custom,
        }
    }
}

/// True when `needle` occurs somewhere after an occurrence of `first`.
fn follows(haystack: &str, first: &str, needle: &str) -> bool {
    haystack
        .find(first)
        .is_some_and(|at| haystack[at + first.len()..].contains(needle))
}

/// Advisory cues scanned out of free text. They travel with the order for
/// callers to display; pricing decides white ink from the resolved material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFlags {
    pub is_transparent: bool,
    pub has_white_ink: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpec {
    pub width_mm: u32,
    pub height_mm: u32,
    pub shape: Shape,
    pub material_id: String,
    pub quantity_expr: String,
    pub individual_cut: bool,
    pub die_cut: bool,
    pub flags: OrderFlags,
}

impl OrderSpec {
    /// Dimensions are clamped here so every consumer downstream sees the
    /// priced size, not the requested one.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        width_mm: u32,
        height_mm: u32,
        shape: Shape,
        material_id: impl Into<String>,
        quantity_expr: impl Into<String>,
        individual_cut: bool,
        die_cut: bool,
        flags: OrderFlags,
    ) -> Self {
        Self {
            width_mm: clamp_dimension(width_mm),
            height_mm: clamp_dimension(height_mm),
            shape,
            material_id: material_id.into(),
            quantity_expr: quantity_expr.into(),
            individual_cut,
            die_cut,
            flags,
        }
    }
}

/// Anything under 20mm prices as 20mm. A 90mm edge snaps to 89mm so the
/// piece still packs three abreast on the narrow printable run.
pub fn clamp_dimension(mm: u32) -> u32 {
    let mm = mm.max(MIN_DIMENSION_MM);
    if mm == 90 {
        89
    } else {
        mm
    }
}
