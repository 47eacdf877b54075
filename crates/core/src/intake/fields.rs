//! The extraction record handed over by upstream intake: whatever fields a
//! collaborator (or an operator filling a form) managed to pull out of a
//! customer enquiry. Everything is optional; defaulting happens here.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::order::Shape;

pub const DEFAULT_MATERIAL_ID: &str = "mirrorkote";
pub const DEFAULT_QUANTITY_EXPR: &str = "1";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedFields {
    pub material: Option<String>,
    pub width_mm: Option<u32>,
    pub height_mm: Option<u32>,
    pub shape: Option<String>,
    pub quantity_expr: Option<String>,
    pub cut_type: Option<String>,
    pub material_variants: Vec<String>,
    pub size_variants: Vec<SizeVariant>,
    pub shape_variants: Vec<String>,
    pub postal_code: Option<String>,
    pub source_text: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeVariant {
    pub width_mm: u32,
    pub height_mm: u32,
}

static PAIR_EXPR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{1,4})\s*[x\u{00d7}*]\s*(\d{1,4})").expect("hardwired pattern"));
static BARE_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,5}").expect("hardwired pattern"));

/// Normalizes collaborator quantity wording into something the expression
/// parser accepts: `"3 x 50"` stays a pair, `"100pcs"` drops the unit, and
/// anything without a number quotes as a single piece.
pub fn normalize_quantity_expr(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(caps) = PAIR_EXPR.captures(trimmed) {
        return format!("{}x{}", &caps[1], &caps[2]);
    }
    if let Some(m) = BARE_COUNT.find(trimmed) {
        return m.as_str().to_owned();
    }
    DEFAULT_QUANTITY_EXPR.to_owned()
}

impl ExtractedFields {
    /// Material wording to price when no fan-out axis supplies one.
    pub fn base_material(&self) -> String {
        if self.material_variants.len() > 1 {
            if let Some(first) = self.material_variants.first() {
                return first.clone();
            }
        }
        self.material.clone().unwrap_or_else(|| DEFAULT_MATERIAL_ID.to_owned())
    }

    /// Unclamped base size; missing edges become zero and clamp upward at
    /// order construction.
    pub fn base_size(&self) -> (u32, u32) {
        if self.size_variants.len() > 1 {
            if let Some(first) = self.size_variants.first() {
                return (first.width_mm, first.height_mm);
            }
        }
        (self.width_mm.unwrap_or(0), self.height_mm.unwrap_or(0))
    }

    pub fn base_shape(&self) -> Shape {
        Shape::parse(self.shape.as_deref().unwrap_or("Rectangle"))
    }

    pub fn normalized_quantity_expr(&self) -> String {
        match self.quantity_expr.as_deref() {
            Some(raw) => normalize_quantity_expr(raw),
            None => DEFAULT_QUANTITY_EXPR.to_owned(),
        }
    }

    pub fn wants_individual_cut(&self) -> bool {
        self.cut_kind() == Some("individual-cut")
    }

    pub fn wants_die_cut(&self) -> bool {
        self.cut_kind() == Some("die-cut")
    }

    fn cut_kind(&self) -> Option<&str> {
        let kind = self.cut_type.as_deref()?.trim();
        match kind.to_ascii_lowercase().as_str() {
            "individual-cut" => Some("individual-cut"),
            "die-cut" => Some("die-cut"),
            _ => None,
        }
    }
}
