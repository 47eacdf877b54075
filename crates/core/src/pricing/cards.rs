//! Name card pricing. Cards sell in 100-piece packs with a published
//! single-sided and double-sided rate per pack. An order is one or more
//! boxes (one name each); a double-sided order prints one shared back,
//! charged as the double-sided increment at the combined pack size.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::quote::{CardBoxLine, CardQuote, SharedBackLine};
use crate::errors::QuoteError;
use crate::pricing::{
    dollars, round_2dp, MINIMUM_ORDER_CENTS, SMALL_ORDER_SURCHARGE_CENTS,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardOrder {
    pub boxes: Vec<CardBox>,
    #[serde(default)]
    pub has_back: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardBox {
    pub quantity: u32,
    #[serde(default)]
    pub overrides: Option<CardBoxOverrides>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardBoxOverrides {
    pub front: Option<Decimal>,
}

impl CardBox {
    pub fn of(quantity: u32) -> Self {
        Self { quantity, overrides: None }
    }
}

pub trait CardPricing: Send + Sync {
    fn price(&self, order: &CardOrder) -> Result<CardQuote, QuoteError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DeterministicCardPricer;

impl CardPricing for DeterministicCardPricer {
    fn price(&self, order: &CardOrder) -> Result<CardQuote, QuoteError> {
        calc_card_quote(order)
    }
}

struct PackPrice {
    pack: u32,
    ss_cents: i64,
    ds_cents: i64,
}

/// Published rate card. The 1500 double-sided figure is the card's own
/// number, not 2x the single-sided rate.
const PACK_PRICES: [PackPrice; 20] = [
    PackPrice { pack: 100, ss_cents: 2_300, ds_cents: 4_600 },
    PackPrice { pack: 200, ss_cents: 4_100, ds_cents: 8_200 },
    PackPrice { pack: 300, ss_cents: 5_600, ds_cents: 11_200 },
    PackPrice { pack: 400, ss_cents: 6_800, ds_cents: 13_600 },
    PackPrice { pack: 500, ss_cents: 7_800, ds_cents: 15_600 },
    PackPrice { pack: 600, ss_cents: 9_360, ds_cents: 18_720 },
    PackPrice { pack: 700, ss_cents: 10_920, ds_cents: 21_840 },
    PackPrice { pack: 800, ss_cents: 12_480, ds_cents: 24_960 },
    PackPrice { pack: 900, ss_cents: 14_040, ds_cents: 28_080 },
    PackPrice { pack: 1_000, ss_cents: 15_600, ds_cents: 31_200 },
    PackPrice { pack: 1_100, ss_cents: 17_160, ds_cents: 34_320 },
    PackPrice { pack: 1_200, ss_cents: 18_720, ds_cents: 37_440 },
    PackPrice { pack: 1_300, ss_cents: 20_280, ds_cents: 40_560 },
    PackPrice { pack: 1_400, ss_cents: 21_840, ds_cents: 43_680 },
    PackPrice { pack: 1_500, ss_cents: 23_400, ds_cents: 46_880 },
    PackPrice { pack: 1_600, ss_cents: 24_960, ds_cents: 49_920 },
    PackPrice { pack: 1_700, ss_cents: 26_520, ds_cents: 53_040 },
    PackPrice { pack: 1_800, ss_cents: 28_080, ds_cents: 56_160 },
    PackPrice { pack: 1_900, ss_cents: 29_640, ds_cents: 59_280 },
    PackPrice { pack: 2_000, ss_cents: 31_200, ds_cents: 62_400 },
];

/// Rounds a requested count up to the pack it bills as. Counts past the
/// table bill as the largest pack.
fn pack_for(quantity: u32) -> &'static PackPrice {
    PACK_PRICES
        .iter()
        .find(|row| quantity <= row.pack)
        .unwrap_or(&PACK_PRICES[PACK_PRICES.len() - 1])
}

pub fn round_up_to_pack(quantity: u32) -> u32 {
    pack_for(quantity).pack
}

pub fn calc_card_quote(order: &CardOrder) -> Result<CardQuote, QuoteError> {
    if order.boxes.is_empty() {
        return Err(QuoteError::InvalidCardOrder { reason: "at least one box is required".into() });
    }

    let mut boxes = Vec::with_capacity(order.boxes.len());
    let mut subtotal_fronts = Decimal::ZERO;
    let mut combined_quantity: u32 = 0;

    for (i, card_box) in order.boxes.iter().enumerate() {
        if card_box.quantity == 0 {
            return Err(QuoteError::InvalidCardOrder {
                reason: format!("box {i} quantity must be positive"),
            });
        }

        let row = pack_for(card_box.quantity);
        let front = card_box
            .overrides
            .as_ref()
            .and_then(|o| o.front)
            .map_or_else(|| dollars(row.ss_cents), round_2dp);

        subtotal_fronts += front;
        combined_quantity = combined_quantity.saturating_add(card_box.quantity);
        boxes.push(CardBoxLine { quantity_requested: card_box.quantity, pack: row.pack, front });
    }

    let shared_back = order.has_back.then(|| {
        let row = pack_for(combined_quantity);
        SharedBackLine {
            combined_quantity_requested: combined_quantity,
            combined_pack: row.pack,
            back_increment: dollars(row.ds_cents - row.ss_cents),
        }
    });
    let back_total = shared_back.as_ref().map_or(Decimal::ZERO, |line| line.back_increment);

    let mut total = subtotal_fronts + back_total;
    let surcharge_applied = total < dollars(MINIMUM_ORDER_CENTS);
    if surcharge_applied {
        total += dollars(SMALL_ORDER_SURCHARGE_CENTS);
    }

    Ok(CardQuote {
        boxes,
        shared_back,
        subtotal_fronts,
        total: round_2dp(total),
        surcharge_applied,
    })
}

static NAMES_BY_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(\d+)\s*(?:names?|persons?|people|sets|boxes)\s*(?:x|\*)\s*(\d+)\s*(?:pcs|pieces|cards)?(?:\s*each)?\b",
    )
    .expect("hardwired pattern")
});
static COUNT_BY_NAMES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d+)\s*(?:pcs|pieces|cards)?\s*(?:x|\*)\s*(\d+)\s*(?:names?|persons?|people|sets|boxes)\b")
        .expect("hardwired pattern")
});
static PACK_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:[1-9]00|1[0-9]00|2000)\b").expect("hardwired pattern"));
static DOUBLE_SIDED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bdouble[\s-]*sided?\b",
        r"\b2[\s-]*side(?:s|d)?\b",
        r"\btwo[\s-]*side(?:s|d)?\b",
        r"\bduplex\b",
        r"\bfront\s*&?\s*back\b",
        r"\bfront\s*(?:/|and)\s*back\b",
        r"\bds\b",
        r"back\.(?:jpg|jpeg|png|pdf)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("hardwired pattern"))
    .collect()
});
static SINGLE_SIDED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bsingle[\s-]*sided?\b",
        r"\b1[\s-]*side(?:s|d)?\b",
        r"\bone[\s-]*side(?:s|d)?\b",
        r"\bfront\s*only\b",
        r"\bss\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("hardwired pattern"))
    .collect()
});
static FRONT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfront\b").expect("hardwired pattern"));
static BACK_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bback\b").expect("hardwired pattern"));

/// Reads a card order out of free text: box count and per-box quantity from
/// `"3 names x 100 each"` wording (either word order), otherwise standalone
/// pack-size tokens, otherwise a single 100 box. Sidedness comes from
/// single/double wording, with explicit single-sided wording winning.
pub fn parse_card_order(text: &str) -> CardOrder {
    let t = text.to_lowercase().replace('\u{00d7}', "x");

    let quantities = parse_box_quantities(&t);
    let mentions_double = DOUBLE_SIDED.iter().any(|rx| rx.is_match(&t))
        || (FRONT_WORD.is_match(&t) && BACK_WORD.is_match(&t));
    let mentions_single = SINGLE_SIDED.iter().any(|rx| rx.is_match(&t));
    let has_back = mentions_double && !mentions_single;

    CardOrder { boxes: quantities.into_iter().map(CardBox::of).collect(), has_back }
}

fn parse_box_quantities(t: &str) -> Vec<u32> {
    if let Some((count, each)) = names_times_quantity(t) {
        if count > 0 {
            // Off-table "each" counts fall back to the smallest pack.
            let pack = if each % 100 == 0 && (100..=2_000).contains(&each) { each } else { 100 };
            return vec![pack; count as usize];
        }
    }

    let packs: Vec<u32> = PACK_TOKEN
        .find_iter(t)
        .take(10)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    if !packs.is_empty() {
        return packs;
    }

    vec![100]
}

fn names_times_quantity(t: &str) -> Option<(u32, u32)> {
    if let Some(caps) = NAMES_BY_COUNT.captures(t) {
        let count = caps[1].parse().ok()?;
        let each = caps[2].parse().ok()?;
        return Some((count, each));
    }
    let caps = COUNT_BY_NAMES.captures(t)?;
    let each = caps[1].parse().ok()?;
    let count = caps[2].parse().ok()?;
    Some((count, each))
}
