//! Free-text cue scanners. These pull pricing hints out of raw enquiry
//! text: a quantity expression, transparency wording, and courier intent.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::order::OrderFlags;

static UNIT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(mm|cm|diam|diameter|gsm|pt|a\d\b)").expect("hardwired pattern"));
static PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,5})\s*[x*]\s*(\d{1,5})").expect("hardwired pattern"));
static DESIGNS_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,5})\s*designs?\s*[x*]\s*(\d{1,5})").expect("hardwired pattern")
});
static BARE_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,5})(?:\s*(?:pcs|pieces|pc))?\b").expect("hardwired pattern")
});
static TRANSPARENT_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\btransparent\b|\bclear\b|\bsee[-\s]?through\b").expect("hardwired pattern")
});
static WHITE_INK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bwhite\s*(?:ink|underlay|base|backing)\b").expect("hardwired pattern")
});
static COURIER_INTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)courier|delivery|send\s+to|ship\s+to").expect("hardwired pattern")
});

/// Scans text line by line for quantity wording and returns the best line
/// as a `+`-joined expression. Lines mentioning dimensions or paper specs
/// are skipped so `50mm x 30mm` never reads as fifty designs of thirty.
///
/// Scoring: each `N x M` pair counts two, each leftover bare count one;
/// the highest-scoring line wins and earlier lines win ties.
pub fn quantity_expr_from_text(text: &str) -> Option<String> {
    let normalized = text.to_lowercase().replace('\u{00d7}', "x");

    let mut best_expr = None;
    let mut best_score = -1i64;

    for raw in normalized.lines() {
        let line = raw.trim();
        if UNIT_LINE.is_match(line) {
            continue;
        }

        let mut parts: Vec<String> = Vec::new();
        let mut left: HashSet<u32> = HashSet::new();
        let mut right: HashSet<u32> = HashSet::new();
        let mut score = 0i64;

        for caps in PAIR.captures_iter(line) {
            let (a, b) = match (caps[1].parse::<u32>(), caps[2].parse::<u32>()) {
                (Ok(a), Ok(b)) => (a, b),
                _ => continue,
            };
            parts.push(format!("{a}x{b}"));
            left.insert(a);
            right.insert(b);
            score += 2;
        }

        // "3 designs x 100" reads as a pair even though the words separate
        // the numbers.
        for caps in DESIGNS_PAIR.captures_iter(line) {
            let (a, b) = match (caps[1].parse::<u32>(), caps[2].parse::<u32>()) {
                (Ok(a), Ok(b)) => (a, b),
                _ => continue,
            };
            if !left.contains(&a) || !right.contains(&b) {
                parts.push(format!("{a}x{b}"));
                score += 2;
            }
            left.insert(a);
            right.insert(b);
        }

        // Bounded at five digits on purpose: postal codes and phone
        // numbers must never read as counts.
        for caps in BARE_COUNT.captures_iter(line) {
            let n = match caps[1].parse::<u32>() {
                Ok(n) => n,
                Err(_) => continue,
            };
            if !left.contains(&n) && !right.contains(&n) {
                parts.push(n.to_string());
                score += 1;
            }
        }

        if !parts.is_empty() && score > best_score {
            best_expr = Some(parts.join("+"));
            best_score = score;
        }
    }

    best_expr
}

/// Transparency cues. White-ink wording implies a transparent substrate
/// even when the word "transparent" never appears.
pub fn detect_transparency(text: &str) -> OrderFlags {
    let t = text.to_lowercase();
    let has_white_ink = WHITE_INK.is_match(&t);
    OrderFlags {
        is_transparent: TRANSPARENT_WORD.is_match(&t) || has_white_ink,
        has_white_ink,
    }
}

pub fn wants_courier(text: &str) -> bool {
    COURIER_INTENT.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::{detect_transparency, quantity_expr_from_text, wants_courier};

    #[test]
    fn pairs_and_leftover_counts_join_into_one_expression() {
        assert_eq!(quantity_expr_from_text("7x50 plus 100 extra"), Some("7x50+100".to_owned()));
        assert_eq!(quantity_expr_from_text("3 x 100"), Some("3x100".to_owned()));
        assert_eq!(quantity_expr_from_text("200 pcs"), Some("200".to_owned()));
    }

    #[test]
    fn designs_wording_reads_as_a_pair() {
        assert_eq!(quantity_expr_from_text("3 designs x 100"), Some("3x100".to_owned()));
        // Already-captured pairs are not doubled by the designs pass.
        assert_eq!(quantity_expr_from_text("3x100, 3 designs x 100"), Some("3x100".to_owned()));
    }

    #[test]
    fn dimension_lines_are_skipped() {
        let text = "size: 50mm x 30mm\nqty: 3 x 100";
        assert_eq!(quantity_expr_from_text(text), Some("3x100".to_owned()));

        assert_eq!(quantity_expr_from_text("50mm x 30mm"), None);
        assert_eq!(quantity_expr_from_text("A4 90 gsm"), None);
    }

    #[test]
    fn the_highest_scoring_line_wins_and_earlier_lines_win_ties() {
        let text = "2 pcs\n7x50 and 100 more";
        assert_eq!(quantity_expr_from_text(text), Some("7x50+100".to_owned()));

        assert_eq!(quantity_expr_from_text("100\n200"), Some("100".to_owned()));
    }

    #[test]
    fn repeated_counts_accumulate() {
        assert_eq!(quantity_expr_from_text("100 and another 100"), Some("100+100".to_owned()));
    }

    #[test]
    fn wordy_text_yields_nothing() {
        assert_eq!(quantity_expr_from_text(""), None);
        assert_eq!(quantity_expr_from_text("just some stickers please"), None);
    }

    #[test]
    fn long_digit_runs_are_not_quantities() {
        assert_eq!(quantity_expr_from_text("please courier to 460001"), None);
        assert_eq!(quantity_expr_from_text("call 91234567 thanks"), None);
        assert_eq!(quantity_expr_from_text("deliver 200pcs to 460001"), Some("200".to_owned()));
    }

    #[test]
    fn multiplication_sign_reads_as_x() {
        assert_eq!(quantity_expr_from_text("3 \u{00d7} 100"), Some("3x100".to_owned()));
    }

    #[test]
    fn transparency_cues_are_detected() {
        let flags = detect_transparency("TRANSPARENT background please");
        assert!(flags.is_transparent);
        assert!(!flags.has_white_ink);

        let flags = detect_transparency("see-through label");
        assert!(flags.is_transparent);

        let flags = detect_transparency("clear sticker");
        assert!(flags.is_transparent);
    }

    #[test]
    fn white_ink_wording_implies_transparency() {
        let flags = detect_transparency("need White Ink behind the logo");
        assert!(flags.is_transparent);
        assert!(flags.has_white_ink);

        let flags = detect_transparency("white underlay");
        assert!(flags.has_white_ink);
    }

    #[test]
    fn partial_words_do_not_trigger_transparency() {
        let flags = detect_transparency("clearly labelled whiteboard stickers");
        assert!(!flags.is_transparent);
        assert!(!flags.has_white_ink);
    }

    #[test]
    fn courier_intent_is_case_insensitive() {
        assert!(wants_courier("please COURIER to our office"));
        assert!(wants_courier("delivery needed"));
        assert!(wants_courier("ship to 018936"));
        assert!(wants_courier("kindly send  to the warehouse"));
        assert!(!wants_courier("self collection at the shop"));
    }
}
