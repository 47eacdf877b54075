use serde::{Deserialize, Serialize};

use crate::errors::QuoteError;

/// Parsed `"3x50+100"`-style quantity expression. `qty` is the total piece
/// count, `designs` how many distinct artworks it implies, and `display` the
/// normalized wording shown back to the customer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuantity {
    pub qty: u32,
    pub designs: u32,
    pub extra_count: u32,
    pub display: String,
}

/// Accepts `+`-joined terms where each term is either a bare count or a
/// `designs*count` product. `x`/`X` read as `*`, whitespace is ignored.
/// A multiplied term contributes its left factor to the design count, a
/// bare term contributes one design.
pub fn parse_quantity_expr(expr: &str) -> Result<ParsedQuantity, QuoteError> {
    let normalized: String = expr
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == 'x' || c == 'X' { '*' } else { c })
        .collect();

    if normalized.is_empty() {
        return Err(invalid(expr, "expression is empty"));
    }

    let mut qty: u32 = 0;
    let mut designs: u32 = 0;

    for term in normalized.split('+') {
        if term.is_empty() {
            return Err(invalid(expr, "expression has an empty term"));
        }

        let mut factors = term.split('*');
        let first = factors.next().unwrap_or_default();
        match (factors.next(), factors.next()) {
            (None, _) => {
                let count = parse_factor(expr, term, first)?;
                qty = add(expr, qty, count)?;
                designs = add(expr, designs, 1)?;
            }
            (Some(second), None) => {
                let left = parse_factor(expr, term, first)?;
                let right = parse_factor(expr, term, second)?;
                let product = left
                    .checked_mul(right)
                    .ok_or_else(|| invalid(expr, "quantity out of range"))?;
                qty = add(expr, qty, product)?;
                designs = add(expr, designs, left)?;
            }
            (Some(_), Some(_)) => {
                return Err(invalid(expr, &format!("term `{term}` has too many multipliers")));
            }
        }
    }

    if qty == 0 {
        return Err(invalid(expr, "total quantity must be positive"));
    }

    Ok(ParsedQuantity {
        qty,
        designs,
        extra_count: designs.saturating_sub(1),
        display: normalized.replace('*', " X "),
    })
}

fn parse_factor(expr: &str, term: &str, factor: &str) -> Result<u32, QuoteError> {
    factor
        .parse::<u32>()
        .map_err(|_| invalid(expr, &format!("term `{term}` is not a number")))
}

fn add(expr: &str, total: u32, amount: u32) -> Result<u32, QuoteError> {
    total.checked_add(amount).ok_or_else(|| invalid(expr, "quantity out of range"))
}

fn invalid(expr: &str, reason: &str) -> QuoteError {
    QuoteError::InvalidQuantity { expr: expr.to_owned(), reason: reason.to_owned() }
}
