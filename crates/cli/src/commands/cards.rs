use pressquote_core::pricing::cards::{calc_card_quote, parse_card_order, CardOrder};

use crate::commands::{read_input, render_document, CommandResult};

pub fn run(input: Option<&str>, text: Option<&str>, pretty: bool) -> CommandResult {
    let order = match (input, text) {
        (Some(_), Some(_)) => {
            return CommandResult::failure(
                "cards",
                "input_conflict",
                "pass either --input or --text, not both",
                3,
            );
        }
        (None, None) => {
            return CommandResult::failure(
                "cards",
                "input_missing",
                "pass --input with an order JSON path or --text with an order description",
                3,
            );
        }
        (Some(input), None) => {
            let raw = match read_input(input, "card order JSON") {
                Ok(raw) => raw,
                Err(error) => {
                    return CommandResult::failure("cards", "input_read", format!("{error:#}"), 3);
                }
            };
            match serde_json::from_str::<CardOrder>(&raw) {
                Ok(order) => order,
                Err(error) => {
                    return CommandResult::failure(
                        "cards",
                        "input_parse",
                        format!("card order JSON did not match the expected shape: {error}"),
                        3,
                    );
                }
            }
        }
        (None, Some(text)) => parse_card_order(text),
    };

    let quote = match calc_card_quote(&order) {
        Ok(quote) => quote,
        Err(error) => {
            return CommandResult::failure("cards", error.class(), error.to_string(), 4);
        }
    };

    tracing::info!(
        event_name = "quote.cards.priced",
        boxes = quote.boxes.len(),
        total = %quote.total,
        "card order priced"
    );

    render_document("cards", &quote, pretty)
}
