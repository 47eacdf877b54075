use pressquote_core::config::{AppConfig, LoadOptions};
use pressquote_core::intake::fields::ExtractedFields;
use pressquote_core::QuoteBuilder;

use crate::commands::{read_input, render_document, CommandResult};

pub fn run(input: &str, pretty: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "sticker",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let raw = match read_input(input, "fields JSON") {
        Ok(raw) => raw,
        Err(error) => {
            return CommandResult::failure("sticker", "input_read", format!("{error:#}"), 3);
        }
    };

    let fields: ExtractedFields = match serde_json::from_str(&raw) {
        Ok(fields) => fields,
        Err(error) => {
            return CommandResult::failure(
                "sticker",
                "input_parse",
                format!("fields JSON did not match the expected shape: {error}"),
                3,
            );
        }
    };

    let builder = QuoteBuilder::default().with_courier_default_fee(config.courier.default_fee);
    let order_quote = match builder.build(&fields) {
        Ok(order_quote) => order_quote,
        Err(error) => {
            return CommandResult::failure("sticker", error.class(), error.to_string(), 4);
        }
    };

    tracing::info!(
        event_name = "quote.sticker.priced",
        variants = order_quote.quotes.len(),
        grand_total = %order_quote.grand_total,
        "sticker enquiry priced"
    );

    render_document("sticker", &order_quote, pretty)
}
