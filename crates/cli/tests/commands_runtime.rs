use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use pressquote_cli::commands::{cards, config, doctor, sticker};
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn sticker_prices_a_reference_enquiry_from_a_file() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir should be creatable");
        let path = dir.path().join("fields.json");
        fs::write(
            &path,
            r#"{"material":"mirrorkote","width_mm":50,"height_mm":30,"shape":"rectangle","quantity_expr":"100"}"#,
        )
        .expect("fields file should be writable");

        let result = sticker::run(path.to_str().expect("utf-8 temp path"), false);
        assert_eq!(result.exit_code, 0, "expected a priced quote, got: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["axis"], "Single");
        assert_eq!(payload["quotes"].as_array().map(Vec::len), Some(1));
        assert_eq!(payload["quotes"][0]["total"], "26.30");
        assert_eq!(payload["quotes"][0]["surcharge_applied"], true);
        assert_eq!(payload["grand_total"], "26.30");
        assert_eq!(payload["total_payable"], "26.30");
        assert!(payload["courier"].is_null(), "no courier wording, no courier line");
    });
}

#[test]
fn sticker_reports_unsupported_material_with_pricing_exit_code() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir should be creatable");
        let path = dir.path().join("fields.json");
        fs::write(
            &path,
            r#"{"material":"granite","width_mm":50,"height_mm":30,"quantity_expr":"100"}"#,
        )
        .expect("fields file should be writable");

        let result = sticker::run(path.to_str().expect("utf-8 temp path"), false);
        assert_eq!(result.exit_code, 4, "expected pricing failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "sticker");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "unsupported_material");
    });
}

#[test]
fn sticker_missing_input_file_is_an_input_error() {
    with_env(&[], || {
        let result = sticker::run("/no/such/fields.json", false);
        assert_eq!(result.exit_code, 3, "expected input failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "input_read");
        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.contains("/no/such/fields.json"), "message should name the path");
    });
}

#[test]
fn sticker_rejects_malformed_fields_json() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir should be creatable");
        let path = dir.path().join("fields.json");
        fs::write(&path, "{not json").expect("fields file should be writable");

        let result = sticker::run(path.to_str().expect("utf-8 temp path"), false);
        assert_eq!(result.exit_code, 3, "expected input failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "input_parse");
    });
}

#[test]
fn cards_text_order_prices_shared_back_at_the_combined_pack() {
    with_env(&[], || {
        let result = cards::run(None, Some("2 names x 100pcs double sided"), false);
        assert_eq!(result.exit_code, 0, "expected a priced quote, got: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["boxes"].as_array().map(Vec::len), Some(2));
        assert_eq!(payload["boxes"][0]["pack"], 100);
        assert_eq!(payload["boxes"][0]["front"], "23.00");
        assert_eq!(payload["shared_back"]["combined_pack"], 200);
        assert_eq!(payload["shared_back"]["back_increment"], "41.00");
        assert_eq!(payload["total"], "87.00");
    });
}

#[test]
fn cards_file_order_rounds_up_to_the_billing_pack() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir should be creatable");
        let path = dir.path().join("order.json");
        fs::write(&path, r#"{"boxes":[{"quantity":250}]}"#).expect("order file should be writable");

        let result = cards::run(Some(path.to_str().expect("utf-8 temp path")), None, false);
        assert_eq!(result.exit_code, 0, "expected a priced quote, got: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["boxes"][0]["quantity_requested"], 250);
        assert_eq!(payload["boxes"][0]["pack"], 300);
        assert_eq!(payload["total"], "56.00");
        assert_eq!(payload["surcharge_applied"], false);
        assert!(payload["shared_back"].is_null());
    });
}

#[test]
fn cards_rejects_both_input_and_text() {
    with_env(&[], || {
        let result = cards::run(Some("order.json"), Some("500 cards"), false);
        assert_eq!(result.exit_code, 3, "expected input failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "cards");
        assert_eq!(payload["error_class"], "input_conflict");
    });
}

#[test]
fn cards_requires_an_input_source() {
    with_env(&[], || {
        let result = cards::run(None, None, false);
        assert_eq!(result.exit_code, 3, "expected input failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "input_missing");
    });
}

#[test]
fn config_lists_defaults_with_sources() {
    with_env(&[], || {
        let output = config::run();
        assert!(output.starts_with("effective config (source precedence: env > file > default):"));
        assert!(output.contains("- logging.level = info (source: default)"));
        assert!(output.contains("- logging.format = Compact (source: default)"));
        assert!(output.contains("- display.currency = SGD (source: default)"));
        assert!(output.contains("- courier.default_fee = 12.00 (source: default)"));
    });
}

#[test]
fn config_attributes_env_overrides() {
    with_env(&[("PRESSQUOTE_DISPLAY_CURRENCY", "USD")], || {
        let output = config::run();
        assert!(
            output.contains("- display.currency = USD (source: env (PRESSQUOTE_DISPLAY_CURRENCY))"),
            "env override should be attributed, got: {output}"
        );
        assert!(output.contains("- logging.level = info (source: default)"));
    });
}

#[test]
fn config_attributes_short_form_env_aliases() {
    with_env(&[("PRESSQUOTE_LOG_LEVEL", "debug")], || {
        let output = config::run();
        assert!(
            output.contains("- logging.level = debug (source: env (PRESSQUOTE_LOG_LEVEL))"),
            "alias override should be attributed, got: {output}"
        );
    });
}

#[test]
fn doctor_json_reports_all_checks_passing() {
    with_env(&[], || {
        let output = doctor::run(true);
        let report = parse_payload(&output);
        assert_eq!(report["overall_status"], "pass");

        let checks = report["checks"].as_array().expect("checks array");
        assert_eq!(checks.len(), 4);
        assert!(checks.iter().all(|check| check["status"] == "pass"));

        let names: Vec<&str> = checks.iter().filter_map(|check| check["name"].as_str()).collect();
        assert_eq!(names, ["config_validation", "sticker_pricing", "card_pricing", "courier_zones"]);
    });
}

#[test]
fn doctor_human_output_lists_each_check() {
    with_env(&[], || {
        let output = doctor::run(false);
        assert!(output.starts_with("doctor: all readiness checks passed"));
        assert!(output.contains("- [ok] config_validation:"));
        assert!(output.contains("- [ok] sticker_pricing:"));
        assert!(output.contains("- [ok] card_pricing:"));
        assert!(output.contains("- [ok] courier_zones:"));
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "PRESSQUOTE_LOGGING_LEVEL",
        "PRESSQUOTE_LOGGING_FORMAT",
        "PRESSQUOTE_LOG_LEVEL",
        "PRESSQUOTE_LOG_FORMAT",
        "PRESSQUOTE_DISPLAY_CURRENCY",
        "PRESSQUOTE_COURIER_DEFAULT_FEE",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
