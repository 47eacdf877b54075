use pressquote_core::config::{AppConfig, LoadOptions};
use pressquote_core::domain::order::{OrderFlags, OrderSpec, Shape};
use pressquote_core::pricing::cards::{calc_card_quote, CardBox, CardOrder};
use pressquote_core::pricing::delivery::courier_fee;
use pressquote_core::pricing::sticker::price_sticker;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let checks = vec![
        check_config(),
        check_sticker_pricing(),
        check_card_pricing(),
        check_courier_zones(),
    ];

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_config() -> DoctorCheck {
    match AppConfig::load(LoadOptions::default()) {
        Ok(_) => DoctorCheck {
            name: "config_validation",
            status: CheckStatus::Pass,
            details: "configuration loaded and validated".to_string(),
        },
        Err(error) => DoctorCheck {
            name: "config_validation",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn check_sticker_pricing() -> DoctorCheck {
    let reference = OrderSpec::new(
        50,
        30,
        Shape::Rectangle,
        "mirrorkote",
        "100",
        false,
        false,
        OrderFlags::default(),
    );

    match price_sticker(&reference) {
        Ok(quote) if quote.total == Decimal::new(2630, 2) && quote.surcharge_applied => {
            DoctorCheck {
                name: "sticker_pricing",
                status: CheckStatus::Pass,
                details: "50x30 mirrorkote reference order priced at 26.30".to_string(),
            }
        }
        Ok(quote) => DoctorCheck {
            name: "sticker_pricing",
            status: CheckStatus::Fail,
            details: format!("reference order priced at {} instead of 26.30", quote.total),
        },
        Err(error) => DoctorCheck {
            name: "sticker_pricing",
            status: CheckStatus::Fail,
            details: format!("reference order failed to price: {error}"),
        },
    }
}

fn check_card_pricing() -> DoctorCheck {
    let reference = CardOrder { boxes: vec![CardBox::of(250)], has_back: false };

    match calc_card_quote(&reference) {
        Ok(quote)
            if quote.total == Decimal::new(5600, 2) && quote.boxes[0].pack == 300 =>
        {
            DoctorCheck {
                name: "card_pricing",
                status: CheckStatus::Pass,
                details: "250-card reference order billed as the 300 pack at 56.00".to_string(),
            }
        }
        Ok(quote) => DoctorCheck {
            name: "card_pricing",
            status: CheckStatus::Fail,
            details: format!("reference order priced at {} instead of 56.00", quote.total),
        },
        Err(error) => DoctorCheck {
            name: "card_pricing",
            status: CheckStatus::Fail,
            details: format!("reference order failed to price: {error}"),
        },
    }
}

fn check_courier_zones() -> DoctorCheck {
    let line = courier_fee("460001");

    if line.fee == Decimal::new(1000, 2) && line.postal_prefix == "46" {
        DoctorCheck {
            name: "courier_zones",
            status: CheckStatus::Pass,
            details: "postal prefix 46 resolves to the 10.00 zone".to_string(),
        }
    } else {
        DoctorCheck {
            name: "courier_zones",
            status: CheckStatus::Fail,
            details: format!("postal prefix {} resolved to {}", line.postal_prefix, line.fee),
        }
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
