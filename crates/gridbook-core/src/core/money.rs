// crates/gridbook-core/src/core/money.rs
// ============================================================================
// Module: Price Arithmetic
// Description: Decimal price parsing and recursive service totals.
// Purpose: Derive order totals from service selections without float drift.
// Dependencies: bigdecimal, serde_json
// ============================================================================

//! ## Overview
//! Service prices arrive as strings taken from spreadsheet cells, sometimes
//! with a comma decimal separator. Totals are computed with [`BigDecimal`]
//! so sums like `"10,50" + "5"` come out as exactly `15.50`. Each service may
//! carry nested related services whose prices are folded into the total.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use bigdecimal::rounding::RoundingMode;
use serde_json::Value;

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Sums the prices of the given services, recursing into each service's
/// `relatedServices` array. Entries that are not objects and prices that do
/// not parse as decimal numbers contribute zero.
#[must_use]
pub fn services_total(services: &[Value]) -> BigDecimal {
    let mut total = BigDecimal::from(0);
    for service in services {
        let Value::Object(fields) = service else {
            continue;
        };
        total += price_value(fields.get("price"));
        if let Some(Value::Array(related)) = fields.get("relatedServices") {
            total += services_total(related);
        }
    }
    total
}

/// Renders the total price of the given services with two decimal places.
#[must_use]
pub fn order_price(services: &[Value]) -> String {
    services_total(services).with_scale_round(2, RoundingMode::HalfUp).to_string()
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Extracts a decimal price from a single JSON value.
fn price_value(value: Option<&Value>) -> BigDecimal {
    match value {
        Some(Value::String(raw)) => parse_price(raw),
        Some(Value::Number(number)) => {
            BigDecimal::from_str(&number.to_string()).unwrap_or_else(|_| BigDecimal::from(0))
        }
        _ => BigDecimal::from(0),
    }
}

/// Parses a price string, accepting a comma as the decimal separator.
/// Unparsable input yields zero.
fn parse_price(raw: &str) -> BigDecimal {
    let normalized = raw.replace(',', ".");
    BigDecimal::from_str(normalized.trim()).unwrap_or_else(|_| BigDecimal::from(0))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
