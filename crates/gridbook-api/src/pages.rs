// crates/gridbook-api/src/pages.rs
// ============================================================================
// Module: HTML Pages
// Description: Server-rendered pages for checkout and service status checks.
// Purpose: Render order payment, confirmation, and status HTML responses.
// Dependencies: gridbook-core, serde_json, url
// ============================================================================

//! ## Overview
//! The checkout flow and the status check are served as plain HTML. Order
//! fields come straight from the backing sheet and are untrusted: every value
//! is HTML-escaped before interpolation and the checkout form action is
//! percent-encoded per path segment.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gridbook_core::Record;
use serde_json::Value;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fixed deposit amount presented on the payment form.
const DEPOSIT_AMOUNT: &str = "100.00";

/// Payment purpose submitted with the deposit form.
const DEPOSIT_PURPOSE: &str = "Deposit";

/// Stylesheet for the payment form page.
const PAYMENT_PAGE_STYLE: &str = "
      body { font-family: system-ui, sans-serif; background: #f5f7fa; margin: 0; color: #222; }
      .order-block {
        background: #fff;
        border-radius: 14px;
        padding: 28px 20px 20px;
        box-shadow: 0 2px 16px #0002;
        max-width: 420px;
        margin: 4vw auto;
        min-height: 80vh;
      }
      h1 { font-size: 1.25em; font-weight: 700; margin-top: 0; margin-bottom: 18px; }
      .field { margin-bottom: 10px; }
      label { color: #555; font-weight: 600; min-width: 110px; display: inline-block; }
      .val { color: #1a2232; margin-left: 2px; }
      .services { margin: 15px 0 12px 0; padding-left: 0; }
      .services li { font-size: 1em; margin-bottom: 8px; font-weight: 500; }
      .services li strong { font-size: 1em; }
      .services ul { margin-top: 2px; margin-bottom: 2px; padding-left: 19px; }
      .pay-btn {
        width: 100%;
        padding: 14px 0;
        background: linear-gradient(90deg, #1a7cff, #51bbfe);
        color: #fff; border: none; border-radius: 8px;
        font-size: 1.1em; cursor: pointer; margin-top: 22px; font-weight: 600;
        box-shadow: 0 1px 8px #1a7cff22;
        transition: background 0.15s;
      }
      .pay-btn:hover { background: #155bc1; }
      .footnote {
        margin-top: 18px; color: #888; font-size: 0.97em; text-align: center;
      }
      @media (max-width: 560px) {
        .order-block { max-width: 97vw; min-height: auto; padding: 18px 2vw 12px 2vw; }
        body { padding: 0; }
      }
";

/// Stylesheet for the status page.
const STATUS_PAGE_STYLE: &str = "
      body { font-family: sans-serif; padding: 40px; background: #fafbfc; color: #21262c; }
      h1 { font-size: 2em; }
";

// ============================================================================
// SECTION: Pages
// ============================================================================

/// Renders the service status page.
#[must_use]
pub fn status_page() -> String {
    format!(
        r#"<html>
  <head>
    <title>API status</title>
    <style>{STATUS_PAGE_STYLE}</style>
  </head>
  <body>
    <h1>Hello, Gridbook is working correctly.</h1>
    <p>If you see this page, the backend server is up and responding to requests.</p>
  </body>
</html>"#
    )
}

/// Renders the deposit payment form for an order.
#[must_use]
pub fn payment_form_page(order: &Record) -> String {
    let session_id = display_text(order.get("sessionId"));
    let action = checkout_action(&session_id);
    let mut fields = String::new();
    fields.push_str(&field_row("Order", &session_id));
    fields.push_str(&field_row("Name", &display_text(order.get("name"))));
    fields.push_str(&field_row("Phone", &display_text(order.get("phone"))));
    fields.push_str(&field_row("Slot", &display_text(order.get("slot"))));
    fields.push_str(&field_row("Order Details", &display_text(order.get("details"))));
    fields.push_str(&field_row("Full Price", &format!("${}", display_text(order.get("price")))));
    fields.push_str(&field_row("Status", &display_text(order.get("status"))));
    let services = services_list_html(order.get("services"));
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Order Payment</title>
    <style>{PAYMENT_PAGE_STYLE}</style>
  </head>
  <body>
    <div class="order-block">
      <h1>Pay the deposit for your order</h1>
      {fields}
      <div class="field"><label>Services:</label></div>
      {services}
      <form method="POST" action="{action}">
        <input type="hidden" name="amount" value="{DEPOSIT_AMOUNT}" />
        <input type="hidden" name="purpose" value="{DEPOSIT_PURPOSE}" />
        <button type="submit" class="pay-btn">Pay ${DEPOSIT_AMOUNT} Deposit</button>
      </form>
      <div class="footnote">
        After payment, the deposit will be credited to your order.
      </div>
    </div>
  </body>
</html>"#
    )
}

/// Renders the payment confirmation page for a paid order.
#[must_use]
pub fn payment_success_page(order: &Record) -> String {
    let session_id = escape_html(&display_text(order.get("sessionId")));
    let status = escape_html(&display_text(order.get("status")));
    format!(
        r#"<html>
  <body>
    <h1>Payment successful</h1>
    <p>Thank you for your order!</p>
    <p>Order ID: <b>{session_id}</b></p>
    <p>Status: <b>{status}</b></p>
  </body>
</html>"#
    )
}

/// Renders the missing-order page shown by the payment form route.
#[must_use]
pub fn order_not_found_page() -> String {
    "<html><body><h1>Order not found</h1></body></html>".to_string()
}

/// Renders the missing-order page shown by the payment confirmation route.
#[must_use]
pub fn order_not_found_support_page() -> String {
    r"<html>
  <body>
    <h1>Order not found</h1>
    <p>We could not find your order. Please check the link or contact support.</p>
  </body>
</html>"
        .to_string()
}

/// Renders the backend failure page shown by the payment form route.
#[must_use]
pub fn server_error_page() -> String {
    "<html><body><h1>Internal server error</h1></body></html>".to_string()
}

/// Renders the backend failure page shown by the payment confirmation route.
#[must_use]
pub fn server_error_apology_page() -> String {
    r"<html>
  <body>
    <h1>Internal server error</h1>
    <p>Sorry, something went wrong. Please try again later.</p>
  </body>
</html>"
        .to_string()
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Renders the nested services list for the payment form.
fn services_list_html(services: Option<&Value>) -> String {
    let Some(Value::Array(services)) = services else {
        return empty_services_html();
    };
    if services.is_empty() {
        return empty_services_html();
    }
    let mut items = String::new();
    for service in services {
        let name = escape_html(&display_text(service.get("name")));
        let price = escape_html(&display_text(service.get("price")));
        items.push_str(&format!("<li><strong>{name}</strong> &mdash; ${price}"));
        if let Some(Value::Array(related)) = service.get("relatedServices")
            && !related.is_empty()
        {
            items.push_str("<ul>");
            for entry in related {
                let related_name = escape_html(&display_text(entry.get("name")));
                let related_price = escape_html(&display_text(entry.get("price")));
                items.push_str(&format!("<li>{related_name} &mdash; ${related_price}</li>"));
            }
            items.push_str("</ul>");
        }
        items.push_str("</li>");
    }
    format!(r#"<ul class="services">{items}</ul>"#)
}

/// Placeholder markup when an order carries no services.
fn empty_services_html() -> String {
    r#"<div style="color:#aaa">No services</div>"#.to_string()
}

/// Renders a single labeled field row.
fn field_row(label: &str, value: &str) -> String {
    let value = escape_html(value);
    format!(r#"<div class="field"><label>{label}:</label> <span class="val">{value}</span></div>"#)
}

/// Builds the percent-encoded checkout form action for a session ID.
fn checkout_action(session_id: &str) -> String {
    let Ok(mut action) = Url::parse("http://orders.invalid") else {
        return "/orders".to_string();
    };
    if let Ok(mut segments) = action.path_segments_mut() {
        segments.pop_if_empty().push("orders").push(session_id).push("checkout");
    }
    action.path().to_string()
}

/// Renders a field value for display, mirroring the plain cell rules.
fn display_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Escapes text for safe interpolation into HTML.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::use_debug,
        clippy::dbg_macro,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        reason = "Test-only output and panic-based assertions are permitted."
    )]

    use serde_json::json;

    use super::*;

    fn order() -> Record {
        let mut record = Record::new();
        record.set("sessionId", json!("s-1"));
        record.set("name", json!("Ann"));
        record.set("phone", json!("+1555"));
        record.set(
            "services",
            json!([
                { "name": "Trampoline", "price": "10,50", "relatedServices": [
                    { "name": "Socks", "price": "2.00" }
                ] },
                { "name": "Snack", "price": "5" }
            ]),
        );
        record.set("slot", json!("Mon 10:00"));
        record.set("price", json!("17.50"));
        record.set("status", json!("pending"));
        record.set("details", json!("two kids"));
        record
    }

    #[test]
    fn payment_form_lists_fields_and_deposit() {
        let page = payment_form_page(&order());
        assert!(page.contains("Pay the deposit for your order"));
        assert!(page.contains(r#"<span class="val">s-1</span>"#));
        assert!(page.contains(r#"<span class="val">$17.50</span>"#));
        assert!(page.contains(r#"name="amount" value="100.00""#));
        assert!(page.contains(r#"name="purpose" value="Deposit""#));
        assert!(page.contains("Pay $100.00 Deposit"));
        assert!(page.contains(r#"action="/orders/s-1/checkout""#));
        assert!(page.contains("After payment, the deposit will be credited to your order."));
    }

    #[test]
    fn payment_form_renders_nested_services() {
        let page = payment_form_page(&order());
        assert!(page.contains("<strong>Trampoline</strong> &mdash; $10,50"));
        assert!(page.contains("<li>Socks &mdash; $2.00</li>"));
        assert!(page.contains("<strong>Snack</strong> &mdash; $5"));
    }

    #[test]
    fn payment_form_without_services_shows_placeholder() {
        let mut record = order();
        record.set("services", json!([]));
        let page = payment_form_page(&record);
        assert!(page.contains("No services"));
    }

    #[test]
    fn sheet_values_are_escaped() {
        let mut record = order();
        record.set("name", json!("<script>alert(1)</script>"));
        let page = payment_form_page(&record);
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn checkout_action_encodes_path_segment() {
        assert_eq!(checkout_action("s 1/x"), "/orders/s%201%2Fx/checkout");
        assert_eq!(checkout_action("s-1"), "/orders/s-1/checkout");
    }

    #[test]
    fn success_page_names_order_and_status() {
        let mut record = order();
        record.set("status", json!("paid"));
        let page = payment_success_page(&record);
        assert!(page.contains("Payment successful"));
        assert!(page.contains("Order ID: <b>s-1</b>"));
        assert!(page.contains("Status: <b>paid</b>"));
    }

    #[test]
    fn missing_order_pages_share_the_headline() {
        assert!(order_not_found_page().contains("<h1>Order not found</h1>"));
        assert!(order_not_found_support_page().contains("<h1>Order not found</h1>"));
        assert!(order_not_found_support_page().contains("contact support"));
    }

    #[test]
    fn status_page_reports_backend_alive() {
        let page = status_page();
        assert!(page.contains("backend server is up and responding"));
    }
}
