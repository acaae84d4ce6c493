//! Canned DOX payloads for workflow tests

use serde_json::{json, Value};

pub const JOB_ID: &str = "5a8e2b1c-job";
pub const ACCESS_TOKEN: &str = "test-token";
pub const FAKE_PDF: &[u8] = b"%PDF-1.4\n% fake label\n%%EOF";

/// Extraction result for a purchase order with five line items.
pub fn purchase_order_result() -> Value {
    let line_items: Vec<Value> = (1..=5)
        .map(|n| {
            json!([
                {"name": "description", "value": format!("Part {n}")},
                {"name": "quantity", "value": n},
                {"name": "unitPrice", "value": "20.00"}
            ])
        })
        .collect();

    json!({
        "status": "DONE",
        "id": JOB_ID,
        "extraction": {
            "headerFields": [
                {"name": "senderName", "value": "Acme", "confidence": 0.97},
                {"name": "senderAddress", "value": "12 MG Road"},
                {"name": "senderCity", "value": "Pune"},
                {"name": "senderPostalCode", "value": "411001"},
                {"name": "senderCountryCode", "value": "IN"},
                {"name": "senderEmail", "value": "orders@acme.in"},
                {"name": "documentNumber", "value": "PO-1"},
                {"name": "documentDate", "value": "2024-03-18"},
                {"name": "netAmount", "value": 100},
                {"name": "currencyCode", "value": "INR"}
            ],
            "lineItems": line_items
        }
    })
}

pub fn clients_payload() -> Value {
    json!({
        "payload": [
            {"clientId": "default", "clientName": "Default Client"},
            {"clientId": "warehouse-2", "clientName": "Warehouse 2"}
        ]
    })
}
