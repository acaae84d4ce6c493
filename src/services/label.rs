//! Purchase-order shipping label layout.
//!
//! Maps extraction header fields and line items onto a fixed 4x6 layout:
//! sender block, PO summary, up to three item lines, a Code 128 barcode of
//! the PO number and a QR code. Missing fields fall back to placeholders so
//! rendering never fails.

use crate::models::extraction::{ExtractionResult, FieldMap};
use crate::models::label::{LabelDescription, LabelDirective};

/// Item lines that fit between the header and the barcodes.
pub const MAX_LINE_ITEMS: usize = 3;

const LEFT_MARGIN: u32 = 40;
const ITEM_INDENT: u32 = 60;
const RULE_WIDTH: u32 = 700;
const ITEMS_TOP: u32 = 320;
const ITEM_STEP: u32 = 35;
const CODES_TOP: u32 = 450;
const QR_LEFT: u32 = 500;

const CURRENCY_SYMBOL: &str = "₹";
const MISSING: &str = "N/A";

/// Accumulates directives in print order.
#[derive(Debug, Default)]
pub struct LabelBuilder {
    directives: Vec<LabelDirective>,
}

impl LabelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, directive: LabelDirective) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn font(self, height: u32) -> Self {
        self.push(LabelDirective::Font { name: '0', height })
    }

    pub fn text(self, x: u32, y: u32, content: impl Into<String>) -> Self {
        self.push(LabelDirective::Text {
            x,
            y,
            content: content.into(),
        })
    }

    pub fn rule(self, x: u32, y: u32) -> Self {
        self.push(LabelDirective::Rule {
            x,
            y,
            width: RULE_WIDTH,
            height: 2,
            thickness: 2,
        })
    }

    pub fn build(self) -> LabelDescription {
        LabelDescription::new(self.directives)
    }
}

/// Build the shipping label for an extraction result.
pub fn render_label(result: &ExtractionResult, qr_payload: &str) -> LabelDescription {
    let header = FieldMap::new(&result.extraction.header_fields);
    let field = |name: &str| header.get_or(name, "");

    let sender_line = format!(
        "{}, {} {}, {}",
        field("senderAddress"),
        field("senderCity"),
        field("senderPostalCode"),
        field("senderCountryCode"),
    );
    let document_number = field("documentNumber");

    let mut builder = LabelBuilder::new()
        .push(LabelDirective::Start)
        .push(LabelDirective::Encoding(28))
        // Sender
        .font(30)
        .text(LEFT_MARGIN, 40, header.get_or("senderName", MISSING))
        .text(LEFT_MARGIN, 75, sender_line)
        .text(LEFT_MARGIN, 110, field("senderEmail"))
        // PO summary
        .font(28)
        .rule(LEFT_MARGIN, 155)
        .text(LEFT_MARGIN, 170, format!("PO Number: {document_number}"))
        .text(LEFT_MARGIN, 200, format!("Date: {}", field("documentDate")))
        .text(
            LEFT_MARGIN,
            230,
            format!(
                "Total: {CURRENCY_SYMBOL}{} {}",
                field("netAmount"),
                field("currencyCode")
            ),
        )
        .rule(LEFT_MARGIN, 270)
        .text(LEFT_MARGIN, 285, "Items:");

    let line_items = &result.extraction.line_items;
    if line_items.len() > MAX_LINE_ITEMS {
        tracing::debug!(
            total = line_items.len(),
            printed = MAX_LINE_ITEMS,
            "Line items truncated to fit label"
        );
    }

    let mut y = ITEMS_TOP;
    for group in line_items.iter().take(MAX_LINE_ITEMS) {
        let item = FieldMap::new(group);
        builder = builder.text(
            ITEM_INDENT,
            y,
            format!(
                "• {} | Qty: {} | {CURRENCY_SYMBOL}{}",
                item.get_or("description", MISSING),
                item.get_or("quantity", MISSING),
                item.get_or("unitPrice", MISSING),
            ),
        );
        y += ITEM_STEP;
    }

    builder
        .push(LabelDirective::Barcode128 {
            x: LEFT_MARGIN,
            y: CODES_TOP,
            module_width: 2,
            height: 80,
            data: document_number,
        })
        .push(LabelDirective::QrCode {
            x: QR_LEFT,
            y: CODES_TOP,
            magnification: 6,
            data: qr_payload.to_string(),
        })
        .push(LabelDirective::End)
        .build()
}
