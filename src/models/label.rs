use std::fmt;

/// One positioned element of a ZPL label.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelDirective {
    /// `^XA`
    Start,
    /// `^CI` character set; 28 is UTF-8.
    Encoding(u32),
    /// `^CF` default font and height for subsequent text fields.
    Font { name: char, height: u32 },
    Text { x: u32, y: u32, content: String },
    /// `^GB` graphic box, used as a horizontal rule.
    Rule {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        thickness: u32,
    },
    /// `^BC` Code 128 with the human-readable line printed below.
    Barcode128 {
        x: u32,
        y: u32,
        module_width: u32,
        height: u32,
        data: String,
    },
    /// `^BQ` QR code, model 2.
    QrCode {
        x: u32,
        y: u32,
        magnification: u32,
        data: String,
    },
    /// `^XZ`
    End,
}

impl LabelDirective {
    fn write_zpl(&self, out: &mut String) {
        use std::fmt::Write;

        // Writing into a String cannot fail.
        let _ = match self {
            LabelDirective::Start => writeln!(out, "^XA"),
            LabelDirective::Encoding(charset) => writeln!(out, "^CI{charset}"),
            LabelDirective::Font { name, height } => writeln!(out, "^CF{name},{height}"),
            LabelDirective::Text { x, y, content } => {
                writeln!(out, "^FO{x},{y}^FD{content}^FS")
            }
            LabelDirective::Rule {
                x,
                y,
                width,
                height,
                thickness,
            } => writeln!(out, "^FO{x},{y}^GB{width},{height},{thickness}^FS"),
            LabelDirective::Barcode128 {
                x,
                y,
                module_width,
                height,
                data,
            } => writeln!(out, "^FO{x},{y}^BY{module_width}\n^BCN,{height},Y,N,N\n^FD{data}^FS"),
            // "LA,": error correction level L, automatic input mode.
            LabelDirective::QrCode {
                x,
                y,
                magnification,
                data,
            } => writeln!(out, "^FO{x},{y}\n^BQN,2,{magnification}\n^FDLA,{data}^FS"),
            LabelDirective::End => write!(out, "^XZ"),
        };
    }
}

/// A complete label as an ordered list of directives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelDescription {
    directives: Vec<LabelDirective>,
}

impl LabelDescription {
    pub fn new(directives: Vec<LabelDirective>) -> Self {
        Self { directives }
    }

    pub fn directives(&self) -> &[LabelDirective] {
        &self.directives
    }

    /// Serialise to ZPL II text.
    pub fn to_zpl(&self) -> String {
        let mut out = String::new();
        for directive in &self.directives {
            directive.write_zpl(&mut out);
        }
        out
    }
}

impl fmt::Display for LabelDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_zpl())
    }
}
