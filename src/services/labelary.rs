use std::path::{Path, PathBuf};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;

use crate::models::label::LabelDescription;

/// Printer density and label size sent to Labelary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelSpec {
    /// Dots per millimetre (8 dpmm = 203 dpi).
    pub dpmm: u32,
    /// Width in inches
    pub width: f64,
    /// Height in inches
    pub height: f64,
}

impl Default for LabelSpec {
    fn default() -> Self {
        Self {
            dpmm: 8,
            width: 4.0,
            height: 6.0,
        }
    }
}

impl LabelSpec {
    /// Path segment identifying printer and label size, e.g. `8dpmm/labels/4x6`.
    fn path(&self) -> String {
        format!(
            "{}dpmm/labels/{}x{}",
            self.dpmm,
            format_inches(self.width),
            format_inches(self.height)
        )
    }
}

/// Whole sizes print without a fractional part.
fn format_inches(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as u64)
    } else {
        format!("{value}")
    }
}

/// Client for the Labelary ZPL rendering API.
pub struct LabelaryClient {
    http: Client,
    base_url: String,
}

impl LabelaryClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Render a label to PDF bytes.
    pub async fn render_pdf(
        &self,
        label: &LabelDescription,
        spec: LabelSpec,
    ) -> Result<Vec<u8>, LabelaryError> {
        let url = format!("{}/v1/printers/{}/", self.base_url, spec.path());

        tracing::debug!(url = %url, "Rendering label");
        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/pdf")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(label.to_zpl().into_bytes())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LabelaryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Render a label and write the PDF to `output`, replacing any previous file.
    pub async fn render_to_file(
        &self,
        label: &LabelDescription,
        spec: LabelSpec,
        output: &Path,
    ) -> Result<usize, LabelaryError> {
        let pdf = self.render_pdf(label, spec).await?;

        tokio::fs::write(output, &pdf)
            .await
            .map_err(|source| LabelaryError::Io {
                path: output.to_path_buf(),
                source,
            })?;

        tracing::info!(path = %output.display(), bytes = pdf.len(), "PDF generated");
        Ok(pdf.len())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LabelaryError {
    #[error("Labelary request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Labelary returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
