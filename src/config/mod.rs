use std::path::PathBuf;

use garde::Validate;
use serde::Deserialize;

/// Printer densities (dots per millimetre) Labelary can render.
const SUPPORTED_DPMM: [u32; 4] = [6, 8, 12, 24];

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppConfig {
    /// OAuth client ID for the DOX service key
    #[garde(length(min = 1))]
    pub dox_client_id: String,

    /// OAuth client secret for the DOX service key
    #[garde(length(min = 1))]
    pub dox_client_secret: String,

    /// Token endpoint (e.g., "https://<subdomain>.authentication.<region>.hana.ondemand.com/oauth/token")
    #[garde(length(min = 1))]
    pub dox_token_url: String,

    /// Document jobs endpoint used for submission and status checks
    #[garde(length(min = 1))]
    pub dox_api_url: String,

    /// Service base URL (clients listing and job results)
    #[garde(length(min = 1))]
    pub dox_base_url: String,

    /// Extraction schema applied to submitted purchase orders
    #[garde(length(min = 1))]
    pub dox_schema_id: String,

    /// Payload encoded in the label's QR code
    #[garde(skip)]
    pub qr_data: String,

    /// Labelary API host
    #[serde(default = "default_labelary_url")]
    #[garde(length(min = 1))]
    pub labelary_url: String,

    /// Purchase order document to upload
    #[serde(default = "default_document_path")]
    #[garde(skip)]
    pub document_path: PathBuf,

    /// Where the rendered PDF is written (overwritten on every run)
    #[serde(default = "default_output_path")]
    #[garde(skip)]
    pub output_path: PathBuf,

    /// Seconds between job status checks
    #[serde(default = "default_poll_interval_secs")]
    #[garde(range(min = 1, max = 300))]
    pub poll_interval_secs: u64,

    /// Upper bound on status checks. Unset means poll until the job finishes.
    #[serde(default)]
    #[garde(custom(at_least_one_attempt))]
    pub max_poll_attempts: Option<u32>,

    /// Skip the diagnostic client listing before submission
    #[serde(default)]
    #[garde(skip)]
    pub skip_client_list: bool,

    #[serde(default = "default_label_dpmm")]
    #[garde(custom(supported_dpmm))]
    pub label_dpmm: u32,

    /// Label width in inches
    #[serde(default = "default_label_width_in")]
    #[garde(range(min = 0.5, max = 15.0))]
    pub label_width_in: f64,

    /// Label height in inches
    #[serde(default = "default_label_height_in")]
    #[garde(range(min = 0.5, max = 15.0))]
    pub label_height_in: f64,
}

fn default_labelary_url() -> String {
    "http://api.labelary.com".to_string()
}

fn default_document_path() -> PathBuf {
    PathBuf::from("Purchase.txt")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("label.pdf")
}

fn default_poll_interval_secs() -> u64 {
    3
}

fn default_label_dpmm() -> u32 {
    8
}

fn default_label_width_in() -> f64 {
    4.0
}

fn default_label_height_in() -> f64 {
    6.0
}

fn supported_dpmm(value: &u32, _ctx: &()) -> garde::Result {
    if SUPPORTED_DPMM.contains(value) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "unsupported print density {value} dpmm (expected one of {SUPPORTED_DPMM:?})"
        )))
    }
}

fn at_least_one_attempt(value: &Option<u32>, _ctx: &()) -> garde::Result {
    match value {
        Some(0) => Err(garde::Error::new("must allow at least one status check")),
        _ => Ok(()),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config: Self = envy::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Build from explicit key/value pairs (variable names as in the environment).
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::from_iter(pairs)?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing or malformed environment variable: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] garde::Report),
}
