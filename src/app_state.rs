use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::config::AppConfig;
use crate::services::{
    auth::TokenProvider,
    dox::DoxClient,
    labelary::{LabelSpec, LabelaryClient},
    poller::JobPoller,
};

const USER_AGENT: &str = concat!("po-label-print/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Configured service clients shared by the workflow steps.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub dox: Arc<DoxClient>,
    pub labelary: Arc<LabelaryClient>,
    pub poller: JobPoller,
    pub label_spec: LabelSpec,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let auth = TokenProvider::new(
            http.clone(),
            &config.dox_token_url,
            &config.dox_client_id,
            &config.dox_client_secret,
        );
        let dox = DoxClient::new(
            http.clone(),
            auth,
            &config.dox_api_url,
            &config.dox_base_url,
            &config.dox_schema_id,
        );
        let labelary = LabelaryClient::new(http, &config.labelary_url);

        let poller = JobPoller::new(
            Duration::from_secs(config.poll_interval_secs),
            config.max_poll_attempts,
        );
        let label_spec = LabelSpec {
            dpmm: config.label_dpmm,
            width: config.label_width_in,
            height: config.label_height_in,
        };

        Ok(Self {
            config: Arc::new(config),
            dox: Arc::new(dox),
            labelary: Arc::new(labelary),
            poller,
            label_spec,
        })
    }
}
