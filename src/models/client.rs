use serde::Deserialize;

/// A DOX client (tenant-level partition for documents and schemas).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub client_id: String,
    pub client_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientList {
    #[serde(default)]
    pub payload: Vec<ClientInfo>,
}
