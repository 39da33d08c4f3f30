//! Pass2U request and response bodies

use serde::{Deserialize, Serialize};

/// Body of `POST /v2/models/{model}/passes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassRequest {
    /// Canonical expiration timestamp
    pub expiration_date: String,
    pub fields: Vec<PassField>,
    pub images: Vec<PassImage>,
}

/// Value for one field slot of the pass template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassField {
    pub key: String,
    pub value: String,
}

/// Previously uploaded image placed on the pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassImage {
    #[serde(rename = "type")]
    pub kind: String,
    pub hex: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePassResponse {
    pub pass_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageUploadResponse {
    pub hex: String,
}

/// Outcome of a successful create-pass call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassResult {
    pub pass_id: String,
    pub viewer_url: String,
}

impl PassField {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
