//! Overlay-model registry client.
//!
//! The host platform exposes the overlay models it knows about; the panel
//! shows their names as a read-only hint next to the `model_name` field.
//! The supervisor never validates the configured name against this list.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// One overlay model as reported by the host. Only the display name is
/// relied upon; anything else the host sends is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayModel {
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("overlay model request failed: {0}")]
    Http(String),

    #[error("overlay model response is not valid JSON: {0}")]
    Decode(String),
}

/// Fetch the model list from `<base>/overlays/models`.
pub fn fetch_models(host_api_base: &str) -> Result<Vec<OverlayModel>, RegistryError> {
    let url = format!("{}/overlays/models", host_api_base.trim_end_matches('/'));
    let response = ureq::get(&url)
        .timeout(REQUEST_TIMEOUT)
        .call()
        .map_err(|err| RegistryError::Http(err.to_string()))?;
    response
        .into_json::<Vec<OverlayModel>>()
        .map_err(|err| RegistryError::Decode(err.to_string()))
}
