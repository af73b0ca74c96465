// deskpack-adapters/src/secrets.rs
// ============================================================================
// Module: Secrets Manager Client
// Description: Blocking HTTP client for bundle secret plans.
// Purpose: Implement SecretPlanSource against the secrets-manager API.
// Dependencies: deskpack-core, reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! Fetches `BundleSecretPlan` entries from
//! `GET /api/v1/deployment/secrets/{scenario}?tier=…&include_optional=true`.
//! Scenario identifiers are URL-escaped when building the path. The response
//! envelope decodes strictly; an absent `bundle_secrets` field is an empty
//! plan list, not an error. Non-2xx responses surface with at most 32 KiB of
//! body text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use deskpack_core::AdapterError;
use deskpack_core::BundleSecretPlan;
use deskpack_core::SecretPlanSource;
use reqwest::blocking::Client;
use serde::Deserialize;
use url::Url;

use crate::endpoint::secrets_endpoint;
use crate::http::build_client;
use crate::http::error_body;

// ============================================================================
// SECTION: Wire Shapes
// ============================================================================

/// Response envelope for the deployment-secrets endpoint.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlansEnvelope {
    /// Secret plans for the requested scenario and tier. Absent means none.
    #[serde(default)]
    bundle_secrets: Vec<BundleSecretPlan>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking client for the secrets-manager deployment-secrets API.
#[derive(Debug, Clone)]
pub struct SecretsManagerClient {
    /// Base URL of the secrets-manager service.
    base_url: Url,
    /// Shared blocking HTTP client.
    client: Client,
}

impl SecretsManagerClient {
    /// Creates a client against an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Unavailable`] when the URL does not parse or
    /// the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, AdapterError> {
        let base_url = Url::parse(base_url).map_err(|err| {
            AdapterError::Unavailable(format!("secrets manager url {base_url:?} is invalid: {err}"))
        })?;
        Ok(Self {
            base_url,
            client: build_client()?,
        })
    }

    /// Creates a client from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Unavailable`] when no endpoint is configured.
    pub fn from_env() -> Result<Self, AdapterError> {
        Self::new(&secrets_endpoint()?)
    }

    /// Builds the request URL for a (scenario, tier) pair.
    fn request_url(&self, scenario: &str, tier: &str) -> Result<Url, AdapterError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                AdapterError::Unavailable(
                    "secrets manager url cannot carry request paths".to_string(),
                )
            })?;
            segments.pop_if_empty();
            segments.extend(["api", "v1", "deployment", "secrets", scenario]);
        }
        url.query_pairs_mut()
            .append_pair("tier", tier)
            .append_pair("include_optional", "true");
        Ok(url)
    }
}

impl SecretPlanSource for SecretsManagerClient {
    fn fetch_plans(
        &self,
        scenario: &str,
        tier: &str,
        deadline: Duration,
    ) -> Result<Vec<BundleSecretPlan>, AdapterError> {
        let url = self.request_url(scenario, tier)?;
        let response =
            self.client.get(url).timeout(deadline).send().map_err(|err| {
                AdapterError::Unavailable(format!("secrets manager request failed: {err}"))
            })?;
        let status = response.status();
        if !status.is_success() {
            let body = error_body(response);
            return Err(AdapterError::Unavailable(format!(
                "secrets manager returned {status}: {body}"
            )));
        }
        let payload = response.bytes().map_err(|err| {
            AdapterError::Unavailable(format!("secrets manager response read failed: {err}"))
        })?;
        let envelope: PlansEnvelope = serde_json::from_slice(&payload).map_err(|err| {
            AdapterError::Malformed(format!("secrets payload did not decode: {err}"))
        })?;
        Ok(envelope.bundle_secrets)
    }
}
