// deskpack-adapters/src/analyzer.rs
// ============================================================================
// Module: Scenario Analyzer Client
// Description: Blocking HTTP client for scenario skeleton manifests.
// Purpose: Implement SkeletonSource against the analyzer API.
// Dependencies: deskpack-core, reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! Fetches skeleton manifests from
//! `GET /api/v1/scenarios/{scenario}/bundle/manifest`. The analyzer wraps
//! its answer in `{manifest: …}` and may nest the actual skeleton one level
//! deeper under `skeleton`; the inner field wins when present. Whatever
//! payload is chosen runs through the full bundle validator before it is
//! returned, so a conforming `BundleManifest` is the only success shape.
//! Validation failures are analyzer-side errors, not caller errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use deskpack_core::AdapterError;
use deskpack_core::BundleManifest;
use deskpack_core::BundleValidator;
use deskpack_core::SkeletonSource;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::endpoint::analyzer_endpoint;
use crate::http::build_client;
use crate::http::error_body;

// ============================================================================
// SECTION: Wire Shapes
// ============================================================================

/// Response envelope for the bundle-manifest endpoint.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestEnvelope {
    /// Skeleton payload, possibly nested one level under `skeleton`.
    manifest: Value,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking client for the scenario-analyzer bundle-manifest API.
#[derive(Clone)]
pub struct ScenarioAnalyzerClient {
    /// Base URL of the analyzer service.
    base_url: Url,
    /// Shared blocking HTTP client.
    client: Client,
    /// Validator applied to every fetched skeleton.
    validator: BundleValidator,
}

impl ScenarioAnalyzerClient {
    /// Creates a client against an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Unavailable`] when the URL does not parse or
    /// the HTTP client cannot be built.
    pub fn new(base_url: &str, validator: BundleValidator) -> Result<Self, AdapterError> {
        let base_url = Url::parse(base_url).map_err(|err| {
            AdapterError::Unavailable(format!("analyzer url {base_url:?} is invalid: {err}"))
        })?;
        Ok(Self {
            base_url,
            client: build_client()?,
            validator,
        })
    }

    /// Creates a client from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Unavailable`] when no endpoint is configured.
    pub fn from_env(validator: BundleValidator) -> Result<Self, AdapterError> {
        Self::new(&analyzer_endpoint()?, validator)
    }

    /// Builds the request URL for a scenario.
    fn request_url(&self, scenario: &str) -> Result<Url, AdapterError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                AdapterError::Unavailable("analyzer url cannot carry request paths".to_string())
            })?;
            segments.pop_if_empty();
            segments.extend(["api", "v1", "scenarios", scenario, "bundle", "manifest"]);
        }
        Ok(url)
    }
}

impl SkeletonSource for ScenarioAnalyzerClient {
    fn fetch_skeleton(
        &self,
        scenario: &str,
        deadline: Duration,
    ) -> Result<BundleManifest, AdapterError> {
        let url = self.request_url(scenario)?;
        let response = self.client.get(url).timeout(deadline).send().map_err(|err| {
            AdapterError::Unavailable(format!("analyzer request failed: {err}"))
        })?;
        let status = response.status();
        if !status.is_success() {
            let body = error_body(response);
            return Err(AdapterError::Unavailable(format!("analyzer returned {status}: {body}")));
        }
        let payload = response.bytes().map_err(|err| {
            AdapterError::Unavailable(format!("analyzer response read failed: {err}"))
        })?;
        let envelope: ManifestEnvelope = serde_json::from_slice(&payload).map_err(|err| {
            AdapterError::Malformed(format!("analyzer payload did not decode: {err}"))
        })?;
        let chosen = match envelope.manifest.get("skeleton") {
            Some(inner) if !inner.is_null() => inner.clone(),
            _ => envelope.manifest,
        };
        let bytes = serde_json::to_vec(&chosen).map_err(|err| {
            AdapterError::Malformed(format!("analyzer skeleton did not serialize: {err}"))
        })?;
        self.validator.validate_bytes(&bytes).map_err(|err| {
            AdapterError::Malformed(format!("analyzer skeleton failed validation: {err}"))
        })
    }
}
