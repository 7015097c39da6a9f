// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::auth::Credentials;
use crate::{Error, Result};

pub const PROJECT_ENV: &str = "GCP_PROJECT";
pub const PROJECT_FALLBACK_ENV: &str = "GOOGLE_CLOUD_PROJECT";
pub const TRIGGER_THRESHOLD_ENV: &str = "TRIGGER_THRESHOLD";
pub const API_ENDPOINT_ENV: &str = "APPENGINE_API_ENDPOINT";
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";
pub const METADATA_HOST_ENV: &str = "GCE_METADATA_HOST";

/// Alert threshold at which the application is disabled (1.0 = 100% of budget).
pub const DEFAULT_TRIGGER_THRESHOLD: f64 = 1.0;
pub const DEFAULT_API_ENDPOINT: &str = "https://appengine.googleapis.com";
pub const DEFAULT_METADATA_HOST: &str = "metadata.google.internal";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Project id. App Engine applications are addressed by their project id.
    pub project_id: String,
    pub trigger_threshold: f64,
    pub api_endpoint: String,
    pub credentials: Credentials,
}

impl Config {
    pub fn new(project_id: impl Into<String>) -> Config {
        Config {
            project_id: project_id.into(),
            trigger_threshold: DEFAULT_TRIGGER_THRESHOLD,
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            credentials: Credentials::MetadataServer {
                host: DEFAULT_METADATA_HOST.to_string(),
            },
        }
    }

    pub fn with_trigger_threshold(mut self, trigger_threshold: f64) -> Config {
        self.trigger_threshold = trigger_threshold;
        self
    }

    pub fn with_api_endpoint(mut self, api_endpoint: impl Into<String>) -> Config {
        self.api_endpoint = api_endpoint.into();
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Config {
        self.credentials = credentials;
        self
    }

    pub fn app_id(&self) -> &str {
        &self.project_id
    }

    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to its
    /// value. Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let project_id = get(PROJECT_ENV)
            .or_else(|| get(PROJECT_FALLBACK_ENV))
            .ok_or_else(|| Error::MissingConfiguration(PROJECT_ENV.to_string()))?;

        let mut config = Config::new(project_id.trim());

        if let Some(raw) = get(TRIGGER_THRESHOLD_ENV) {
            config.trigger_threshold = parse_threshold(&raw)?;
        }
        if let Some(endpoint) = get(API_ENDPOINT_ENV) {
            config.api_endpoint = endpoint.trim().trim_end_matches('/').to_string();
        }
        config.credentials = match get(ACCESS_TOKEN_ENV) {
            Some(token) => Credentials::Static(token.trim().to_string()),
            None => Credentials::MetadataServer {
                host: get(METADATA_HOST_ENV)
                    .map(|host| host.trim().to_string())
                    .unwrap_or_else(|| DEFAULT_METADATA_HOST.to_string()),
            },
        };

        Ok(config)
    }
}

fn parse_threshold(raw: &str) -> Result<f64> {
    let invalid = |reason: &str| Error::InvalidConfiguration {
        name: TRIGGER_THRESHOLD_ENV.to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    let threshold = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(&e.to_string()))?;
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(invalid("must be a finite ratio greater than zero"));
    }
    Ok(threshold)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() -> crate::Result<()> {
        let config = Config::from_lookup(lookup(&[(PROJECT_ENV, "my-project")]))?;
        assert_eq!(Config::new("my-project"), config);
        assert_eq!("my-project", config.app_id());
        assert_eq!(1.0, config.trigger_threshold);
        assert_eq!(DEFAULT_API_ENDPOINT, config.api_endpoint);
        Ok(())
    }

    #[test]
    fn test_overrides() -> crate::Result<()> {
        let config = Config::from_lookup(lookup(&[
            (PROJECT_ENV, "my-project"),
            (TRIGGER_THRESHOLD_ENV, "0.9"),
            (API_ENDPOINT_ENV, "http://localhost:8080/"),
            (ACCESS_TOKEN_ENV, "ya29.token"),
            (METADATA_HOST_ENV, "ignored:1234"),
        ]))?;
        assert_eq!(0.9, config.trigger_threshold);
        assert_eq!("http://localhost:8080", config.api_endpoint);
        assert_eq!(Credentials::Static("ya29.token".to_string()), config.credentials);
        Ok(())
    }

    #[test]
    fn test_project_fallback_and_metadata_host() -> crate::Result<()> {
        let config = Config::from_lookup(lookup(&[
            (PROJECT_ENV, ""),
            (PROJECT_FALLBACK_ENV, "fallback-project"),
            (METADATA_HOST_ENV, "127.0.0.1:8181"),
        ]))?;
        assert_eq!("fallback-project", config.project_id);
        assert_eq!(
            Credentials::MetadataServer {
                host: "127.0.0.1:8181".to_string()
            },
            config.credentials
        );
        Ok(())
    }

    #[test]
    fn test_missing_project() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::MissingConfiguration(ref name) if name == PROJECT_ENV));
    }

    #[rstest]
    #[case("abc")]
    #[case("0")]
    #[case("-1.0")]
    #[case("NaN")]
    #[case("inf")]
    fn test_invalid_threshold(#[case] raw: &str) {
        let err = Config::from_lookup(lookup(&[
            (PROJECT_ENV, "my-project"),
            (TRIGGER_THRESHOLD_ENV, raw),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }), "{err:?}");
    }
}
