// file: src/resolver/ip_api.rs
// description: ip-api.com integration for address to organization lookups
// reference: https://ip-api.com/docs/api:json

use crate::config::LookupConfig;
use crate::error::{PipelineError, Result};
use crate::resolver::lookup::OrgLookup;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: Option<String>,
    message: Option<String>,
    org: Option<String>,
}

pub struct IpApiClient {
    client: Client,
    base_url: String,
    fields: String,
}

impl IpApiClient {
    pub fn new(config: &LookupConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PipelineError::Lookup(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            fields: config.fields.clone(),
        })
    }

    pub fn request_url(&self, address: &str) -> String {
        format!("{}/{}?fields={}", self.base_url, address, self.fields)
    }

    pub async fn lookup_org(&self, address: &str) -> Result<String> {
        let url = self.request_url(address);

        debug!("Requesting organization for {}", address);

        let response = self.client.get(&url).send().await.map_err(|e| {
            PipelineError::Lookup(format!("Request for {} failed: {}", address, e))
        })?;

        if !response.status().is_success() {
            return Err(PipelineError::Lookup(format!(
                "Lookup for {} returned status {}",
                address,
                response.status()
            )));
        }

        let body = response.text().await.map_err(|e| {
            PipelineError::Lookup(format!("Failed to read response for {}: {}", address, e))
        })?;

        interpret_response(address, &body)
    }
}

impl OrgLookup for IpApiClient {
    async fn lookup(&self, address: &str) -> Result<String> {
        self.lookup_org(address).await
    }
}

/// Extract the organization from an ip-api JSON body. Anything other than a
/// `"success"` status carrying an `org` field is a lookup failure.
pub fn interpret_response(address: &str, body: &str) -> Result<String> {
    let parsed: IpApiResponse = serde_json::from_str(body).map_err(|e| {
        PipelineError::Lookup(format!("Malformed response for {}: {}", address, e))
    })?;

    if parsed.status.as_deref() != Some("success") {
        return Err(PipelineError::Lookup(format!(
            "Lookup for {} was unsuccessful: {}",
            address,
            parsed.message.as_deref().unwrap_or("no message")
        )));
    }

    parsed.org.ok_or_else(|| {
        PipelineError::Lookup(format!("Lookup for {} returned no organization", address))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn lookup_config(base_url: &str) -> LookupConfig {
        LookupConfig {
            base_url: base_url.to_string(),
            ..Config::default_config().lookup
        }
    }

    #[test]
    fn test_request_url() {
        let client = IpApiClient::new(&lookup_config("http://ip-api.com/json/")).unwrap();
        assert_eq!(
            client.request_url("8.8.8.8"),
            "http://ip-api.com/json/8.8.8.8?fields=status,message,org"
        );
    }

    #[test]
    fn test_interpret_success() {
        let org = interpret_response("8.8.8.8", r#"{"status":"success","org":"Google LLC"}"#);
        assert_eq!(org.unwrap(), "Google LLC");
    }

    #[test]
    fn test_interpret_failure_status() {
        let body = r#"{"status":"fail","message":"private range"}"#;
        assert!(matches!(
            interpret_response("10.0.0.1", body),
            Err(PipelineError::Lookup(_))
        ));
    }

    #[test]
    fn test_interpret_missing_org() {
        assert!(interpret_response("8.8.8.8", r#"{"status":"success"}"#).is_err());
        assert!(interpret_response("8.8.8.8", r#"{"org":"Google LLC"}"#).is_err());
    }

    #[test]
    fn test_interpret_malformed_body() {
        assert!(interpret_response("8.8.8.8", "<html>rate limited</html>").is_err());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_error() {
        let client = IpApiClient::new(&lookup_config("http://127.0.0.1:1/json")).unwrap();
        let result = client.lookup("8.8.8.8").await;
        assert!(matches!(result, Err(PipelineError::Lookup(_))));
    }
}
