use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ AUTHORIZATION, CONTENT_TYPE, ACCEPT };
use serde_json::Value;
use log::{ debug, error, warn };
use base64::{ engine::general_purpose::STANDARD, Engine as _ };

use super::{ ConnectionInfo, RequestMethod, Transport };
use crate::error::TransportError;

/// Default reqwest-backed [`Transport`].
///
/// Sends every call to `{host}/{collection}/{endpoint}` with JSON accept and
/// content-type headers. Supports Basic auth (user/pass) or a Bearer API key;
/// when both are supplied, Basic auth wins.
pub struct HttpTransport {
    client: Client,
    host: String,
    api_key: Option<String>,
    user: Option<String>,
    pass: Option<String>,
}

impl HttpTransport {
    pub fn new(
        host: &str,
        api_key: Option<&str>,
        user: Option<&str>,
        pass: Option<&str>
    ) -> Self {
        Self {
            client: Client::new(),
            host: host.trim_end_matches('/').to_string(),
            api_key: api_key.map(String::from),
            user: user.map(String::from),
            pass: pass.map(String::from),
        }
    }

    fn build_url(&self, collection: &str, endpoint: &str) -> String {
        format!("{}/{}/{}", self.host, collection, endpoint.trim_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        if let (Some(user), Some(pass)) = (&self.user, &self.pass) {
            if !user.is_empty() && !pass.is_empty() {
                let credentials = format!("{}:{}", user, pass);
                return Some(format!("Basic {}", STANDARD.encode(credentials)));
            }
            warn!("Basic auth user or pass provided but empty.");
        }
        if let Some(key) = &self.api_key {
            if !key.is_empty() {
                return Some(format!("Bearer {}", key));
            }
            warn!("Bearer token (API key) provided but empty.");
        }
        None
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send_request(
        &self,
        method: RequestMethod,
        endpoint: &str,
        collection: &str,
        data: Option<String>
    ) -> Result<(Value, ConnectionInfo), TransportError> {
        let url = self.build_url(collection, endpoint);
        let mut request_builder = match method {
            RequestMethod::Get => self.client.get(&url),
            RequestMethod::Post => self.client.post(&url),
        };
        request_builder = request_builder.header(ACCEPT, "application/json");

        if let Some(auth) = self.auth_header() {
            request_builder = request_builder.header(AUTHORIZATION, auth);
        }
        if let Some(body) = data {
            debug!("Request body for {}: {}", url, body);
            request_builder = request_builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request_builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!("Schema request to {} failed (Status: {}): {}", url, status, text);
            return Err(TransportError::Status { status: status.as_u16(), body: text });
        }

        debug!("Response from {}: {}", url, text);
        let parsed: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to parse response from {}: {}. Text: {}", url, e, text);
                return Err(TransportError::Decode(e));
            }
        };

        Ok((parsed, ConnectionInfo { url, status: status.as_u16() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_joins_host_collection_and_endpoint() {
        let transport = HttpTransport::new("http://localhost:8983/solr/", None, None, None);
        assert_eq!(
            transport.build_url("docs", "schema/fields"),
            "http://localhost:8983/solr/docs/schema/fields"
        );
    }

    #[test]
    fn build_url_normalizes_trailing_slash_on_endpoint() {
        let transport = HttpTransport::new("http://localhost:8983/solr", None, None, None);
        assert_eq!(transport.build_url("docs", "schema/"), "http://localhost:8983/solr/docs/schema");
    }

    #[test]
    fn basic_auth_wins_over_api_key() {
        let transport = HttpTransport::new(
            "http://localhost:8983/solr",
            Some("secret-key"),
            Some("admin"),
            Some("hunter2")
        );
        let header = transport.auth_header().unwrap();
        assert!(header.starts_with("Basic "));
    }

    #[test]
    fn empty_credentials_fall_back_to_bearer() {
        let transport = HttpTransport::new(
            "http://localhost:8983/solr",
            Some("secret-key"),
            Some(""),
            Some("")
        );
        assert_eq!(transport.auth_header().unwrap(), "Bearer secret-key");
    }

    #[test]
    fn no_credentials_means_no_auth_header() {
        let transport = HttpTransport::new("http://localhost:8983/solr", None, None, None);
        assert!(transport.auth_header().is_none());
    }
}
