use crate::error::{GumError, Result};
use std::io::Read;

/// A fetched HTTP response: status, declared length, and a streaming body.
pub struct HttpResponse {
    pub status: u16,
    pub content_length: Option<u64>,
    pub body: Box<dyn Read>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Capability interface over a single blocking GET, so tests can script
/// responses without a network.
pub trait Transport {
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// `Transport` backed by a blocking reqwest client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .user_agent(concat!(
                    env!("CARGO_PKG_NAME"),
                    "/",
                    env!("CARGO_PKG_VERSION")
                ))
                .build()
                .unwrap(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let response =
            self.client
                .get(url)
                .send()
                .map_err(|e| GumError::DownloadFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;

        Ok(HttpResponse {
            status: response.status().as_u16(),
            content_length: response.content_length(),
            body: Box::new(response),
        })
    }
}
