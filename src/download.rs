use std::time::Duration;

use camino::Utf8Path;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::error::PanresError;
use crate::fs_util::write_bytes_atomic;

pub trait OntologyClient {
    /// Fetches `url` and stores the body verbatim at `destination`, returning
    /// the number of bytes written.
    fn download(&self, url: &str, destination: &Utf8Path) -> Result<u64, PanresError>;
}

#[derive(Clone)]
pub struct OntologyHttpClient {
    client: Client,
}

impl OntologyHttpClient {
    pub fn new() -> Result<Self, PanresError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("panres-json/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| PanresError::DownloadHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|err| PanresError::DownloadHttp(err.to_string()))?;
        Ok(Self { client })
    }
}

impl OntologyClient for OntologyHttpClient {
    fn download(&self, url: &str, destination: &Utf8Path) -> Result<u64, PanresError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| PanresError::DownloadHttp(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "ontology request failed".to_string());
            return Err(PanresError::DownloadStatus { status, message });
        }
        let bytes = response
            .bytes()
            .map_err(|err| PanresError::DownloadHttp(err.to_string()))?;
        write_bytes_atomic(destination, &bytes)?;
        Ok(bytes.len() as u64)
    }
}
