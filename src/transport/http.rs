use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::Client;

use crate::app::Result;
use crate::transport::{ApiResponse, NoSigner, RequestSigner, Transport};

pub struct HttpTransport {
    client: Client,
    signer: Arc<dyn RequestSigner>,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_signer(Arc::new(NoSigner))
    }

    pub fn with_signer(signer: Arc<dyn RequestSigner>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("freshet/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, signer }
    }

    fn signed_headers(&self, method: &str, url: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in self.signer.sign(method, url) {
            let name = match HeaderName::from_bytes(name.as_bytes()) {
                Ok(n) => n,
                Err(_) => {
                    tracing::warn!(header = %name, "Signer produced an invalid header name");
                    continue;
                }
            };
            match HeaderValue::from_str(&value) {
                Ok(v) => {
                    headers.insert(name, v);
                }
                Err(_) => {
                    tracing::warn!(header = %name, "Signer produced an invalid header value");
                }
            }
        }
        headers
    }

    async fn into_api_response(response: reqwest::Response) -> Result<ApiResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<ApiResponse> {
        let headers = self.signed_headers("GET", url);
        let response = self.client.get(url).headers(headers).send().await?;
        Self::into_api_response(response).await
    }

    async fn post_form(&self, url: &str, fields: &[(String, String)]) -> Result<ApiResponse> {
        let headers = self.signed_headers("POST", url);
        let response = self
            .client
            .post(url)
            .headers(headers)
            .form(fields)
            .send()
            .await?;
        Self::into_api_response(response).await
    }

    async fn post_multipart(&self, url: &str, fields: &[(String, String)]) -> Result<ApiResponse> {
        let headers = self.signed_headers("POST", url);
        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name.clone(), value.clone());
        }
        let response = self
            .client
            .post(url)
            .headers(headers)
            .multipart(form)
            .send()
            .await?;
        Self::into_api_response(response).await
    }
}
