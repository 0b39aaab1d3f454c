pub mod endpoints;
mod error;
mod macros;
mod request;

pub use crate::error::BankApiError;
pub use crate::request::{Method, Request, RequestData};

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

pub struct Client {
    inner: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, BankApiError>
    where
        R: Request,
    {
        let url = format!("{}{}", self.base_url, request.endpoint());
        let builder = match request.method() {
            Method::Get => self.inner.get(&url),
            Method::Post => self.inner.post(&url),
        };
        let builder = match request.data() {
            RequestData::Empty => builder,
            RequestData::Json(body) => builder.json(body),
        };

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BankApiError::from_response(status, &body));
        }

        response.json().await.map_err(From::from)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
