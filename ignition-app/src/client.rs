use std::fmt;

/// Errors from the [`HelloClient`].
#[derive(Debug)]
pub enum HelloClientError {
    /// The request could not be sent or the response body not read.
    Request(reqwest::Error),
    /// The server answered with a non-success status.
    Status(reqwest::StatusCode),
}

impl fmt::Display for HelloClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HelloClientError::Request(err) => write!(f, "hello request failed: {err}"),
            HelloClientError::Status(status) => {
                write!(f, "hello endpoint returned {status}")
            }
        }
    }
}

impl std::error::Error for HelloClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HelloClientError::Request(err) => Some(err),
            HelloClientError::Status(_) => None,
        }
    }
}

/// Typed HTTP client for the greeting endpoint.
#[derive(Clone)]
pub struct HelloClient {
    client: reqwest::Client,
    base_url: String,
}

impl HelloClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// `GET {base_url}/hello`, returning the greeting body.
    pub async fn hello(&self) -> Result<String, HelloClientError> {
        let url = format!("{}/hello", self.base_url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(HelloClientError::Request)?;

        if !resp.status().is_success() {
            return Err(HelloClientError::Status(resp.status()));
        }

        resp.text().await.map_err(HelloClientError::Request)
    }
}
