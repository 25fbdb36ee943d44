//! Thin HTTP client used by every BrightPath backend call.
//!
//! The backend is a plain JSON API without authentication headers, so the
//! client only needs to know the base URL. Requests are built with
//! [`Client::get`] / [`Client::post`] / [`Client::put`] / [`Client::delete`]
//! and resolve to a fully buffered [`Response`], which keeps status handling
//! and JSON decoding in the callers where the endpoint-specific rules live.

/// HTTP method for requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response body as bytes
    pub body: Vec<u8>,
}

impl Response {
    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Attempt to deserialize the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport-level failure: the request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("HTTP error: {message}")]
pub struct HttpError {
    pub message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type for HTTP operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    inner: reqwest::Client,
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    fn new(inner: reqwest::Client, method: Method, url: String) -> Self {
        Self {
            inner,
            method,
            url,
            query: Vec::new(),
            body: None,
        }
    }

    /// Append a query-string parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        let json_bytes = serde_json::to_vec(value)?;
        self.body = Some(json_bytes);
        Ok(self)
    }

    /// The method this request will use.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The absolute URL this request will hit, without the query string.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send the request and buffer the whole response.
    pub async fn send(self) -> HttpResult<Response> {
        log::debug!("{:?} {}", self.method, self.url);

        let mut request = self.inner.request(self.method.as_reqwest(), &self.url);

        if !self.query.is_empty() {
            request = request.query(&self.query);
        }

        if let Some(body) = self.body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?;

        let status = response.status().as_u16();

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?
            .to_vec();

        Ok(Response { status, body })
    }
}

/// HTTP client bound to one backend base URL.
///
/// Cloning is cheap; the underlying connection pool is shared.
///
/// ```ignore
/// let client = Client::new("https://brightpath-3.onrender.com");
/// let response = client.get("/get-subjects").send().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    inner: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            inner: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an endpoint path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Create a GET request.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::Get, path)
    }

    /// Create a POST request.
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::Post, path)
    }

    /// Create a PUT request.
    pub fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::Put, path)
    }

    /// Create a DELETE request.
    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::Delete, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        RequestBuilder::new(self.inner.clone(), method, self.url(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_success() {
        let response = Response {
            status: 201,
            body: Vec::new(),
        };
        assert!(response.is_success());

        let response = Response {
            status: 422,
            body: Vec::new(),
        };
        assert!(!response.is_success());
    }

    #[test]
    fn test_response_json() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Subject {
            name: String,
        }

        let response = Response {
            status: 200,
            body: br#"{"name": "Mathematics"}"#.to_vec(),
        };

        let subject: Subject = response.json().unwrap();
        assert_eq!(
            subject,
            Subject {
                name: "Mathematics".to_owned()
            }
        );
    }

    #[test]
    fn test_client_joins_paths() {
        let client = Client::new("https://brightpath.example/");
        assert_eq!(client.base_url(), "https://brightpath.example");
        assert_eq!(
            client.url("/get-students"),
            "https://brightpath.example/get-students"
        );
        assert_eq!(
            client.url("get-students"),
            "https://brightpath.example/get-students"
        );
    }

    #[test]
    fn test_request_builder_json() {
        #[derive(serde::Serialize)]
        struct NewSubject {
            name: String,
        }

        let builder = Client::new("https://brightpath.example")
            .post("/add-subject")
            .json(&NewSubject {
                name: "Biology".to_owned(),
            })
            .unwrap();

        assert_eq!(builder.method(), Method::Post);
        assert_eq!(builder.url(), "https://brightpath.example/add-subject");
        assert_eq!(
            builder.body.as_deref(),
            Some(br#"{"name":"Biology"}"#.as_slice())
        );
    }
}
