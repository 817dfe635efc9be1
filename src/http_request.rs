//! Abstract HTTP request.
//!
//! The [`HttpRequest`] type represents an HTTP request that should be sent to the completion
//! API, without committing to a specific HTTP client.
//!
//! ## Features
//!
//! If the `reqwest`/`reqwest-blocking` feature is enabled, the [`HttpRequest`] type can be
//! converted to a `reqwest::Request` or `reqwest::blocking::Request` using the
//! `try_into_reqwest` or `try_into_reqwest_blocking` methods.

use std::{fmt, sync::Arc};

/// Header names whose values are masked when a request is displayed.
const SECRET_HEADERS: &[&str] = &["authorization"];

/// HTTP request encapsulation.
///
/// Supports pretty-printing the request as a string (through the [`std::fmt::Display`] trait),
/// with credentials masked.
///
/// The `From<HttpRequest>` trait is implemented for `reqwest::Request` and
/// `reqwest::blocking::Request` when the matching feature is enabled; beware that it will panic
/// if the conversion fails.
#[derive(Debug)]
pub struct HttpRequest {
    /// Request host.
    pub host: String,
    /// Request path.
    pub path: String,
    /// HTTP method.
    pub method: &'static str,
    /// Request headers.
    pub headers: Vec<(&'static str, Arc<str>)>,
    /// Request body.
    pub body: String,
}

impl HttpRequest {
    /// Returns the full URL of the request.
    pub fn url(&self) -> String {
        format!("https://{}{}", self.host, self.path)
    }

    /// Returns the value of the first header with the given name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_ref())
    }
}

impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} HTTP/1.1", self.method, self.path)?;

        writeln!(f, "Host: {}", self.host)?;
        for (key, value) in &self.headers {
            if SECRET_HEADERS.contains(key) {
                writeln!(f, "{}: <redacted>", key)?;
            } else {
                writeln!(f, "{}: {}", key, value.as_ref())?;
            }
        }

        // Empty line between headers and body
        writeln!(f)?;

        write!(f, "{}", self.body)
    }
}

#[cfg(feature = "reqwest")]
impl HttpRequest {
    /// Converts this [`HttpRequest`] into a [`reqwest::Request`].
    pub fn try_into_reqwest(self) -> Result<reqwest::Request, Box<dyn std::error::Error>> {
        let method = reqwest::Method::from_bytes(self.method.as_bytes())?;
        let url = reqwest::Url::parse(&self.url())?;
        let mut request = reqwest::Request::new(method, url);

        *request.body_mut() = Some(self.body.into());

        let headers = request.headers_mut();
        for (key, value) in self.headers {
            let header_name = reqwest::header::HeaderName::from_bytes(key.as_bytes())?;
            let header_value = reqwest::header::HeaderValue::from_str(&value)?;
            headers.insert(header_name, header_value);
        }

        Ok(request)
    }
}

#[cfg(feature = "reqwest-blocking")]
impl HttpRequest {
    /// Converts this [`HttpRequest`] into a [`reqwest::blocking::Request`].
    pub fn try_into_reqwest_blocking(
        self,
    ) -> Result<reqwest::blocking::Request, Box<dyn std::error::Error>> {
        let method = reqwest::Method::from_bytes(self.method.as_bytes())?;
        let url = reqwest::Url::parse(&self.url())?;
        let mut request = reqwest::blocking::Request::new(method, url);

        *request.body_mut() = Some(self.body.into());

        let headers = request.headers_mut();
        for (key, value) in self.headers {
            let header_name = reqwest::header::HeaderName::from_bytes(key.as_bytes())?;
            let header_value = reqwest::header::HeaderValue::from_str(&value)?;
            headers.insert(header_name, header_value);
        }

        Ok(request)
    }
}

#[cfg(feature = "reqwest")]
impl From<HttpRequest> for reqwest::Request {
    fn from(http_request: HttpRequest) -> Self {
        http_request
            .try_into_reqwest()
            .expect("failed to convert to reqwest::Request")
    }
}

#[cfg(feature = "reqwest-blocking")]
impl From<HttpRequest> for reqwest::blocking::Request {
    fn from(http_request: HttpRequest) -> Self {
        http_request
            .try_into_reqwest_blocking()
            .expect("failed to convert to reqwest::blocking::Request")
    }
}
