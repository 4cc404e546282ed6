use std::collections::HashMap;

/// The only protocol version the server speaks.
pub const HTTP_1_1: &str = "HTTP/1.1";

/// HTTP request methods.
///
/// The server only serves static files, so GET is the single method it
/// accepts. Anything else is rejected by the parser with a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
}

/// Represents a parsed HTTP request from a client.
///
/// `Host` and `Connection` never appear in `headers`; they are lifted into
/// the `host` and `close` fields by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method
    pub method: Method,
    /// The request target as sent (e.g. "/index.html")
    pub url: String,
    /// HTTP version, always "HTTP/1.1" for a parsed request
    pub proto: String,
    /// Remaining headers, keyed by canonical name
    pub headers: HashMap<String, String>,
    /// Raw value of the last `Host` header, empty if none was sent
    pub host: String,
    /// Set when the client sent `Connection: close`
    pub close: bool,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Method,
    url: Option<String>,
    proto: Option<String>,
    headers: HashMap<String, String>,
    host: String,
    close: bool,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// Matching is case-sensitive, as on the wire.
    ///
    /// # Example
    ///
    /// ```
    /// # use triton::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// assert_eq!(Method::from_str("POST"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: Method::GET,
            url: None,
            proto: None,
            headers: HashMap::new(),
            host: String::new(),
            close: false,
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn proto(mut self, proto: impl Into<String>) -> Self {
        self.proto = Some(proto.into());
        self
    }

    /// Adds a header the same way the parser would: `Host` and
    /// `Connection` go to their dedicated fields.
    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        let key = canonical_header_key(key);
        let value = value.into();
        if key == "Host" {
            self.host = value;
        } else if key.eq_ignore_ascii_case("Connection") {
            if value == "close" {
                self.close = true;
            }
        } else {
            self.headers.insert(key, value);
        }
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method,
            url: self.url.ok_or("url missing")?,
            proto: self.proto.unwrap_or_else(|| HTTP_1_1.to_string()),
            headers: self.headers,
            host: self.host,
            close: self.close,
        })
    }
}

impl Request {
    /// Retrieves a header value by name.
    ///
    /// The name is canonicalized first, so lookups are case-insensitive.
    /// `Host` and `Connection` are not available here; use the dedicated
    /// fields.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&canonical_header_key(key))
            .map(|v| v.as_str())
    }

    /// Whether the connection may stay open after this request.
    pub fn keep_alive(&self) -> bool {
        !self.close
    }
}

/// Canonicalizes a header name: the first letter and every letter after a
/// hyphen are upper-cased, the rest lower-cased.
///
/// Names containing bytes outside `[A-Za-z0-9-]` are returned unchanged.
///
/// # Example
///
/// ```
/// # use triton::http::request::canonical_header_key;
/// assert_eq!(canonical_header_key("content-type"), "Content-Type");
/// assert_eq!(canonical_header_key("HOST"), "Host");
/// ```
pub fn canonical_header_key(key: &str) -> String {
    if !is_valid_header_key(key) {
        return key.to_string();
    }

    let mut upper = true;
    key.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

/// Header names must match `^[A-Za-z0-9-]+$`.
pub fn is_valid_header_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}
