use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::http::date;
use crate::http::mime::MimeTypes;
use crate::http::request::{HTTP_1_1, Request, canonical_header_key};

/// HTTP status codes the server produces.
///
/// - `Ok` (200): the file was found and is served
/// - `BadRequest` (400): the request could not be parsed
/// - `NotFound` (404): nothing servable at the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use triton::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use triton::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// A response ready to be written to a client.
///
/// The body is never held in memory: when `file_path` is set the writer
/// streams that file, otherwise the body is empty. Headers live in a
/// `BTreeMap` so they always come out sorted by key.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Protocol version for the status line
    pub proto: String,
    /// Headers keyed by canonical name
    pub headers: BTreeMap<String, String>,
    /// The request this answers, absent for 400 responses
    pub request: Option<Request>,
    /// Absolute path of the file forming the body
    pub file_path: Option<PathBuf>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use triton::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::NotFound)
///     .header("connection", "close")
///     .build();
/// assert_eq!(response.header("Connection"), Some("close"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    proto: String,
    headers: BTreeMap<String, String>,
    request: Option<Request>,
    file_path: Option<PathBuf>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            proto: HTTP_1_1.to_string(),
            headers: BTreeMap::new(),
            request: None,
            file_path: None,
        }
    }

    /// Adds or replaces a header. The key is canonicalized.
    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.insert(canonical_header_key(key), value.into());
        self
    }

    /// Adds `Connection: close` when `close` is set.
    pub fn close_if(self, close: bool) -> Self {
        if close {
            self.header("Connection", "close")
        } else {
            self
        }
    }

    /// Stamps the `Date` header with the current time.
    pub fn date_now(self) -> Self {
        self.header("Date", date::now())
    }

    pub fn request(mut self, request: Request) -> Self {
        self.request = Some(request);
        self
    }

    pub fn file(mut self, path: PathBuf) -> Self {
        self.file_path = Some(path);
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            proto: self.proto,
            headers: self.headers,
            request: self.request,
            file_path: self.file_path,
        }
    }
}

impl Response {
    /// Creates a 200 OK response serving the file at `path`.
    ///
    /// If the file's size or modification time can no longer be read (it
    /// vanished after resolution), a 404 is returned instead.
    pub async fn ok(request: Request, path: PathBuf, mime: &MimeTypes) -> Self {
        let meta = match tokio::fs::metadata(&path).await {
            Ok(meta) => meta,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "file vanished before response");
                return Self::not_found(request);
            }
        };
        let modified = match meta.modified() {
            Ok(modified) => modified,
            Err(_) => return Self::not_found(request),
        };

        let close = request.close;
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Length", meta.len().to_string())
            .date_now()
            .header("Last-Modified", date::format_http_date(modified))
            .header("Content-Type", mime.for_path(&path))
            .close_if(close)
            .request(request)
            .file(path)
            .build()
    }

    /// Creates a 404 Not Found response with an empty body.
    pub fn not_found(request: Request) -> Self {
        let close = request.close;
        ResponseBuilder::new(StatusCode::NotFound)
            .date_now()
            .close_if(close)
            .request(request)
            .build()
    }

    /// Creates a 400 Bad Request response. It always closes the connection.
    pub fn bad_request() -> Self {
        ResponseBuilder::new(StatusCode::BadRequest)
            .date_now()
            .header("Connection", "close")
            .build()
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&canonical_header_key(key))
            .map(|v| v.as_str())
    }

    /// Whether the connection has to be closed once this is written.
    pub fn closes_connection(&self) -> bool {
        self.header("Connection") == Some("close")
            || self.request.as_ref().is_some_and(|r| r.close)
    }

    /// The declared body length, if any.
    pub fn content_length(&self) -> Option<u64> {
        self.header("Content-Length").and_then(|v| v.parse().ok())
    }
}
