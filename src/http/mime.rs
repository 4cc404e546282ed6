//! MIME type detection based on file extensions.

use std::collections::HashMap;
use std::path::Path;

/// Content type for anything the table does not know.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const DEFAULT_TYPES: &[(&str, &str)] = &[
    (".html", "text/html; charset=utf-8"),
    (".htm", "text/html; charset=utf-8"),
    (".css", "text/css; charset=utf-8"),
    (".js", "text/javascript; charset=utf-8"),
    (".mjs", "text/javascript; charset=utf-8"),
    (".json", "application/json"),
    (".txt", "text/plain; charset=utf-8"),
    (".xml", "text/xml; charset=utf-8"),
    (".csv", "text/csv; charset=utf-8"),
    (".md", "text/markdown; charset=utf-8"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".gif", "image/gif"),
    (".svg", "image/svg+xml"),
    (".ico", "image/vnd.microsoft.icon"),
    (".webp", "image/webp"),
    (".avif", "image/avif"),
    (".pdf", "application/pdf"),
    (".wasm", "application/wasm"),
    (".zip", "application/zip"),
    (".gz", "application/gzip"),
    (".woff", "font/woff"),
    (".woff2", "font/woff2"),
    (".mp3", "audio/mpeg"),
    (".mp4", "video/mp4"),
    (".webm", "video/webm"),
];

/// Immutable extension → content type table.
///
/// Built once at startup and shared read-only by every connection.
/// Extensions are stored lower-case with their leading dot.
#[derive(Debug, Clone)]
pub struct MimeTypes {
    types: HashMap<String, String>,
}

impl Default for MimeTypes {
    fn default() -> Self {
        Self {
            types: DEFAULT_TYPES
                .iter()
                .map(|(ext, ty)| (ext.to_string(), ty.to_string()))
                .collect(),
        }
    }
}

impl MimeTypes {
    /// The default table with `extra` entries added on top.
    ///
    /// Keys may be given with or without the leading dot.
    pub fn with_overrides<'a, I>(extra: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut table = Self::default();
        for (ext, ty) in extra {
            table.types.insert(normalize_ext(ext), ty.clone());
        }
        table
    }

    /// Looks up an extension such as `.html`. Case-insensitive.
    pub fn by_extension(&self, ext: &str) -> &str {
        self.types
            .get(&normalize_ext(ext))
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    /// Looks up the content type for a file path.
    ///
    /// A dotfile such as `.htaccess` is looked up by its whole name.
    pub fn for_path(&self, path: &Path) -> &str {
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            return self.by_extension(ext);
        }
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) if name.starts_with('.') => self.by_extension(name),
            _ => DEFAULT_CONTENT_TYPE,
        }
    }
}

fn normalize_ext(ext: &str) -> String {
    let ext = ext.to_ascii_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}
