use std::collections::HashMap;
use std::path::Path;

use triton::http::mime::{DEFAULT_CONTENT_TYPE, MimeTypes};

#[test]
fn test_known_extensions() {
    let mime = MimeTypes::default();

    assert_eq!(mime.by_extension(".html"), "text/html; charset=utf-8");
    assert_eq!(mime.by_extension(".png"), "image/png");
    assert_eq!(mime.by_extension("css"), "text/css; charset=utf-8");
    assert_eq!(mime.by_extension(".JPG"), "image/jpeg");
}

#[test]
fn test_unknown_extension_defaults() {
    let mime = MimeTypes::default();

    assert_eq!(mime.by_extension(".nope"), DEFAULT_CONTENT_TYPE);
    assert_eq!(mime.for_path(Path::new("/srv/Makefile")), DEFAULT_CONTENT_TYPE);
}

#[test]
fn test_for_path_uses_last_extension() {
    let mime = MimeTypes::default();

    assert_eq!(mime.for_path(Path::new("/srv/archive.tar.gz")), "application/gzip");
    assert_eq!(mime.for_path(Path::new("/srv/index.html")), "text/html; charset=utf-8");
}

#[test]
fn test_overrides() {
    let mut extra = HashMap::new();
    extra.insert(".txt".to_string(), "text/x-custom".to_string());
    extra.insert("Foo".to_string(), "application/x-foo".to_string());

    let mime = MimeTypes::with_overrides(&extra);

    assert_eq!(mime.by_extension(".txt"), "text/x-custom");
    assert_eq!(mime.by_extension(".foo"), "application/x-foo");
    assert_eq!(mime.by_extension(".html"), "text/html; charset=utf-8");
}

#[test]
fn test_for_path_dotfile_uses_whole_name() {
    let mime = MimeTypes::default();
    assert_eq!(mime.for_path(Path::new("/srv/.htaccess")), DEFAULT_CONTENT_TYPE);
    assert_eq!(mime.for_path(Path::new("/srv/.config.json")), "application/json");

    let mut extra = HashMap::new();
    extra.insert(".htaccess".to_string(), "text/plain".to_string());
    let mime = MimeTypes::with_overrides(&extra);

    assert_eq!(mime.for_path(Path::new("/srv/.htaccess")), "text/plain");
    assert_eq!(mime.for_path(Path::new("/srv/htaccess")), DEFAULT_CONTENT_TYPE);
}
