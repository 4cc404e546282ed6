use std::fs;

use tempfile::tempdir;
use triton::http::response::{Response, ResponseBuilder, StatusCode};
use triton::http::writer::{ResponseWriter, serialize_head};

#[test]
fn test_serialize_status_line_and_sorted_headers() {
    let response = ResponseBuilder::new(StatusCode::NotFound)
        .header("Date", "Sun, 06 Nov 1994 08:49:37 GMT")
        .header("Connection", "close")
        .build();

    assert_eq!(
        serialize_head(&response),
        b"HTTP/1.1 404 Not Found\r\nConnection: close\r\nDate: Sun, 06 Nov 1994 08:49:37 GMT\r\n\r\n"
            .to_vec()
    );
}

#[test]
fn test_serialize_without_headers_still_ends_header_block() {
    let response = ResponseBuilder::new(StatusCode::BadRequest).build();

    assert_eq!(serialize_head(&response), b"HTTP/1.1 400 Bad Request\r\n\r\n".to_vec());
}

#[test]
fn test_serialize_is_deterministic() {
    let response = Response::bad_request();

    assert_eq!(serialize_head(&response), serialize_head(&response));

    let a = ResponseBuilder::new(StatusCode::Ok)
        .header("Last-Modified", "x")
        .header("Content-Type", "y")
        .header("Content-Length", "0")
        .build();
    let b = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "0")
        .header("Content-Type", "y")
        .header("Last-Modified", "x")
        .build();
    assert_eq!(serialize_head(&a), serialize_head(&b));
}

#[tokio::test]
async fn test_write_without_file_has_empty_body() {
    let response = ResponseBuilder::new(StatusCode::NotFound).header("Date", "d").build();
    let mut out = Vec::new();

    ResponseWriter::default().write_to_stream(&response, &mut out).await.unwrap();

    assert_eq!(out, b"HTTP/1.1 404 Not Found\r\nDate: d\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_write_streams_file_body_in_chunks() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.bin");
    let body: Vec<u8> = (0..=255u8).cycle().take(1037).collect();
    fs::write(&path, &body).unwrap();

    for chunk_size in [1, 7, 100, 1037, 4096] {
        let response = ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Length", body.len().to_string())
            .file(path.clone())
            .build();
        let mut out = Vec::new();

        ResponseWriter::new(chunk_size)
            .write_to_stream(&response, &mut out)
            .await
            .unwrap();

        let head = b"HTTP/1.1 200 OK\r\nContent-Length: 1037\r\n\r\n";
        assert_eq!(&out[..head.len()], &head[..], "chunk size {}", chunk_size);
        assert_eq!(&out[head.len()..], &body[..], "chunk size {}", chunk_size);
    }
}

#[tokio::test]
async fn test_write_without_content_length_sends_whole_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.txt");
    fs::write(&path, b"hello world").unwrap();

    let response = ResponseBuilder::new(StatusCode::Ok).file(path).build();
    let mut out = Vec::new();

    ResponseWriter::default().write_to_stream(&response, &mut out).await.unwrap();

    assert!(out.ends_with(b"\r\n\r\nhello world"));
}

#[tokio::test]
async fn test_write_sends_only_declared_length() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("grew.txt");
    fs::write(&path, b"0123456789").unwrap();

    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "4")
        .file(path)
        .build();
    let mut out = Vec::new();

    ResponseWriter::new(3).write_to_stream(&response, &mut out).await.unwrap();

    assert!(out.ends_with(b"\r\n\r\n0123"));
}

#[tokio::test]
async fn test_write_fails_when_file_truncated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short.txt");
    fs::write(&path, b"abc").unwrap();

    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "10")
        .file(path)
        .build();
    let mut out = Vec::new();

    let result = ResponseWriter::default().write_to_stream(&response, &mut out).await;

    assert!(result.is_err());
    // The head already went out
    assert!(out.starts_with(b"HTTP/1.1 200 OK\r\n"));
}

#[tokio::test]
async fn test_write_fails_when_file_missing() {
    let dir = tempdir().unwrap();
    let response = ResponseBuilder::new(StatusCode::Ok)
        .file(dir.path().join("nope"))
        .build();
    let mut out = Vec::new();

    assert!(
        ResponseWriter::default()
            .write_to_stream(&response, &mut out)
            .await
            .is_err()
    );
}
