use std::fs;

use tempfile::tempdir;
use triton::http::resolver::resolve;

#[tokio::test]
async fn test_root_maps_to_index() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("index.html"), b"home").unwrap();
    let root = std::path::absolute(dir.path()).unwrap();

    let resolved = resolve("/", dir.path()).await;

    assert_eq!(resolved, Some(root.join("index.html")));
}

#[tokio::test]
async fn test_trailing_slash_appends_index() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs/index.html"), b"docs").unwrap();

    let resolved = resolve("/docs/", dir.path()).await.unwrap();

    assert!(resolved.ends_with("docs/index.html"));
    assert!(resolved.is_absolute());
}

#[tokio::test]
async fn test_existing_file_is_found() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("a")).unwrap();
    fs::write(dir.path().join("a/b.txt"), b"b").unwrap();

    assert!(resolve("/a/b.txt", dir.path()).await.is_some());
    assert!(resolve("/a/./c/../b.txt", dir.path()).await.is_some());
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let dir = tempdir().unwrap();

    assert_eq!(resolve("/missing.txt", dir.path()).await, None);
    // No index.html in the root
    assert_eq!(resolve("/", dir.path()).await, None);
}

#[tokio::test]
async fn test_directory_is_not_found() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();

    assert_eq!(resolve("/sub", dir.path()).await, None);
}

#[tokio::test]
async fn test_traversal_outside_root_is_not_found() {
    let outer = tempdir().unwrap();
    let root = outer.path().join("www");
    fs::create_dir(&root).unwrap();
    fs::write(outer.path().join("secret.txt"), b"secret").unwrap();
    fs::create_dir(outer.path().join("www2")).unwrap();
    fs::write(outer.path().join("www2/page.html"), b"sibling").unwrap();

    assert_eq!(resolve("/../secret.txt", &root).await, None);
    assert_eq!(resolve("/../../etc/passwd", &root).await, None);
    assert_eq!(resolve("/../www2/page.html", &root).await, None);
}

#[tokio::test]
async fn test_dot_dot_that_stays_inside_root() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("top.txt"), b"top").unwrap();

    assert!(resolve("/sub/../top.txt", dir.path()).await.is_some());
}
