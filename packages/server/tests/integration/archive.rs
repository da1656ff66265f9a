use std::io::{Cursor, Read};
use std::time::Duration;

use futures::StreamExt;
use zip::ZipArchive;

use crate::common::{TestApp, routes};

fn read_archive(bytes: &[u8]) -> ZipArchive<Cursor<Vec<u8>>> {
    ZipArchive::new(Cursor::new(bytes.to_vec())).expect("Response is not a valid ZIP archive")
}

#[tokio::test]
async fn bundles_all_pdfs_with_timestamps_stripped() {
    let app = TestApp::spawn(&[
        ("beta_1756905653968.pdf", b"%PDF beta" as &[u8]),
        ("alpha.pdf", b"%PDF alpha"),
        ("notes.txt", b"not a datasheet"),
        ("manual.docx", b"PK word doc"),
    ])
    .await;

    let res = app.get(routes::DOWNLOAD_ALL_SPECS).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.header("content-type"), "application/zip");
    assert!(
        res.header("content-disposition")
            .starts_with("attachment; filename=\"Technical_Specifications_Complete.zip\"")
    );

    let mut archive = read_archive(&res.bytes);
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    assert_eq!(names, vec!["alpha.pdf", "beta.pdf"]);

    let mut content = String::new();
    archive
        .by_name("beta.pdf")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "%PDF beta");
}

#[tokio::test]
async fn empty_asset_directory_returns_404() {
    let app = TestApp::spawn(&[("notes.txt", b"no pdfs here" as &[u8])]).await;

    let res = app.get(routes::DOWNLOAD_ALL_SPECS).await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"].as_str().unwrap(), "NOT_FOUND");
    assert_eq!(
        res.body["message"].as_str().unwrap(),
        "No technical specifications found"
    );
}

#[tokio::test]
async fn repeated_requests_produce_identical_bytes() {
    let app = TestApp::spawn(&[
        ("a_1756905653968.pdf", b"%PDF a" as &[u8]),
        ("b_1756905653999.pdf", b"%PDF b"),
    ])
    .await;

    let first = app.get(routes::DOWNLOAD_ALL_SPECS).await;
    let second = app.get(routes::DOWNLOAD_ALL_SPECS).await;

    assert_eq!(first.status, 200);
    assert_eq!(first.bytes, second.bytes);
}

#[cfg(unix)]
#[tokio::test]
async fn source_read_failure_aborts_the_response_body() {
    use std::os::unix::fs::PermissionsExt;

    let payload = vec![b'x'; 512 * 1024];
    let app = TestApp::spawn(&[
        ("alpha.pdf", payload.as_slice()),
        ("omega.pdf", b"%PDF omega"),
    ])
    .await;

    let omega = app.assets_dir.path().join("omega.pdf");
    std::fs::set_permissions(&omega, std::fs::Permissions::from_mode(0o000)).unwrap();
    if std::fs::File::open(&omega).is_ok() {
        // Privileged users bypass permission bits; nothing to exercise.
        return;
    }

    let res = app
        .client
        .get(app.url(routes::DOWNLOAD_ALL_SPECS))
        .send()
        .await
        .expect("Failed to send GET request");
    assert_eq!(res.status().as_u16(), 200);

    // The archive fails when it reaches the unreadable entry; the body
    // must error out rather than terminate as a complete response.
    assert!(res.bytes().await.is_err());
}

#[tokio::test]
async fn client_disconnect_does_not_poison_later_requests() {
    // Large compressible payloads so the stream outlives the first chunk.
    let payload = vec![b'x'; 2 * 1024 * 1024];
    let files: Vec<(String, &[u8])> = (0..6)
        .map(|i| (format!("bulk_{i}.pdf"), payload.as_slice()))
        .collect();
    let files: Vec<(&str, &[u8])> = files.iter().map(|(n, c)| (n.as_str(), *c)).collect();
    let app = TestApp::spawn(&files).await;

    let res = app
        .client
        .get(app.url(routes::DOWNLOAD_ALL_SPECS))
        .send()
        .await
        .expect("Failed to send GET request");
    assert_eq!(res.status().as_u16(), 200);

    let mut stream = res.bytes_stream();
    let first = stream.next().await;
    assert!(first.is_some());
    drop(stream);

    // Give the aborted writer task time to unwind.
    tokio::time::sleep(Duration::from_millis(300)).await;

    let res = app.get(routes::DOWNLOAD_ALL_SPECS).await;
    assert_eq!(res.status, 200);
    let archive = read_archive(&res.bytes);
    assert_eq!(archive.len(), 6);
}
