//! Shared fixtures for pipeline and CLI tests: METS documents and IIIF mocks.

#![allow(dead_code)]

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the fixture METS document is served from.
pub const METS_PATH: &str = "/metsmods/DMM_0001.xml";

/// Builds a METS document whose MAX group lists `hrefs`, in order.
///
/// A `DEFAULT` group with unrelated locations is included so that tests also
/// exercise the group filter.
pub fn mets_document(hrefs: &[String]) -> String {
    let files: String = hrefs
        .iter()
        .enumerate()
        .map(|(index, href)| {
            format!(
                r#"      <mets:file ID="FILE_{n:04}_MAX" MIMETYPE="image/jpeg">
        <mets:FLocat LOCTYPE="URL" xlink:href="{href}"/>
      </mets:file>
"#,
                n = index + 1
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<mets:mets xmlns:mets="http://www.loc.gov/METS/"
           xmlns:xlink="http://www.w3.org/1999/xlink">
  <mets:fileSec>
    <mets:fileGrp USE="DEFAULT">
      <mets:file ID="FILE_0001_DEFAULT">
        <mets:FLocat LOCTYPE="URL" xlink:href="https://unrelated.invalid/default/1.jpg"/>
      </mets:file>
    </mets:fileGrp>
    <mets:fileGrp USE="MAX">
{files}    </mets:fileGrp>
  </mets:fileSec>
</mets:mets>
"#
    )
}

/// URL of the fixture METS document on `server`.
pub fn mets_url(server: &MockServer) -> String {
    format!("{}{METS_PATH}", server.uri())
}

/// Serves a METS document listing `{server}/{name}` for every name in `pages`.
pub async fn mount_mets(server: &MockServer, pages: &[&str]) {
    let hrefs: Vec<String> = pages
        .iter()
        .map(|name| format!("{}/{name}", server.uri()))
        .collect();
    mount_raw_mets(server, &mets_document(&hrefs)).await;
}

/// Serves `body` as the METS document.
pub async fn mount_raw_mets(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path(METS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

/// Serves `/{reference}/info.json` with `id` = `{server}/{id}`.
pub async fn mount_descriptor(server: &MockServer, reference: &str, id: &str) {
    let body = format!(
        r#"{{"@context": "http://iiif.io/api/image/3/context.json", "id": "{}/{id}", "type": "ImageService3", "profile": "level1"}}"#,
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path(format!("/{reference}/info.json")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Serves the full-resolution JPEG of image `id`, expecting `expected_calls` requests.
pub async fn mount_image(server: &MockServer, id: &str, bytes: &[u8], expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/{id}/full/max/0/default.jpg")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "image/jpeg")
                .set_body_bytes(bytes.to_vec()),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Answers the full-resolution JPEG of image `id` with `status`.
pub async fn mount_failing_image(server: &MockServer, id: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/{id}/full/max/0/default.jpg")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Serves a complete page: descriptor under `reference`, image under `id`.
pub async fn mount_page(server: &MockServer, reference: &str, id: &str, bytes: &[u8]) {
    mount_descriptor(server, reference, id).await;
    mount_image(server, id, bytes, 1).await;
}

/// Fake JPEG payload unique to `id`.
pub fn jpeg_bytes(id: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend_from_slice(id.as_bytes());
    bytes.extend_from_slice(&[0xFF, 0xD9]);
    bytes
}
