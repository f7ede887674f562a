//! HttpDesignService against a local scripted HTTP server
//!
//! The server answers each connection with the next canned response and
//! records the requests it saw, so the tests can check both directions of
//! the wire contract.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use dsync_core::{
    ArtifactKind, DefinitionSource, DesignService, HttpDesignService, RemoteError, SyncEngine,
    SyncOptions, download_stylesheet,
};
use dsync_test_utils::TestProject;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

#[derive(Debug)]
struct Recorded {
    method: String,
    path: String,
    body: String,
}

struct Canned {
    status: u16,
    body: String,
}

fn canned(status: u16, body: impl Into<String>) -> Canned {
    Canned {
        status,
        body: body.into(),
    }
}

/// Serve `responses` in order, one connection each, then stop.
fn serve(responses: Vec<Canned>) -> (String, JoinHandle<Vec<Recorded>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for response in responses {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut parts = request_line.split_whitespace();
            let method = parts.next().unwrap_or_default().to_string();
            let path = parts.next().unwrap_or_default().to_string();

            let mut content_length = 0usize;
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                let header = header.trim_end();
                if header.is_empty() {
                    break;
                }
                if let Some((name, value)) = header.split_once(':')
                    && name.eq_ignore_ascii_case("content-length")
                {
                    content_length = value.trim().parse().unwrap();
                }
            }

            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();
            seen.push(Recorded {
                method,
                path,
                body: String::from_utf8(body).unwrap(),
            });

            let reply = format!(
                "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                response.status,
                response.body.len(),
                response.body
            );
            let mut stream = reader.into_inner();
            stream.write_all(reply.as_bytes()).unwrap();
            stream.flush().unwrap();
        }
        seen
    });

    (endpoint, handle)
}

/// Client for the local server, bypassing any proxy set in the environment.
fn local_service(endpoint: String) -> HttpDesignService {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    HttpDesignService::with_client(client, endpoint)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_config_sync_with_clear_over_http() {
    let project = TestProject::new();
    project.write_component("menu.sfc.ts", "createConfig", "menu", "{size: 'small'}");
    let remote = json!({"menu": {"size": "large"}});

    let (endpoint, server) = serve(vec![
        canned(200, remote.to_string()),
        canned(200, "{}"),
    ]);
    let service = Arc::new(local_service(endpoint));

    let report = SyncEngine::new(project.root(), ArtifactKind::Config)
        .unwrap()
        .with_service(service)
        .sync(
            &DefinitionSource::Remote { id: "app-1".into() },
            SyncOptions {
                dry_run: false,
                clear: true,
            },
        )
        .await
        .unwrap();

    let seen = server.join().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!((seen[0].method.as_str(), seen[0].path.as_str()), ("GET", "/config/app-1"));
    assert_eq!((seen[1].method.as_str(), seen[1].path.as_str()), ("DELETE", "/config/app-1"));

    let snapshot = report.snapshot.unwrap();
    let sent: Value = serde_json::from_str(&seen[1].body).unwrap();
    assert_eq!(sent, json!({"checksum": snapshot.checksum}));
    assert!(report.cleared);
    project.assert_file_contains("menu.sfc.ts", "\"size\": \"large\"");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_client_error_message_is_surfaced() {
    let (endpoint, server) = serve(vec![canned(400, r#"{"error": "Unknown app"}"#)]);
    let service = local_service(endpoint);

    let err = service.fetch(ArtifactKind::Config, "nope").await.unwrap_err();
    server.join().unwrap();

    assert_eq!(
        err,
        RemoteError::Client {
            message: "Unknown app".into()
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_aborts_run() {
    let project = TestProject::new();
    project.write_component("card.sf.ts", "createStyle", "card", "{}");
    let before = project.read_file("card.sf.ts");

    let (endpoint, server) = serve(vec![canned(500, "oops")]);
    let service = Arc::new(local_service(endpoint));

    let err = SyncEngine::new(project.root(), ArtifactKind::Style)
        .unwrap()
        .with_service(service)
        .sync(
            &DefinitionSource::Remote { id: "p1".into() },
            SyncOptions::default(),
        )
        .await
        .unwrap_err();
    let seen = server.join().unwrap();

    assert_eq!(seen[0].path, "/ast/p1");
    assert_eq!(err.to_string(), "Failed to load Style: Internal Server Error");
    assert_eq!(project.read_file("card.sf.ts"), before);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stylesheet_download() {
    let project = TestProject::new();
    let (endpoint, server) = serve(vec![canned(200, ".card{padding:4px}"), canned(404, "")]);
    let service = local_service(endpoint);

    let written = download_stylesheet(&service, "p1", project.root()).await.unwrap();
    assert_eq!(written, Some(project.path("app.css")));
    assert_eq!(project.read_file("app.css"), ".card{padding:4px}");

    let missing = service.fetch_stylesheet("p2").await.unwrap();
    assert_eq!(missing, None);

    let seen = server.join().unwrap();
    assert_eq!(seen[0].path, "/css/p1");
    assert_eq!(seen[1].path, "/css/p2");
}
