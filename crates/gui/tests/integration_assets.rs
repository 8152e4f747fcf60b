//! Integration tests for model loading from disk and over HTTP.

use std::net::SocketAddr;
use std::path::Path;
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use ikarus_gui_lib::asset::{self, AssetError, AssetLoader, AssetReference, LoadHandle};
use ikarus_gui_lib::fixtures;
use ikarus_gui_lib::harness::StorefrontHarness;
use ikarus_gui_lib::scene::SceneGraph;
use ikarus_gui_lib::state::AppState;

fn wait(handle: &mut LoadHandle) -> Result<SceneGraph, AssetError> {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(result) = handle.poll() {
            return result;
        }
        assert!(Instant::now() < deadline, "load did not finish in time");
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[tokio::test]
async fn test_load_rooted_reference_from_asset_root() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::write_chair_glb(dir.path(), "chair.glb").unwrap();

    let state = AppState::new(fixtures::settings_with_asset_root(dir.path(), "/chair.glb"));
    let reference = state.model_reference();
    assert_eq!(reference.raw, "/chair.glb");

    asset::probe(&reference).await.unwrap();
    let scene = asset::load(&reference).await.unwrap();
    assert_eq!(scene.mesh_count(), 3);
    assert!(scene.bounds().is_some());
}

#[tokio::test]
async fn test_loaded_model_takes_selection_color() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::write_chair_glb(dir.path(), "chair.glb").unwrap();
    let mut h = StorefrontHarness::with_settings(fixtures::settings_with_asset_root(
        dir.path(),
        "/chair.glb",
    ));

    let scene = asset::load(&h.state.model_reference()).await.unwrap();
    // Legs ship with a translucent material
    assert!(scene.draw_items().iter().any(|item| item.material.transparent));

    h.attach_model(scene);
    h.select_swatch("Navy");
    assert_eq!(h.sync_model(), Some(3));
    let expected = h.selection().color.to_f32();
    for item in h.model().unwrap().draw_items() {
        assert_eq!(item.material.base_color, expected);
        assert!(!item.material.transparent);
    }
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let reference = AssetReference::resolve("/missing.glb", dir.path());

    let err = asset::probe(&reference).await.unwrap_err();
    assert!(matches!(err, AssetError::NotFound { .. }));
    assert_eq!(err.reference(), "/missing.glb");

    let err = asset::load(&reference).await.unwrap_err();
    assert!(matches!(err, AssetError::NotFound { .. }));
    assert!(err.to_string().contains("/missing.glb"));
}

#[tokio::test]
async fn test_directory_fails_probe() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("models")).unwrap();
    let reference = AssetReference::resolve("/models", dir.path());
    let err = asset::probe(&reference).await.unwrap_err();
    assert!(matches!(err, AssetError::NotFound { .. }));
}

#[tokio::test]
async fn test_corrupt_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.glb"), b"glTF but not really").unwrap();
    let reference = AssetReference::resolve("/broken.glb", dir.path());

    // Reachable, but unusable
    asset::probe(&reference).await.unwrap();
    let err = asset::load(&reference).await.unwrap_err();
    assert!(matches!(err, AssetError::Parse { .. }));
    assert_eq!(err.reference(), "/broken.glb");
}

#[test]
fn test_loader_delivers_scene() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::write_chair_glb(dir.path(), "chair.glb").unwrap();
    let reference = AssetReference::resolve("/chair.glb", dir.path());

    let loader = AssetLoader::new().unwrap();
    let mut handle = loader.start(reference, || {});
    assert_eq!(handle.reference(), "/chair.glb");

    let scene = wait(&mut handle).unwrap();
    assert_eq!(scene.mesh_count(), 3);
}

#[test]
fn test_loader_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let reference = AssetReference::resolve("/nowhere.glb", dir.path());

    let loader = AssetLoader::new().unwrap();
    let mut handle = loader.start(reference, || {});
    let err = wait(&mut handle).unwrap_err();
    assert!(matches!(err, AssetError::NotFound { .. }));
    assert_eq!(err.reference(), "/nowhere.glb");
}

#[test]
fn test_loader_notifies_on_completion() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let dir = tempfile::tempdir().unwrap();
    fixtures::write_chair_glb(dir.path(), "chair.glb").unwrap();
    let reference = AssetReference::resolve("/chair.glb", dir.path());

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let loader = AssetLoader::new().unwrap();
    let mut handle = loader.start(reference, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    wait(&mut handle).unwrap();

    // Probe and load each notify once
    let deadline = Instant::now() + Duration::from_secs(5);
    while calls.load(Ordering::SeqCst) < 2 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// ── Malformed hierarchies ───────────────────────────────────────

fn parse_json_glb(json: serde_json::Value) -> Result<SceneGraph, AssetError> {
    let reference = AssetReference::resolve("/malformed.glb", Path::new("public"));
    asset::parse(&reference, &fixtures::glb_from_json(&json))
}

#[test]
fn test_cyclic_nodes_are_parse_error() {
    let err = parse_json_glb(serde_json::json!({
        "asset": {"version": "2.0"},
        "scene": 0,
        "scenes": [{"nodes": [0]}],
        "nodes": [{"children": [1]}, {"children": [0]}]
    }))
    .unwrap_err();
    assert!(matches!(err, AssetError::Parse { .. }));
    assert_eq!(err.reference(), "/malformed.glb");
}

#[test]
fn test_self_parented_node_is_parse_error() {
    let err = parse_json_glb(serde_json::json!({
        "asset": {"version": "2.0"},
        "scenes": [{"nodes": [0]}],
        "nodes": [{"name": "Loop", "children": [0]}]
    }))
    .unwrap_err();
    assert!(matches!(err, AssetError::Parse { .. }));
}

#[test]
fn test_shared_child_is_parse_error() {
    let err = parse_json_glb(serde_json::json!({
        "asset": {"version": "2.0"},
        "scenes": [{"nodes": [0, 1]}],
        "nodes": [{"children": [2]}, {"children": [2]}, {"name": "Shared"}]
    }))
    .unwrap_err();
    assert!(matches!(err, AssetError::Parse { .. }));
}

#[test]
fn test_nested_hierarchy_keeps_order() {
    let scene = parse_json_glb(serde_json::json!({
        "asset": {"version": "2.0"},
        "scenes": [{"nodes": [0, 3]}],
        "nodes": [
            {"name": "Frame", "children": [1, 2]},
            {"name": "Left"},
            {"name": "Right"},
            {"name": "Cushion"}
        ]
    }))
    .unwrap();
    let names: Vec<_> = scene.nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["Frame", "Left", "Right", "Cushion"]);
    assert_eq!(scene.roots, vec![0, 3]);
    assert_eq!(scene.nodes[0].children, vec![1, 2]);
}

// ── HTTP references ─────────────────────────────────────────────

/// Minimal HTTP/1.1 server: `/chair.glb` is served, `/missing.glb` is 404,
/// anything else is 500.
async fn serve_models() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let glb = fixtures::chair_glb();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let glb = glb.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&request).into_owned();
                let path = request.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) = match path {
                    "/chair.glb" => ("200 OK", glb),
                    "/missing.glb" => ("404 Not Found", b"not found".to_vec()),
                    _ => ("500 Internal Server Error", b"boom".to_vec()),
                };
                let head = format!(
                    "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(&body).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    addr
}

fn url_reference(addr: SocketAddr, path: &str) -> AssetReference {
    AssetReference::resolve(&format!("http://{addr}{path}"), Path::new("public"))
}

#[tokio::test]
async fn test_http_model_loads() {
    let addr = serve_models().await;
    let reference = url_reference(addr, "/chair.glb");

    asset::probe(&reference).await.unwrap();
    let scene = asset::load(&reference).await.unwrap();
    assert_eq!(scene.mesh_count(), 3);
}

#[tokio::test]
async fn test_http_404_is_not_found() {
    let addr = serve_models().await;
    let reference = url_reference(addr, "/missing.glb");

    let err = asset::probe(&reference).await.unwrap_err();
    assert!(matches!(err, AssetError::NotFound { .. }));
    assert_eq!(err.reference(), reference.raw);

    let err = asset::load(&reference).await.unwrap_err();
    assert!(matches!(err, AssetError::NotFound { .. }));
    assert!(err.to_string().contains(&reference.raw));
}

#[tokio::test]
async fn test_http_server_error_keeps_status() {
    let addr = serve_models().await;
    let reference = url_reference(addr, "/broken.glb");

    let err = asset::load(&reference).await.unwrap_err();
    assert!(matches!(err, AssetError::Http { status: 500, .. }));
    assert_eq!(err.reference(), reference.raw);
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_http_connection_refused_is_request_error() {
    // Bind then release a port so nothing is listening on it
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let reference = url_reference(addr, "/chair.glb");

    let err = asset::probe(&reference).await.unwrap_err();
    assert!(matches!(err, AssetError::Request { .. }));
    assert_eq!(err.reference(), reference.raw);
}
