//! Product model loading.
//!
//! An asset reference is either an `http(s)://` URL or a filesystem path.
//! Loading runs two independent one-shot tasks on a background runtime: an
//! existence probe and the fetch + parse of the model itself. Neither is
//! retried; a failure of either is final for that viewer.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::scene::SceneGraph;

/// Why a model could not be shown. Every variant names the reference.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {reference}")]
    NotFound { reference: String },
    #[error("HTTP {status} fetching {reference}")]
    Http { reference: String, status: u16 },
    #[error("request for {reference} failed: {message}")]
    Request { reference: String, message: String },
    #[error("failed to read {reference}: {source}")]
    Io {
        reference: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {reference}: {message}")]
    Parse { reference: String, message: String },
}

impl AssetError {
    /// The reference that failed, as configured
    pub fn reference(&self) -> &str {
        match self {
            AssetError::NotFound { reference }
            | AssetError::Http { reference, .. }
            | AssetError::Request { reference, .. }
            | AssetError::Io { reference, .. }
            | AssetError::Parse { reference, .. } => reference,
        }
    }
}

/// Where the model bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLocation {
    Url(String),
    Path(PathBuf),
}

/// A configured asset reference and its resolved location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    /// The reference exactly as configured (shown to the user on failure)
    pub raw: String,
    pub location: AssetLocation,
}

impl AssetReference {
    /// Resolve a reference. `/`-rooted paths are looked up under `asset_root`
    /// first, the way a web server serves its public folder; if nothing exists
    /// there the path is used as an absolute filesystem path.
    pub fn resolve(raw: &str, asset_root: &Path) -> Self {
        let trimmed = raw.trim();
        let location = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            AssetLocation::Url(trimmed.to_string())
        } else if let Some(relative) = trimmed.strip_prefix('/') {
            let under_root = asset_root.join(relative);
            if !under_root.exists() && Path::new(trimmed).exists() {
                AssetLocation::Path(PathBuf::from(trimmed))
            } else {
                AssetLocation::Path(under_root)
            }
        } else {
            AssetLocation::Path(PathBuf::from(trimmed))
        };
        Self {
            raw: raw.to_string(),
            location,
        }
    }

    /// URI usable by egui image loaders
    pub fn to_uri(&self) -> String {
        match &self.location {
            AssetLocation::Url(url) => url.clone(),
            AssetLocation::Path(path) => format!("file://{}", path.display()),
        }
    }

    fn io_error(&self, source: std::io::Error) -> AssetError {
        if source.kind() == std::io::ErrorKind::NotFound {
            AssetError::NotFound {
                reference: self.raw.clone(),
            }
        } else {
            AssetError::Io {
                reference: self.raw.clone(),
                source,
            }
        }
    }

    fn request_error(&self, err: reqwest::Error) -> AssetError {
        match err.status() {
            Some(status) if status == reqwest::StatusCode::NOT_FOUND => AssetError::NotFound {
                reference: self.raw.clone(),
            },
            Some(status) => AssetError::Http {
                reference: self.raw.clone(),
                status: status.as_u16(),
            },
            None => AssetError::Request {
                reference: self.raw.clone(),
                message: err.to_string(),
            },
        }
    }
}

/// Check that the asset is reachable, without parsing it
pub async fn probe(reference: &AssetReference) -> Result<(), AssetError> {
    match &reference.location {
        AssetLocation::Path(path) => {
            let meta = tokio::fs::metadata(path)
                .await
                .map_err(|e| reference.io_error(e))?;
            if meta.is_file() {
                Ok(())
            } else {
                Err(AssetError::NotFound {
                    reference: reference.raw.clone(),
                })
            }
        }
        AssetLocation::Url(url) => {
            reqwest::get(url)
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| reference.request_error(e))?;
            Ok(())
        }
    }
}

/// Read the raw asset bytes
pub async fn fetch(reference: &AssetReference) -> Result<Vec<u8>, AssetError> {
    match &reference.location {
        AssetLocation::Path(path) => tokio::fs::read(path)
            .await
            .map_err(|e| reference.io_error(e)),
        AssetLocation::Url(url) => {
            let response = reqwest::get(url)
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| reference.request_error(e))?;
            let bytes = response
                .bytes()
                .await
                .map_err(|e| reference.request_error(e))?;
            Ok(bytes.to_vec())
        }
    }
}

/// Parse GLB or glTF bytes into a scene graph
pub fn parse(reference: &AssetReference, bytes: &[u8]) -> Result<SceneGraph, AssetError> {
    let parse_error = |message: String| AssetError::Parse {
        reference: reference.raw.clone(),
        message,
    };
    let gltf = gltf::Gltf::from_slice(bytes).map_err(|e| parse_error(e.to_string()))?;
    let base = match &reference.location {
        AssetLocation::Path(path) => path.parent(),
        AssetLocation::Url(_) => None,
    };
    let buffers = gltf::import_buffers(&gltf.document, base, gltf.blob.clone())
        .map_err(|e| parse_error(e.to_string()))?;
    SceneGraph::from_gltf(&gltf.document, &buffers).map_err(parse_error)
}

/// Fetch and parse in one step
pub async fn load(reference: &AssetReference) -> Result<SceneGraph, AssetError> {
    let bytes = fetch(reference).await?;
    parse(reference, &bytes)
}

/// Runs asset tasks off the UI thread
pub struct AssetLoader {
    runtime: tokio::runtime::Runtime,
}

impl AssetLoader {
    pub fn new() -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("asset-loader")
            .enable_all()
            .build()?;
        Ok(Self { runtime })
    }

    /// Start the probe and the load. `notify` is called from the background
    /// thread whenever one of them finishes.
    pub fn start(
        &self,
        reference: AssetReference,
        notify: impl Fn() + Send + Sync + 'static,
    ) -> LoadHandle {
        tracing::info!("Loading model {}", reference.raw);
        let notify = Arc::new(notify);

        let (probe_tx, probe_rx) = oneshot::channel();
        let probe_ref = reference.clone();
        let probe_notify = notify.clone();
        self.runtime.spawn(async move {
            let result = probe(&probe_ref).await;
            // The receiver is gone when the viewer was dropped; nothing to do then
            let _ = probe_tx.send(result);
            probe_notify();
        });

        let (load_tx, load_rx) = oneshot::channel();
        let load_ref = reference.clone();
        self.runtime.spawn(async move {
            let result = load(&load_ref).await;
            let _ = load_tx.send(result);
            notify();
        });

        LoadHandle {
            reference: reference.raw,
            probe: Some(probe_rx),
            load: Some(load_rx),
            probe_passed: false,
            scene: None,
        }
    }
}

/// Pending result of [`AssetLoader::start`], polled once per frame
pub struct LoadHandle {
    reference: String,
    probe: Option<oneshot::Receiver<Result<(), AssetError>>>,
    load: Option<oneshot::Receiver<Result<SceneGraph, AssetError>>>,
    probe_passed: bool,
    scene: Option<SceneGraph>,
}

impl LoadHandle {
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the final outcome once both tasks have reported, or as soon as
    /// either fails. Returns `None` while still waiting.
    pub fn poll(&mut self) -> Option<Result<SceneGraph, AssetError>> {
        if let Some(rx) = self.probe.as_mut() {
            match rx.try_recv() {
                Ok(Ok(())) => {
                    tracing::info!("Model {} is reachable", self.reference);
                    self.probe_passed = true;
                    self.probe = None;
                }
                Ok(Err(e)) => {
                    self.probe = None;
                    return Some(Err(e));
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => {
                    self.probe = None;
                    return Some(Err(self.stopped()));
                }
            }
        }

        if let Some(rx) = self.load.as_mut() {
            match rx.try_recv() {
                Ok(Ok(scene)) => {
                    self.scene = Some(scene);
                    self.load = None;
                }
                Ok(Err(e)) => {
                    self.load = None;
                    return Some(Err(e));
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => {
                    self.load = None;
                    return Some(Err(self.stopped()));
                }
            }
        }

        if self.probe_passed {
            if let Some(scene) = self.scene.take() {
                return Some(Ok(scene));
            }
        }
        None
    }

    fn stopped(&self) -> AssetError {
        AssetError::Request {
            reference: self.reference.clone(),
            message: "loader stopped before completing".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let r = AssetReference::resolve("https://cdn.example.com/chair.glb", Path::new("public"));
        assert_eq!(
            r.location,
            AssetLocation::Url("https://cdn.example.com/chair.glb".to_string())
        );
        assert_eq!(r.to_uri(), "https://cdn.example.com/chair.glb");
    }

    #[test]
    fn test_resolve_rooted_path_under_asset_root() {
        let r = AssetReference::resolve("/definitely-missing-model.glb", Path::new("public"));
        assert_eq!(
            r.location,
            AssetLocation::Path(PathBuf::from("public/definitely-missing-model.glb"))
        );
        assert_eq!(r.raw, "/definitely-missing-model.glb");
    }

    #[test]
    fn test_resolve_existing_absolute_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let raw = file.path().to_string_lossy().to_string();
        let r = AssetReference::resolve(&raw, Path::new("public"));
        assert_eq!(r.location, AssetLocation::Path(file.path().to_path_buf()));
    }

    #[test]
    fn test_resolve_relative_path() {
        let r = AssetReference::resolve("models/chair.glb", Path::new("public"));
        assert_eq!(r.location, AssetLocation::Path(PathBuf::from("models/chair.glb")));
        assert!(r.to_uri().starts_with("file://"));
    }

    #[test]
    fn test_errors_name_reference() {
        let err = AssetError::Http {
            reference: "/chair.glb".into(),
            status: 500,
        };
        assert_eq!(err.reference(), "/chair.glb");
        assert!(err.to_string().contains("/chair.glb"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let r = AssetReference::resolve("broken.glb", Path::new("."));
        let err = parse(&r, b"definitely not a model").unwrap_err();
        assert!(matches!(err, AssetError::Parse { .. }));
        assert_eq!(err.reference(), "broken.glb");
    }
}
