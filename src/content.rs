//! Static site content
//!
//! Services, clients, process steps and gallery images are authored as JSON
//! files and read once; nothing here refreshes or subscribes.
//!
//! Layout of a content directory:
//! - `services/*.json` (one service per file)
//! - `clients/clients.json`
//! - `process/process.json`
//! - `process-gallery.json`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Which side of the card the service image sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub image_position: ImagePosition,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub order: i32,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientsData {
    pub clients: Vec<Client>,
    #[serde(default)]
    pub white_logos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub number: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessData {
    pub steps: Vec<ProcessStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub src: String,
}

#[derive(Debug, Deserialize)]
struct GalleryFile {
    images: Vec<String>,
}

/// Supplies the page's typed content
pub trait ContentProvider {
    /// Active services sorted by `order`
    fn services(&self) -> Result<Vec<Service>, ContentError>;
    fn clients(&self) -> Result<ClientsData, ContentError>;
    fn process(&self) -> Result<ProcessData, ContentError>;
    fn gallery(&self) -> Result<Vec<GalleryImage>, ContentError>;
}

fn parse<T: for<'de> Deserialize<'de>>(name: &str, json: &str) -> Result<T, ContentError> {
    serde_json::from_str(json).map_err(|source| ContentError::Parse {
        name: name.to_string(),
        source,
    })
}

/// Keep active services, ordered by their `order` field
pub fn select_active(mut services: Vec<Service>) -> Vec<Service> {
    services.retain(|s| s.active);
    services.sort_by_key(|s| s.order);
    services
}

fn parse_gallery(name: &str, json: &str) -> Result<Vec<GalleryImage>, ContentError> {
    let file: GalleryFile = parse(name, json)?;
    Ok(file
        .images
        .into_iter()
        .map(|src| GalleryImage { src })
        .collect())
}

/// Content read from a directory on disk
#[derive(Debug, Clone)]
pub struct DirContent {
    root: PathBuf,
}

impl DirContent {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read(&self, path: &Path) -> Result<String, ContentError> {
        std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ContentProvider for DirContent {
    fn services(&self) -> Result<Vec<Service>, ContentError> {
        let dir = self.root.join("services");
        if !dir.is_dir() {
            log::warn!("Services directory does not exist: {}", dir.display());
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&dir).map_err(|source| ContentError::Io {
            path: dir.clone(),
            source,
        })?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        // read_dir order is platform-dependent
        paths.sort();

        let mut services = Vec::with_capacity(paths.len());
        for path in &paths {
            let json = self.read(path)?;
            services.push(parse::<Service>(&path.display().to_string(), &json)?);
        }
        let services = select_active(services);
        log::info!("Loaded {} active services from {}", services.len(), dir.display());
        Ok(services)
    }

    fn clients(&self) -> Result<ClientsData, ContentError> {
        let path = self.root.join("clients").join("clients.json");
        parse(&path.display().to_string(), &self.read(&path)?)
    }

    fn process(&self) -> Result<ProcessData, ContentError> {
        let path = self.root.join("process").join("process.json");
        parse(&path.display().to_string(), &self.read(&path)?)
    }

    fn gallery(&self) -> Result<Vec<GalleryImage>, ContentError> {
        let path = self.root.join("process-gallery.json");
        parse_gallery(&path.display().to_string(), &self.read(&path)?)
    }
}

/// Content compiled into the binary (the web build has no filesystem)
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedContent {
    pub services: &'static [&'static str],
    pub clients: &'static str,
    pub process: &'static str,
    pub gallery: &'static str,
}

impl EmbeddedContent {
    /// The repository's `content/` directory
    pub fn bundled() -> Self {
        Self {
            services: &[
                include_str!("../content/services/video-production.json"),
                include_str!("../content/services/commercial-photography.json"),
                include_str!("../content/services/social-content-creation.json"),
                include_str!("../content/services/event-coverage.json"),
                include_str!("../content/services/drone-footage.json"),
            ],
            clients: include_str!("../content/clients/clients.json"),
            process: include_str!("../content/process/process.json"),
            gallery: include_str!("../content/process-gallery.json"),
        }
    }
}

impl ContentProvider for EmbeddedContent {
    fn services(&self) -> Result<Vec<Service>, ContentError> {
        let services = self
            .services
            .iter()
            .enumerate()
            .map(|(i, json)| parse::<Service>(&format!("embedded service #{i}"), json))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(select_active(services))
    }

    fn clients(&self) -> Result<ClientsData, ContentError> {
        parse("embedded clients", self.clients)
    }

    fn process(&self) -> Result<ProcessData, ContentError> {
        parse("embedded process", self.process)
    }

    fn gallery(&self) -> Result<Vec<GalleryImage>, ContentError> {
        parse_gallery("embedded gallery", self.gallery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_content_parses() {
        let content = EmbeddedContent::bundled();
        let services = content.services().unwrap();
        // drone-footage is inactive
        assert_eq!(services.len(), 4);
        assert!(services.windows(2).all(|w| w[0].order <= w[1].order));
        assert!(services.iter().all(|s| s.active));
        assert!(content.clients().unwrap().clients.len() > 6);
        assert_eq!(content.process().unwrap().steps.len(), 5);
        assert!(!content.gallery().unwrap().is_empty());
    }

    #[test]
    fn test_dir_content_matches_embedded() {
        let dir = DirContent::new(concat!(env!("CARGO_MANIFEST_DIR"), "/content"));
        let embedded = EmbeddedContent::bundled();
        assert_eq!(dir.services().unwrap(), embedded.services().unwrap());
        assert_eq!(dir.process().unwrap(), embedded.process().unwrap());
        assert_eq!(dir.gallery().unwrap(), embedded.gallery().unwrap());
    }

    #[test]
    fn test_missing_services_dir_is_empty() {
        let dir = DirContent::new("/definitely/not/here");
        assert!(dir.services().unwrap().is_empty());
        assert!(matches!(dir.clients(), Err(ContentError::Io { .. })));
    }

    #[test]
    fn test_malformed_record_reports_name() {
        let content = EmbeddedContent {
            services: &["{ not json"],
            clients: "{}",
            process: "{}",
            gallery: "{}",
        };
        let err = content.services().unwrap_err();
        assert!(err.to_string().contains("embedded service #0"));
    }

    #[test]
    fn test_camel_case_fields() {
        let s: Service = serde_json::from_str(
            r#"{"id":"x","title":"X","description":"d","price":"$1","imagePosition":"right","order":3}"#,
        )
        .unwrap();
        assert_eq!(s.image_position, ImagePosition::Right);
        assert!(s.active);
        let c: ClientsData =
            serde_json::from_str(r#"{"clients":[],"whiteLogos":["a.png"]}"#).unwrap();
        assert_eq!(c.white_logos, vec!["a.png".to_string()]);
    }
}
