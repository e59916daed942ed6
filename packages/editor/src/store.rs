//! # Flowchart Persistence
//!
//! A [`FlowchartStore`] loads and saves one flowchart per project. The
//! editor only talks to the trait; hosts plug in their own backend.
//!
//! Two implementations ship here:
//! - [`MemoryStore`]: process-local map, used by tests and previews
//! - [`FileStore`]: one pretty-printed JSON file per project

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use storymate_flowchart::FlowchartDto;
use tracing::{debug, info};

use crate::StoreError;

pub trait FlowchartStore {
    /// Saved flowchart for a project, or `None` if it was never saved
    fn load(&self, project_id: &str) -> Result<Option<FlowchartDto>, StoreError>;

    /// Replace the saved flowchart. Last write wins.
    fn save(&self, flowchart: &FlowchartDto) -> Result<(), StoreError>;
}

impl<T: FlowchartStore + ?Sized> FlowchartStore for &T {
    fn load(&self, project_id: &str) -> Result<Option<FlowchartDto>, StoreError> {
        (**self).load(project_id)
    }

    fn save(&self, flowchart: &FlowchartDto) -> Result<(), StoreError> {
        (**self).save(flowchart)
    }
}

impl<T: FlowchartStore + ?Sized> FlowchartStore for Box<T> {
    fn load(&self, project_id: &str) -> Result<Option<FlowchartDto>, StoreError> {
        (**self).load(project_id)
    }

    fn save(&self, flowchart: &FlowchartDto) -> Result<(), StoreError> {
        (**self).save(flowchart)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    flowcharts: RwLock<HashMap<String, FlowchartDto>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.flowcharts.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FlowchartStore for MemoryStore {
    fn load(&self, project_id: &str) -> Result<Option<FlowchartDto>, StoreError> {
        let map = self
            .flowcharts
            .read()
            .map_err(|_| StoreError::Rejected("memory store lock poisoned".to_string()))?;
        Ok(map.get(project_id).cloned())
    }

    fn save(&self, flowchart: &FlowchartDto) -> Result<(), StoreError> {
        let mut map = self
            .flowcharts
            .write()
            .map_err(|_| StoreError::Rejected("memory store lock poisoned".to_string()))?;
        map.insert(flowchart.project_id.clone(), flowchart.clone());
        Ok(())
    }
}

/// Stores each project as `<root>/<project_id>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, project_id: &str) -> Result<PathBuf, StoreError> {
        validate_project_id(project_id)?;
        Ok(self.root.join(format!("{}.json", project_id)))
    }

    /// Project ids with a saved flowchart, sorted
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl FlowchartStore for FileStore {
    fn load(&self, project_id: &str) -> Result<Option<FlowchartDto>, StoreError> {
        let path = self.path_for(project_id)?;
        if !path.exists() {
            debug!(project_id, path = %path.display(), "No saved flowchart");
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let flowchart = FlowchartDto::from_json(&json)?;
        debug!(project_id, nodes = flowchart.nodes.len(), "Loaded flowchart");
        Ok(Some(flowchart))
    }

    fn save(&self, flowchart: &FlowchartDto) -> Result<(), StoreError> {
        let path = self.path_for(&flowchart.project_id)?;
        fs::create_dir_all(&self.root)?;

        // Write then rename so readers never see a half-written file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, flowchart.to_json()?)?;
        fs::rename(&tmp, &path)?;

        info!(
            project_id = %flowchart.project_id,
            path = %path.display(),
            "Saved flowchart"
        );
        Ok(())
    }
}

fn validate_project_id(project_id: &str) -> Result<(), StoreError> {
    let valid = !project_id.is_empty()
        && project_id != "."
        && project_id != ".."
        && !project_id.contains(['/', '\\', '\0']);
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidProjectId(project_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storymate_flowchart::{Graph, Node, NodeKind, Point};

    fn flowchart(project_id: &str, updated_at: i64) -> FlowchartDto {
        let graph = Graph::from_nodes([Node::new("s", NodeKind::Start, "Hi", Point::ZERO)]).unwrap();
        FlowchartDto::from_graph(project_id, &graph, updated_at)
    }

    #[test]
    fn test_memory_store_last_write_wins() {
        let store = MemoryStore::new();
        assert_eq!(store.load("p").unwrap(), None);

        store.save(&flowchart("p", 1)).unwrap();
        store.save(&flowchart("p", 2)).unwrap();

        assert_eq!(store.load("p").unwrap().unwrap().updated_at, 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data"));

        assert_eq!(store.load("demo").unwrap(), None);
        store.save(&flowchart("demo", 42)).unwrap();

        let loaded = store.load("demo").unwrap().unwrap();
        assert_eq!(loaded, flowchart("demo", 42));
        assert_eq!(store.list().unwrap(), vec!["demo".to_string()]);
    }

    #[test]
    fn test_file_store_rejects_path_like_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        for id in ["", "..", "a/b", "a\\b"] {
            assert!(matches!(
                store.load(id),
                Err(StoreError::InvalidProjectId(_))
            ));
        }
    }

    #[test]
    fn test_file_store_reports_corrupt_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

        assert!(matches!(store.load("bad"), Err(StoreError::Flowchart(_))));
    }
}
