//! # Edit Session
//!
//! One project open in the editor: the graph, the interaction state and
//! the store it is loaded from and saved to.
//!
//! The session never fails to open. If the store has nothing, or what it
//! has cannot be read, the editor starts from the bootstrap graph and
//! records why in [`GraphOrigin`].

use chrono::Utc;
use storymate_flowchart::{FlowchartDto, Graph, IDGenerator};
use tracing::{info, warn};

use crate::config::EditorConfig;
use crate::editor::EditorState;
use crate::events::EditorEvent;
use crate::mutations::{Mutation, MutationResult};
use crate::store::FlowchartStore;
use crate::{EditorError, StoreError};

/// Where the session's graph came from
#[derive(Debug, Clone, PartialEq)]
pub enum GraphOrigin {
    /// Loaded from the store
    Loaded { updated_at: i64 },

    /// Nothing saved yet; bootstrap graph
    Fresh,

    /// Load failed; bootstrap graph
    Recovered(String),
}

pub struct EditSession<S: FlowchartStore> {
    project_id: String,
    store: S,
    graph: Graph,
    editor: EditorState,
    origin: GraphOrigin,
}

impl<S: FlowchartStore> EditSession<S> {
    /// Load `project_id` from `store`, falling back to the bootstrap graph
    pub fn open(project_id: impl Into<String>, store: S, config: EditorConfig) -> Self {
        let project_id = project_id.into();
        let mut ids = IDGenerator::new(&project_id);
        let (graph, origin) = load_graph(&store, &project_id, &config, &mut ids);

        Self {
            project_id,
            store,
            graph,
            editor: EditorState::new(config, ids),
            origin,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn origin(&self) -> &GraphOrigin {
        &self.origin
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Borrow the graph and editor together for gesture calls
    pub fn parts_mut(&mut self) -> (&mut Graph, &mut EditorState) {
        (&mut self.graph, &mut self.editor)
    }

    /// Run `f` with mutable access to the editor and graph
    pub fn with_editor<R>(&mut self, f: impl FnOnce(&mut EditorState, &mut Graph) -> R) -> R {
        f(&mut self.editor, &mut self.graph)
    }

    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        self.editor.apply(&mut self.graph, mutation)
    }

    /// Wire snapshot of the current graph
    pub fn snapshot(&self, updated_at: i64) -> FlowchartDto {
        FlowchartDto::from_graph(self.project_id.clone(), &self.graph, updated_at)
    }

    /// Persist the whole graph, stamped with the current time.
    ///
    /// Emits [`EditorEvent::Saved`] or [`EditorEvent::SaveFailed`]. The
    /// in-memory graph is unchanged either way.
    pub fn save(&mut self) -> Result<i64, StoreError> {
        let updated_at = Utc::now().timestamp_millis();
        let snapshot = self.snapshot(updated_at);

        match self.store.save(&snapshot) {
            Ok(()) => {
                info!(project_id = %self.project_id, nodes = snapshot.nodes.len(), "Flowchart saved");
                self.editor.emit(EditorEvent::Saved {
                    project_id: self.project_id.clone(),
                    updated_at,
                });
                Ok(updated_at)
            }
            Err(err) => {
                warn!(project_id = %self.project_id, error = %err, "Failed to save flowchart");
                self.editor.emit(EditorEvent::SaveFailed {
                    project_id: self.project_id.clone(),
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Replace the graph with what the store holds now.
    ///
    /// Selection and drags are reset; listeners and viewport survive.
    pub fn reload(&mut self) -> &GraphOrigin {
        let config = self.editor.config().clone();
        let (graph, origin) = load_graph(&self.store, &self.project_id, &config, self.editor.ids_mut());
        self.graph = graph;
        self.origin = origin;
        self.editor.reset_interaction();
        &self.origin
    }

    pub fn into_parts(self) -> (Graph, EditorState, S) {
        (self.graph, self.editor, self.store)
    }
}

impl<S: FlowchartStore> std::fmt::Debug for EditSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("project_id", &self.project_id)
            .field("nodes", &self.graph.len())
            .field("origin", &self.origin)
            .finish()
    }
}

fn load_graph<S: FlowchartStore>(
    store: &S,
    project_id: &str,
    config: &EditorConfig,
    ids: &mut IDGenerator,
) -> (Graph, GraphOrigin) {
    let loaded = store
        .load(project_id)
        .and_then(|dto| match dto {
            Some(dto) => {
                let updated_at = dto.updated_at;
                Ok(Some((dto.into_graph()?, updated_at)))
            }
            None => Ok(None),
        });

    match loaded {
        Ok(Some((graph, updated_at))) => {
            info!(project_id, nodes = graph.len(), "Opened flowchart");
            (graph, GraphOrigin::Loaded { updated_at })
        }
        Ok(None) => {
            info!(project_id, "No saved flowchart, starting fresh");
            (config.bootstrap_graph(ids), GraphOrigin::Fresh)
        }
        Err(err) => {
            warn!(project_id, error = %err, "Failed to load flowchart, starting fresh");
            (config.bootstrap_graph(ids), GraphOrigin::Recovered(err.to_string()))
        }
    }
}
