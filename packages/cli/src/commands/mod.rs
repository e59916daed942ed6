pub mod edit;
pub mod init;
pub mod lint;
pub mod play;
pub mod show;

pub use edit::{add, connect, delete, disconnect, AddArgs, DeleteArgs, EdgeArgs};
pub use init::{init, InitArgs};
pub use lint::{lint, LintArgs};
pub use play::{play, PlayArgs};
pub use show::{show, ShowArgs};

use anyhow::{anyhow, Result};
use std::path::Path;
use storymate_editor::{EditSession, FileStore, FlowchartStore, GraphOrigin};
use storymate_flowchart::Graph;

use crate::config::Config;

/// Load a project's graph, failing if it was never initialized
pub(crate) fn load_graph(config: &Config, cwd: &Path, project: &str) -> Result<Graph> {
    let store = config.store(cwd);
    let flowchart = store
        .load(project)?
        .ok_or_else(|| missing_project(project))?;
    Ok(flowchart.into_graph()?)
}

/// Open an existing project for editing.
///
/// Only a graph read back from disk is editable here; a bootstrap graph
/// would overwrite the stored file on save.
pub(crate) fn open_session(
    config: &Config,
    cwd: &Path,
    project: &str,
) -> Result<EditSession<FileStore>> {
    let session = EditSession::open(project, config.store(cwd), config.editor.clone());
    match session.origin() {
        GraphOrigin::Loaded { .. } => Ok(session),
        GraphOrigin::Fresh => Err(missing_project(project)),
        GraphOrigin::Recovered(reason) => Err(anyhow!(
            "Cannot read project '{}': {}",
            project,
            reason
        )),
    }
}

fn missing_project(project: &str) -> anyhow::Error {
    anyhow!(
        "Project '{}' not found. Run: storymate init {}",
        project,
        project
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_session_missing_project() {
        let dir = TempDir::new().unwrap();
        let err = open_session(&Config::default(), dir.path(), "p").unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(!dir.path().join(".storymate/p.json").exists());
    }

    #[test]
    fn test_open_session_rejects_unreadable_graph() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join(".storymate");
        fs::create_dir_all(&data_dir).unwrap();
        fs::write(
            data_dir.join("p.json"),
            r#"{"projectId":"p","nodes":[
                {"id":"y","type":"Story","positionX":0,"positionY":0},
                {"id":"y","type":"Story","positionX":0,"positionY":0}
            ]}"#,
        )
        .unwrap();

        let err = open_session(&Config::default(), dir.path(), "p").unwrap_err();
        assert!(err.to_string().contains("Cannot read project 'p'"));
    }
}
