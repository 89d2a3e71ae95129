//! Handlers for the graph and recovery commands.
//!
//! Editing commands drive the same [`Session`] the graphical editor uses:
//! a context-menu action or pointer gesture per edit, an autosave after
//! each change, then a save unless `--no-save` was given.
//!
//! When an autosave is pending, editing continues from it rather than from
//! the primary file, so a chain of `--no-save` edits accumulates.

use skilltree_core::{NodeId, Position, Upgrade, UpgradeType};
use skilltree_editor::{
    ContextActionKind, EditorEvent, Mutation, Notification, PointerButton, Session,
};
use skilltree_graph::{GraphStore, summarize};
use skilltree_persist::{PersistenceEngine, RecoveryOutcome, Resolution};

use crate::cli::{Command, RecoverAction, SaveArgs};
use crate::config::SkillTreeConfig;
use crate::config_handlers::handle_config_command;
use crate::error::{Error, Result};

// ============================================================================
// Dispatch
// ============================================================================

/// Runs one command against the configured skill tree.
pub fn run(command: Command, config: &SkillTreeConfig, config_path: Option<&str>) -> Result<()> {
    match command {
        Command::Show { json } => cmd_show(config, json),
        Command::Validate => cmd_validate(config),
        Command::Add {
            x,
            y,
            name,
            description,
            upgrade_type,
            save,
        } => cmd_add(
            config,
            Position::try_new(x, y)?,
            UpgradeEdit {
                name,
                description,
                upgrade_type,
            },
            save,
        ),
        Command::Link { prereq, node, save } => cmd_link(config, prereq, node, save),
        Command::Unlink { a, b, save } => cmd_unlink(config, a, b, save),
        Command::Delete { id, save } => cmd_delete(config, id, save),
        Command::Rename {
            id,
            name,
            description,
            upgrade_type,
            save,
        } => cmd_rename(
            config,
            id,
            UpgradeEdit {
                name,
                description,
                upgrade_type,
            },
            save,
        ),
        Command::Save => cmd_save(config),
        Command::Recover { action } => cmd_recover(config, action),
        Command::Config { action } => handle_config_command(config_path, action),
    }
}

// ============================================================================
// Session helpers
// ============================================================================

/// Optional replacements for an upgrade's fields.
#[derive(Debug, Clone, Default)]
pub struct UpgradeEdit {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New type
    pub upgrade_type: Option<UpgradeType>,
}

impl UpgradeEdit {
    /// Returns `true` if nothing would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.upgrade_type.is_none()
    }

    /// Applies the replacements to a copy of `upgrade`.
    pub fn apply(&self, upgrade: &Upgrade) -> Upgrade {
        let mut next = upgrade.clone();
        if let Some(name) = &self.name {
            next.name = name.clone();
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        if let Some(t) = self.upgrade_type {
            next.upgrade_type = t;
        }
        next
    }
}

/// Opens an editing session, continuing from a pending autosave if one exists.
pub fn open_session(config: &SkillTreeConfig) -> Result<Session> {
    let engine = config.engine();
    let store = match engine.pending_recovery() {
        Some(info) => {
            log::info!(
                "Continuing unsaved changes from {}",
                info.autosave_path.display()
            );
            engine.load_autosave()?.0
        }
        None => engine.load()?.0,
    };
    let editor = skilltree_editor::Editor::new(store).with_grid_size(config.grid_size);
    Ok(Session::new(editor, engine).with_autosave(config.autosave))
}

fn position_of(session: &Session, id: NodeId) -> Result<Position> {
    session
        .editor()
        .store()
        .get_node(id)
        .map(|n| n.position)
        .ok_or_else(|| skilltree_core::Error::unknown_node(id).into())
}

fn mutations(out: &[Notification]) -> impl Iterator<Item = &Mutation> {
    out.iter().filter_map(Notification::as_mutation)
}

/// Saves unless asked not to, and reports where the change went.
fn finish(session: &mut Session, save: SaveArgs) -> Result<()> {
    if save.no_save {
        println!(
            "Unsaved (autosave: {})",
            session.engine().autosave_path().display()
        );
        return Ok(());
    }
    let report = session.save()?;
    println!(
        "Saved {} node(s), {} edge(s) to {}",
        report.nodes_written,
        report.edges_written,
        report.path.display()
    );
    Ok(())
}

// ============================================================================
// Read-only commands
// ============================================================================

/// Lists every node.
pub fn cmd_show(config: &SkillTreeConfig, json: bool) -> Result<()> {
    let session = open_session(config)?;
    let store = session.editor().store();

    if json {
        let nodes: Vec<_> = store.nodes_sorted();
        let text = serde_json::to_string_pretty(&nodes).map_err(skilltree_core::Error::from)?;
        println!("{text}");
        return Ok(());
    }

    print!("{}", render_table(store));
    if session.pending_recovery().is_some() {
        println!("(showing unsaved changes from the autosave file)");
    }
    Ok(())
}

/// Formats the node table printed by `show`.
pub fn render_table(store: &GraphStore) -> String {
    let join = |ids: &std::collections::BTreeSet<NodeId>| {
        ids.iter()
            .map(NodeId::to_string)
            .collect::<Vec<_>>()
            .join(",")
    };

    let mut out = format!(
        "{:>4}  {:>8}  {:>8}  {:<16}  {:<24}  {:<10}  {:<10}\n",
        "id", "x", "y", "type", "name", "prereqs", "postreqs"
    );
    for node in store.nodes_sorted() {
        out.push_str(&format!(
            "{:>4}  {:>8}  {:>8}  {:<16}  {:<24}  {:<10}  {:<10}\n",
            node.id.to_string(),
            node.position.x,
            node.position.y,
            node.upgrade.upgrade_type.name(),
            node.upgrade.name,
            join(&node.prerequisite_ids),
            join(&node.postrequisite_ids),
        ));
    }
    out
}

/// Loads the primary file and reports every problem found.
///
/// Cycles are reported but are not problems.
pub fn cmd_validate(config: &SkillTreeConfig) -> Result<()> {
    let engine = config.engine();
    let path = engine.primary_path();
    let (store, report) = PersistenceEngine::load_from(path)?;

    let mut problems = 0;
    for dangling in &report.dangling_refs {
        println!("dangling reference: {dangling}");
        problems += 1;
    }
    for dup in &report.duplicate_ids {
        println!("duplicate id: {dup}");
        problems += 1;
    }
    if report.self_loops > 0 {
        println!("self-references dropped: {}", report.self_loops);
        problems += report.self_loops;
    }
    for violation in store.check_invariants() {
        println!("invariant: {violation}");
        problems += 1;
    }

    let summary = summarize(&store);
    println!(
        "{} node(s), {} edge(s), {} root(s), {} leaf node(s){}{}",
        summary.node_count,
        summary.edge_count,
        summary.roots.len(),
        summary.leaves.len(),
        if summary.has_cycles { ", contains cycles" } else { "" },
        if report.legacy_format { ", legacy format" } else { "" },
    );

    if problems > 0 {
        return Err(Error::Invalid {
            path: path.display().to_string(),
            count: problems,
        });
    }
    println!("OK");
    Ok(())
}

// ============================================================================
// Editing commands
// ============================================================================

/// Adds a node at `position`, optionally naming it.
pub fn cmd_add(
    config: &SkillTreeConfig,
    position: Position,
    edit: UpgradeEdit,
    save: SaveArgs,
) -> Result<()> {
    let mut session = open_session(config)?;
    let out = session.handle(EditorEvent::context(
        ContextActionKind::AddSkill,
        None,
        position,
    ))?;
    let id = mutations(&out)
        .find_map(|m| match m {
            Mutation::Added(id) => Some(*id),
            _ => None,
        })
        .ok_or_else(|| Error::config("editor did not create a node"))?;

    if !edit.is_empty()
        && let Some(node) = session.editor().store().get_node(id)
    {
        let upgrade = edit.apply(&node.upgrade);
        session.edit_upgrade(id, upgrade)?;
    }
    println!("Added node {id}");

    if save.no_save {
        return finish(&mut session, save);
    }
    let report = session.save()?;
    if let Some(new_id) = report.id_mapping.get(&id)
        && *new_id != id
    {
        println!("Node {id} is now {new_id} after renumbering");
    }
    println!("Saved to {}", report.path.display());
    Ok(())
}

/// Makes `prereq` a prerequisite of `node`.
pub fn cmd_link(config: &SkillTreeConfig, prereq: NodeId, node: NodeId, save: SaveArgs) -> Result<()> {
    let mut session = open_session(config)?;
    position_of(&session, prereq)?;
    position_of(&session, node)?;
    if prereq == node {
        println!("A node cannot be its own prerequisite; nothing changed");
        return Ok(());
    }
    let out = gesture(
        &mut session,
        ContextActionKind::SetPrerequisite,
        node,
        prereq,
    )?;
    if mutations(&out).next().is_some() {
        println!("Linked {prereq} -> {node}");
        finish(&mut session, save)
    } else {
        println!("{prereq} is already a prerequisite of {node}");
        Ok(())
    }
}

/// Removes the connection between `a` and `b`.
pub fn cmd_unlink(config: &SkillTreeConfig, a: NodeId, b: NodeId, save: SaveArgs) -> Result<()> {
    let mut session = open_session(config)?;
    // Fail on unknown ids even when a == b.
    position_of(&session, a)?;
    position_of(&session, b)?;
    if a == b {
        println!("No connection between {a} and {b}");
        return Ok(());
    }
    let out = gesture(&mut session, ContextActionKind::DeleteConnections, a, b)?;
    match mutations(&out).next() {
        Some(Mutation::Unlinked { prereq, postreq }) => {
            println!("Unlinked {prereq} -> {postreq}");
            finish(&mut session, save)
        }
        _ => {
            println!("No connection between {a} and {b}");
            Ok(())
        }
    }
}

/// Deletes a node and its connections.
pub fn cmd_delete(config: &SkillTreeConfig, id: NodeId, save: SaveArgs) -> Result<()> {
    let mut session = open_session(config)?;
    let at = position_of(&session, id)?;
    session.handle(EditorEvent::context(
        ContextActionKind::DeleteNode,
        Some(id),
        at,
    ))?;
    println!("Deleted node {id}");
    finish(&mut session, save)
}

/// Replaces fields of a node's upgrade.
pub fn cmd_rename(
    config: &SkillTreeConfig,
    id: NodeId,
    edit: UpgradeEdit,
    save: SaveArgs,
) -> Result<()> {
    if edit.is_empty() {
        return Err(Error::config(
            "nothing to change; pass --name, --description, or --type",
        ));
    }
    let mut session = open_session(config)?;
    let current = session
        .editor()
        .store()
        .get_node(id)
        .map(|n| n.upgrade.clone())
        .ok_or_else(|| Error::from(skilltree_core::Error::unknown_node(id)))?;
    session.edit_upgrade(id, edit.apply(&current))?;
    println!("Updated node {id}");
    finish(&mut session, save)
}

/// Opens a node's context menu on `source`, then releases on `target`.
fn gesture(
    session: &mut Session,
    kind: ContextActionKind,
    source: NodeId,
    target: NodeId,
) -> Result<Vec<Notification>> {
    let from = position_of(session, source)?;
    let to = position_of(session, target)?;
    session.handle(EditorEvent::context(kind, Some(source), from))?;
    Ok(session.handle(EditorEvent::release(
        PointerButton::Primary,
        to,
        Some(target),
    ))?)
}

/// Renumbers and saves the working graph.
pub fn cmd_save(config: &SkillTreeConfig) -> Result<()> {
    let mut session = open_session(config)?;
    finish(&mut session, SaveArgs { no_save: false })
}

// ============================================================================
// Recovery
// ============================================================================

/// Reports or resolves a pending autosave.
pub fn cmd_recover(config: &SkillTreeConfig, action: RecoverAction) -> Result<()> {
    let engine = config.engine();
    let resolution = match action {
        RecoverAction::Status => {
            match engine.pending_recovery() {
                Some(info) => {
                    println!("Unsaved changes in {}", info.autosave_path.display());
                    if !info.primary_exists {
                        println!("(no save file yet at {})", info.primary_path.display());
                    }
                }
                None => println!("No unsaved changes"),
            }
            return Ok(());
        }
        RecoverAction::Commit => Resolution::Commit,
        RecoverAction::Discard => Resolution::Discard,
    };

    match engine.resolve_recovery(resolution)? {
        RecoveryOutcome::Committed => {
            println!("Committed to {}", engine.primary_path().display())
        }
        RecoveryOutcome::Discarded => println!("Discarded unsaved changes"),
        RecoveryOutcome::Aborted => {}
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_in(dir: &tempfile::TempDir) -> SkillTreeConfig {
        SkillTreeConfig {
            save_path: dir.path().join("tree.json"),
            ..SkillTreeConfig::default()
        }
    }

    const SAVE: SaveArgs = SaveArgs { no_save: false };
    const NO_SAVE: SaveArgs = SaveArgs { no_save: true };

    fn load(config: &SkillTreeConfig) -> GraphStore {
        config.engine().load().unwrap().0
    }

    // ------------------------------------------------------------------------
    // Editing tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_add_link_and_show() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let edit = UpgradeEdit {
            name: Some("Slash".into()),
            ..UpgradeEdit::default()
        };

        cmd_add(&config, Position::new(0.0, 0.0), edit, SAVE).unwrap();
        cmd_add(&config, Position::new(0.0, 60.0), UpgradeEdit::default(), SAVE).unwrap();
        cmd_link(&config, NodeId::new(0), NodeId::new(1), SAVE).unwrap();

        let store = load(&config);
        assert_eq!(store.get_node(NodeId::new(0)).unwrap().upgrade.name, "Slash");
        assert_eq!(store.edges(), vec![(NodeId::new(0), NodeId::new(1))]);
        assert!(cmd_show(&config, false).is_ok());
        assert!(cmd_show(&config, true).is_ok());
        assert!(config.engine().pending_recovery().is_none());
    }

    #[test]
    fn test_no_save_chain_accumulates_in_autosave() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        cmd_add(&config, Position::new(0.0, 0.0), UpgradeEdit::default(), NO_SAVE).unwrap();
        cmd_add(&config, Position::new(0.0, 60.0), UpgradeEdit::default(), NO_SAVE).unwrap();
        assert!(!config.engine().primary_path().exists());

        let (autosaved, _) = config.engine().load_autosave().unwrap();
        assert_eq!(autosaved.len(), 2);

        cmd_recover(&config, RecoverAction::Commit).unwrap();
        assert_eq!(load(&config).len(), 2);
    }

    #[test]
    fn test_unlink_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        cmd_add(&config, Position::new(0.0, 0.0), UpgradeEdit::default(), SAVE).unwrap();
        cmd_add(&config, Position::new(0.0, 60.0), UpgradeEdit::default(), SAVE).unwrap();
        cmd_add(&config, Position::new(0.0, 120.0), UpgradeEdit::default(), SAVE).unwrap();
        cmd_link(&config, NodeId::new(0), NodeId::new(1), SAVE).unwrap();
        cmd_link(&config, NodeId::new(1), NodeId::new(2), SAVE).unwrap();

        cmd_unlink(&config, NodeId::new(2), NodeId::new(1), SAVE).unwrap();
        assert_eq!(load(&config).edge_count(), 1);

        cmd_delete(&config, NodeId::new(0), SAVE).unwrap();
        let store = load(&config);
        assert_eq!(store.len(), 2);
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_rename() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        cmd_add(&config, Position::new(0.0, 0.0), UpgradeEdit::default(), SAVE).unwrap();

        let edit = UpgradeEdit {
            description: Some("Hits hard".into()),
            upgrade_type: Some(UpgradeType::WeaponUnlock),
            ..UpgradeEdit::default()
        };
        cmd_rename(&config, NodeId::new(0), edit, SAVE).unwrap();

        let upgrade = load(&config).get_node(NodeId::new(0)).unwrap().upgrade.clone();
        assert_eq!(upgrade.name, "Node 0");
        assert_eq!(upgrade.description, "Hits hard");
        assert_eq!(upgrade.upgrade_type, UpgradeType::WeaponUnlock);
    }

    #[test]
    fn test_rename_requires_a_change() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        assert!(cmd_rename(&config, NodeId::new(0), UpgradeEdit::default(), SAVE).is_err());
    }

    #[test]
    fn test_edit_unknown_node_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        cmd_add(&config, Position::new(0.0, 0.0), UpgradeEdit::default(), SAVE).unwrap();

        let err = cmd_link(&config, NodeId::new(0), NodeId::new(7), SAVE).unwrap_err();
        assert!(matches!(
            err,
            Error::Core(skilltree_core::Error::UnknownNode { .. })
        ));
        assert!(cmd_delete(&config, NodeId::new(7), SAVE).is_err());
    }

    #[test]
    fn test_self_link_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        cmd_add(&config, Position::new(0.0, 0.0), UpgradeEdit::default(), SAVE).unwrap();
        cmd_link(&config, NodeId::new(0), NodeId::new(0), SAVE).unwrap();
        assert_eq!(load(&config).edge_count(), 0);
    }

    #[test]
    fn test_self_link_on_unknown_node_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        cmd_add(&config, Position::new(0.0, 0.0), UpgradeEdit::default(), SAVE).unwrap();

        let err = cmd_link(&config, NodeId::new(99), NodeId::new(99), SAVE).unwrap_err();
        assert!(matches!(
            err,
            Error::Core(skilltree_core::Error::UnknownNode { .. })
        ));
    }

    #[test]
    fn test_add_rejects_non_finite_position() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let err = cmd_add(&config, Position::new(f64::NAN, 0.0), UpgradeEdit::default(), SAVE)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Core(skilltree_core::Error::InvalidPosition { .. })
        ));
        assert!(!config.engine().primary_path().exists());
    }

    // ------------------------------------------------------------------------
    // Validation and recovery tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_validate_clean_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        cmd_add(&config, Position::new(0.0, 0.0), UpgradeEdit::default(), SAVE).unwrap();
        assert!(cmd_validate(&config).is_ok());
    }

    #[test]
    fn test_validate_reports_dangling() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        std::fs::write(
            &config.save_path,
            r#"{"nodes": [{"node_id": 0, "x": 0, "y": 0,
                "upgrade": {"name": "A", "description": ""}, "prerequisites": [4]}]}"#,
        )
        .unwrap();
        let err = cmd_validate(&config).unwrap_err();
        assert!(matches!(err, Error::Invalid { count: 1, .. }));
    }

    #[test]
    fn test_validate_missing_file() {
        let config = SkillTreeConfig {
            save_path: PathBuf::from("/nonexistent/tree.json"),
            ..SkillTreeConfig::default()
        };
        assert!(cmd_validate(&config).is_err());
    }

    #[test]
    fn test_recover_status_and_discard() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        cmd_add(&config, Position::new(0.0, 0.0), UpgradeEdit::default(), NO_SAVE).unwrap();

        cmd_recover(&config, RecoverAction::Status).unwrap();
        cmd_recover(&config, RecoverAction::Discard).unwrap();
        assert!(config.engine().pending_recovery().is_none());
        assert!(cmd_recover(&config, RecoverAction::Discard).is_err());
    }

    #[test]
    fn test_render_table() {
        let mut store = GraphStore::new();
        let a = store.create_node(Position::new(0.0, 0.0), None).unwrap();
        let b = store.create_node(Position::new(60.0, 0.0), None).unwrap();
        store.relations().add_prerequisite(a, b).unwrap();

        let table = render_table(&store);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Node 0"));
        assert!(lines[2].contains("passive_ability"));
    }

    #[test]
    fn test_upgrade_edit_apply() {
        let base = Upgrade::new("Old").with_description("keep");
        let edit = UpgradeEdit {
            name: Some("New".into()),
            ..UpgradeEdit::default()
        };
        let next = edit.apply(&base);
        assert_eq!(next.name, "New");
        assert_eq!(next.description, "keep");
        assert!(UpgradeEdit::default().is_empty());
    }
}
