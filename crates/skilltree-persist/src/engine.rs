//! Save, load, autosave, and backup.
//!
//! All writes go to a temporary file in the destination directory which is
//! then renamed over the target, so a crash mid-write leaves either the old
//! file or the new one, never half of each.
//!
//! # Files
//!
//! For a primary path `dir/tree.json` the engine also uses
//! `dir/tree.autosave.json` (unsaved changes) and `dir/tree.backup.json`
//! (the primary as it was before the last save). Both can be overridden.

use std::io::Write;
use std::path::{Path, PathBuf};

use skilltree_core::{Error, NodeId, Result};
use skilltree_graph::{GraphStore, IdMapping, LinkOutcome};
use tempfile::NamedTempFile;

use crate::recovery::{RecoveryInfo, RecoveryOutcome, Resolution};
use crate::schema::SaveFile;

// ============================================================================
// Reports
// ============================================================================

/// Statistics from a save.
#[derive(Debug, Clone)]
pub struct SaveReport {
    /// File written.
    pub path: PathBuf,
    /// Number of nodes written.
    pub nodes_written: usize,
    /// Number of edges written.
    pub edges_written: usize,
    /// Old → new ids from the renumbering that preceded the write.
    pub id_mapping: IdMapping,
    /// Whether the previous primary was copied to the backup path.
    pub backup_written: bool,
}

/// Statistics from a load.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Number of nodes created in pass 1.
    pub nodes_loaded: usize,
    /// Number of distinct edges wired in pass 2.
    pub edges_loaded: usize,
    /// Edge references to ids that pass 1 did not create.
    pub dangling_refs: Vec<String>,
    /// Stored ids that appeared more than once (later records skipped).
    pub duplicate_ids: Vec<NodeId>,
    /// Stored self-references that were dropped.
    pub self_loops: usize,
    /// Whether the file used the legacy bare-array layout.
    pub legacy_format: bool,
    /// Whether any id changed because the graph was renumbered on load.
    pub renumbered: bool,
}

impl LoadReport {
    /// Returns `true` if the file was fully consistent.
    pub fn is_clean(&self) -> bool {
        self.dangling_refs.is_empty() && self.duplicate_ids.is_empty() && self.self_loops == 0
    }
}

// ============================================================================
// PersistenceEngine
// ============================================================================

/// Reads and writes skill tree files.
#[derive(Debug, Clone)]
pub struct PersistenceEngine {
    primary: PathBuf,
    autosave: PathBuf,
    backup: PathBuf,
}

impl PersistenceEngine {
    /// Creates an engine for the given primary file, deriving the autosave
    /// and backup paths from it.
    pub fn new(primary: impl Into<PathBuf>) -> Self {
        let primary = primary.into();
        let autosave = sibling_path(&primary, "autosave");
        let backup = sibling_path(&primary, "backup");
        Self {
            primary,
            autosave,
            backup,
        }
    }

    /// Overrides the autosave path.
    pub fn with_autosave_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.autosave = path.into();
        self
    }

    /// Overrides the backup path.
    pub fn with_backup_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.backup = path.into();
        self
    }

    /// The primary save file.
    pub fn primary_path(&self) -> &Path {
        &self.primary
    }

    /// The autosave file.
    pub fn autosave_path(&self) -> &Path {
        &self.autosave
    }

    /// The backup file.
    pub fn backup_path(&self) -> &Path {
        &self.backup
    }

    // ========================================================================
    // Save
    // ========================================================================

    /// Renumbers the graph and writes it to the primary file.
    ///
    /// The renumbering sticks even if the write fails.
    pub fn save(&self, store: &mut GraphStore) -> Result<SaveReport> {
        let id_mapping = store.reassign_ids();
        let mut report = self.write_primary(store)?;
        report.id_mapping = id_mapping;
        Ok(report)
    }

    /// Writes the graph to the primary file exactly as numbered.
    ///
    /// Callers normally go through [`save`](Self::save); this is for callers
    /// that renumber themselves so they can remap their own id references.
    pub fn write_primary(&self, store: &GraphStore) -> Result<SaveReport> {
        let json = SaveFile::from_store(store).to_json()?;
        let backup_written = self.write_backup();

        write_atomic(&self.primary, json.as_bytes())?;
        log::info!(
            "Saved {} node(s) to {}",
            store.len(),
            self.primary.display()
        );

        self.clear_autosave();

        Ok(SaveReport {
            path: self.primary.clone(),
            nodes_written: store.len(),
            edges_written: store.edge_count(),
            id_mapping: IdMapping::new(),
            backup_written,
        })
    }

    /// Copies the current primary to the backup path. Best effort.
    fn write_backup(&self) -> bool {
        if !self.primary.exists() {
            return false;
        }
        let copied = std::fs::read(&self.primary)
            .map_err(|e| Error::io_with_path(e, &self.primary))
            .and_then(|bytes| write_atomic(&self.backup, &bytes));
        match copied {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Could not write backup {}: {e}", self.backup.display());
                false
            }
        }
    }

    fn clear_autosave(&self) {
        if let Err(e) = std::fs::remove_file(&self.autosave)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            log::warn!(
                "Could not remove autosave {}: {e}",
                self.autosave.display()
            );
        }
    }

    // ========================================================================
    // Autosave
    // ========================================================================

    /// Writes the graph to the autosave file. Never touches the primary.
    ///
    /// Ids are written as they are; no renumbering happens here.
    pub fn autosave(&self, store: &GraphStore) -> Result<()> {
        let json = SaveFile::from_store(store).to_json()?;
        write_atomic(&self.autosave, json.as_bytes())?;
        log::debug!(
            "Autosaved {} node(s) to {}",
            store.len(),
            self.autosave.display()
        );
        Ok(())
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// Loads the primary file and renumbers it densely.
    ///
    /// A missing primary file yields an empty graph. Files written by
    /// [`save`](Self::save) are already dense, so their ids do not change.
    pub fn load(&self) -> Result<(GraphStore, LoadReport)> {
        if !self.primary.exists() {
            log::info!(
                "No save file at {}, starting empty",
                self.primary.display()
            );
            return Ok((GraphStore::new(), LoadReport::default()));
        }
        let (mut store, mut report) = Self::load_from(&self.primary)?;
        renumber(&mut store, &mut report, &self.primary);
        Ok((store, report))
    }

    /// Loads the autosave file.
    ///
    /// Autosaved ids are kept so that ids shown before a crash stay valid;
    /// the graph is renumbered only if its ids leave no room for new nodes.
    pub fn load_autosave(&self) -> Result<(GraphStore, LoadReport)> {
        let (mut store, mut report) = Self::load_from(&self.autosave)?;
        if store.next_id().is_none() {
            renumber(&mut store, &mut report, &self.autosave);
        }
        Ok((store, report))
    }

    /// Loads any save file into a fresh graph.
    ///
    /// The caller's graph is never touched: on error nothing is returned,
    /// on success the caller swaps the new graph in.
    pub fn load_from(path: &Path) -> Result<(GraphStore, LoadReport)> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let (file, legacy) = SaveFile::parse(path, &contents)?;
        let (store, mut report) = build_store(path, file)?;
        report.legacy_format = legacy;

        for dangling in &report.dangling_refs {
            log::warn!("{}: dropped edge to missing node ({dangling})", path.display());
        }
        for dup in &report.duplicate_ids {
            log::warn!("{}: duplicate node id {dup} skipped", path.display());
        }
        log::info!(
            "Loaded {} node(s), {} edge(s) from {}",
            report.nodes_loaded,
            report.edges_loaded,
            path.display()
        );
        Ok((store, report))
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Reports whether an autosave from an unfinished session exists.
    pub fn pending_recovery(&self) -> Option<RecoveryInfo> {
        let meta = std::fs::metadata(&self.autosave).ok()?;
        if !meta.is_file() {
            return None;
        }
        Some(RecoveryInfo {
            autosave_path: self.autosave.clone(),
            primary_path: self.primary.clone(),
            primary_exists: self.primary.exists(),
            modified: meta.modified().ok(),
        })
    }

    /// Applies the caller's decision about a pending autosave.
    ///
    /// - `Commit`: the autosave is loaded, renumbered, and saved as the
    ///   primary (with the usual backup); the autosave file is removed.
    ///   A corrupt autosave fails without touching the primary.
    /// - `Discard`: the autosave file is deleted.
    /// - `Abort`: nothing changes.
    pub fn resolve_recovery(&self, resolution: Resolution) -> Result<RecoveryOutcome> {
        if self.pending_recovery().is_none() {
            return Err(Error::NoPendingRecovery);
        }
        match resolution {
            Resolution::Commit => {
                let (mut store, _) = self.load_autosave()?;
                self.save(&mut store)?;
                log::info!("Committed autosave as {}", self.primary.display());
                Ok(RecoveryOutcome::Committed)
            }
            Resolution::Discard => {
                std::fs::remove_file(&self.autosave)
                    .map_err(|e| Error::io_with_path(e, &self.autosave))?;
                log::info!("Discarded autosave {}", self.autosave.display());
                Ok(RecoveryOutcome::Discarded)
            }
            Resolution::Abort => Ok(RecoveryOutcome::Aborted),
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// `dir/name.json` → `dir/name.<tag>.json`.
fn sibling_path(primary: &Path, tag: &str) -> PathBuf {
    let stem = primary
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("skill_tree");
    let name = match primary.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}.{tag}.{ext}"),
        None => format!("{stem}.{tag}"),
    };
    primary.with_file_name(name)
}

fn renumber(store: &mut GraphStore, report: &mut LoadReport, path: &Path) {
    let mapping = store.reassign_ids();
    report.renumbered = mapping.iter().any(|(old, new)| old != new);
    if report.renumbered {
        log::info!("{}: renumbered {} node(s)", path.display(), mapping.len());
    }
}

/// Writes `contents` to a temp file beside `path`, then renames it over `path`.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| Error::io_with_path(e, dir))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io_with_path(e, dir))?;
    tmp.write_all(contents)
        .map_err(|e| Error::io_with_path(e, tmp.path()))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| Error::io_with_path(e, tmp.path()))?;
    tmp.persist(path)
        .map_err(|e| Error::io_with_path(e.error, path))?;
    Ok(())
}

/// Two-pass construction: all nodes, then all edges.
///
/// Legacy records without ids get ids above every stored id, in file order.
fn build_store(path: &Path, file: SaveFile) -> Result<(GraphStore, LoadReport)> {
    let mut store = GraphStore::new();
    let mut report = LoadReport::default();

    let mut fallback = match file.nodes.iter().filter_map(|r| r.node_id).max() {
        Some(max) => max.checked_next(),
        None => Some(NodeId::new(0)),
    };

    // ================================================================
    // Pass 1: create every node (no edges)
    // ================================================================
    let mut accepted = Vec::with_capacity(file.nodes.len());
    for record in &file.nodes {
        let id = match record.node_id {
            Some(id) => id,
            None => {
                let id = fallback.ok_or_else(|| {
                    Error::corrupt_file(path, "no node id left for legacy record")
                })?;
                fallback = id.checked_next();
                id
            }
        };
        match store.insert_node(id, record.position(), record.upgrade.clone()) {
            Ok(()) => {
                report.nodes_loaded += 1;
                accepted.push((id, record));
            }
            Err(Error::DuplicateId { .. }) => report.duplicate_ids.push(id),
            Err(e) => return Err(Error::corrupt_file(path, e.to_string())),
        }
    }

    // ================================================================
    // Pass 2: wire edges from both stored directions
    // ================================================================
    for (id, record) in accepted {
        let incoming = record.prerequisites.iter().map(|pre| (*pre, id));
        let outgoing = record.postrequisites.iter().map(|post| (id, *post));

        for (pre, post) in incoming.chain(outgoing) {
            let missing = [pre, post].into_iter().find(|n| !store.contains(*n));
            if let Some(missing) = missing {
                report
                    .dangling_refs
                    .push(format!("{pre} -> {post} (node {missing} not found)"));
                continue;
            }
            match store.relations().add_prerequisite(pre, post) {
                Ok(LinkOutcome::Linked) => report.edges_loaded += 1,
                Ok(LinkOutcome::AlreadyLinked) => {}
                Ok(LinkOutcome::SelfLoop) => report.self_loops += 1,
                Err(e) => report.dangling_refs.push(format!("{pre} -> {post} ({e})")),
            }
        }
    }

    Ok((store, report))
}

// ============================================================================
// Tests
// ============================================================================
