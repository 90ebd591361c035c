//! # Edit Session
//!
//! One editing session over one document: the owned store plus the two
//! persistence seams the engine does not implement itself.
//!
//! - [`PersistenceBackend`] is the remote endpoint: saves are a full
//!   replace-set of records per document id, reads return records in any
//!   order. Saves are fire-and-forget relative to the store; a save that is
//!   superseded by a newer one is resolved last-write-wins by generation.
//! - [`SnapshotSlot`] is the local resumability mirror: the current block
//!   list only, never history, so an interrupted session can restore its
//!   last snapshot.
//!
//! A failed save reports an error and leaves the in-memory document
//! untouched; nothing is lost and retry is a new user-initiated save.

use std::collections::HashMap;

use tracing::debug;

use trellis_blocks::wire::PersistedRecord;

use crate::error::EditorError;
use crate::store::DocumentStore;

/// Remote persistence endpoint (owned by an external service)
pub trait PersistenceBackend {
    /// Replace the full record set for a document
    fn save_document(
        &mut self,
        document_id: &str,
        records: &[PersistedRecord],
    ) -> Result<(), EditorError>;

    /// Fetch the record set for a document, in any order
    fn load_document(&mut self, document_id: &str) -> Result<Vec<PersistedRecord>, EditorError>;
}

/// Local key-value slot mirroring the current snapshot for resumability
pub trait SnapshotSlot {
    fn write(&mut self, document_id: &str, records: &[PersistedRecord]);
    fn read(&self, document_id: &str) -> Option<Vec<PersistedRecord>>;
    fn clear(&mut self, document_id: &str);
}

/// One client's editing session for one document
pub struct EditSession<P: PersistenceBackend, S: SnapshotSlot> {
    pub document_id: String,
    pub store: DocumentStore,
    backend: P,
    slot: S,

    /// Monotonic save marker; a completing save that is not the latest is
    /// stale and must not report success over a newer one
    save_generation: u64,
}

impl<P: PersistenceBackend, S: SnapshotSlot> EditSession<P, S> {
    pub fn new(document_id: impl Into<String>, backend: P, slot: S) -> Self {
        let document_id = document_id.into();
        Self {
            store: DocumentStore::new(&document_id),
            document_id,
            backend,
            slot,
            save_generation: 0,
        }
    }

    /// Load the document from the remote endpoint, replacing local state
    pub fn load(&mut self) -> Result<(), EditorError> {
        let records = self.backend.load_document(&self.document_id)?;
        self.store.load_records(&records);
        Ok(())
    }

    /// Save the current snapshot as a full replace-set.
    ///
    /// Returns the save generation so an async caller can discard the
    /// result of a superseded save (last write wins).
    pub fn save(&mut self) -> Result<u64, EditorError> {
        let records = self.store.to_records()?;
        self.save_generation += 1;
        let generation = self.save_generation;
        self.backend.save_document(&self.document_id, &records)?;
        // The remote copy is now current; the local mirror is no longer
        // needed for crash recovery.
        self.slot.clear(&self.document_id);
        Ok(generation)
    }

    /// Whether a completed save with `generation` is still the latest
    pub fn is_current_save(&self, generation: u64) -> bool {
        generation == self.save_generation
    }

    /// Mirror the current snapshot to the local slot
    pub fn mirror(&mut self) -> Result<(), EditorError> {
        let records = self.store.to_records()?;
        self.slot.write(&self.document_id, &records);
        Ok(())
    }

    /// Restore the last mirrored snapshot after an interrupted session
    pub fn resume(&mut self) -> Result<(), EditorError> {
        let Some(records) = self.slot.read(&self.document_id) else {
            debug!(document_id = %self.document_id, "no local snapshot to resume");
            return Err(EditorError::NoSnapshot(self.document_id.clone()));
        };
        self.store.load_records(&records);
        Ok(())
    }
}

/// In-memory backend for tests and offline use
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    documents: HashMap<String, Vec<PersistedRecord>>,
    fail_next_save: bool,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next save fail, simulating a remote outage
    pub fn fail_next_save(&mut self) {
        self.fail_next_save = true;
    }

    pub fn saved_records(&self, document_id: &str) -> Option<&Vec<PersistedRecord>> {
        self.documents.get(document_id)
    }

    pub fn seed(&mut self, document_id: &str, records: Vec<PersistedRecord>) {
        self.documents.insert(document_id.to_string(), records);
    }
}

impl PersistenceBackend for InMemoryBackend {
    fn save_document(
        &mut self,
        document_id: &str,
        records: &[PersistedRecord],
    ) -> Result<(), EditorError> {
        if self.fail_next_save {
            self.fail_next_save = false;
            return Err(EditorError::Persistence("simulated outage".to_string()));
        }
        self.documents
            .insert(document_id.to_string(), records.to_vec());
        Ok(())
    }

    fn load_document(&mut self, document_id: &str) -> Result<Vec<PersistedRecord>, EditorError> {
        Ok(self.documents.get(document_id).cloned().unwrap_or_default())
    }
}

/// In-memory snapshot slot for tests
#[derive(Debug, Default)]
pub struct InMemorySlot {
    slots: HashMap<String, Vec<PersistedRecord>>,
}

impl InMemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotSlot for InMemorySlot {
    fn write(&mut self, document_id: &str, records: &[PersistedRecord]) {
        self.slots.insert(document_id.to_string(), records.to_vec());
    }

    fn read(&self, document_id: &str) -> Option<Vec<PersistedRecord>> {
        self.slots.get(document_id).cloned()
    }

    fn clear(&mut self, document_id: &str) {
        self.slots.remove(document_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session() -> EditSession<InMemoryBackend, InMemorySlot> {
        EditSession::new("post-7", InMemoryBackend::new(), InMemorySlot::new())
    }

    #[test]
    fn save_then_load_round_trips_the_document() {
        let mut session = session();
        let id = session.store.add_block("heading", None).unwrap();
        session.store.update_block(&id, &json!({"text": "Hello"}));
        let saved_blocks = session.store.blocks().to_vec();

        session.save().unwrap();

        let mut other = EditSession::new(
            "post-7",
            InMemoryBackend::new(),
            InMemorySlot::new(),
        );
        other.backend.seed(
            "post-7",
            session.backend.saved_records("post-7").unwrap().clone(),
        );
        other.load().unwrap();

        assert_eq!(other.store.blocks(), saved_blocks.as_slice());
    }

    #[test]
    fn failed_save_leaves_the_document_intact() {
        let mut session = session();
        session.store.add_block("text", None);
        let before = session.store.blocks().to_vec();

        session.backend.fail_next_save();
        let result = session.save();

        assert!(matches!(result, Err(EditorError::Persistence(_))));
        assert_eq!(session.store.blocks(), before.as_slice());
        assert!(session.backend.saved_records("post-7").is_none());

        // Retry as a fresh user-initiated save succeeds.
        session.save().unwrap();
        assert!(session.backend.saved_records("post-7").is_some());
    }

    #[test]
    fn superseded_saves_lose_to_the_latest_generation() {
        let mut session = session();
        session.store.add_block("text", None);

        let first = session.save().unwrap();
        session.store.add_block("heading", None);
        let second = session.save().unwrap();

        assert!(!session.is_current_save(first));
        assert!(session.is_current_save(second));
    }

    #[test]
    fn mirror_and_resume_restore_the_snapshot_only() {
        let mut session = session();
        session.store.add_block("heading", None);
        session.store.add_block("text", None);
        let mirrored = session.store.blocks().to_vec();
        session.mirror().unwrap();

        let mut resumed = EditSession::new(
            "post-7",
            InMemoryBackend::new(),
            std::mem::take(&mut session.slot),
        );
        resumed.resume().unwrap();

        assert_eq!(resumed.store.blocks(), mirrored.as_slice());
        // History is not persisted: there is nothing to undo after resume
        // beyond the load itself.
        resumed.store.undo();
        assert!(resumed.store.blocks().is_empty());
        assert!(!resumed.store.can_undo());
    }

    #[test]
    fn resume_without_a_snapshot_reports_not_found() {
        let mut session = session();
        assert!(matches!(
            session.resume(),
            Err(EditorError::NoSnapshot(_))
        ));
    }

    #[test]
    fn successful_save_clears_the_local_mirror() {
        let mut session = session();
        session.store.add_block("text", None);
        session.mirror().unwrap();
        assert!(session.slot.read("post-7").is_some());

        session.save().unwrap();
        assert!(session.slot.read("post-7").is_none());
    }
}
