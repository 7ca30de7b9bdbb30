//! # Equipment Store
//!
//! The sole owner and sole mutator of the in-memory collection.
//!
//! ## Mutation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Backend first, local second                             │
//! │                                                                         │
//! │  toggle_packed("abc")                                                   │
//! │       │                                                                 │
//! │       ├── id not in collection? ──► Ok(NotFound)   (no backend call)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  backend.set_packed("abc", !current)                                    │
//! │       │                                                                 │
//! │       ├── Err ──► notify error + log ──► Err(StoreError)               │
//! │       │           (collection untouched)                               │
//! │       ▼                                                                 │
//! │  flip the local copy ──► notify "<name> packed" ──► Ok(Applied)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The in-memory collection therefore never shows a state the backend does
//! not have, except for the single request in flight. Operations take
//! `&mut self`, so one owner cannot overlap two mutations.

use std::sync::Arc;
use tracing::{debug, info, warn};

use fotogear_core::{
    view, Equipment, EquipmentDraft, FilterMode, ImageUpload, StatusCounts, ValidationError,
};

use crate::backend::{BackendError, BackendKind, EquipmentBackend};
use crate::error::{Operation, StoreError, StoreResult};
use crate::notify::Notifier;

/// Result of a toggle or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The record existed; holds its new state (toggle) or its last state
    /// (delete).
    Applied(Equipment),
    /// No record with that id; nothing was sent to the backend.
    NotFound,
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied(_))
    }

    pub fn into_record(self) -> Option<Equipment> {
        match self {
            MutationOutcome::Applied(item) => Some(item),
            MutationOutcome::NotFound => None,
        }
    }
}

/// The equipment collection of one application session.
///
/// ## Usage
/// ```rust,ignore
/// let mut store = EquipmentStore::new(backend, notifier);
/// store.load().await?;
///
/// let item = store.add(EquipmentDraft::new("Canon EOS R5"), &image_url).await?;
/// store.toggle_packed(&item.id).await?;
///
/// println!("{}% packed", store.progress_percent());
/// ```
pub struct EquipmentStore {
    backend: Arc<dyn EquipmentBackend>,
    notifier: Arc<dyn Notifier>,
    equipment: Vec<Equipment>,
    loading: bool,
}

impl EquipmentStore {
    /// Creates an empty store over the given backend.
    ///
    /// The collection stays empty until [`load`](Self::load) succeeds.
    pub fn new(backend: Arc<dyn EquipmentBackend>, notifier: Arc<dyn Notifier>) -> Self {
        EquipmentStore {
            backend,
            notifier,
            equipment: Vec::new(),
            loading: true,
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Fetches the complete collection from the backend.
    ///
    /// On failure the current collection is kept (empty on the first load)
    /// and no retry is attempted.
    pub async fn load(&mut self) -> StoreResult<&[Equipment]> {
        debug!(backend = %self.backend.kind(), "Loading equipment");

        let result = self.backend.load_all().await;
        self.loading = false;

        match result {
            Ok(items) => {
                info!(count = items.len(), "Equipment loaded");
                self.equipment = items;
                Ok(&self.equipment)
            }
            Err(e) => Err(self.fail(Operation::Load, e)),
        }
    }

    /// Reloads the collection from the backend.
    pub async fn refresh(&mut self) -> StoreResult<&[Equipment]> {
        self.load().await
    }

    /// Adds a record whose image is already a URL or data URI.
    pub async fn add(&mut self, draft: EquipmentDraft, image_url: &str) -> StoreResult<Equipment> {
        let item = Equipment::create(draft, image_url).map_err(|e| self.reject(e))?;
        self.persist(item).await
    }

    /// Persists the image through the backend, then adds the record.
    ///
    /// The draft is validated first so a rejected form never uploads.
    pub async fn add_with_image(
        &mut self,
        draft: EquipmentDraft,
        upload: &ImageUpload,
    ) -> StoreResult<Equipment> {
        let draft = draft.normalized().map_err(|e| self.reject(e))?;

        debug!(?upload, "Storing image");
        let image_url = self
            .backend
            .store_image(upload)
            .await
            .map_err(|e| self.fail(Operation::UploadImage, e))?;

        let item = Equipment::create(draft, &image_url).map_err(|e| self.reject(e))?;
        let result = self.persist(item).await;
        if result.is_err() && self.backend.kind() == BackendKind::Remote {
            warn!(image_url = %image_url, "Uploaded image has no record");
        }
        result
    }

    /// Flips the packed flag of one record.
    ///
    /// Unknown ids are a no-op: the record may already have been deleted.
    pub async fn toggle_packed(&mut self, id: &str) -> StoreResult<MutationOutcome> {
        let Some(current) = self.get(id).cloned() else {
            debug!(id = %id, "Toggle skipped, no such equipment");
            return Ok(MutationOutcome::NotFound);
        };

        let next = !current.is_packed;
        debug!(id = %id, is_packed = next, "Toggling packed status");

        if let Err(e) = self.backend.set_packed(id, next).await {
            return Err(self.fail(Operation::TogglePacked, e));
        }

        let updated = current.with_packed(next);
        if let Some(slot) = self.equipment.iter_mut().find(|e| e.id == id) {
            *slot = updated.clone();
        }

        let verb = if next { "packed" } else { "unpacked" };
        self.notifier.success(&format!("{} {}", updated.name, verb));

        Ok(MutationOutcome::Applied(updated))
    }

    /// Removes one record permanently.
    ///
    /// Unknown ids are a no-op.
    pub async fn delete(&mut self, id: &str) -> StoreResult<MutationOutcome> {
        let Some(current) = self.get(id).cloned() else {
            debug!(id = %id, "Delete skipped, no such equipment");
            return Ok(MutationOutcome::NotFound);
        };

        debug!(id = %id, "Deleting equipment");

        if let Err(e) = self.backend.delete(id).await {
            return Err(self.fail(Operation::Delete, e));
        }

        self.equipment.retain(|e| e.id != id);
        self.notifier.success(&format!("{} deleted", current.name));
        info!(id = %id, "Equipment deleted");

        Ok(MutationOutcome::Applied(current))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The current collection, in backend order.
    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    /// Looks up one record by id.
    pub fn get(&self, id: &str) -> Option<&Equipment> {
        self.equipment.iter().find(|e| e.id == id)
    }

    /// True until the first load attempt has finished.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Records visible under the given filter mode.
    pub fn view(&self, mode: FilterMode) -> Vec<&Equipment> {
        view::filter(&self.equipment, mode)
    }

    pub fn counts(&self) -> StatusCounts {
        view::counts(&self.equipment)
    }

    /// Packing progress, 0 to 100.
    pub fn progress_percent(&self) -> u8 {
        view::progress_percent(&self.counts())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn persist(&mut self, item: Equipment) -> StoreResult<Equipment> {
        debug!(id = %item.id, name = %item.name, "Adding equipment");

        if let Err(e) = self.backend.insert(&item).await {
            return Err(self.fail(Operation::Add, e));
        }

        self.equipment.push(item.clone());
        self.notifier.success("Equipment added");
        info!(id = %item.id, "Equipment added");

        Ok(item)
    }

    fn reject(&self, err: ValidationError) -> StoreError {
        info!(error = %err, "Rejected equipment input");
        self.notifier.error(&err.to_string());
        StoreError::Validation(err)
    }

    /// The notification is the user-facing report; the log line stays at info.
    fn fail(&self, operation: Operation, source: BackendError) -> StoreError {
        info!(
            operation = %operation,
            backend = %self.backend.kind(),
            error = %source,
            "Backend operation failed"
        );

        let err = StoreError::backend(operation, source);
        self.notifier.error(&err.user_message());
        err
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockEquipmentBackend;
    use crate::memory::MemoryBackend;
    use crate::notify::{Notification, RecordingNotifier};
    use chrono::Utc;
    use mockall::Sequence;
    use std::sync::Mutex;
    use tracing_subscriber::fmt::MakeWriter;
    use tracing_subscriber::EnvFilter;

    /// Formatted log output collected in memory.
    #[derive(Clone, Default)]
    struct LogCapture(Arc<Mutex<Vec<u8>>>);

    impl LogCapture {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }

        fn subscriber(&self, directive: &str) -> impl tracing::Subscriber + Send + Sync {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new(directive))
                .with_writer(self.clone())
                .with_ansi(false)
                .finish()
        }
    }

    impl std::io::Write for LogCapture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogCapture {
        type Writer = LogCapture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn record(name: &str, is_packed: bool) -> Equipment {
        Equipment::create(EquipmentDraft::new(name), "https://img.example/a.jpg")
            .unwrap()
            .with_packed(is_packed)
    }

    fn store_over(backend: Arc<dyn EquipmentBackend>) -> (EquipmentStore, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        (EquipmentStore::new(backend, notifier.clone()), notifier)
    }

    fn remote_mock() -> MockEquipmentBackend {
        let mut mock = MockEquipmentBackend::new();
        mock.expect_kind().return_const(BackendKind::Remote);
        mock
    }

    async fn loaded_sample() -> (EquipmentStore, Arc<MemoryBackend>, Arc<RecordingNotifier>) {
        let backend = Arc::new(MemoryBackend::with_items(vec![
            record("A", false),
            record("B", true),
            record("C", false),
        ]));
        let (mut store, notifier) = store_over(backend.clone());
        store.load().await.unwrap();
        (store, backend, notifier)
    }

    #[tokio::test]
    async fn test_load_populates_collection() {
        let (store, _, notifier) = loaded_sample().await;

        assert!(!store.is_loading());
        assert_eq!(store.equipment().len(), 3);
        assert!(notifier.events().is_empty());
    }

    #[tokio::test]
    async fn test_initial_load_failure_leaves_empty_collection() {
        let mut mock = remote_mock();
        mock.expect_load_all()
            .returning(|| Err(BackendError::Unavailable("dns".into())));
        let (mut store, notifier) = store_over(Arc::new(mock));

        assert!(store.is_loading());
        let err = store.load().await.unwrap_err();

        assert!(matches!(err, StoreError::Backend { operation: Operation::Load, .. }));
        assert!(!store.is_loading());
        assert!(store.equipment().is_empty());
        assert_eq!(notifier.errors(), vec!["Could not load equipment".to_string()]);
    }

    #[tokio::test]
    async fn test_reload_failure_keeps_last_known_good() {
        let items = vec![record("Lens", false)];
        let mut seq = Sequence::new();
        let mut mock = remote_mock();
        mock.expect_load_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(items.clone()));
        mock.expect_load_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(BackendError::PermissionDenied("rls".into())));
        let (mut store, _) = store_over(Arc::new(mock));

        store.load().await.unwrap();
        assert!(store.refresh().await.is_err());
        assert_eq!(store.equipment().len(), 1);
        assert_eq!(store.equipment()[0].name, "Lens");
    }

    #[tokio::test]
    async fn test_add_creates_unpacked_record_with_fresh_id() {
        let (mut store, backend, notifier) = loaded_sample().await;
        let before = Utc::now();

        let item = store
            .add(EquipmentDraft::new("  Sigma 35mm  ").category("Lenses"), "https://x/s.jpg")
            .await
            .unwrap();

        assert_eq!(item.name, "Sigma 35mm");
        assert!(!item.is_packed);
        assert!(item.created_at >= before);
        assert_eq!(
            store.equipment().iter().filter(|e| e.id == item.id).count(),
            1
        );
        assert_eq!(store.equipment().len(), 4);
        assert_eq!(backend.snapshot().len(), 4);
        assert_eq!(
            notifier.events().last(),
            Some(&Notification::Success("Equipment added".into()))
        );
    }

    #[tokio::test]
    async fn test_add_blank_name_is_rejected_without_backend_call() {
        let mut mock = remote_mock();
        mock.expect_insert().never();
        let (mut store, notifier) = store_over(Arc::new(mock));

        let err = store
            .add(EquipmentDraft::new("   "), "https://x/s.jpg")
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert!(store.equipment().is_empty());
        assert_eq!(notifier.errors(), vec!["name is required".to_string()]);
    }

    #[tokio::test]
    async fn test_add_missing_image_is_rejected() {
        let (mut store, backend, _) = loaded_sample().await;

        let err = store.add(EquipmentDraft::new("Flash"), "").await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(store.equipment().len(), 3);
        assert_eq!(backend.snapshot().len(), 3);
    }

    #[tokio::test]
    async fn test_add_backend_failure_does_not_diverge() {
        let mut mock = remote_mock();
        mock.expect_insert()
            .times(1)
            .returning(|_| Err(BackendError::Unavailable("timeout".into())));
        let (mut store, notifier) = store_over(Arc::new(mock));

        let err = store
            .add(EquipmentDraft::new("Flash"), "https://x/f.jpg")
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Backend { operation: Operation::Add, .. }));
        assert!(store.equipment().is_empty());
        assert_eq!(notifier.errors(), vec!["Could not add equipment".to_string()]);
    }

    #[tokio::test]
    async fn test_add_without_session_reports_auth_required() {
        let mut mock = remote_mock();
        mock.expect_insert()
            .returning(|_| Err(BackendError::AuthRequired));
        let (mut store, notifier) = store_over(Arc::new(mock));

        let err = store
            .add(EquipmentDraft::new("Flash"), "https://x/f.jpg")
            .await
            .unwrap_err();

        assert_eq!(err, StoreError::AuthRequired);
        assert!(store.equipment().is_empty());
        assert_eq!(notifier.errors(), vec!["You must sign in first".to_string()]);
    }

    #[tokio::test]
    async fn test_add_with_image_embeds_data_uri() {
        let (mut store, _, _) = loaded_sample().await;
        let upload = ImageUpload::new(b"png-bytes".to_vec(), "png").unwrap();

        let item = store
            .add_with_image(EquipmentDraft::new("Reflector"), &upload)
            .await
            .unwrap();

        assert!(item.image_url.starts_with("data:image/png;base64,"));
        assert_eq!(store.get(&item.id), Some(&item));
    }

    #[tokio::test]
    async fn test_add_with_image_validates_before_upload() {
        let mut mock = remote_mock();
        mock.expect_store_image().never();
        mock.expect_insert().never();
        let (mut store, _) = store_over(Arc::new(mock));
        let upload = ImageUpload::new(vec![1, 2, 3], "jpg").unwrap();

        let err = store
            .add_with_image(EquipmentDraft::new(""), &upload)
            .await
            .unwrap_err();

        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_add_with_image_upload_failure() {
        let mut mock = remote_mock();
        mock.expect_store_image()
            .returning(|_| Err(BackendError::QuotaExceeded("bucket full".into())));
        mock.expect_insert().never();
        let (mut store, notifier) = store_over(Arc::new(mock));
        let upload = ImageUpload::new(vec![1, 2, 3], "jpg").unwrap();

        let err = store
            .add_with_image(EquipmentDraft::new("Flash"), &upload)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::Backend { operation: Operation::UploadImage, .. }
        ));
        assert_eq!(notifier.errors(), vec!["Could not upload image".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_insert_after_upload_logs_orphaned_image() {
        let logs = LogCapture::default();
        let _guard = tracing::subscriber::set_default(logs.subscriber("fotogear=warn"));

        let mut mock = remote_mock();
        mock.expect_store_image()
            .returning(|_| Ok("https://cdn.example/u1/flash.jpg".to_string()));
        mock.expect_insert()
            .returning(|_| Err(BackendError::Unavailable("down".into())));
        let (mut store, notifier) = store_over(Arc::new(mock));
        let upload = ImageUpload::new(vec![1, 2, 3], "jpg").unwrap();

        let err = store
            .add_with_image(EquipmentDraft::new("Flash"), &upload)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Backend { operation: Operation::Add, .. }));
        assert!(store.equipment().is_empty());
        assert_eq!(notifier.errors(), vec!["Could not add equipment".to_string()]);
        assert!(logs.text().contains("https://cdn.example/u1/flash.jpg"));
    }

    #[tokio::test]
    async fn test_backend_failure_only_notifies_at_warn_level() {
        let logs = LogCapture::default();
        let _guard = tracing::subscriber::set_default(logs.subscriber("fotogear=warn"));

        let mut mock = remote_mock();
        mock.expect_load_all()
            .returning(|| Err(BackendError::Unavailable("dns".into())));
        mock.expect_insert().never();
        let (mut store, notifier) = store_over(Arc::new(mock));

        assert!(store.load().await.is_err());
        assert!(store.add(EquipmentDraft::new(" "), "https://x/a.jpg").await.is_err());

        assert_eq!(notifier.errors().len(), 2);
        assert_eq!(logs.text(), "");
    }

    #[tokio::test]
    async fn test_backend_failure_is_logged_at_info_level() {
        let logs = LogCapture::default();
        let _guard = tracing::subscriber::set_default(logs.subscriber("fotogear=info"));

        let mut mock = remote_mock();
        mock.expect_delete()
            .returning(|_| Err(BackendError::PermissionDenied("rls".into())));
        let item = record("Tripod", false);
        let id = item.id.clone();
        mock.expect_load_all().returning(move || Ok(vec![item.clone()]));
        let (mut store, _) = store_over(Arc::new(mock));
        store.load().await.unwrap();

        assert!(store.delete(&id).await.is_err());

        let text = logs.text();
        assert!(text.contains("Backend operation failed"));
        assert!(text.contains("rls"));
    }

    #[tokio::test]
    async fn test_toggle_flips_only_target() {
        let (mut store, backend, notifier) = loaded_sample().await;
        let before = store.equipment().to_vec();
        let target = before[0].id.clone();

        let outcome = store.toggle_packed(&target).await.unwrap();

        assert!(outcome.is_applied());
        let updated = outcome.into_record().unwrap();
        assert!(updated.is_packed);
        assert_eq!(updated, before[0].with_packed(true));
        assert_eq!(store.equipment()[1..], before[1..]);
        assert_eq!(backend.snapshot()[0].is_packed, true);
        assert_eq!(
            notifier.events().last(),
            Some(&Notification::Success("A packed".into()))
        );
    }

    #[tokio::test]
    async fn test_toggle_twice_is_identity() {
        let (mut store, backend, _) = loaded_sample().await;
        let before = store.equipment().to_vec();
        let target = before[1].id.clone();

        store.toggle_packed(&target).await.unwrap();
        store.toggle_packed(&target).await.unwrap();

        assert_eq!(store.equipment(), &before[..]);
        assert_eq!(backend.snapshot(), before);
    }

    #[tokio::test]
    async fn test_toggle_and_delete_unknown_id_are_noops() {
        let items = vec![record("A", false)];
        let mut mock = remote_mock();
        mock.expect_load_all().returning(move || Ok(items.clone()));
        mock.expect_set_packed().never();
        mock.expect_delete().never();
        let (mut store, notifier) = store_over(Arc::new(mock));
        store.load().await.unwrap();
        let before = store.equipment().to_vec();

        assert_eq!(store.toggle_packed("missing").await.unwrap(), MutationOutcome::NotFound);
        assert_eq!(store.delete("missing").await.unwrap(), MutationOutcome::NotFound);
        assert!(!MutationOutcome::NotFound.is_applied());

        assert_eq!(store.equipment(), &before[..]);
        assert!(notifier.events().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_backend_failure_keeps_local_state() {
        let items = vec![record("A", false)];
        let id = items[0].id.clone();
        let mut mock = remote_mock();
        mock.expect_load_all().returning(move || Ok(items.clone()));
        mock.expect_set_packed()
            .returning(|_, _| Err(BackendError::Unavailable("offline".into())));
        let (mut store, notifier) = store_over(Arc::new(mock));
        store.load().await.unwrap();

        assert!(store.toggle_packed(&id).await.is_err());
        assert!(!store.equipment()[0].is_packed);
        assert_eq!(notifier.errors(), vec!["Could not update packed status".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let (mut store, backend, notifier) = loaded_sample().await;
        let target = store.equipment()[1].clone();

        let outcome = store.delete(&target.id).await.unwrap();

        assert_eq!(outcome, MutationOutcome::Applied(target.clone()));
        assert!(store.get(&target.id).is_none());
        assert_eq!(store.equipment().len(), 2);
        assert_eq!(backend.snapshot().len(), 2);
        assert_eq!(
            notifier.events().last(),
            Some(&Notification::Success("B deleted".into()))
        );
    }

    #[tokio::test]
    async fn test_delete_backend_failure_keeps_record() {
        let items = vec![record("A", true)];
        let id = items[0].id.clone();
        let mut mock = remote_mock();
        mock.expect_load_all().returning(move || Ok(items.clone()));
        mock.expect_delete()
            .returning(|_| Err(BackendError::PermissionDenied("rls".into())));
        let (mut store, _) = store_over(Arc::new(mock));
        store.load().await.unwrap();

        assert!(store.delete(&id).await.is_err());
        assert!(store.get(&id).is_some());
    }

    #[tokio::test]
    async fn test_views_follow_collection() {
        let (mut store, _, _) = loaded_sample().await;

        assert_eq!(store.counts(), StatusCounts { all: 3, packed: 1, unpacked: 2 });
        assert_eq!(store.progress_percent(), 33);
        assert_eq!(store.view(FilterMode::Packed).len(), 1);
        assert_eq!(store.view(FilterMode::Packed)[0].name, "B");

        let ids: Vec<String> = store.equipment().iter().map(|e| e.id.clone()).collect();
        for id in &ids {
            if !store.get(id).unwrap().is_packed {
                store.toggle_packed(id).await.unwrap();
            }
        }
        assert_eq!(store.progress_percent(), 100);
        assert!(store.view(FilterMode::Unpacked).is_empty());
    }
}
