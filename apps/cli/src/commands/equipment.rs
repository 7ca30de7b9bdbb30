//! Equipment commands: list, add, toggle, delete, progress.

use std::path::Path;

use tracing::{debug, info};

use fotogear_core::{
    CoreError, Equipment, EquipmentDraft, FilterMode, ImageUpload, StatusCounts, ValidationError,
    MAX_IMAGE_BYTES,
};
use fotogear_store::EquipmentStore;

use crate::error::{CliError, CliResult};

const BAR_WIDTH: usize = 20;

pub fn draft(
    name: String,
    description: Option<String>,
    category: Option<String>,
) -> EquipmentDraft {
    let mut draft = EquipmentDraft::new(name);
    if let Some(description) = description {
        draft = draft.description(description);
    }
    if let Some(category) = category {
        draft = draft.category(category);
    }
    draft
}

pub fn list(store: &EquipmentStore, filter: FilterMode, json: bool) -> CliResult<()> {
    let items = store.view(filter);

    if json {
        let text =
            serde_json::to_string_pretty(&items).map_err(|e| CliError::Output(e.to_string()))?;
        println!("{text}");
        return Ok(());
    }

    if store.equipment().is_empty() {
        println!("No equipment yet. Add some with `fotogear add`.");
        return Ok(());
    }
    if items.is_empty() {
        println!("Nothing in {}.", filter.label());
    }
    for item in &items {
        println!("{}", format_row(item));
    }
    println!();
    println!("{}", format_summary(&store.counts()));
    Ok(())
}

/// Reads a photo from disk, refusing oversized files before reading them.
pub async fn read_image(path: &Path) -> CliResult<ImageUpload> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| CliError::io(path, e))?;
    let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    if size > MAX_IMAGE_BYTES {
        return Err(CoreError::from(ValidationError::ImageTooLarge {
            max_bytes: MAX_IMAGE_BYTES,
            actual_bytes: size,
        })
        .into());
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CliError::io(path, e))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    debug!(path = %path.display(), bytes = bytes.len(), "Read image");
    Ok(ImageUpload::from_file_name(file_name, bytes)?)
}

pub async fn add(store: &mut EquipmentStore, draft: EquipmentDraft, image: &Path) -> CliResult<()> {
    let upload = read_image(image).await?;
    let item = store.add_with_image(draft, &upload).await?;

    info!(id = %item.id, "Equipment added from CLI");
    println!("{}", item.id);
    Ok(())
}

pub async fn toggle(store: &mut EquipmentStore, id: &str) -> CliResult<()> {
    if !store.toggle_packed(id).await?.is_applied() {
        println!("No equipment with id {id}");
    }
    Ok(())
}

pub async fn delete(store: &mut EquipmentStore, id: &str) -> CliResult<()> {
    if !store.delete(id).await?.is_applied() {
        println!("No equipment with id {id}");
    }
    Ok(())
}

pub fn progress(store: &EquipmentStore) {
    println!("{}", format_progress(&store.counts(), store.progress_percent()));
}

// =============================================================================
// Formatting
// =============================================================================

/// One list line, plus an indented description line when present.
pub fn format_row(item: &Equipment) -> String {
    let mark = if item.is_packed { "[x]" } else { "[ ]" };
    let mut line = format!("{mark} {}", item.name);
    if let Some(category) = &item.category {
        line.push_str(&format!(" · {category}"));
    }
    line.push_str(&format!("  ({})", item.id));
    if let Some(description) = &item.description {
        line.push_str(&format!("\n    {description}"));
    }
    line
}

pub fn format_summary(counts: &StatusCounts) -> String {
    format!(
        "{} items · {} packed · {} pending",
        counts.all, counts.packed, counts.unpacked
    )
}

pub fn progress_bar(percent: u8, width: usize) -> String {
    let percent = usize::from(percent.min(100));
    let filled = (percent * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn format_progress(counts: &StatusCounts, percent: u8) -> String {
    format!(
        "{} {percent}%  {} of {} packed",
        progress_bar(percent, BAR_WIDTH),
        counts.packed,
        counts.all
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    use fotogear_store::{MemoryBackend, RecordingNotifier};

    fn item(name: &str, packed: bool) -> Equipment {
        Equipment::create(EquipmentDraft::new(name), "https://cdn.example/x.jpg")
            .unwrap()
            .with_packed(packed)
    }

    async fn loaded(items: Vec<Equipment>) -> (EquipmentStore, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::with_items(items));
        let mut store = EquipmentStore::new(backend.clone(), Arc::new(RecordingNotifier::new()));
        store.load().await.unwrap();
        (store, backend)
    }

    fn scratch_file(name: &str, bytes: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fotogear-img-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_format_row() {
        let mut lens = item("RF 24-70mm", true);
        lens.category = Some("Lenses".into());
        lens.description = Some("f/2.8".into());

        let row = format_row(&lens);

        assert!(row.starts_with("[x] RF 24-70mm · Lenses  ("));
        assert!(row.contains(&lens.id));
        assert!(row.ends_with("\n    f/2.8"));
        assert!(format_row(&item("Tripod", false)).starts_with("[ ] Tripod  ("));
    }

    #[test]
    fn test_format_summary() {
        let counts = StatusCounts { all: 3, packed: 1, unpacked: 2 };
        assert_eq!(format_summary(&counts), "3 items · 1 packed · 2 pending");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10), "[----------]");
        assert_eq!(progress_bar(33, 10), "[###-------]");
        assert_eq!(progress_bar(67, 10), "[#######---]");
        assert_eq!(progress_bar(100, 10), "[##########]");
        assert_eq!(progress_bar(250, 4), "[####]");
    }

    #[test]
    fn test_format_progress() {
        let counts = StatusCounts { all: 3, packed: 1, unpacked: 2 };
        let line = format_progress(&counts, 33);

        assert!(line.ends_with(" 33%  1 of 3 packed"));
        assert_eq!(line.len(), BAR_WIDTH + 2 + " 33%  1 of 3 packed".len());
    }

    #[test]
    fn test_draft_keeps_optional_fields() {
        let draft = draft("Flash".into(), None, Some("Lighting".into()));
        let created = Equipment::create(draft, "https://x/f.jpg").unwrap();

        assert_eq!(created.category.as_deref(), Some("Lighting"));
        assert_eq!(created.description, None);
    }

    #[tokio::test]
    async fn test_read_image_detects_type_from_name() {
        let path = scratch_file("flash.PNG", &[0x89, b'P', b'N', b'G']);

        let upload = read_image(&path).await.unwrap();

        assert_eq!(upload.content_type(), "image/png");
        assert_eq!(upload.len(), 4);
    }

    #[tokio::test]
    async fn test_read_image_rejects_unsupported_type() {
        let path = scratch_file("notes.txt", b"hello");

        let err = read_image(&path).await.unwrap_err();
        assert!(matches!(err, CliError::Core(CoreError::UnsupportedImageType(_))));
    }

    #[tokio::test]
    async fn test_read_image_rejects_oversized_file() {
        let path = scratch_file("huge.jpg", &[]);
        std::fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_len(MAX_IMAGE_BYTES as u64 + 1)
            .unwrap();

        let err = read_image(&path).await.unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(CoreError::Validation(ValidationError::ImageTooLarge { .. }))
        ));
    }

    #[tokio::test]
    async fn test_read_image_missing_file_is_io() {
        let err = read_image(Path::new("/definitely/not/here.jpg")).await.unwrap_err();
        assert_eq!(err.exit_code(), 74);
    }

    #[tokio::test]
    async fn test_add_embeds_photo() {
        let (mut store, backend) = loaded(vec![]).await;
        let path = scratch_file("body.jpg", &[1, 2, 3]);

        add(&mut store, draft("Canon EOS R5".into(), None, None), &path)
            .await
            .unwrap();

        let saved = backend.snapshot();
        assert_eq!(saved.len(), 1);
        assert!(saved[0].image_url.starts_with("data:image/jpeg;base64,"));
    }

    #[tokio::test]
    async fn test_toggle_and_delete_unknown_id_succeed() {
        let (mut store, _) = loaded(vec![item("Tripod", false)]).await;

        assert!(toggle(&mut store, "missing").await.is_ok());
        assert!(delete(&mut store, "missing").await.is_ok());
        assert_eq!(store.equipment().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_then_delete() {
        let tripod = item("Tripod", false);
        let id = tripod.id.clone();
        let (mut store, backend) = loaded(vec![tripod]).await;

        toggle(&mut store, &id).await.unwrap();
        assert!(backend.snapshot()[0].is_packed);

        delete(&mut store, &id).await.unwrap();
        assert!(backend.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_list_json_and_text() {
        let (store, _) = loaded(vec![item("Tripod", true), item("Flash", false)]).await;

        assert!(list(&store, FilterMode::Packed, true).is_ok());
        assert!(list(&store, FilterMode::Unpacked, false).is_ok());
    }
}
