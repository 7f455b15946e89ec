use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{Item, ItemFilter, ItemPatch, NewItem};

/// The whole persisted document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub items: Vec<Item>,
}

/// Backend holding the items document
///
/// Implementations only move whole documents; all item logic lives in [`ItemStore`].
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Create an empty document if none exists yet
    async fn ensure(&self) -> Result<()>;

    /// Read the full document
    async fn load(&self) -> Result<Document>;

    /// Replace the full document
    async fn save(&self, document: &Document) -> Result<()>;
}

/// Stores the document as pretty-printed JSON in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn write_document(&self, document: &Document) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(document).context("Failed to serialize items document")?;

        // Write beside the target and rename so readers never see a half-written file
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, contents)
            .await
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }
}

#[async_trait]
impl DocumentStorage for JsonFileStorage {
    async fn ensure(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
        }

        let exists = tokio::fs::try_exists(&self.path)
            .await
            .with_context(|| format!("Failed to check {}", self.path.display()))?;

        if !exists {
            tracing::info!("Initializing empty items document at {}", self.path.display());
            self.write_document(&Document::default()).await?;
        }

        Ok(())
    }

    async fn load(&self) -> Result<Document> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse items document {}", self.path.display()))
    }

    async fn save(&self, document: &Document) -> Result<()> {
        self.write_document(document).await
    }
}

/// Keeps the document in memory; nothing touches disk
#[derive(Debug, Default)]
pub struct MemoryStorage {
    document: Mutex<Option<Document>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            document: Mutex::new(Some(document)),
        }
    }
}

#[async_trait]
impl DocumentStorage for MemoryStorage {
    async fn ensure(&self) -> Result<()> {
        self.document.lock().await.get_or_insert_with(Document::default);
        Ok(())
    }

    async fn load(&self) -> Result<Document> {
        self.document
            .lock()
            .await
            .clone()
            .context("Items document has not been initialized")
    }

    async fn save(&self, document: &Document) -> Result<()> {
        *self.document.lock().await = Some(document.clone());
        Ok(())
    }
}

/// Current time in the persisted timestamp format (RFC 3339, millisecond precision, `Z`)
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Item operations over a [`DocumentStorage`]
///
/// Every call re-reads the whole document. Mutations hold `write_lock` across
/// their read-modify-write so concurrent requests in this process cannot drop
/// each other's changes.
#[derive(Clone)]
pub struct ItemStore {
    storage: Arc<dyn DocumentStorage>,
    write_lock: Arc<Mutex<()>>,
}

impl ItemStore {
    pub fn new(storage: Arc<dyn DocumentStorage>) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(JsonFileStorage::new(path)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Make sure the backing document exists
    pub async fn ensure(&self) -> Result<()> {
        self.storage
            .ensure()
            .await
            .context("Failed to initialize items storage")
    }

    async fn read(&self) -> Result<Document> {
        self.ensure().await?;
        self.storage.load().await
    }

    async fn write(&self, document: &Document) -> Result<()> {
        self.storage
            .save(document)
            .await
            .context("Failed to persist items document")
    }

    /// Verify the document can be read and parsed
    pub async fn health_check(&self) -> Result<()> {
        self.read().await.map(|_| ())
    }

    /// All items matching `filter`, in insertion order
    pub async fn list(&self, filter: &ItemFilter) -> Result<Vec<Item>> {
        let document = self.read().await?;
        let total = document.items.len();

        let items: Vec<Item> = document
            .items
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect();

        tracing::debug!(
            "Listed {} of {} items (status: {:?}, query: {:?})",
            items.len(),
            total,
            filter.status,
            filter.query
        );
        Ok(items)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Item>> {
        let document = self.read().await?;
        Ok(document.items.into_iter().find(|item| item.id == id))
    }

    /// Append a new item with a fresh id and both timestamps set to now
    pub async fn create(&self, new_item: NewItem) -> Result<Item> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read().await?;

        let now = now_timestamp();
        let item = Item {
            id: Uuid::new_v4().to_string(),
            name: new_item.name,
            description: new_item.description.unwrap_or_default(),
            status: new_item.status.unwrap_or_default(),
            created_at: now.clone(),
            updated_at: now,
        };

        document.items.push(item.clone());
        self.write(&document).await?;

        tracing::debug!("Created item with id: {}", item.id);
        Ok(item)
    }

    /// Merge `patch` into the item with `id`. Returns `None` if there is no such item.
    pub async fn update(&self, id: &str, patch: ItemPatch) -> Result<Option<Item>> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read().await?;

        let Some(item) = document.items.iter_mut().find(|item| item.id == id) else {
            tracing::debug!("Item not found for update: {}", id);
            return Ok(None);
        };

        patch.apply_to(item);
        // Fixed-width timestamps compare chronologically as strings
        let now = now_timestamp();
        item.updated_at = if now < item.created_at {
            item.created_at.clone()
        } else {
            now
        };
        let updated = item.clone();

        self.write(&document).await?;

        tracing::debug!("Updated item with id: {}", id);
        Ok(Some(updated))
    }

    /// Remove the item with `id`. Returns whether anything was removed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read().await?;

        let before = document.items.len();
        document.items.retain(|item| item.id != id);
        if document.items.len() == before {
            tracing::debug!("Item not found for delete: {}", id);
            return Ok(false);
        }

        self.write(&document).await?;

        tracing::debug!("Deleted item with id: {}", id);
        Ok(true)
    }
}
