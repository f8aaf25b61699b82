//! Work item creation and column moves.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::errors::SyncResult;
use crate::domain::models::{
    system_fields, IssueMetadata, ItemIdentity, NewWorkItem, WorkItem, IMPORT_TAG,
    MISSING_COLUMN_TAG_PREFIX,
};
use crate::domain::ports::{TrackerError, WorkItemRepository};

use super::board::ColumnLocator;

/// Outcome of a column-move attempt.
#[derive(Debug, Clone)]
pub enum MoveOutcome {
    /// The discovered board-column field was patched.
    Moved(WorkItem),

    /// The work item carries no discoverable board-column field; nothing
    /// was mutated.
    FieldUnavailable,
}

/// Writes work items into the tracker: creation with the identity tag set,
/// and column moves via the dynamically discovered board-column field.
pub struct WorkItemWriter {
    work_items: Arc<dyn WorkItemRepository>,
    columns: ColumnLocator,
    state_mapping: HashMap<String, String>,
}

impl WorkItemWriter {
    pub fn new(
        work_items: Arc<dyn WorkItemRepository>,
        columns: ColumnLocator,
        state_mapping: HashMap<String, String>,
    ) -> Self {
        Self {
            work_items,
            columns,
            state_mapping,
        }
    }

    /// Create a work item for an issue.
    ///
    /// Tags always carry the import marker and the identity tag. When a
    /// target column is given but absent from the board, a
    /// `Missing Column: {target}` tag records that instead of dropping the
    /// item. When the target column exists, the creation is immediately
    /// followed by a move into it, and the status-to-state mapping (if any)
    /// is applied at creation time.
    #[instrument(skip(self, metadata), fields(identity = %identity), err)]
    pub async fn create(
        &self,
        metadata: &IssueMetadata,
        identity: &ItemIdentity,
        target_column: Option<&str>,
    ) -> SyncResult<WorkItem> {
        let mut tags = vec![IMPORT_TAG.to_string(), identity.tag()];

        let target_exists = match target_column {
            Some(column) => {
                let exists = self.columns.column_exists(column).await?;
                if !exists {
                    tags.push(format!("{MISSING_COLUMN_TAG_PREFIX}{column}"));
                }
                exists
            }
            None => false,
        };

        let state = target_column
            .filter(|_| target_exists)
            .and_then(|column| self.state_mapping.get(column).cloned());

        let new_item = NewWorkItem {
            title: metadata.title.clone(),
            description: metadata.body.clone(),
            tags,
            state,
        };

        let created = self.work_items.create(&new_item).await?;
        info!(work_item_id = created.id, "work item created");

        if let Some(column) = target_column {
            if target_exists {
                if let MoveOutcome::Moved(updated) = self.move_column(created.id, column).await? {
                    return Ok(updated);
                }
            }
        }

        Ok(created)
    }

    /// Move a work item to a board column.
    ///
    /// The board-column field name varies per board configuration, so the
    /// full work item is fetched first and probed for it. A work item with
    /// no such field is left untouched; the miss is logged and reported as
    /// `FieldUnavailable` rather than failing the run.
    #[instrument(skip(self), err)]
    pub async fn move_column(
        &self,
        work_item_id: i64,
        column: &str,
    ) -> Result<MoveOutcome, TrackerError> {
        let item = self.work_items.get(work_item_id).await?;

        let Some(field) = item.board_column_field() else {
            warn!(
                work_item_id,
                column, "no board-column field on work item, skipping move"
            );
            return Ok(MoveOutcome::FieldUnavailable);
        };

        let field = field.to_string();
        let updated = self
            .work_items
            .update_field(work_item_id, &field, column)
            .await?;

        info!(work_item_id, column, field = %field, "work item moved");
        Ok(MoveOutcome::Moved(updated))
    }

    /// Apply a target column to an existing work item: move it when the
    /// column exists on the board, otherwise record the missing column in
    /// its tags. The item itself is always kept.
    #[instrument(skip(self, item), fields(work_item_id = item.id), err)]
    pub async fn update_column(&self, item: &WorkItem, column: &str) -> SyncResult<WorkItem> {
        if self.columns.column_exists(column).await? {
            match self.move_column(item.id, column).await? {
                MoveOutcome::Moved(updated) => Ok(updated),
                MoveOutcome::FieldUnavailable => Ok(item.clone()),
            }
        } else {
            Ok(self.mark_missing_column(item, column).await?)
        }
    }

    /// Record on an existing work item that its target column is missing
    /// from the board. Idempotent: an already-present marker is kept as is.
    #[instrument(skip(self, item), fields(work_item_id = item.id), err)]
    pub async fn mark_missing_column(
        &self,
        item: &WorkItem,
        column: &str,
    ) -> Result<WorkItem, TrackerError> {
        let marker = format!("{MISSING_COLUMN_TAG_PREFIX}{column}");
        if item.has_tag(&marker) {
            return Ok(item.clone());
        }

        let mut tags = item.tags.clone();
        tags.push(marker);

        self.work_items
            .update_field(item.id, system_fields::TAGS, &tags.join("; "))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{BoardColumn, RepositoryRef};
    use crate::domain::ports::BoardColumns;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// In-memory tracker double recording every mutation.
    struct MockTracker {
        items: Mutex<HashMap<i64, WorkItem>>,
        next_id: Mutex<i64>,
        created: Mutex<Vec<NewWorkItem>>,
        updates: Mutex<Vec<(i64, String, String)>>,
        column_field: Option<String>,
    }

    impl MockTracker {
        fn new(column_field: Option<&str>) -> Self {
            Self {
                items: Mutex::new(HashMap::new()),
                next_id: Mutex::new(100),
                created: Mutex::new(Vec::new()),
                updates: Mutex::new(Vec::new()),
                column_field: column_field.map(ToString::to_string),
            }
        }
    }

    #[async_trait]
    impl WorkItemRepository for MockTracker {
        async fn find_first_by_tag(&self, tag: &str) -> Result<Option<WorkItem>, TrackerError> {
            let items = self.items.lock().unwrap();
            Ok(items
                .values()
                .find(|item| item.has_tag(tag))
                .cloned())
        }

        async fn create(&self, new_item: &NewWorkItem) -> Result<WorkItem, TrackerError> {
            self.created.lock().unwrap().push(new_item.clone());

            let mut next_id = self.next_id.lock().unwrap();
            let id = *next_id;
            *next_id += 1;

            let mut fields: HashMap<String, Value> = HashMap::new();
            if let Some(column_field) = &self.column_field {
                fields.insert(column_field.clone(), json!("Not Yet Started"));
            }

            let item = WorkItem {
                id,
                title: new_item.title.clone(),
                description: new_item.description.clone(),
                tags: new_item.tags.clone(),
                fields,
            };
            self.items.lock().unwrap().insert(id, item.clone());
            Ok(item)
        }

        async fn get(&self, id: i64) -> Result<WorkItem, TrackerError> {
            self.items
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| TrackerError::NotFound(id.to_string()))
        }

        async fn update_field(
            &self,
            id: i64,
            field: &str,
            value: &str,
        ) -> Result<WorkItem, TrackerError> {
            self.updates
                .lock()
                .unwrap()
                .push((id, field.to_string(), value.to_string()));

            let mut items = self.items.lock().unwrap();
            let item = items
                .get_mut(&id)
                .ok_or_else(|| TrackerError::NotFound(id.to_string()))?;
            item.fields
                .insert(field.to_string(), json!(value));
            if field == system_fields::TAGS {
                item.tags = crate::domain::models::parse_tags(value);
            }
            Ok(item.clone())
        }
    }

    struct FixedBoard {
        names: Vec<String>,
    }

    #[async_trait]
    impl BoardColumns for FixedBoard {
        async fn list_columns(&self) -> Result<Vec<BoardColumn>, TrackerError> {
            Ok(self
                .names
                .iter()
                .map(|name| BoardColumn {
                    id: None,
                    name: name.clone(),
                })
                .collect())
        }
    }

    fn writer_with(
        tracker: Arc<MockTracker>,
        board_columns: &[&str],
    ) -> WorkItemWriter {
        let board = Arc::new(FixedBoard {
            names: board_columns.iter().map(ToString::to_string).collect(),
        });
        WorkItemWriter::new(
            tracker,
            ColumnLocator::new(board),
            HashMap::from([
                ("Not Yet Started".to_string(), "New".to_string()),
                ("In Progress".to_string(), "Active".to_string()),
                ("Done".to_string(), "Closed".to_string()),
            ]),
        )
    }

    fn metadata() -> IssueMetadata {
        IssueMetadata {
            title: "Widget is broken".to_string(),
            body: "It fails on startup".to_string(),
            number: 42,
            repository: RepositoryRef {
                owner: "acme".to_string(),
                name: "widgets".to_string(),
            },
        }
    }

    fn identity() -> ItemIdentity {
        ItemIdentity::new("acme", "widgets", 42)
    }

    #[tokio::test]
    async fn test_create_without_target_column() {
        let tracker = Arc::new(MockTracker::new(None));
        let writer = writer_with(tracker.clone(), &["Done"]);

        let item = writer.create(&metadata(), &identity(), None).await.unwrap();

        assert_eq!(item.tags, vec!["GitHub Import", "acme/widgets#42"]);
        let created = tracker.created.lock().unwrap();
        assert_eq!(created[0].tags_field(), "GitHub Import; acme/widgets#42");
        assert_eq!(created[0].state, None);
        assert!(tracker.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_existing_column_moves_and_maps_state() {
        let tracker = Arc::new(MockTracker::new(Some("WEF_77_Kanban.Column")));
        let writer = writer_with(tracker.clone(), &["In Progress", "Done"]);

        writer
            .create(&metadata(), &identity(), Some("In Progress"))
            .await
            .unwrap();

        let created = tracker.created.lock().unwrap();
        assert_eq!(created[0].state.as_deref(), Some("Active"));

        let updates = tracker.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1, "WEF_77_Kanban.Column");
        assert_eq!(updates[0].2, "In Progress");
    }

    #[tokio::test]
    async fn test_create_with_missing_column_tags_marker() {
        let tracker = Arc::new(MockTracker::new(None));
        let writer = writer_with(tracker.clone(), &["Done"]);

        let item = writer
            .create(&metadata(), &identity(), Some("Repeat Tasks"))
            .await
            .unwrap();

        assert!(item.has_tag("Missing Column: Repeat Tasks"));
        // No move attempted and no state mapped for an absent column.
        assert!(tracker.updates.lock().unwrap().is_empty());
        assert_eq!(tracker.created.lock().unwrap()[0].state, None);
    }

    #[tokio::test]
    async fn test_create_with_unmapped_column_has_no_state() {
        let tracker = Arc::new(MockTracker::new(Some("WEF_1_Kanban.Column")));
        let writer = writer_with(tracker.clone(), &["Repeat Tasks"]);

        writer
            .create(&metadata(), &identity(), Some("Repeat Tasks"))
            .await
            .unwrap();

        assert_eq!(tracker.created.lock().unwrap()[0].state, None);
    }

    #[tokio::test]
    async fn test_move_column_discovers_field() {
        let tracker = Arc::new(MockTracker::new(Some("WEF_ABC_Kanban.Column")));
        let writer = writer_with(tracker.clone(), &["Done"]);
        let created = writer.create(&metadata(), &identity(), None).await.unwrap();

        let outcome = writer.move_column(created.id, "Done").await.unwrap();

        assert!(matches!(outcome, MoveOutcome::Moved(_)));
        let updates = tracker.updates.lock().unwrap();
        assert_eq!(updates[0].1, "WEF_ABC_Kanban.Column");
    }

    #[tokio::test]
    async fn test_move_column_without_field_is_silent_noop() {
        let tracker = Arc::new(MockTracker::new(None));
        let writer = writer_with(tracker.clone(), &["Done"]);
        let created = writer.create(&metadata(), &identity(), None).await.unwrap();

        let outcome = writer.move_column(created.id, "Done").await.unwrap();

        assert!(matches!(outcome, MoveOutcome::FieldUnavailable));
        assert!(tracker.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_column_moves_when_column_exists() {
        let tracker = Arc::new(MockTracker::new(Some("WEF_9_Kanban.Column")));
        let writer = writer_with(tracker.clone(), &["Done"]);
        let created = writer.create(&metadata(), &identity(), None).await.unwrap();

        let updated = writer.update_column(&created, "Done").await.unwrap();

        assert_eq!(updated.id, created.id);
        let updates = tracker.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1, "WEF_9_Kanban.Column");
    }

    #[tokio::test]
    async fn test_update_column_marks_missing_column() {
        let tracker = Arc::new(MockTracker::new(Some("WEF_9_Kanban.Column")));
        let writer = writer_with(tracker.clone(), &["Done"]);
        let created = writer.create(&metadata(), &identity(), None).await.unwrap();

        let updated = writer.update_column(&created, "Repeat Tasks").await.unwrap();

        assert!(updated.has_tag("Missing Column: Repeat Tasks"));
        let updates = tracker.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1, system_fields::TAGS);
    }

    #[tokio::test]
    async fn test_mark_missing_column_appends_once() {
        let tracker = Arc::new(MockTracker::new(None));
        let writer = writer_with(tracker.clone(), &[]);
        let created = writer.create(&metadata(), &identity(), None).await.unwrap();

        let marked = writer
            .mark_missing_column(&created, "Repeat Tasks")
            .await
            .unwrap();
        assert!(marked.has_tag("Missing Column: Repeat Tasks"));

        // Second call is a no-op.
        let again = writer
            .mark_missing_column(&marked, "Repeat Tasks")
            .await
            .unwrap();
        assert_eq!(
            again
                .tags
                .iter()
                .filter(|t| t.starts_with("Missing Column:"))
                .count(),
            1
        );
        assert_eq!(tracker.updates.lock().unwrap().len(), 1);
    }
}
