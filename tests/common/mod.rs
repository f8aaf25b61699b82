//! Shared test doubles for reconciliation tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use boardsync::domain::models::{
    parse_tags, system_fields, BoardColumn, IssueMetadata, NewWorkItem, RepositoryRef,
    StatusVocabulary, WorkItem,
};
use boardsync::domain::ports::{
    BoardColumns, IssueSource, SourceError, TrackerError, WorkItemRepository,
};
use boardsync::services::{
    ColumnLocator, IdentityResolver, StatusExtractor, SyncService, WorkItemWriter,
};

/// Issue source returning fixed metadata, counting fetches.
pub struct MockIssueSource {
    metadata: Option<IssueMetadata>,
    pub fetches: AtomicUsize,
}

impl MockIssueSource {
    pub fn new(metadata: Option<IssueMetadata>) -> Self {
        Self {
            metadata,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IssueSource for MockIssueSource {
    async fn fetch_issue_metadata(&self, content_ref: &str) -> Result<IssueMetadata, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.metadata
            .clone()
            .ok_or_else(|| SourceError::NotFound(content_ref.to_string()))
    }
}

/// In-memory tracker recording every call.
pub struct InMemoryTracker {
    pub items: Mutex<HashMap<i64, WorkItem>>,
    next_id: Mutex<i64>,
    /// Tags passed to `find_first_by_tag`, in call order.
    pub tag_queries: Mutex<Vec<String>>,
    /// Every created item, in call order.
    pub created: Mutex<Vec<NewWorkItem>>,
    /// Every field update as `(id, field, value)`, in call order.
    pub updates: Mutex<Vec<(i64, String, String)>>,
    /// Board-column field name stamped onto created items, if the board
    /// has assigned one.
    column_field: Option<String>,
}

impl InMemoryTracker {
    pub fn new(column_field: Option<&str>) -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            next_id: Mutex::new(100),
            tag_queries: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
            column_field: column_field.map(ToString::to_string),
        }
    }

    /// Seed an existing work item carrying the given tags.
    pub fn seed(&self, tags: &[&str]) -> i64 {
        let mut next_id = self.next_id.lock().unwrap();
        let id = *next_id;
        *next_id += 1;

        let mut fields: HashMap<String, Value> = HashMap::new();
        if let Some(column_field) = &self.column_field {
            fields.insert(column_field.clone(), json!("Not Yet Started"));
        }

        self.items.lock().unwrap().insert(
            id,
            WorkItem {
                id,
                title: "seeded".to_string(),
                description: String::new(),
                tags: tags.iter().map(ToString::to_string).collect(),
                fields,
            },
        );
        id
    }

    pub fn item_count(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

#[async_trait]
impl WorkItemRepository for InMemoryTracker {
    async fn find_first_by_tag(&self, tag: &str) -> Result<Option<WorkItem>, TrackerError> {
        self.tag_queries.lock().unwrap().push(tag.to_string());
        Ok(self
            .items
            .lock()
            .unwrap()
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
        item.fields.insert(field.to_string(), json!(value));
        if field == system_fields::TAGS {
            item.tags = parse_tags(value);
        }
        Ok(item.clone())
    }
}

/// Board answering with a fixed column list.
pub struct FixedBoard {
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

/// Issue metadata for `acme/widgets#42`, the identity used across tests.
pub fn widget_metadata() -> IssueMetadata {
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

/// Wire a sync service over the in-memory doubles.
pub fn sync_service(
    metadata: Option<IssueMetadata>,
    board_columns: &[&str],
    column_field: Option<&str>,
) -> (SyncService, Arc<MockIssueSource>, Arc<InMemoryTracker>) {
    let source = Arc::new(MockIssueSource::new(metadata));
    let tracker = Arc::new(InMemoryTracker::new(column_field));
    let board = Arc::new(FixedBoard {
        names: board_columns.iter().map(ToString::to_string).collect(),
    });

    let extractor = StatusExtractor::new(StatusVocabulary::default());
    let resolver = IdentityResolver::new(tracker.clone());
    let locator = ColumnLocator::new(board);
    let writer = WorkItemWriter::new(
        tracker.clone(),
        locator,
        HashMap::from([
            ("Not Yet Started".to_string(), "New".to_string()),
            ("In Progress".to_string(), "Active".to_string()),
            ("Done".to_string(), "Closed".to_string()),
        ]),
    );

    let service = SyncService::new(source.clone(), extractor, resolver, writer);
    (service, source, tracker)
}
