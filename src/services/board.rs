//! Column existence probing against the tracker's board.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::ports::{BoardColumns, TrackerError};

/// Checks whether a named column currently exists on the board.
///
/// Consulted twice per reconciliation at most: to decide whether a created
/// item needs the missing-column marker, and to decide whether a column
/// move should be attempted at all.
pub struct ColumnLocator {
    board: Arc<dyn BoardColumns>,
}

impl ColumnLocator {
    pub fn new(board: Arc<dyn BoardColumns>) -> Self {
        Self { board }
    }

    /// Whether any current board column is named exactly `name`.
    #[instrument(skip(self), err)]
    pub async fn column_exists(&self, name: &str) -> Result<bool, TrackerError> {
        let columns = self.board.list_columns().await?;
        let exists = columns.iter().any(|column| column.name == name);

        if !exists {
            debug!(
                column = %name,
                board_columns = columns.len(),
                "column not present on board"
            );
        }

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::BoardColumn;
    use async_trait::async_trait;

    struct FixedBoard {
        columns: Vec<BoardColumn>,
    }

    #[async_trait]
    impl BoardColumns for FixedBoard {
        async fn list_columns(&self) -> Result<Vec<BoardColumn>, TrackerError> {
            Ok(self.columns.clone())
        }
    }

    fn locator(names: &[&str]) -> ColumnLocator {
        let columns = names
            .iter()
            .map(|name| BoardColumn {
                id: None,
                name: (*name).to_string(),
            })
            .collect();
        ColumnLocator::new(Arc::new(FixedBoard { columns }))
    }

    #[tokio::test]
    async fn test_existing_column() {
        let locator = locator(&["Not Yet Started", "In Progress", "Done"]);
        assert!(locator.column_exists("In Progress").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_column() {
        let locator = locator(&["Not Yet Started", "Done"]);
        assert!(!locator.column_exists("Repeat Tasks").await.unwrap());
    }

    #[tokio::test]
    async fn test_name_match_is_exact() {
        let locator = locator(&["Done"]);
        assert!(!locator.column_exists("done").await.unwrap());
    }
}
