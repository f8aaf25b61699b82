//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters
//! must implement:
//! - IssueSource: issue metadata resolution from the source system
//! - WorkItemRepository: work item operations in the tracker
//! - BoardColumns: board column queries in the tracker
//!
//! These traits define the contracts that allow the reconciliation core to
//! be independent of specific infrastructure implementations.

pub mod board;
pub mod issue_source;
pub mod work_items;

pub use board::BoardColumns;
pub use issue_source::{IssueSource, SourceError};
pub use work_items::{TrackerError, WorkItemRepository};
