//! Service layer: the reconciliation core and its collaborators.

pub mod board;
pub mod identity;
pub mod status_extractor;
pub mod sync;
pub mod writer;

pub use board::ColumnLocator;
pub use identity::IdentityResolver;
pub use status_extractor::StatusExtractor;
pub use sync::SyncService;
pub use writer::{MoveOutcome, WorkItemWriter};
