pub mod filter;
pub mod loader;
pub mod ranker;

pub use filter::ProductFilter;
pub use loader::{load_snapshot, CsvSnapshotSource, SnapshotSource};
pub use ranker::{HybridRanker, RankOptions};
