/// Service modules
pub mod export;

pub use export::SnapshotExporter;
