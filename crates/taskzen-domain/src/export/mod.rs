//! Versioned import/export of whole boards.

pub mod exporter;
pub mod importer;
pub mod models;

pub use exporter::BoardExporter;
pub use importer::BoardImporter;
pub use models::{ExportDocument, EXPORT_VERSION};
