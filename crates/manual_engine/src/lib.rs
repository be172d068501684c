//! Video manual engine: catalog fetching, export rendering and file output.
mod catalog;
mod engine;
mod export;
mod filename;
mod persist;
mod types;

pub use catalog::{CatalogClient, CatalogSettings, YouTubeCatalogClient, DEFAULT_API_BASE};
pub use engine::EngineHandle;
pub use export::{
    escape_html, export_document, render_manual_html, save_export, ExportDocument, ExportError,
    ExportOptions,
};
pub use filename::manual_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{EngineEvent, FailureKind, FetchError};
