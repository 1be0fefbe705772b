//! Export engine: scene + active record → paginated document.

pub mod backend;
pub mod error;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod plan;

pub use backend::{ExportBackend, ExportOutput, default_backend, export, file_name};
pub use error::ExportError;
#[cfg(feature = "pdf")]
pub use pdf::PdfBackend;
pub use plan::{DrawOp, ExportPlan, PlanPage, build_plan};
