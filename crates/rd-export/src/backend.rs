//! Export backends and the export entry point.

use crate::error::ExportError;
use crate::plan::{ExportPlan, build_plan};
use chrono::NaiveDate;
use rd_core::record::Record;
use rd_core::scene::Scene;

/// Turns an export plan into a finished document.
pub trait ExportBackend {
    fn name(&self) -> &'static str;

    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    /// MIME type of the produced bytes.
    fn mime_type(&self) -> &'static str;

    fn render(&self, plan: &ExportPlan) -> Result<Vec<u8>, ExportError>;
}

/// A finished export ready for download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutput {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// The backend compiled into this build, if any.
pub fn default_backend() -> Option<Box<dyn ExportBackend>> {
    #[cfg(feature = "pdf")]
    {
        Some(Box::new(crate::pdf::PdfBackend::default()))
    }
    #[cfg(not(feature = "pdf"))]
    {
        None
    }
}

/// Keep letters, digits, `-` and `_`; everything else becomes `_`.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "report".to_string()
    } else {
        cleaned
    }
}

/// `<sanitized template name>_<YYYY-MM-DD>.<ext>`
pub fn file_name(template_name: &str, date: NaiveDate, extension: &str) -> String {
    format!(
        "{}_{}.{extension}",
        sanitize(template_name),
        date.format("%Y-%m-%d")
    )
}

/// Export `scene` against the active record.
///
/// Fails without side effects when no backend is available or the backend
/// errors; the caller's scene is only read.
pub fn export(
    scene: &Scene,
    record: Option<&Record>,
    backend: Option<&dyn ExportBackend>,
    date: NaiveDate,
) -> Result<ExportOutput, ExportError> {
    let backend = backend.ok_or(ExportError::BackendUnavailable)?;
    let plan = build_plan(scene, record)?;
    let bytes = backend.render(&plan)?;
    log::debug!(
        "export: {} page(s), {} op(s), {} bytes via {}",
        plan.pages.len(),
        plan.op_count(),
        bytes.len(),
        backend.name()
    );
    Ok(ExportOutput {
        file_name: file_name(&scene.meta.name, date, backend.extension()),
        mime_type: backend.mime_type(),
        bytes,
    })
}
