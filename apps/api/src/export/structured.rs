use crate::export::{ExportBundle, ExportError};

/// Pretty-printed JSON of the whole bundle, raw trees included.
pub fn render_dump(bundle: &ExportBundle) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(bundle)?)
}
