//! # Export Pipeline
//!
//! Coordinates the output side of the document lifecycle: Design → HTML + JSON
//!
//! The Pipeline manages:
//! - Rendering with the configured compile options
//! - Serializing the design alongside the markup
//! - Caching the last successful render
//!
//! Export never panics: a failed render or serialization is reported through
//! [`ExportResult::success`] and [`ExportResult::error_message`].

use chrono::{DateTime, Utc};
use mailframe_compiler_html::{compile_to_html, CompileOptions};
use mailframe_model::{serialize, Design};
use serde::Serialize;
use tracing::warn;

/// Manages the design → HTML pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: CompileOptions,
    last_html: Option<String>,
}

impl Pipeline {
    /// Create pipeline with compile options
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            last_html: None,
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Render only, caching the markup on success
    pub fn render(&mut self, design: &Design) -> Result<String, crate::EditorError> {
        let html = compile_to_html(design, &self.options)?;
        self.last_html = Some(html.clone());
        Ok(html)
    }

    /// Render and serialize the design into one export record
    pub fn export(&mut self, design: &Design) -> ExportResult {
        let exported_at = Utc::now();

        let outcome = self
            .render(design)
            .and_then(|html| Ok((html, serialize(design)?)));

        match outcome {
            Ok((html, design_json)) => ExportResult {
                html,
                design: design.clone(),
                design_json,
                success: true,
                error_message: None,
                exported_at,
            },
            Err(err) => {
                warn!(%err, "export failed");
                ExportResult {
                    html: String::new(),
                    design: design.clone(),
                    design_json: String::new(),
                    success: false,
                    error_message: Some(err.to_string()),
                    exported_at,
                }
            }
        }
    }

    /// Last successfully rendered markup (if any)
    pub fn last_html(&self) -> Option<&str> {
        self.last_html.as_deref()
    }

    /// Clear render cache
    pub fn clear_cache(&mut self) {
        self.last_html = None;
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}

/// Result of an export
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    /// Email-ready HTML document
    pub html: String,

    /// Design that was exported
    pub design: Design,

    /// Pretty-printed design JSON
    pub design_json: String,

    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    pub exported_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailframe_model::{deserialize, Content};

    #[test]
    fn test_export_seeded_design() {
        let mut pipeline = Pipeline::default();
        let design = Design::seeded();

        let result = pipeline.export(&design);

        assert!(result.success);
        assert!(result.error_message.is_none());
        assert!(result.html.starts_with("<!DOCTYPE"));
        assert_eq!(deserialize(&result.design_json).unwrap(), design);
        assert_eq!(pipeline.last_html(), Some(result.html.as_str()));
    }

    #[test]
    fn test_export_empty_design_still_succeeds() {
        let mut pipeline = Pipeline::default();

        let result = pipeline.export(&Design::new());

        assert!(result.success);
        assert!(result.html.contains("</html>"));
    }

    #[test]
    fn test_render_contains_text() {
        let mut pipeline = Pipeline::default();
        let mut design = Design::seeded();
        design.rows_mut()[0].columns[0]
            .contents
            .push(Content::text("<p>Hi there</p>"));

        let html = pipeline.render(&design).unwrap();

        assert!(html.contains("<p>Hi there</p>"));
    }

    #[test]
    fn test_export_result_serializes_camel_case() {
        let mut pipeline = Pipeline::default();
        let result = pipeline.export(&Design::seeded());

        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["success"], true);
        assert!(value.get("designJson").is_some());
        assert!(value.get("exportedAt").is_some());
        assert!(value.get("errorMessage").is_none());
    }

    #[test]
    fn test_clear_cache() {
        let mut pipeline = Pipeline::default();
        pipeline.render(&Design::seeded()).unwrap();

        pipeline.clear_cache();

        assert!(pipeline.last_html().is_none());
    }
}
