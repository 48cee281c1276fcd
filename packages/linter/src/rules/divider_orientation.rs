use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use mailframe_model::{Content, ContentKind, ContentPath, DividerOrientation};

/// Lint rule for divider orientations the renderer does not understand
pub struct DividerOrientationRule;

impl LintRule for DividerOrientationRule {
    fn name(&self) -> &'static str {
        "divider-orientation"
    }

    fn description(&self) -> &'static str {
        "Dividers must be horizontal or vertical"
    }

    fn check_content(&self, path: &ContentPath, content: &Content) -> Vec<Diagnostic> {
        match &content.kind {
            ContentKind::Divider(divider) => match &divider.orientation {
                DividerOrientation::Other(orientation) => vec![Diagnostic::warning(
                    "divider-orientation",
                    format!(
                        "Unknown divider orientation '{}' is drawn as a horizontal rule",
                        orientation
                    ),
                    path.to_string(),
                )
                .with_suggestion("Set 'textAlign' to 'horizontal' or 'vertical'")],
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }
}
