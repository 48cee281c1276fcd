use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use mailframe_model::{Content, ContentKind, ContentPath, ContentType};

/// Lint rule for content types this version cannot render
pub struct KnownContentTypeRule;

impl LintRule for KnownContentTypeRule {
    fn name(&self) -> &'static str {
        "known-content-type"
    }

    fn description(&self) -> &'static str {
        "Content must be one of the supported types"
    }

    fn check_content(&self, path: &ContentPath, content: &Content) -> Vec<Diagnostic> {
        let ContentKind::Unknown(unknown) = &content.kind else {
            return Vec::new();
        };

        let supported: Vec<&str> = ContentType::ALL.iter().map(|t| t.as_str()).collect();
        vec![Diagnostic::warning(
            "known-content-type",
            format!(
                "Content type '{}' is kept but will not be rendered",
                unknown.type_name
            ),
            path.to_string(),
        )
        .with_suggestion(format!("Supported types: {}", supported.join(", ")))]
    }
}
