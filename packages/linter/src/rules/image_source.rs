use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use mailframe_model::{Content, ContentKind, ContentPath};

/// Lint rule for images that render nothing
pub struct ImageSourceRule;

impl LintRule for ImageSourceRule {
    fn name(&self) -> &'static str {
        "image-source"
    }

    fn description(&self) -> &'static str {
        "Images need a source URL"
    }

    fn check_content(&self, path: &ContentPath, content: &Content) -> Vec<Diagnostic> {
        let ContentKind::Image(image) = &content.kind else {
            return Vec::new();
        };

        match &image.src {
            None => vec![Diagnostic::warning(
                "image-source",
                "Image has no source and will not be rendered",
                path.to_string(),
            )],
            Some(src) if src.url.trim().is_empty() => vec![Diagnostic::warning(
                "image-source",
                "Image source URL is empty",
                path.to_string(),
            )
            .with_suggestion("Upload an image or paste its URL")],
            Some(src) if !src.url.starts_with("https://") && !src.url.starts_with("data:") => {
                vec![Diagnostic::info(
                    "image-source",
                    format!("Image '{}' is not served over HTTPS", src.url),
                    path.to_string(),
                )]
            }
            Some(_) => Vec::new(),
        }
    }
}
