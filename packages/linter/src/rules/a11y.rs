use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use mailframe_model::{Content, ContentKind, ContentPath};

/// Accessibility lint rules
pub struct A11yRule;

impl LintRule for A11yRule {
    fn name(&self) -> &'static str {
        "a11y"
    }

    fn description(&self) -> &'static str {
        "Images need alternative text and buttons need a label"
    }

    fn check_content(&self, path: &ContentPath, content: &Content) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        match &content.kind {
            // Check images for alt text
            ContentKind::Image(image) if image.alt_text.trim().is_empty() => {
                diagnostics.push(
                    Diagnostic::warning(
                        "a11y-img-alt",
                        "Images should have alternative text for screen readers and blocked images",
                        path.to_string(),
                    )
                    .with_suggestion("Set 'altText' to a short description of the image"),
                );
            }

            // Check buttons for visible text
            ContentKind::Button(button) if !has_text(button.text.as_deref()) => {
                diagnostics.push(
                    Diagnostic::error(
                        "a11y-button-text",
                        "Buttons must have text content",
                        path.to_string(),
                    )
                    .with_suggestion("Give the button a label such as 'Shop now'"),
                );
            }

            _ => {}
        }

        diagnostics
    }
}

/// Whether markup holds any visible characters once tags are removed
fn has_text(markup: Option<&str>) -> bool {
    let Some(markup) = markup else {
        return false;
    };

    let mut in_tag = false;
    markup.chars().any(|c| match c {
        '<' => {
            in_tag = true;
            false
        }
        '>' => {
            in_tag = false;
            false
        }
        c => !in_tag && !c.is_whitespace(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailframe_model::{ButtonValues, ContentType, ImageValues};

    fn path() -> ContentPath {
        ContentPath::top(0, 0, 0)
    }

    #[test]
    fn test_detects_image_without_alt() {
        let image = Content::create(ContentType::Image);

        let diagnostics = A11yRule.check_content(&path(), &image);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "a11y-img-alt");
        assert_eq!(diagnostics[0].location, "row 0 column 0 content 0");
    }

    #[test]
    fn test_allows_image_with_alt() {
        let image = Content::new(ContentKind::Image(ImageValues {
            alt_text: "Team photo".to_string(),
            ..ImageValues::default()
        }));

        assert!(A11yRule.check_content(&path(), &image).is_empty());
    }

    #[test]
    fn test_detects_button_with_only_markup() {
        let button = Content::new(ContentKind::Button(ButtonValues {
            text: Some("<span> </span>".to_string()),
            ..ButtonValues::default()
        }));

        let diagnostics = A11yRule.check_content(&path(), &button);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "a11y-button-text");
    }

    #[test]
    fn test_allows_default_button() {
        let button = Content::create(ContentType::Button);
        assert!(A11yRule.check_content(&path(), &button).is_empty());
    }
}
