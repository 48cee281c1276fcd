use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use mailframe_editor::merge_tags::{default_tags, find_tags, is_valid_tag, text_fields, TextFieldKind};
use mailframe_editor::MergeTag;
use mailframe_model::Design;
use std::collections::HashSet;

/// Lint rule for malformed or unrecognized `{{merge_tags}}`
pub struct MergeTagSyntaxRule {
    known: HashSet<String>,
}

impl MergeTagSyntaxRule {
    /// Check against the built-in tag catalogue
    pub fn new() -> Self {
        Self::with_tags(&default_tags())
    }

    /// Check against a custom tag catalogue
    pub fn with_tags(tags: &[MergeTag]) -> Self {
        Self {
            known: tags.iter().map(|tag| tag.value.clone()).collect(),
        }
    }
}

impl Default for MergeTagSyntaxRule {
    fn default() -> Self {
        Self::new()
    }
}

impl LintRule for MergeTagSyntaxRule {
    fn name(&self) -> &'static str {
        "merge-tag-syntax"
    }

    fn description(&self) -> &'static str {
        "Merge tags must look like {{tag_name}} and name a known tag"
    }

    fn check_design(&self, design: &Design) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for field in text_fields(design) {
            let location = match field.kind {
                TextFieldKind::Text => format!("content {} text", field.content_id),
                TextFieldKind::ButtonText => format!("content {} button text", field.content_id),
                TextFieldKind::LinkHref => format!("content {} link", field.content_id),
            };

            for tag in find_tags(field.value) {
                if !is_valid_tag(&tag) {
                    diagnostics.push(
                        Diagnostic::error(
                            "merge-tag-syntax",
                            format!("Malformed merge tag '{}'", tag),
                            location.clone(),
                        )
                        .with_suggestion("Use letters, digits and underscores only, e.g. {{first_name}}"),
                    );
                } else if !self.known.contains(&tag) {
                    diagnostics.push(Diagnostic::info(
                        "merge-tag-syntax",
                        format!("Merge tag '{}' is not in the tag catalogue", tag),
                        location.clone(),
                    ));
                }
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagnosticLevel;
    use mailframe_editor::MergeTagCategory;
    use mailframe_model::{ButtonValues, Content, ContentKind, LinkAction};

    fn design_with(content: Content) -> Design {
        let mut design = Design::seeded();
        design.rows_mut()[0].columns[0].contents.push(content);
        design
    }

    #[test]
    fn test_known_tags_pass() {
        let design = design_with(Content::text("<p>Hi {{first_name}}</p>"));
        assert!(MergeTagSyntaxRule::new().check_design(&design).is_empty());
    }

    #[test]
    fn test_detects_malformed_tag() {
        let design = design_with(Content::text("<p>Hi {{first name}}</p>"));

        let diagnostics = MergeTagSyntaxRule::new().check_design(&design);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].level, DiagnosticLevel::Error);
        assert_eq!(diagnostics[0].message, "Malformed merge tag '{{first name}}'");
    }

    #[test]
    fn test_unknown_tag_in_button_link() {
        let button = Content::new(ContentKind::Button(ButtonValues {
            text: Some("Open".to_string()),
            link: Some(LinkAction::web("https://example.com/{{coupon}}")),
            ..ButtonValues::default()
        }));
        let id = button.id.clone();

        let diagnostics = MergeTagSyntaxRule::new().check_design(&design_with(button));

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].level, DiagnosticLevel::Info);
        assert_eq!(diagnostics[0].location, format!("content {} link", id));
    }

    #[test]
    fn test_custom_catalogue() {
        let tags = vec![MergeTag::new("coupon", "Coupon", "SAVE10", MergeTagCategory::Custom, "Discount code")];
        let design = design_with(Content::text("Use {{coupon}}"));

        assert!(MergeTagSyntaxRule::with_tags(&tags).check_design(&design).is_empty());
    }
}
