//! # Merge Tags
//!
//! Personalization placeholders written as `{{tag_name}}` inside text,
//! button labels and link targets. The editor only discovers them; sending
//! systems substitute values later.

use chrono::{Datelike, Local};
use mailframe_model::visitor::{walk_content, Visitor};
use mailframe_model::{Content, ContentKind, Design};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("valid merge tag pattern"));

static VALID_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{\{[a-zA-Z0-9_]+\}\}$").expect("valid merge tag syntax pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MergeTagCategory {
    Personal,
    Company,
    Links,
    System,
    #[default]
    Custom,
}

/// A personalization variable offered to authors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeTag {
    pub key: String,
    pub name: String,
    /// Placeholder as written in content, e.g. `{{first_name}}`
    pub value: String,
    #[serde(default)]
    pub sample: String,
    #[serde(default)]
    pub category: MergeTagCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MergeTag {
    pub fn new(
        key: &str,
        name: &str,
        sample: impl Into<String>,
        category: MergeTagCategory,
        description: &str,
    ) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            value: format!("{{{{{}}}}}", key),
            sample: sample.into(),
            category,
            description: Some(description.to_string()),
        }
    }
}

/// The built-in tag catalogue
pub fn default_tags() -> Vec<MergeTag> {
    use MergeTagCategory::*;

    let today = Local::now();
    vec![
        MergeTag::new("first_name", "First Name", "John", Personal, "Recipient's first name"),
        MergeTag::new("last_name", "Last Name", "Doe", Personal, "Recipient's last name"),
        MergeTag::new("full_name", "Full Name", "John Doe", Personal, "Recipient's full name"),
        MergeTag::new(
            "email",
            "Email Address",
            "john.doe@example.com",
            Personal,
            "Recipient's email address",
        ),
        MergeTag::new("company", "Company Name", "Acme Corporation", Company, "Recipient's company name"),
        MergeTag::new("job_title", "Job Title", "Marketing Manager", Company, "Recipient's job title"),
        MergeTag::new(
            "unsubscribe_url",
            "Unsubscribe Link",
            "https://example.com/unsubscribe",
            Links,
            "Link to unsubscribe from emails",
        ),
        MergeTag::new(
            "view_online_url",
            "View Online Link",
            "https://example.com/view",
            Links,
            "Link to view email in browser",
        ),
        MergeTag::new(
            "preferences_url",
            "Preferences Link",
            "https://example.com/preferences",
            Links,
            "Link to email preferences",
        ),
        MergeTag::new(
            "current_date",
            "Current Date",
            today.format("%B %d, %Y").to_string(),
            System,
            "Current date",
        ),
        MergeTag::new("current_year", "Current Year", today.year().to_string(), System, "Current year"),
    ]
}

/// Where a text-bearing field sits on its content block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFieldKind {
    Text,
    ButtonText,
    LinkHref,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField<'a> {
    pub content_id: &'a str,
    pub kind: TextFieldKind,
    pub value: &'a str,
}

struct TextFieldCollector<'a> {
    fields: Vec<TextField<'a>>,
}

impl<'a> TextFieldCollector<'a> {
    fn push(&mut self, content: &'a Content, kind: TextFieldKind, value: &'a str) {
        self.fields.push(TextField {
            content_id: &content.id,
            kind,
            value,
        });
    }

    fn collect(&mut self, content: &'a Content) {
        match &content.kind {
            ContentKind::Text(v) | ContentKind::Heading(v) => {
                if let Some(text) = &v.text {
                    self.push(content, TextFieldKind::Text, text);
                }
            }
            ContentKind::Button(v) => {
                if let Some(text) = &v.text {
                    self.push(content, TextFieldKind::ButtonText, text);
                }
                if let Some(link) = &v.link {
                    self.push(content, TextFieldKind::LinkHref, link.href());
                }
            }
            ContentKind::Image(v) => {
                if let Some(link) = &v.link {
                    self.push(content, TextFieldKind::LinkHref, link.href());
                }
            }
            _ => {}
        }
    }
}

// Visitor only hands out short-lived borrows, so walk by hand to keep 'a.
fn collect_columns<'a>(collector: &mut TextFieldCollector<'a>, columns: &'a [mailframe_model::Column]) {
    for column in columns {
        for content in &column.contents {
            collector.collect(content);
            if let Some(nested) = content.columns() {
                collect_columns(collector, nested);
            }
        }
        collect_columns(collector, &column.sub_columns);
    }
}

/// Every text-bearing field of the design, at any depth, in document order
pub fn text_fields(design: &Design) -> Vec<TextField<'_>> {
    let mut collector = TextFieldCollector { fields: Vec::new() };
    for row in design.rows() {
        collect_columns(&mut collector, &row.columns);
    }
    collector.fields
}

/// Distinct `{{…}}` occurrences in `text`, in first-seen order
pub fn find_tags(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    TAG_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// Whether `tag` is exactly one well-formed placeholder
pub fn is_valid_tag(tag: &str) -> bool {
    VALID_TAG.is_match(tag)
}

/// The subset of `available` whose placeholder appears anywhere in the design
pub fn used_tags<'t>(design: &Design, available: &'t [MergeTag]) -> Vec<&'t MergeTag> {
    let used: HashSet<String> = text_fields(design)
        .iter()
        .flat_map(|field| find_tags(field.value))
        .collect();

    available.iter().filter(|tag| used.contains(&tag.value)).collect()
}

/// Counts placeholders per content block, including malformed ones
#[derive(Debug, Default)]
pub struct TagCounter {
    pub total: usize,
    pub malformed: Vec<String>,
}

impl Visitor for TagCounter {
    fn visit_content(&mut self, content: &Content) {
        let mut fields = TextFieldCollector { fields: Vec::new() };
        fields.collect(content);
        for field in fields.fields {
            for tag in find_tags(field.value) {
                self.total += 1;
                if !is_valid_tag(&tag) {
                    self.malformed.push(tag);
                }
            }
        }
        walk_content(self, content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailframe_model::{ColumnPath, ContentType, LinkAction};

    fn design_with_tags() -> Design {
        let mut design = Design::seeded();
        let column = &mut design.rows_mut()[0].columns[0];
        column
            .contents
            .push(Content::text("<p>Hi {{first_name}}, from {{company}} {{first_name}}</p>"));

        let mut button = Content::create(ContentType::Button);
        if let ContentKind::Button(values) = &mut button.kind {
            values.link = Some(LinkAction::web("{{unsubscribe_url}}"));
        }
        let mut layout = Content::layout(1);
        layout.columns_mut().unwrap()[0].contents.push(button);
        column.contents.push(layout);
        design
    }

    #[test]
    fn test_find_tags_is_distinct_and_ordered() {
        let tags = find_tags("{{b}} {{a}} {{b}} {{ bad tag }}");
        assert_eq!(tags, vec!["{{b}}", "{{a}}", "{{ bad tag }}"]);
        assert!(find_tags("no tags here").is_empty());
    }

    #[test]
    fn test_tag_syntax() {
        assert!(is_valid_tag("{{first_name}}"));
        assert!(!is_valid_tag("{{first name}}"));
        assert!(!is_valid_tag("{{first_name}} "));
        assert!(!is_valid_tag("first_name"));
    }

    #[test]
    fn test_text_fields_reach_nested_buttons() {
        let design = design_with_tags();
        let fields = text_fields(&design);

        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1].kind, TextFieldKind::ButtonText);
        assert_eq!(fields[2].kind, TextFieldKind::LinkHref);
        assert_eq!(fields[2].value, "{{unsubscribe_url}}");
        let nested = design
            .content(&ColumnPath::top(0, 0).child(1, 0).content(0))
            .unwrap();
        assert_eq!(fields[2].content_id, nested.id);
    }

    #[test]
    fn test_used_tags() {
        let design = design_with_tags();
        let catalogue = default_tags();

        let used: Vec<&str> = used_tags(&design, &catalogue)
            .iter()
            .map(|tag| tag.key.as_str())
            .collect();

        assert_eq!(used, vec!["first_name", "company", "unsubscribe_url"]);
    }

    #[test]
    fn test_default_catalogue() {
        let tags = default_tags();

        assert_eq!(tags.len(), 11);
        assert!(tags.iter().all(|tag| is_valid_tag(&tag.value)));
        assert_eq!(tags[0].value, "{{first_name}}");
        assert_eq!(tags[10].category, MergeTagCategory::System);
    }

    #[test]
    fn test_tag_counter_flags_malformed() {
        let mut design = Design::seeded();
        design.rows_mut()[0].columns[0]
            .contents
            .push(Content::text("{{ok}} and {{not ok}}"));

        let mut counter = TagCounter::default();
        counter.visit_design(&design);

        assert_eq!(counter.total, 2);
        assert_eq!(counter.malformed, vec!["{{not ok}}"]);
    }

    #[test]
    fn test_category_defaults_to_custom() {
        let tag: MergeTag =
            serde_json::from_str(r#"{ "key": "coupon", "name": "Coupon", "value": "{{coupon}}" }"#).unwrap();

        assert_eq!(tag.category, MergeTagCategory::Custom);
        assert_eq!(MergeTagCategory::default(), MergeTagCategory::Custom);
    }
}
