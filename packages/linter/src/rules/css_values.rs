use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use mailframe_model::{Column, ColumnPath, Container, Content, ContentKind, ContentPath, Design, Row};
use regex::Regex;
use std::sync::LazyLock;

/// One to four space-separated lengths, as in `padding`
static LENGTHS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0|\d+(\.\d+)?(px|%|em|rem|pt))( (0|\d+(\.\d+)?(px|%|em|rem|pt))){0,3}$")
        .expect("valid length pattern")
});

static COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})|rgba?\([0-9., %]+\)|[a-zA-Z]+)$")
        .expect("valid color pattern")
});

/// Lint rule for style values email clients will drop
pub struct CssValuesRule;

impl LintRule for CssValuesRule {
    fn name(&self) -> &'static str {
        "css-values"
    }

    fn description(&self) -> &'static str {
        "Lengths and colors must be plain CSS values"
    }

    fn check_design(&self, design: &Design) -> Vec<Diagnostic> {
        let values = &design.body.values;
        let mut diagnostics = Vec::new();
        check_length(&mut diagnostics, "body", "contentWidth", &values.content_width);
        check_color(&mut diagnostics, "body", "backgroundColor", &values.background_color);
        diagnostics
    }

    fn check_row(&self, index: usize, row: &Row) -> Vec<Diagnostic> {
        let location = format!("row {}", index);
        let values = &row.values;
        let mut diagnostics = Vec::new();
        check_length(&mut diagnostics, &location, "padding", &values.padding);
        check_color(&mut diagnostics, &location, "backgroundColor", &values.background_color);
        check_color(
            &mut diagnostics,
            &location,
            "columnsBackgroundColor",
            &values.columns_background_color,
        );
        diagnostics
    }

    fn check_column(&self, path: &ColumnPath, column: &Column) -> Vec<Diagnostic> {
        let location = path.to_string();
        let values = &column.values;
        let mut diagnostics = Vec::new();
        check_length(&mut diagnostics, &location, "padding", &values.padding);
        check_color(&mut diagnostics, &location, "backgroundColor", &values.background_color);
        if values.border.is_visible() {
            check_length(&mut diagnostics, &location, "borderTopWidth", &values.border.border_top_width);
            check_color(&mut diagnostics, &location, "borderTopColor", &values.border.border_top_color);
        }
        diagnostics
    }

    fn check_content(&self, path: &ContentPath, content: &Content) -> Vec<Diagnostic> {
        let location = path.to_string();
        let mut diagnostics = Vec::new();

        if let Some(container) = content.container() {
            check_container(&mut diagnostics, &location, container);
        }

        match &content.kind {
            ContentKind::Text(values) | ContentKind::Heading(values) => {
                check_length(&mut diagnostics, &location, "fontSize", &values.font_size);
                check_color(&mut diagnostics, &location, "color", &values.color);
            }
            ContentKind::Button(values) => {
                check_length(&mut diagnostics, &location, "fontSize", &values.font_size);
                if let Some(colors) = &values.colors {
                    check_color(&mut diagnostics, &location, "buttonColors.color", &colors.color);
                    check_color(
                        &mut diagnostics,
                        &location,
                        "buttonColors.backgroundColor",
                        &colors.background_color,
                    );
                }
            }
            ContentKind::Divider(values) => {
                check_length(&mut diagnostics, &location, "thickness", &values.thickness);
                check_color(&mut diagnostics, &location, "color", &values.color);
            }
            ContentKind::ColumnDivider(values) => {
                check_length(&mut diagnostics, &location, "thickness", &values.thickness);
                check_length(&mut diagnostics, &location, "height", &values.height);
                check_color(&mut diagnostics, &location, "color", &values.color);
            }
            _ => {}
        }

        diagnostics
    }
}

fn check_container(diagnostics: &mut Vec<Diagnostic>, location: &str, container: &Container) {
    check_length(diagnostics, location, "containerPadding", &container.padding);
}

fn check_length(diagnostics: &mut Vec<Diagnostic>, location: &str, field: &str, value: &str) {
    if !value.is_empty() && !LENGTHS.is_match(value.trim()) {
        diagnostics.push(
            Diagnostic::warning(
                "css-values",
                format!("'{}' is not a valid length for '{}'", value, field),
                location,
            )
            .with_suggestion("Use px, %, em, rem or pt, e.g. '10px' or '10px 20px'"),
        );
    }
}

fn check_color(diagnostics: &mut Vec<Diagnostic>, location: &str, field: &str, value: &str) {
    if !value.is_empty() && !COLOR.is_match(value.trim()) {
        diagnostics.push(
            Diagnostic::warning(
                "css-values",
                format!("'{}' is not a valid color for '{}'", value, field),
                location,
            )
            .with_suggestion("Use a hex color such as '#3AAEE0'"),
        );
    }
}
