use mailframe_model::{
    ButtonValues, Column, ColumnDividerValues, Container, Content, ContentKind, Design,
    DividerOrientation, DividerValues, ImageValues, Row, TextValues,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{instrument, warn};

/// Errors that can occur during HTML compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Compilation error: {0}")]
    Generic(String),
}

impl From<String> for CompileError {
    fn from(s: String) -> Self {
        CompileError::Generic(s)
    }
}

impl From<&str> for CompileError {
    fn from(s: &str) -> Self {
        CompileError::Generic(s.to_string())
    }
}

/// Where multi-column rows take their column widths from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnWidthPolicy {
    /// `100 / count` per column, ignoring stored widths
    #[default]
    Equal,
    /// The row's `cells`, with the equal split for missing entries
    Stored,
}

/// Options for HTML compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Document `<title>`
    pub title: String,
    pub column_widths: ColumnWidthPolicy,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            title: String::new(),
            column_widths: ColumnWidthPolicy::Equal,
        }
    }
}

const RESET_STYLES: &[&str] = &[
    "body { margin: 0; padding: 0; }",
    "table { border-collapse: collapse; }",
    "img { border: 0; display: block; outline: none; text-decoration: none; }",
    "p { margin: 0; padding: 0; }",
    "@media only screen and (max-width: 600px) {",
    "  .mobile-hide { display: none !important; }",
    "  .mobile-center { text-align: center !important; }",
    "  .mobile-full-width { width: 100% !important; max-width: 100% !important; }",
    "}",
];

const LAYOUT_TABLE: &str = "<table border=\"0\" cellpadding=\"0\" cellspacing=\"0\" width=\"100%\">";

/// Height of the rule drawn by a vertical divider
const VERTICAL_DIVIDER_HEIGHT: &str = "100px";

struct Context<'a> {
    options: &'a CompileOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    /// Emit an opening line and indent what follows
    fn open(&mut self, text: &str) {
        self.add_line(text);
        self.indent();
    }

    /// Dedent and emit a closing line
    fn close(&mut self, text: &str) {
        self.dedent();
        self.add_line(text);
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile an email design to a standalone, table-based HTML document
#[instrument(skip_all, fields(rows = design.rows().len()))]
pub fn compile_to_html(design: &Design, options: &CompileOptions) -> Result<String, CompileError> {
    if !options.indent.chars().all(char::is_whitespace) {
        return Err(CompileError::InvalidOptions(format!(
            "indent must be whitespace, got {:?}",
            options.indent
        )));
    }

    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.open("<html xmlns=\"http://www.w3.org/1999/xhtml\" xmlns:v=\"urn:schemas-microsoft-com:vml\" xmlns:o=\"urn:schemas-microsoft-com:office:office\">");

    compile_head(&mut ctx);
    compile_body(design, &mut ctx);

    ctx.close("</html>");

    Ok(ctx.get_output())
}

fn compile_head(ctx: &mut Context) {
    ctx.open("<head>");

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta http-equiv=\"X-UA-Compatible\" content=\"IE=edge\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    let title = format!("<title>{}</title>", escape_html(&ctx.options.title));
    ctx.add_line(&title);

    ctx.open("<style type=\"text/css\">");
    for rule in RESET_STYLES {
        ctx.add_line(rule);
    }
    ctx.close("</style>");

    // Outlook renders at 96 DPI only when told to
    ctx.add_line("<!--[if mso]>");
    ctx.open("<noscript>");
    ctx.open("<xml>");
    ctx.open("<o:OfficeDocumentSettings>");
    ctx.add_line("<o:PixelsPerInch>96</o:PixelsPerInch>");
    ctx.close("</o:OfficeDocumentSettings>");
    ctx.close("</xml>");
    ctx.close("</noscript>");
    ctx.add_line("<![endif]-->");

    ctx.close("</head>");
}

fn compile_body(design: &Design, ctx: &mut Context) {
    let values = &design.body.values;

    ctx.open(&format!(
        "<body style=\"{}\">",
        style(&[
            ("margin", "0"),
            ("padding", "0"),
            ("background-color", values.background_color.as_str()),
            ("font-family", values.font_family.value.as_str()),
        ])
    ));

    if !values.preheader_text.is_empty() {
        ctx.add_line(&format!(
            "<div style=\"display: none; max-height: 0; overflow: hidden;\">{}</div>",
            values.preheader_text
        ));
    }

    ctx.open("<table border=\"0\" cellpadding=\"0\" cellspacing=\"0\" width=\"100%\">");
    ctx.open("<tr>");
    ctx.open("<td align=\"center\" style=\"padding: 0;\">");
    ctx.open(&format!(
        "<table border=\"0\" cellpadding=\"0\" cellspacing=\"0\" width=\"{0}\" style=\"max-width: {0};\">",
        escape_html(&values.content_width)
    ));

    for row in design.rows() {
        compile_row(row, ctx);
    }

    ctx.close("</table>");
    ctx.close("</td>");
    ctx.close("</tr>");
    ctx.close("</table>");

    ctx.close("</body>");
}

fn compile_row(row: &Row, ctx: &mut Context) {
    let values = &row.values;

    let class = if values.hide_mobile { "row mobile-hide" } else { "row" };
    ctx.open(&format!("<tr class=\"{}\">", class));

    let mut declarations = vec![
        ("padding", values.padding.clone()),
        ("background-color", values.background_color.clone()),
    ];
    if let Some(image) = values.background_image.as_ref().filter(|i| !i.url.is_empty()) {
        declarations.push(("background-image", format!("url('{}')", escape_html(&image.url))));
        declarations.push(("background-repeat", image.repeat.clone()));
        declarations.push(("background-size", image.size.clone()));
        declarations.push(("background-position", image.position.clone()));
    }
    let declarations: Vec<(&str, &str)> =
        declarations.iter().map(|(k, v)| (*k, v.as_str())).collect();
    ctx.open(&format!("<td style=\"{}\">", style(&declarations)));

    match row.columns.len() {
        0 => {}
        1 => compile_column(&row.columns[0], ctx),
        count => {
            let table_style = style(&[("background-color", values.columns_background_color.as_str())]);
            if table_style.is_empty() {
                ctx.open(LAYOUT_TABLE);
            } else {
                ctx.open(&format!(
                    "<table border=\"0\" cellpadding=\"0\" cellspacing=\"0\" width=\"100%\" style=\"{}\">",
                    table_style
                ));
            }
            ctx.open("<tr>");

            for (index, column) in row.columns.iter().enumerate() {
                let width = column_width(row, index, count, ctx.options.column_widths);
                ctx.open(&format!("<td width=\"{}%\" valign=\"top\">", width));
                compile_column(column, ctx);
                ctx.close("</td>");
            }

            ctx.close("</tr>");
            ctx.close("</table>");
        }
    }

    ctx.close("</td>");
    ctx.close("</tr>");
}

fn column_width(row: &Row, index: usize, count: usize, policy: ColumnWidthPolicy) -> u32 {
    match policy {
        ColumnWidthPolicy::Equal => equal_percent(count),
        ColumnWidthPolicy::Stored => row
            .cells
            .get(index)
            .copied()
            .unwrap_or_else(|| equal_percent(count)),
    }
}

/// `100 / count` rounded to the nearest whole percent
fn equal_percent(count: usize) -> u32 {
    (100.0 / count.max(1) as f64).round() as u32
}

fn compile_column(column: &Column, ctx: &mut Context) {
    let values = &column.values;
    let border = &values.border;
    let border_top = if border.is_visible() {
        format!(
            "{} {} {}",
            border.border_top_width, border.border_top_style, border.border_top_color
        )
    } else {
        String::new()
    };

    ctx.open(&format!(
        "<div style=\"{}\">",
        style(&[
            ("padding", values.padding.as_str()),
            ("background-color", values.background_color.as_str()),
            ("border-top", border_top.as_str()),
        ])
    ));

    for content in &column.contents {
        compile_content(content, ctx);
    }

    ctx.close("</div>");
}

fn compile_content(content: &Content, ctx: &mut Context) {
    match &content.kind {
        ContentKind::Text(values) => ctx.add_line(&compile_text(values)),
        ContentKind::Heading(values) => ctx.add_line(&compile_heading(values)),
        ContentKind::Image(values) => {
            if let Some(html) = compile_image(values) {
                ctx.add_line(&html);
            }
        }
        ContentKind::Button(values) => ctx.add_line(&compile_button(values)),
        ContentKind::Divider(values) => ctx.add_line(&compile_divider(values, &content.id)),
        ContentKind::ColumnDivider(values) => ctx.add_line(&compile_column_divider(values)),
        ContentKind::Layout(layout) => compile_layout(&layout.container, &layout.columns, ctx),
        ContentKind::Unknown(_) => {}
    }
}

fn text_style(values: &TextValues) -> String {
    style(&[
        ("font-size", values.font_size.as_str()),
        ("color", values.color.as_str()),
        ("text-align", values.text_align.as_str()),
        ("line-height", values.line_height.as_str()),
        ("padding", values.container.padding.as_str()),
    ])
}

fn compile_text(values: &TextValues) -> String {
    format!(
        "<div style=\"{}\">{}</div>",
        text_style(values),
        values.text.as_deref().unwrap_or_default()
    )
}

fn compile_heading(values: &TextValues) -> String {
    format!(
        "<h2 style=\"{} margin: 0;\">{}</h2>",
        text_style(values),
        values.text.as_deref().unwrap_or_default()
    )
}

fn compile_image(values: &ImageValues) -> Option<String> {
    let src = values.src.as_ref()?;

    let mut img = format!(
        "<img src=\"{}\" alt=\"{}\" style=\"{}\" />",
        escape_html(&src.url),
        escape_html(&values.alt_text),
        style(&[("max-width", src.max_width.as_str()), ("height", "auto")])
    );

    if let Some(link) = values.link.as_ref().filter(|l| !l.href().is_empty()) {
        img = format!(
            "<a href=\"{}\" target=\"{}\">{}</a>",
            escape_html(link.href()),
            escape_html(link_target(link.target())),
            img
        );
    }

    Some(format!(
        "<div style=\"{}\">{}</div>",
        style(&[
            ("padding", values.container.padding.as_str()),
            ("text-align", values.text_align.as_str()),
        ]),
        img
    ))
}

fn compile_button(values: &ButtonValues) -> String {
    let colors = values.colors.clone().unwrap_or_default();
    let (href, target) = match &values.link {
        Some(link) if !link.href().is_empty() => (link.href(), link_target(link.target())),
        Some(link) => ("#", link_target(link.target())),
        None => ("#", "_blank"),
    };

    let button_style = style(&[
        ("display", "inline-block"),
        ("padding", "12px 24px"),
        ("background-color", colors.background_color.as_str()),
        ("color", colors.color.as_str()),
        ("text-decoration", "none"),
        ("border-radius", "4px"),
        ("font-size", values.font_size.as_str()),
    ]);

    format!(
        "<div style=\"{}\"><a href=\"{}\" target=\"{}\" style=\"{}\">{}</a></div>",
        style(&[
            ("padding", values.container.padding.as_str()),
            ("text-align", values.text_align.as_str()),
        ]),
        escape_html(href),
        escape_html(target),
        button_style,
        values.text.as_deref().unwrap_or_default()
    )
}

fn link_target(target: &str) -> &str {
    if target.is_empty() {
        "_blank"
    } else {
        target
    }
}

fn compile_divider(values: &DividerValues, id: &str) -> String {
    match &values.orientation {
        DividerOrientation::Vertical => vertical_rule(
            &values.container,
            &values.thickness,
            &values.color,
            VERTICAL_DIVIDER_HEIGHT,
        ),
        DividerOrientation::Horizontal => horizontal_rule(values),
        DividerOrientation::Other(orientation) => {
            warn!(content = id, orientation = %orientation, "unknown divider orientation, drawing horizontal");
            horizontal_rule(values)
        }
    }
}

fn horizontal_rule(values: &DividerValues) -> String {
    format!(
        "<div style=\"{}\"><hr style=\"border: 0; border-top: {} solid {}; margin: 0;\" /></div>",
        style(&[("padding", values.container.padding.as_str())]),
        values.thickness,
        values.color
    )
}

fn compile_column_divider(values: &ColumnDividerValues) -> String {
    vertical_rule(&values.container, &values.thickness, &values.color, &values.height)
}

fn vertical_rule(container: &Container, thickness: &str, color: &str, height: &str) -> String {
    format!(
        "<div style=\"{}\"><div style=\"border-left: {} solid {}; height: {}; width: 0; display: inline-block;\"></div></div>",
        style(&[("padding", container.padding.as_str()), ("text-align", "center")]),
        thickness,
        color,
        height
    )
}

fn compile_layout(container: &Container, columns: &[Column], ctx: &mut Context) {
    if columns.is_empty() {
        return;
    }

    ctx.open(&format!(
        "<div style=\"{}\">",
        style(&[("padding", container.padding.as_str())])
    ));
    ctx.open(LAYOUT_TABLE);
    ctx.open("<tr>");

    let width = equal_percent(columns.len());
    for column in columns {
        ctx.open(&format!("<td width=\"{}%\" valign=\"top\">", width));
        for content in &column.contents {
            compile_content(content, ctx);
        }
        ctx.close("</td>");
    }

    ctx.close("</tr>");
    ctx.close("</table>");
    ctx.close("</div>");
}

/// Inline style declarations, skipping empty values
fn style(declarations: &[(&str, &str)]) -> String {
    declarations
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(property, value)| format!("{}: {};", property, value))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_style_skips_empty_values() {
        assert_eq!(
            style(&[("padding", "10px"), ("background-color", ""), ("color", "#000")]),
            "padding: 10px; color: #000;"
        );
    }

    #[test]
    fn test_equal_percent_rounds() {
        assert_eq!(equal_percent(1), 100);
        assert_eq!(equal_percent(3), 33);
        assert_eq!(equal_percent(6), 17);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"a&b "c" <d> 'e'"#),
            "a&amp;b &quot;c&quot; &lt;d&gt; &#39;e&#39;"
        );
    }
}
