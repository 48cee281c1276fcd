use crate::{compile_to_html, ColumnWidthPolicy, CompileError, CompileOptions};
use mailframe_model::{
    BackgroundImage, ButtonValues, Column, Content, ContentKind, ContentType, Design,
    DividerOrientation, DividerValues, ImageSource, ImageValues, LinkAction, Row, UnknownValues,
};

fn design_with(contents: Vec<Content>) -> Design {
    let mut design = Design::seeded();
    design.rows_mut()[0].columns[0].contents = contents;
    design
}

fn render(design: &Design) -> String {
    compile_to_html(design, &CompileOptions::default()).expect("Failed to compile")
}

#[test]
fn test_compile_empty_design() {
    let html = render(&Design::new());

    assert!(html.starts_with("<!DOCTYPE html>\n"));
    assert!(html.contains("xmlns:v=\"urn:schemas-microsoft-com:vml\""));
    assert!(html.contains("<o:PixelsPerInch>96</o:PixelsPerInch>"));
    assert!(html.contains("@media only screen and (max-width: 600px)"));
    assert!(html.contains("width=\"600px\" style=\"max-width: 600px;\""));
    assert!(!html.contains("class=\"row"));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn test_compile_single_text_row() {
    let html = render(&design_with(vec![Content::text("<p>Hello <b>world</b></p>")]));

    println!("Generated HTML:\n{}", html);

    assert!(html.contains(
        "<div style=\"font-size: 14px; color: #000000; text-align: left; line-height: 140%; padding: 10px;\"><p>Hello <b>world</b></p></div>"
    ));
    assert_eq!(html.matches("<tr class=\"row\">").count(), 1);
    assert!(html.contains("<td style=\"padding: 10px;\">"));
    assert!(html.contains("<div style=\"padding: 0px;\">"));
}

#[test]
fn test_compile_body_values() {
    let mut design = Design::new();
    design.body.values.background_color = "#eeeeee".to_string();
    design.body.values.preheader_text = "Big <i>news</i>".to_string();

    let html = render(&design);

    assert!(html.contains(
        "<body style=\"margin: 0; padding: 0; background-color: #eeeeee; font-family: arial,helvetica,sans-serif;\">"
    ));
    assert!(html.contains(
        "<div style=\"display: none; max-height: 0; overflow: hidden;\">Big <i>news</i></div>"
    ));
}

#[test]
fn test_no_preheader_when_empty() {
    let html = render(&Design::seeded());
    assert!(!html.contains("display: none; max-height: 0"));
}

#[test]
fn test_compile_heading() {
    let html = render(&design_with(vec![Content::create(ContentType::Heading)]));

    assert!(html.contains(
        "<h2 style=\"font-size: 24px; color: #000000; text-align: left; line-height: 140%; padding: 10px; margin: 0;\">Your Heading</h2>"
    ));
}

#[test]
fn test_multi_column_row_uses_equal_widths() {
    let mut design = Design::new();
    design.rows_mut().push(Row::with_columns(3, Some(&[20, 30, 50][..])));

    let html = render(&design);

    assert_eq!(html.matches("<td width=\"33%\" valign=\"top\">").count(), 3);
}

#[test]
fn test_multi_column_row_with_stored_widths() {
    let mut design = Design::new();
    let mut row = Row::with_columns(3, Some(&[20, 30, 50][..]));
    row.cells.pop();
    design.rows_mut().push(row);

    let options = CompileOptions {
        column_widths: ColumnWidthPolicy::Stored,
        ..CompileOptions::default()
    };
    let html = compile_to_html(&design, &options).unwrap();

    assert!(html.contains("<td width=\"20%\" valign=\"top\">"));
    assert!(html.contains("<td width=\"30%\" valign=\"top\">"));
    assert!(html.contains("<td width=\"33%\" valign=\"top\">"));
}

#[test]
fn test_single_column_has_no_inner_table() {
    let html = render(&Design::seeded());

    // Two centering tables only
    assert_eq!(html.matches("<table").count(), 2);
    assert!(!html.contains("valign=\"top\""));
}

#[test]
fn test_nested_layouts_render_two_tables_deep() {
    let inner = Content::layout_of(vec![
        Column::with_contents(vec![Content::text("inner-a")]),
        Column::with_contents(vec![Content::text("inner-b")]),
    ]);
    let outer = Content::layout_of(vec![
        Column::with_contents(vec![Content::text("outer-a"), inner]),
        Column::with_contents(vec![Content::text("outer-b")]),
    ]);

    let html = render(&design_with(vec![outer]));

    assert_eq!(html.matches("<table").count(), 4);
    assert_eq!(html.matches("<td width=\"50%\" valign=\"top\">").count(), 4);
    for text in ["inner-a", "inner-b", "outer-a", "outer-b"] {
        assert_eq!(html.matches(text).count(), 1, "{} rendered once", text);
    }

    let outer_pos = html.find("outer-a").unwrap();
    let inner_pos = html.find("inner-a").unwrap();
    assert!(outer_pos < inner_pos);
}

#[test]
fn test_empty_layout_renders_nothing() {
    let html = render(&design_with(vec![Content::layout(0)]));
    assert_eq!(html.matches("<table").count(), 2);
}

#[test]
fn test_compile_image_with_link() {
    let image = Content::new(ContentKind::Image(ImageValues {
        src: Some(ImageSource {
            url: "https://cdn.example.com/hero.png".to_string(),
            ..ImageSource::default()
        }),
        alt_text: "Say \"hi\"".to_string(),
        link: Some(LinkAction::web("https://example.com/?a=1&b=2")),
        ..ImageValues::default()
    }));

    let html = render(&design_with(vec![image]));

    assert!(html.contains(
        "<a href=\"https://example.com/?a=1&amp;b=2\" target=\"_blank\"><img src=\"https://cdn.example.com/hero.png\" alt=\"Say &quot;hi&quot;\" style=\"max-width: 100%; height: auto;\" /></a>"
    ));
}

#[test]
fn test_image_without_source_renders_nothing() {
    let image = Content::new(ContentKind::Image(ImageValues::default()));
    let html = render(&design_with(vec![image]));
    assert!(!html.contains("<img"));
}

#[test]
fn test_compile_button_defaults() {
    let html = render(&design_with(vec![Content::create(ContentType::Button)]));

    assert!(html.contains("<a href=\"#\" target=\"_blank\""));
    assert!(html.contains(
        "display: inline-block; padding: 12px 24px; background-color: #3AAEE0; color: #FFFFFF; text-decoration: none; border-radius: 4px; font-size: 14px;"
    ));
    assert!(html.contains(">Click Here</a></div>"));
}

#[test]
fn test_button_without_link_or_colors() {
    let button = Content::new(ContentKind::Button(ButtonValues {
        text: Some("Go".to_string()),
        ..ButtonValues::default()
    }));

    let html = render(&design_with(vec![button]));

    assert!(html.contains("<a href=\"#\" target=\"_blank\""));
    assert!(html.contains("background-color: #3AAEE0;"));
}

#[test]
fn test_button_with_empty_href_links_to_hash() {
    let button = Content::new(ContentKind::Button(ButtonValues {
        text: Some("Go".to_string()),
        link: Some(LinkAction::web("")),
        ..ButtonValues::default()
    }));

    let html = render(&design_with(vec![button]));

    assert!(html.contains("<a href=\"#\" target=\"_blank\""));
    assert!(!html.contains("href=\"\""));
}

#[test]
fn test_compile_dividers() {
    let vertical = Content::new(ContentKind::Divider(DividerValues {
        orientation: DividerOrientation::Vertical,
        ..DividerValues::default()
    }));

    let html = render(&design_with(vec![
        Content::create(ContentType::Divider),
        vertical,
        Content::create(ContentType::ColumnDivider),
    ]));

    assert!(html.contains("<hr style=\"border: 0; border-top: 1px solid #CCCCCC; margin: 0;\" />"));
    assert!(html.contains("border-left: 1px solid #000000; height: 100px;"));
    assert!(html.contains("border-left: 2px solid #CCCCCC; height: 150px;"));
    assert_eq!(html.matches("text-align: center;").count(), 2);
}

#[test]
fn test_unknown_orientation_draws_horizontal_rule() {
    let divider = Content::new(ContentKind::Divider(DividerValues {
        orientation: DividerOrientation::Other("diagonal".to_string()),
        ..DividerValues::default()
    }));

    let html = render(&design_with(vec![divider]));

    assert!(html.contains("<hr "));
    assert!(!html.contains("border-left"));
}

#[test]
fn test_unknown_content_renders_empty() {
    let unknown = Content::new(ContentKind::Unknown(UnknownValues {
        type_name: "video".to_string(),
        values: serde_json::json!({ "url": "https://example.com/v.mp4" }),
        columns: None,
    }));

    let with_unknown = render(&design_with(vec![unknown]));
    let without = render(&design_with(vec![]));

    assert_eq!(with_unknown, without);
}

#[test]
fn test_row_values() {
    let mut design = Design::seeded();
    let values = &mut design.rows_mut()[0].values;
    values.background_color = "#ffcc00".to_string();
    values.hide_mobile = true;
    values.background_image = Some(BackgroundImage {
        url: "https://cdn.example.com/bg.jpg".to_string(),
        ..BackgroundImage::default()
    });

    let html = render(&design);

    assert!(html.contains("<tr class=\"row mobile-hide\">"));
    assert!(html.contains(
        "<td style=\"padding: 10px; background-color: #ffcc00; background-image: url('https://cdn.example.com/bg.jpg'); background-repeat: no-repeat; background-size: cover; background-position: center;\">"
    ));
}

#[test]
fn test_column_top_border() {
    let mut design = Design::seeded();
    let values = &mut design.rows_mut()[0].columns[0].values;
    values.background_color = "#ffffff".to_string();
    values.border.border_top_width = "3px".to_string();

    let html = render(&design);

    assert!(html.contains(
        "<div style=\"padding: 0px; background-color: #ffffff; border-top: 3px solid #000000;\">"
    ));
}

#[test]
fn test_compact_output_has_no_newlines() {
    let options = CompileOptions {
        pretty: false,
        ..CompileOptions::default()
    };

    let html = compile_to_html(&Design::seeded(), &options).unwrap();

    assert!(!html.contains('\n'));
    assert!(html.starts_with("<!DOCTYPE html><html"));
}

#[test]
fn test_custom_indent() {
    let options = CompileOptions {
        indent: "\t".to_string(),
        ..CompileOptions::default()
    };

    let html = compile_to_html(&Design::seeded(), &options).unwrap();

    assert!(html.contains("\n\t<head>\n"));
}

#[test]
fn test_rejects_non_whitespace_indent() {
    let options = CompileOptions {
        indent: "--".to_string(),
        ..CompileOptions::default()
    };

    let result = compile_to_html(&Design::seeded(), &options);

    assert!(matches!(result, Err(CompileError::InvalidOptions(_))));
}

#[test]
fn test_options_from_json() {
    let options: CompileOptions =
        serde_json::from_str(r#"{ "columnWidths": "stored", "title": "Welcome" }"#).unwrap();

    assert_eq!(options.column_widths, ColumnWidthPolicy::Stored);
    assert!(options.pretty);

    let html = compile_to_html(&Design::new(), &options).unwrap();
    assert!(html.contains("<title>Welcome</title>"));
}

#[test]
fn test_rendering_is_deterministic() {
    let design = design_with(vec![
        Content::create(ContentType::Text),
        Content::create(ContentType::Image),
        Content::layout(3),
    ]);

    assert_eq!(render(&design), render(&design));
}
