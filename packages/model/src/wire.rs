//! JSON shape of a content block.
//!
//! ```json
//! { "id": "…", "type": "button", "values": { "containerPadding": "10px", … } }
//! ```
//!
//! Every recognized kind writes the full shared bag, with fields the kind does
//! not use set to their bag defaults. Layouts add a sibling `columns` array.
//! Unknown kinds write back exactly the `values` (and `columns`) they were read
//! with.

use crate::content::*;
use crate::design::Column;
use crate::id_generator::new_id;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize)]
struct ContentWire<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    type_name: &'a str,
    values: WireValues<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    columns: Option<&'a [Column]>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WireValues<'a> {
    Bag(WireBag<'a>),
    Raw(&'a serde_json::Value),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireBag<'a> {
    container_padding: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    font_size: &'a str,
    text_align: &'a str,
    line_height: &'a str,
    color: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    src: Option<&'a ImageSource>,
    alt_text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    href: Option<&'a LinkAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    button_colors: Option<&'a ButtonColors>,
    hide_desktop: bool,
    hide_mobile: bool,
}

impl<'a> WireBag<'a> {
    fn for_container(container: &'a Container) -> Self {
        Self {
            container_padding: &container.padding,
            text: None,
            font_size: DEFAULT_FONT_SIZE,
            text_align: DEFAULT_TEXT_ALIGN,
            line_height: DEFAULT_LINE_HEIGHT,
            color: DEFAULT_COLOR,
            src: None,
            alt_text: "",
            href: None,
            button_colors: None,
            hide_desktop: container.hide_desktop,
            hide_mobile: container.hide_mobile,
        }
    }
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (values, columns) = match &self.kind {
            ContentKind::Text(v) | ContentKind::Heading(v) => (
                WireValues::Bag(WireBag {
                    text: v.text.as_deref(),
                    font_size: &v.font_size,
                    text_align: &v.text_align,
                    line_height: &v.line_height,
                    color: &v.color,
                    ..WireBag::for_container(&v.container)
                }),
                None,
            ),
            ContentKind::Image(v) => (
                WireValues::Bag(WireBag {
                    src: v.src.as_ref(),
                    alt_text: &v.alt_text,
                    text_align: &v.text_align,
                    href: v.link.as_ref(),
                    ..WireBag::for_container(&v.container)
                }),
                None,
            ),
            ContentKind::Button(v) => (
                WireValues::Bag(WireBag {
                    text: v.text.as_deref(),
                    href: v.link.as_ref(),
                    button_colors: v.colors.as_ref(),
                    font_size: &v.font_size,
                    text_align: &v.text_align,
                    line_height: &v.line_height,
                    color: &v.color,
                    ..WireBag::for_container(&v.container)
                }),
                None,
            ),
            ContentKind::Divider(v) => (
                WireValues::Bag(WireBag {
                    text_align: v.orientation.as_str(),
                    font_size: &v.thickness,
                    color: &v.color,
                    ..WireBag::for_container(&v.container)
                }),
                None,
            ),
            ContentKind::ColumnDivider(v) => (
                WireValues::Bag(WireBag {
                    text_align: "vertical",
                    font_size: &v.thickness,
                    line_height: &v.height,
                    color: &v.color,
                    ..WireBag::for_container(&v.container)
                }),
                None,
            ),
            ContentKind::Layout(v) => (
                WireValues::Bag(WireBag::for_container(&v.container)),
                Some(v.columns.as_slice()),
            ),
            ContentKind::Unknown(v) => (WireValues::Raw(&v.values), v.columns.as_deref()),
        };

        ContentWire {
            id: &self.id,
            type_name: self.type_name(),
            values,
            columns,
        }
        .serialize(serializer)
    }
}

#[derive(Deserialize)]
struct ContentRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    values: serde_json::Value,
    #[serde(default)]
    columns: Option<Vec<Column>>,
}

/// Bag as read: every field optional so each kind can apply its own defaults
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct ValuesBag {
    container_padding: Option<String>,
    text: Option<String>,
    font_size: Option<String>,
    text_align: Option<String>,
    line_height: Option<String>,
    color: Option<String>,
    src: Option<ImageSource>,
    alt_text: Option<String>,
    href: Option<LinkAction>,
    button_colors: Option<ButtonColors>,
    hide_desktop: Option<bool>,
    hide_mobile: Option<bool>,
}

impl ValuesBag {
    fn container(&mut self) -> Container {
        let defaults = Container::default();
        Container {
            padding: self.container_padding.take().unwrap_or(defaults.padding),
            hide_desktop: self.hide_desktop.unwrap_or(defaults.hide_desktop),
            hide_mobile: self.hide_mobile.unwrap_or(defaults.hide_mobile),
        }
    }

    fn text_values(mut self) -> TextValues {
        let defaults = TextValues::default();
        TextValues {
            container: self.container(),
            text: self.text,
            font_size: self.font_size.unwrap_or(defaults.font_size),
            text_align: self.text_align.unwrap_or(defaults.text_align),
            line_height: self.line_height.unwrap_or(defaults.line_height),
            color: self.color.unwrap_or(defaults.color),
        }
    }
}

fn kind_from_bag(content_type: ContentType, mut bag: ValuesBag, columns: Option<Vec<Column>>) -> ContentKind {
    match content_type {
        ContentType::Text => ContentKind::Text(bag.text_values()),
        ContentType::Heading => ContentKind::Heading(bag.text_values()),
        ContentType::Image => {
            let defaults = ImageValues::default();
            ContentKind::Image(ImageValues {
                container: bag.container(),
                src: bag.src,
                alt_text: bag.alt_text.unwrap_or(defaults.alt_text),
                text_align: bag.text_align.unwrap_or(defaults.text_align),
                link: bag.href,
            })
        }
        ContentType::Button => {
            let defaults = ButtonValues::default();
            ContentKind::Button(ButtonValues {
                container: bag.container(),
                text: bag.text,
                link: bag.href,
                colors: bag.button_colors,
                font_size: bag.font_size.unwrap_or(defaults.font_size),
                text_align: bag.text_align.unwrap_or(defaults.text_align),
                line_height: bag.line_height.unwrap_or(defaults.line_height),
                color: bag.color.unwrap_or(defaults.color),
            })
        }
        ContentType::Divider => {
            let defaults = DividerValues::default();
            ContentKind::Divider(DividerValues {
                container: bag.container(),
                orientation: bag
                    .text_align
                    .as_deref()
                    .map(DividerOrientation::parse)
                    .unwrap_or(defaults.orientation),
                thickness: bag.font_size.unwrap_or(defaults.thickness),
                color: bag.color.unwrap_or(defaults.color),
            })
        }
        ContentType::ColumnDivider => {
            let defaults = ColumnDividerValues::default();
            ContentKind::ColumnDivider(ColumnDividerValues {
                container: bag.container(),
                thickness: bag.font_size.unwrap_or(defaults.thickness),
                height: bag.line_height.unwrap_or(defaults.height),
                color: bag.color.unwrap_or(defaults.color),
            })
        }
        ContentType::Layout => ContentKind::Layout(LayoutValues {
            container: bag.container(),
            columns: columns.unwrap_or_default(),
        }),
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = ContentRecord::deserialize(deserializer)?;
        let id = record.id.unwrap_or_else(new_id);

        let kind = match record.type_name.parse::<ContentType>() {
            Ok(content_type) => {
                let bag = if record.values.is_null() {
                    ValuesBag::default()
                } else {
                    serde_json::from_value(record.values).map_err(|e| {
                        D::Error::custom(format!(
                            "invalid values for {} content {}: {}",
                            record.type_name, id, e
                        ))
                    })?
                };
                kind_from_bag(content_type, bag, record.columns)
            }
            Err(_) => ContentKind::Unknown(UnknownValues {
                type_name: record.type_name,
                values: record.values,
                columns: record.columns,
            }),
        };

        Ok(Content { id, kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_writes_full_bag() {
        let content = Content::create(ContentType::Text);
        let value = serde_json::to_value(&content).unwrap();

        assert_eq!(value["type"], "text");
        assert_eq!(value["values"]["containerPadding"], "10px");
        assert_eq!(value["values"]["fontSize"], "14px");
        assert_eq!(value["values"]["lineHeight"], "140%");
        assert_eq!(value["values"]["hideMobile"], false);
        assert!(value.get("columns").is_none());
    }

    #[test]
    fn test_missing_id_gets_fresh_one() {
        let content: Content = serde_json::from_value(json!({
            "type": "heading",
            "values": { "text": "Hi" }
        }))
        .unwrap();

        assert_eq!(content.id.len(), 10);
        let ContentKind::Heading(heading) = content.kind else {
            panic!("Expected heading");
        };
        assert_eq!(heading.text.as_deref(), Some("Hi"));
        assert_eq!(heading.font_size, "14px");
    }

    #[test]
    fn test_missing_type_is_rejected() {
        let result = serde_json::from_value::<Content>(json!({ "id": "abc", "values": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_value_type_is_rejected() {
        let result = serde_json::from_value::<Content>(json!({
            "type": "text",
            "values": { "hideMobile": "yes" }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_divider_thickness_defaults_per_kind() {
        let divider: Content =
            serde_json::from_value(json!({ "type": "divider", "values": {} })).unwrap();
        let rule: Content =
            serde_json::from_value(json!({ "type": "column-divider" })).unwrap();

        let ContentKind::Divider(divider) = divider.kind else {
            panic!("Expected divider");
        };
        assert_eq!(divider.thickness, "1px");
        assert_eq!(divider.orientation, DividerOrientation::Horizontal);

        let ContentKind::ColumnDivider(rule) = rule.kind else {
            panic!("Expected column divider");
        };
        assert_eq!(rule.thickness, "2px");
        assert_eq!(rule.height, "150px");
    }

    #[test]
    fn test_unknown_type_round_trips_verbatim() {
        let input = json!({
            "id": "abc",
            "type": "video",
            "values": { "url": "https://example.com/v.mp4", "autoplay": true }
        });

        let content: Content = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(content.type_name(), "video");
        assert_eq!(serde_json::to_value(&content).unwrap(), input);
    }

    #[test]
    fn test_layout_writes_columns() {
        let content = Content::layout(2);
        let value = serde_json::to_value(&content).unwrap();

        assert_eq!(value["type"], "layout");
        assert_eq!(value["columns"].as_array().unwrap().len(), 2);

        let back: Content = serde_json::from_value(value).unwrap();
        assert_eq!(back, content);
    }
}
