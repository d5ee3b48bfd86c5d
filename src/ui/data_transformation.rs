use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

use super::component_selection::ComponentSelection;
use super::components::{
    DataField, UiComponent, IMAGE, SET_OF_CARDS, TABLE, VIDEO_PLAYER,
};
use super::data_path;

fn image_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^https?://\S+\.(?:png|jpe?g|gif|svg|webp|bmp)(?:\?\S*)?$")
            .expect("valid image url pattern")
    })
}

fn youtube_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([\w-]{11})")
            .expect("valid youtube pattern")
    })
}

pub fn is_image_url(value: &Value) -> bool {
    value
        .as_str()
        .map(|s| image_url_pattern().is_match(s.trim()))
        .unwrap_or(false)
}

/// YouTube video id of `value`, if it is a YouTube link
pub fn youtube_video_id(value: &Value) -> Option<&str> {
    let text = value.as_str()?;
    youtube_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// The item a single card describes: the first element of a list, else the data itself
fn first_item(data: &Value) -> &Value {
    data.as_array()
        .and_then(|items| items.first())
        .unwrap_or(data)
}

/// Evaluate every selected field. With `item` set, relative paths are read from
/// that item only; paths indexing the top-level list still see the whole data.
fn fill_fields(
    selection: &ComponentSelection,
    data: &Value,
    item: Option<&Value>,
) -> Vec<DataField> {
    selection
        .fields
        .iter()
        .map(|field| {
            let target = match item {
                Some(item) if !data_path::indexes_root(&field.data_path) => item,
                _ => data,
            };
            let values = data_path::select(target, &field.data_path).unwrap_or_else(|e| {
                debug!("Ignoring field {}: {}", field.name, e);
                Vec::new()
            });
            DataField {
                name: field.name.clone(),
                data_path: field.data_path.clone(),
                data: values,
            }
        })
        .collect()
}

/// Every string leaf of `value`, depth first
fn string_leaves<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::String(_) => out.push(value),
        Value::Array(items) => items.iter().for_each(|v| string_leaves(v, out)),
        Value::Object(map) => map.values().for_each(|v| string_leaves(v, out)),
        _ => {}
    }
}

/// First value matching `pred`, preferring the selected fields over the raw data
fn find_value<'a>(
    fields: &'a [DataField],
    data: &'a Value,
    pred: impl Fn(&Value) -> bool,
) -> Option<&'a Value> {
    fields
        .iter()
        .flat_map(|f| f.data.iter())
        .find(|v| pred(*v))
        .or_else(|| {
            let mut leaves = Vec::new();
            string_leaves(data, &mut leaves);
            leaves.into_iter().find(|v| pred(*v))
        })
}

fn title_or_default(selection: &ComponentSelection) -> String {
    if selection.title.trim().is_empty() {
        "Details".to_string()
    } else {
        selection.title.clone()
    }
}

/// Build the concrete component for one input item from the model's selection
pub fn transform(selection: &ComponentSelection, id: &str, data: &Value) -> UiComponent {
    let id = id.to_string();
    let title = title_or_default(selection);
    let single_item = !matches!(
        selection.component.as_str(),
        IMAGE | VIDEO_PLAYER | TABLE | SET_OF_CARDS
    );
    let mut fields = fill_fields(selection, data, single_item.then(|| first_item(data)));

    match selection.component.as_str() {
        IMAGE => {
            let image = find_value(&fields, data, is_image_url)
                .and_then(Value::as_str)
                .map(str::to_string);
            UiComponent::Image { id, title, image }
        }
        VIDEO_PLAYER => {
            let video_id = find_value(&fields, data, |v| youtube_video_id(v).is_some())
                .and_then(youtube_video_id)
                .map(str::to_string);
            UiComponent::VideoPlayer {
                id,
                title,
                video: video_id
                    .as_ref()
                    .map(|v| format!("https://www.youtube.com/embed/{}", v)),
                video_img: video_id
                    .as_ref()
                    .map(|v| format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", v)),
            }
        }
        TABLE => UiComponent::Table { id, title, fields },
        SET_OF_CARDS => UiComponent::SetOfCards { id, title, fields },
        _ => {
            let image_field = fields
                .iter()
                .position(|f| f.data.first().map(is_image_url).unwrap_or(false));
            let image = image_field
                .map(|index| fields.remove(index))
                .and_then(|field| field.data.into_iter().next())
                .and_then(|v| v.as_str().map(str::to_string));
            UiComponent::OneCard {
                id,
                title,
                image,
                fields,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::tools::SearchMovieTool;
    use crate::ui::component_selection::FieldSelection;
    use serde_json::json;

    fn toy_story() -> Value {
        json!([{
            "movie": {
                "title": "Toy Story",
                "year": 1995,
                "actors": ["Tom Hanks", "Tim Allen"],
                "posterUrl": "https://image.tmdb.org/t/p/w440/poster.jpg",
                "trailerUrl": "https://www.youtube.com/watch?v=v-PjgYDrg70"
            }
        }])
    }

    fn selection(component: &str, fields: &[(&str, &str)]) -> ComponentSelection {
        ComponentSelection {
            component: component.to_string(),
            title: "Toy Story".to_string(),
            fields: fields
                .iter()
                .map(|(name, path)| FieldSelection {
                    name: name.to_string(),
                    data_path: path.to_string(),
                })
                .collect(),
            reason: None,
        }
    }

    #[test]
    fn one_card_lifts_poster_into_image() {
        let component = transform(
            &selection(
                "one-card",
                &[("Year", "movie.year"), ("Poster", "movie.posterUrl"), ("Actors", "movie.actors")],
            ),
            "call_1",
            &toy_story(),
        );

        match component {
            UiComponent::OneCard { id, image, fields, .. } => {
                assert_eq!(id, "call_1");
                assert_eq!(image.as_deref(), Some("https://image.tmdb.org/t/p/w440/poster.jpg"));
                let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
                assert_eq!(names, vec!["Year", "Actors"]);
                assert_eq!(fields[1].data, vec![json!("Tom Hanks"), json!("Tim Allen")]);
            }
            other => panic!("unexpected component {:?}", other),
        }
    }

    #[test]
    fn one_card_shows_first_search_result_only() {
        let results = Value::Array(SearchMovieTool::new().unwrap().search("toy story"));
        assert_eq!(results.as_array().unwrap().len(), 2);

        let component = transform(
            &selection("one-card", &[("Title", "movie.title"), ("Year", "movie.year")]),
            "call_1",
            &results,
        );
        match component {
            UiComponent::OneCard { fields, .. } => {
                assert_eq!(fields[0].data, vec![json!("Toy Story")]);
                assert_eq!(fields[1].data, vec![json!(1995)]);
            }
            other => panic!("unexpected component {:?}", other),
        }
    }

    #[test]
    fn one_card_keeps_explicit_list_index() {
        let results = Value::Array(SearchMovieTool::new().unwrap().search("toy story"));
        match transform(&selection("one-card", &[("Title", "$[1].movie.title")]), "c", &results) {
            UiComponent::OneCard { fields, .. } => {
                assert_eq!(fields[0].data, vec![json!("Toy Story 2")])
            }
            other => panic!("unexpected component {:?}", other),
        }
    }

    #[test]
    fn table_keeps_every_row() {
        let results = Value::Array(SearchMovieTool::new().unwrap().search("toy story"));
        match transform(&selection("table", &[("Title", "movie.title")]), "t", &results) {
            UiComponent::Table { fields, .. } => {
                assert_eq!(fields[0].data, vec![json!("Toy Story"), json!("Toy Story 2")])
            }
            other => panic!("unexpected component {:?}", other),
        }
    }

    #[test]
    fn image_falls_back_to_scanning_data() {
        let component = transform(&selection("image", &[]), "call_1", &toy_story());
        assert_eq!(
            component,
            UiComponent::Image {
                id: "call_1".to_string(),
                title: "Toy Story".to_string(),
                image: Some("https://image.tmdb.org/t/p/w440/poster.jpg".to_string()),
            }
        );
    }

    #[test]
    fn video_player_uses_embed_url() {
        let component = transform(
            &selection("video-player", &[("Trailer", "movie.trailerUrl")]),
            "call_1",
            &toy_story(),
        );
        assert_eq!(
            component,
            UiComponent::VideoPlayer {
                id: "call_1".to_string(),
                title: "Toy Story".to_string(),
                video: Some("https://www.youtube.com/embed/v-PjgYDrg70".to_string()),
                video_img: Some("https://img.youtube.com/vi/v-PjgYDrg70/maxresdefault.jpg".to_string()),
            }
        );
    }

    #[test]
    fn bad_data_path_yields_empty_field() {
        let component = transform(&selection("table", &[("Broken", "movie[")]), "t", &toy_story());
        match component {
            UiComponent::Table { fields, .. } => assert!(fields[0].data.is_empty()),
            other => panic!("unexpected component {:?}", other),
        }
    }

    #[test]
    fn empty_title_gets_default() {
        let mut sel = selection("one-card", &[]);
        sel.title = " ".to_string();
        match transform(&sel, "x", &json!({})) {
            UiComponent::OneCard { title, .. } => assert_eq!(title, "Details"),
            other => panic!("unexpected component {:?}", other),
        }
    }

    #[test]
    fn url_detection() {
        assert!(is_image_url(&json!("https://example.com/a.PNG?size=2")));
        assert!(!is_image_url(&json!("https://example.com/page")));
        assert_eq!(youtube_video_id(&json!("https://youtu.be/ORFWdXl_zJ4")), Some("ORFWdXl_zJ4"));
        assert_eq!(youtube_video_id(&json!(42)), None);
    }
}
