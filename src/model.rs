use crate::{
    error::{ReduceError, ReduceResult},
    foundation::depth,
};

/// One node of a Figma document tree as delivered by the REST API.
///
/// Every field is optional: the API omits properties that do not apply to a node type, and
/// saved fixtures are often hand-trimmed. Unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawNode {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    pub absolute_bounding_box: Option<BoundingBox>,

    pub layout_mode: Option<String>,
    pub primary_axis_align_items: Option<String>,
    pub counter_axis_align_items: Option<String>,
    pub item_spacing: Option<f64>,
    pub padding_left: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_bottom: Option<f64>,

    pub fills: Option<Vec<Paint>>,
    pub strokes: Option<Vec<Paint>>,
    pub stroke_weight: Option<f64>,
    pub corner_radius: Option<f64>,

    pub characters: Option<String>,
    pub style: Option<TypeStyle>,

    // A `null` entry is tolerated and dropped by the reducer.
    pub children: Option<Vec<Option<RawNode>>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoundingBox {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// A fill or stroke paint. Fields the reducer does not look at are kept in `extra` so the
/// verbose profile can echo the paint back unchanged.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Paint {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub paint_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Paint {
    pub const SOLID: &'static str = "SOLID";

    /// Visible unless explicitly hidden, and a flat color.
    pub fn is_visible_solid(&self) -> bool {
        self.visible != Some(false) && self.paint_type.as_deref() == Some(Self::SOLID)
    }
}

/// RGBA color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: None }
    }

    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: Some(a),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypeStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RawNode {
    /// Decodes one entry of a `/v1/files/:key/nodes` response.
    ///
    /// Entries wrap the tree under `document`; when that key is absent or null the entry is
    /// taken to be the node itself, which is also what hand-saved fixtures look like.
    pub fn from_entry(entry: &serde_json::Value) -> ReduceResult<Self> {
        let node = match entry.get("document") {
            Some(doc) if !doc.is_null() => doc,
            _ => entry,
        };
        depth::from_value(node).map_err(|e| ReduceError::serde(format!("decode node: {e}")))
    }

    /// Parses and decodes an entry. Nesting depth is not limited.
    pub fn from_entry_str(s: &str) -> ReduceResult<Self> {
        let entry: serde_json::Value = depth::parse_json(s.as_bytes())
            .map_err(|e| ReduceError::serde(format!("parse json: {e}")))?;
        Self::from_entry(&entry)
    }
}
