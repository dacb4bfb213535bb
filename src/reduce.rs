use serde_json::{Map, Value};

use crate::{
    color::normalize,
    compact::compact,
    foundation::{
        depth,
        math::{json_number, round_half_up},
    },
    model::{Paint, RawNode},
    verbose,
};

/// Presentation-oriented projection of a [`RawNode`].
///
/// A reduced node is a JSON object in which no key, at any level, maps to `null`, `[]` or `{}`.
/// Array elements are not keys: a child that reduced to `{}` stays in `children`.
/// Keys appear in a fixed order: `id`, `name`, `type`, `w`, `h`, `x`, `y`, `layout`, `align`,
/// `crossAlign`, `gap`, `padding`, `fills`, `strokes`, `strokeWeight`, `radius`, `text`,
/// `font`, `fontSize`, `fontWeight`, `children`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ReducedNode(Map<String, Value>);

impl ReducedNode {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        fn count(map: &Map<String, Value>) -> usize {
            let children = match map.get("children") {
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|child| depth::grow(|| count(child)))
                    .sum(),
                _ => 0,
            };
            1 + children
        }
        count(&self.0)
    }
}

impl From<ReducedNode> for Value {
    fn from(node: ReducedNode) -> Self {
        Value::Object(node.0)
    }
}

impl From<Map<String, Value>> for ReducedNode {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Output schema selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
    /// Short keys, rounded geometry, hex colors, vacant fields removed.
    #[default]
    Compact,
    /// Long Figma key names with raw paints and text style; only absent fields removed.
    Verbose,
}

impl Profile {
    pub fn reduce(self, node: Option<&RawNode>) -> Option<ReducedNode> {
        match self {
            Profile::Compact => reduce(node),
            Profile::Verbose => verbose::reduce(node),
        }
    }
}

/// Reduces a node and its descendants to the compact schema.
///
/// Absent input yields `None`. Absent children are left out of the parent's `children`; a
/// child that reduces to an empty object is kept.
pub fn reduce(node: Option<&RawNode>) -> Option<ReducedNode> {
    node.map(reduce_node)
}

fn reduce_node(node: &RawNode) -> ReducedNode {
    let bbox = node.absolute_bounding_box.unwrap_or_default();
    let style = node.style.as_ref();

    let padding = compact([
        ("l", number(node.padding_left)),
        ("r", number(node.padding_right)),
        ("t", number(node.padding_top)),
        ("b", number(node.padding_bottom)),
    ]);

    let children = node.children.as_deref().map(|children| {
        children
            .iter()
            .filter_map(|child| depth::grow(|| reduce(child.as_ref())))
            .map(Value::from)
            .collect::<Vec<_>>()
    });

    ReducedNode(compact([
        ("id", Value::from(node.id.clone())),
        ("name", Value::from(node.name.clone())),
        ("type", Value::from(node.node_type.clone())),
        ("w", geometry(bbox.width)),
        ("h", geometry(bbox.height)),
        ("x", geometry(bbox.x)),
        ("y", geometry(bbox.y)),
        ("layout", Value::from(node.layout_mode.clone())),
        ("align", Value::from(node.primary_axis_align_items.clone())),
        ("crossAlign", Value::from(node.counter_axis_align_items.clone())),
        ("gap", number(node.item_spacing)),
        ("padding", Value::Object(padding)),
        ("fills", solid_colors(node.fills.as_deref())),
        ("strokes", solid_colors(node.strokes.as_deref())),
        ("strokeWeight", number(node.stroke_weight)),
        ("radius", number(node.corner_radius)),
        ("text", Value::from(node.characters.clone())),
        ("font", Value::from(style.and_then(|s| s.font_family.clone()))),
        ("fontSize", number(style.and_then(|s| s.font_size))),
        ("fontWeight", number(style.and_then(|s| s.font_weight))),
        ("children", children.map(Value::Array).unwrap_or(Value::Null)),
    ]))
}

fn number(v: Option<f64>) -> Value {
    v.map(json_number).unwrap_or(Value::Null)
}

// Zero (and NaN) boxes are degenerate; the check is on the raw value, before rounding.
fn geometry(v: Option<f64>) -> Value {
    match v {
        Some(v) if v != 0.0 && !v.is_nan() => json_number(round_half_up(v)),
        _ => Value::Null,
    }
}

fn solid_colors(paints: Option<&[Paint]>) -> Value {
    let Some(paints) = paints else {
        return Value::Null;
    };
    paints
        .iter()
        .filter(|p| p.is_visible_solid())
        .filter_map(|p| normalize(p.color.as_ref()))
        .map(Value::String)
        .collect()
}
