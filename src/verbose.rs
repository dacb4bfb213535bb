//! Legacy long-form output profile.
//!
//! Keeps Figma's own key names, unrounded geometry, raw stroke paints and the raw text style.
//! Only absent values are dropped: zero geometry, empty paint lists and an empty `padding`
//! object are all kept, and an absent child shows up as `null`.

use serde_json::{Map, Value};

use crate::{
    foundation::{depth, math::json_number},
    model::RawNode,
    reduce::ReducedNode,
};

pub(crate) fn reduce(node: Option<&RawNode>) -> Option<ReducedNode> {
    node.map(reduce_node)
}

fn reduce_node(node: &RawNode) -> ReducedNode {
    let bbox = node.absolute_bounding_box.unwrap_or_default();

    let padding = defined([
        ("left", number(node.padding_left)),
        ("right", number(node.padding_right)),
        ("top", number(node.padding_top)),
        ("bottom", number(node.padding_bottom)),
    ]);

    let fills = node.fills.as_ref().map(|fills| {
        fills
            .iter()
            .map(|f| {
                Value::Object(defined([
                    ("type", Value::from(f.paint_type.clone())),
                    ("color", raw(f.color.as_ref())),
                ]))
            })
            .collect::<Vec<_>>()
    });

    let children = node.children.as_ref().map(|children| {
        children
            .iter()
            .map(|child| {
                depth::grow(|| reduce(child.as_ref())).map_or(Value::Null, Value::from)
            })
            .collect::<Vec<_>>()
    });

    ReducedNode::from(defined([
        ("id", Value::from(node.id.clone())),
        ("name", Value::from(node.name.clone())),
        ("type", Value::from(node.node_type.clone())),
        ("width", number(bbox.width)),
        ("height", number(bbox.height)),
        ("x", number(bbox.x)),
        ("y", number(bbox.y)),
        ("layoutMode", Value::from(node.layout_mode.clone())),
        (
            "primaryAxisAlignItems",
            Value::from(node.primary_axis_align_items.clone()),
        ),
        (
            "counterAxisAlignItems",
            Value::from(node.counter_axis_align_items.clone()),
        ),
        ("itemSpacing", number(node.item_spacing)),
        ("padding", Value::Object(padding)),
        ("fills", fills.map_or(Value::Null, Value::Array)),
        ("strokes", raw(node.strokes.as_ref())),
        ("cornerRadius", number(node.corner_radius)),
        ("characters", Value::from(node.characters.clone())),
        ("textStyle", raw(node.style.as_ref())),
        ("children", children.map_or(Value::Null, Value::Array)),
    ]))
}

fn defined(fields: impl IntoIterator<Item = (&'static str, Value)>) -> Map<String, Value> {
    fields
        .into_iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn number(v: Option<f64>) -> Value {
    v.map_or(Value::Null, json_number)
}

fn raw<T: serde::Serialize>(v: Option<&T>) -> Value {
    v.and_then(|v| serde_json::to_value(v).ok())
        .unwrap_or(Value::Null)
}
