//! The component schema: a closed, serializable union of renderable UI nodes.
//!
//! Agents describe interfaces as JSON trees of these components; the stream
//! extractor decodes them leniently (bad nodes degrade to a flagged
//! placeholder) while [`Component::from_value`] offers the strict contract
//! that rejects unknown `type` discriminants with a distinct error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// Every `type` discriminant the schema understands. Decoders use this to
/// tell "unknown component" apart from "not a component at all".
pub const KNOWN_TYPES: &[&str] = &[
    "text",
    "button",
    "icon",
    "image",
    "badge",
    "text_input",
    "number_input",
    "date_input",
    "slider",
    "select",
    "multi_select",
    "switch",
    "stack",
    "grid",
    "card",
    "container",
    "divider",
    "tabs",
    "table",
    "list",
    "key_value",
    "code_block",
    "chart",
    "alert",
];

/// Errors produced by strict component decoding.
#[derive(Debug)]
pub enum SchemaError {
    /// The value is not an object carrying a string `type` field.
    MissingType,
    /// The `type` discriminant is not one of [`KNOWN_TYPES`].
    UnknownType(String),
    /// The discriminant is known but the remaining fields do not decode.
    Invalid {
        component_type: String,
        source: serde_json::Error,
    },
    /// Two components in the same response share an `id`.
    DuplicateId(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::MissingType => write!(f, "component has no `type` field"),
            SchemaError::UnknownType(ty) => write!(f, "unknown component type: {ty}"),
            SchemaError::Invalid {
                component_type,
                source,
            } => write!(f, "invalid `{component_type}` component: {source}"),
            SchemaError::DuplicateId(id) => write!(f, "duplicate component id: {id}"),
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchemaError::Invalid { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextVariant {
    H1,
    H2,
    H3,
    #[default]
    Body,
    Caption,
    Code,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Text {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: String,
    #[serde(default)]
    pub variant: TextVariant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Destructive,
    Ghost,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Button {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub label: String,
    pub action_id: String,
    #[serde(default)]
    pub variant: ButtonVariant,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Icon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub size: IconSize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    #[default]
    Neutral,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Badge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub label: String,
    #[serde(default)]
    pub variant: BadgeVariant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumberInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DateInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Slider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Select {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MultiSelect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default_value: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Switch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub default_value: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackDirection {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub direction: StackDirection,
    #[serde(default)]
    pub children: Vec<Component>,
}

fn default_grid_columns() -> u16 {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Grid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default = "default_grid_columns")]
    pub columns: u16,
    #[serde(default)]
    pub children: Vec<Component>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Vec<Component>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Vec<Component>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Container {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub children: Vec<Component>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Divider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabItem {
    pub label: String,
    #[serde(default)]
    pub children: Vec<Component>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tabs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub items: Vec<TabItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableColumn {
    pub header: String,
    pub accessor_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Table {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub columns: Vec<TableColumn>,
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct List {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub ordered: bool,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyValueEntry {
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub pairs: Vec<KeyValueEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CodeBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Chart kinds. Unrecognized kinds decode as [`ChartKind::Bar`] so a typo in
/// agent output degrades instead of discarding the whole chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Area,
    Pie,
}

impl From<String> for ChartKind {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "line" => ChartKind::Line,
            "area" => ChartKind::Area,
            "pie" => ChartKind::Pie,
            _ => ChartKind::Bar,
        }
    }
}

impl From<ChartKind> for String {
    fn from(value: ChartKind) -> Self {
        match value {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Area => "area",
            ChartKind::Pie => "pie",
        }
        .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub kind: ChartKind,
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
    pub x_key: String,
    #[serde(default)]
    pub y_keys: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertVariant {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub variant: AlertVariant,
}

/// Placeholder kept by lenient decoding for nodes that could not be turned
/// into a known variant. Never produced by strict decoding and never sent
/// back over the wire as anything but an `unknown`-tagged stub.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnknownComponent {
    pub type_name: String,
}

/// One node of the renderable UI tree.
///
/// Serialization is internally tagged on `type`; the tag fully determines
/// the payload shape. Deserialization is *lenient*: nodes that fail to
/// decode become [`Component::Unknown`] so one bad node never blanks a
/// tree. Use [`Component::from_value`] for the strict, rejecting contract.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    Text(Text),
    Button(Button),
    Icon(Icon),
    Image(Image),
    Badge(Badge),
    TextInput(TextInput),
    NumberInput(NumberInput),
    DateInput(DateInput),
    Slider(Slider),
    Select(Select),
    MultiSelect(MultiSelect),
    Switch(Switch),
    Stack(Stack),
    Grid(Grid),
    Card(Card),
    Container(Container),
    Divider(Divider),
    Tabs(Tabs),
    Table(Table),
    List(List),
    KeyValue(KeyValue),
    CodeBlock(CodeBlock),
    Chart(Chart),
    Alert(Alert),
    Unknown(UnknownComponent),
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Component::lenient_from_value(&value))
    }
}

fn decode_known(ty: &str, value: &Value) -> Result<Component, serde_json::Error> {
    let value = value.clone();
    Ok(match ty {
        "text" => Component::Text(serde_json::from_value(value)?),
        "button" => Component::Button(serde_json::from_value(value)?),
        "icon" => Component::Icon(serde_json::from_value(value)?),
        "image" => Component::Image(serde_json::from_value(value)?),
        "badge" => Component::Badge(serde_json::from_value(value)?),
        "text_input" => Component::TextInput(serde_json::from_value(value)?),
        "number_input" => Component::NumberInput(serde_json::from_value(value)?),
        "date_input" => Component::DateInput(serde_json::from_value(value)?),
        "slider" => Component::Slider(serde_json::from_value(value)?),
        "select" => Component::Select(serde_json::from_value(value)?),
        "multi_select" => Component::MultiSelect(serde_json::from_value(value)?),
        "switch" => Component::Switch(serde_json::from_value(value)?),
        "stack" => Component::Stack(serde_json::from_value(value)?),
        "grid" => Component::Grid(serde_json::from_value(value)?),
        "card" => Component::Card(serde_json::from_value(value)?),
        "container" => Component::Container(serde_json::from_value(value)?),
        "divider" => Component::Divider(serde_json::from_value(value)?),
        "tabs" => Component::Tabs(serde_json::from_value(value)?),
        "table" => Component::Table(serde_json::from_value(value)?),
        "list" => Component::List(serde_json::from_value(value)?),
        "key_value" => Component::KeyValue(serde_json::from_value(value)?),
        "code_block" => Component::CodeBlock(serde_json::from_value(value)?),
        "chart" => Component::Chart(serde_json::from_value(value)?),
        "alert" => Component::Alert(serde_json::from_value(value)?),
        other => {
            // decode_known is only called with members of KNOWN_TYPES
            return Err(serde::de::Error::custom(format!(
                "unhandled component type: {other}"
            )));
        }
    })
}

impl Component {
    /// Strict decoding: rejects values without a known `type` discriminant.
    ///
    /// Unknown discriminants are a distinct error so callers can tell
    /// "malformed UI" apart from "not UI at all". Children of
    /// children-bearing variants still decode leniently; strictness applies
    /// to the node itself.
    pub fn from_value(value: &Value) -> Result<Component, SchemaError> {
        let ty = value
            .as_object()
            .and_then(|obj| obj.get("type"))
            .and_then(Value::as_str)
            .ok_or(SchemaError::MissingType)?;
        if !KNOWN_TYPES.contains(&ty) {
            return Err(SchemaError::UnknownType(ty.to_string()));
        }
        decode_known(ty, value).map_err(|source| SchemaError::Invalid {
            component_type: ty.to_string(),
            source,
        })
    }

    /// Lenient decoding: never fails. Nodes that strict decoding rejects
    /// become [`Component::Unknown`], to be flagged at render time.
    pub fn lenient_from_value(value: &Value) -> Component {
        match Component::from_value(value) {
            Ok(component) => component,
            Err(err) => {
                let type_name = match &err {
                    SchemaError::UnknownType(ty) => ty.clone(),
                    SchemaError::Invalid { component_type, .. } => {
                        tracing::warn!("dropping malformed component fields: {err}");
                        component_type.clone()
                    }
                    _ => "(untyped)".to_string(),
                };
                Component::Unknown(UnknownComponent { type_name })
            }
        }
    }

    /// Stable identifier used by the update protocol, if the node has one.
    pub fn id(&self) -> Option<&str> {
        let id = match self {
            Component::Text(c) => &c.id,
            Component::Button(c) => &c.id,
            Component::Icon(c) => &c.id,
            Component::Image(c) => &c.id,
            Component::Badge(c) => &c.id,
            Component::TextInput(c) => &c.id,
            Component::NumberInput(c) => &c.id,
            Component::DateInput(c) => &c.id,
            Component::Slider(c) => &c.id,
            Component::Select(c) => &c.id,
            Component::MultiSelect(c) => &c.id,
            Component::Switch(c) => &c.id,
            Component::Stack(c) => &c.id,
            Component::Grid(c) => &c.id,
            Component::Card(c) => &c.id,
            Component::Container(c) => &c.id,
            Component::Divider(c) => &c.id,
            Component::Tabs(c) => &c.id,
            Component::Table(c) => &c.id,
            Component::List(c) => &c.id,
            Component::KeyValue(c) => &c.id,
            Component::CodeBlock(c) => &c.id,
            Component::Chart(c) => &c.id,
            Component::Alert(c) => &c.id,
            Component::Unknown(_) => &None,
        };
        id.as_deref()
    }

    /// Wire name of this node's discriminant.
    pub fn type_name(&self) -> &str {
        match self {
            Component::Text(_) => "text",
            Component::Button(_) => "button",
            Component::Icon(_) => "icon",
            Component::Image(_) => "image",
            Component::Badge(_) => "badge",
            Component::TextInput(_) => "text_input",
            Component::NumberInput(_) => "number_input",
            Component::DateInput(_) => "date_input",
            Component::Slider(_) => "slider",
            Component::Select(_) => "select",
            Component::MultiSelect(_) => "multi_select",
            Component::Switch(_) => "switch",
            Component::Stack(_) => "stack",
            Component::Grid(_) => "grid",
            Component::Card(_) => "card",
            Component::Container(_) => "container",
            Component::Divider(_) => "divider",
            Component::Tabs(_) => "tabs",
            Component::Table(_) => "table",
            Component::List(_) => "list",
            Component::KeyValue(_) => "key_value",
            Component::CodeBlock(_) => "code_block",
            Component::Chart(_) => "chart",
            Component::Alert(_) => "alert",
            Component::Unknown(c) => &c.type_name,
        }
    }

    /// All child vectors of this node, in render order. Card exposes its
    /// body slot then its footer slot; tabs expose one slot per item.
    pub fn child_slots(&self) -> Vec<&Vec<Component>> {
        match self {
            Component::Stack(c) => vec![&c.children],
            Component::Grid(c) => vec![&c.children],
            Component::Container(c) => vec![&c.children],
            Component::Card(c) => {
                let mut slots = vec![&c.content];
                if let Some(footer) = &c.footer {
                    slots.push(footer);
                }
                slots
            }
            Component::Tabs(c) => c.items.iter().map(|item| &item.children).collect(),
            _ => Vec::new(),
        }
    }

    pub fn child_slots_mut(&mut self) -> Vec<&mut Vec<Component>> {
        match self {
            Component::Stack(c) => vec![&mut c.children],
            Component::Grid(c) => vec![&mut c.children],
            Component::Container(c) => vec![&mut c.children],
            Component::Card(c) => {
                let mut slots = vec![&mut c.content];
                if let Some(footer) = &mut c.footer {
                    slots.push(footer);
                }
                slots
            }
            Component::Tabs(c) => c.items.iter_mut().map(|item| &mut item.children).collect(),
            _ => Vec::new(),
        }
    }

    /// The slot `append` operations target, for shapes that accept trailing
    /// children. Tabs are excluded: their children live inside labeled
    /// groups, so a bare append has no well-defined position.
    pub fn appendable_children_mut(&mut self) -> Option<&mut Vec<Component>> {
        match self {
            Component::Stack(c) => Some(&mut c.children),
            Component::Grid(c) => Some(&mut c.children),
            Component::Container(c) => Some(&mut c.children),
            Component::Card(c) => Some(&mut c.content),
            _ => None,
        }
    }
}

/// Top-level envelope for one rendered response: an ordered forest of root
/// components plus an optional theme hint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl UiResponse {
    pub fn new(components: Vec<Component>) -> Self {
        Self {
            id: None,
            theme: None,
            components,
        }
    }

    /// Rejects responses whose flat id space contains duplicates. Update
    /// targeting is first-match, so duplicates silently shadow each other;
    /// robust embedders should validate before accepting a tree.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        let mut stack: Vec<&Component> = self.components.iter().collect();
        while let Some(component) = stack.pop() {
            if let Some(id) = component.id() {
                if !seen.insert(id.to_string()) {
                    return Err(SchemaError::DuplicateId(id.to_string()));
                }
            }
            for slot in component.child_slots() {
                stack.extend(slot.iter());
            }
        }
        Ok(())
    }
}

/// Depth-first, first-match lookup over a forest.
pub fn find_component<'a>(roots: &'a [Component], id: &str) -> Option<&'a Component> {
    for component in roots {
        if component.id() == Some(id) {
            return Some(component);
        }
        for slot in component.child_slots() {
            if let Some(found) = find_component(slot, id) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_component_round_trips() {
        let button = Component::Button(Button {
            id: Some("b1".into()),
            label: "Go".into(),
            action_id: "go".into(),
            variant: ButtonVariant::Primary,
            disabled: false,
        });
        let value = serde_json::to_value(&button).unwrap();
        assert_eq!(value["type"], "button");
        assert_eq!(value["action_id"], "go");
        let decoded: Component = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, button);
    }

    #[test]
    fn strict_decode_rejects_unknown_type_distinctly() {
        let err = Component::from_value(&json!({"type": "hologram"})).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownType(ref ty) if ty == "hologram"));

        let err = Component::from_value(&json!({"content": "no tag"})).unwrap_err();
        assert!(matches!(err, SchemaError::MissingType));
    }

    #[test]
    fn strict_decode_flags_bad_fields_with_type_name() {
        let err = Component::from_value(&json!({"type": "button", "label": "x"})).unwrap_err();
        match err {
            SchemaError::Invalid { component_type, .. } => assert_eq!(component_type, "button"),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn lenient_decode_keeps_unknown_nodes_as_placeholders() {
        let card: Component = serde_json::from_value(json!({
            "type": "card",
            "title": "T",
            "content": [
                {"type": "text", "content": "ok"},
                {"type": "hologram", "spin": 3},
            ],
        }))
        .unwrap();
        let Component::Card(card) = card else {
            panic!("expected card");
        };
        assert_eq!(card.content.len(), 2);
        assert!(matches!(
            &card.content[1],
            Component::Unknown(u) if u.type_name == "hologram"
        ));
    }

    #[test]
    fn chart_kind_defaults_to_bar_on_unrecognized() {
        let chart: Chart = serde_json::from_value(json!({
            "kind": "scatter",
            "x_key": "month",
            "y_keys": ["value"],
        }))
        .unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let response = UiResponse::new(vec![
            Component::Divider(Divider {
                id: Some("dup".into()),
            }),
            Component::Container(Container {
                id: None,
                children: vec![Component::Divider(Divider {
                    id: Some("dup".into()),
                })],
            }),
        ]);
        assert!(matches!(
            response.validate(),
            Err(SchemaError::DuplicateId(ref id)) if id == "dup"
        ));
    }

    #[test]
    fn find_component_walks_card_slots() {
        let roots = vec![Component::Card(Card {
            id: None,
            title: None,
            description: None,
            content: vec![],
            footer: Some(vec![Component::Button(Button {
                id: Some("deep".into()),
                label: "x".into(),
                action_id: "x".into(),
                variant: ButtonVariant::Primary,
                disabled: false,
            })]),
        })];
        assert!(find_component(&roots, "deep").is_some());
        assert!(find_component(&roots, "absent").is_none());
    }
}
