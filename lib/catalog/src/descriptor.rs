//! Node descriptors.
//!
//! A descriptor is the catalog's read-only snapshot of a node type:
//! - A unique name and optional display name
//! - A category and optional subcategory
//! - Typed input and output ports
//! - Capability flags (trigger, webhook, processing, custom code)
//! - Declared configuration properties
//!
//! Ports carry a type tag. The generic `main` type connects to anything.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeSet;
use std::fmt;

/// The type tag of a port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortType(String);

impl PortType {
    /// The generic port type, compatible with every other type.
    pub const MAIN: &'static str = "main";

    /// Creates a port type from a tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Creates the generic `main` port type.
    #[must_use]
    pub fn main() -> Self {
        Self(Self::MAIN.to_string())
    }

    /// Returns the tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the generic `main` type.
    #[must_use]
    pub fn is_main(&self) -> bool {
        self.0 == Self::MAIN
    }

    /// Checks whether data of this type can flow into a port of `other`.
    ///
    /// Equal tags connect, and `main` connects to everything including itself.
    #[must_use]
    pub fn connects_to(&self, other: &Self) -> bool {
        self.is_main() || other.is_main() || self == other
    }
}

impl Default for PortType {
    fn default() -> Self {
        Self::main()
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An input or output port on a node.
///
/// Deserializes either from a bare type tag (`"main"`) or from an object
/// (`{"type": "main", "name": "output"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PortRepr")]
pub struct Port {
    /// The port's type tag.
    #[serde(rename = "type")]
    pub port_type: PortType,
    /// Optional port label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortRepr {
    Bare(PortType),
    Full {
        #[serde(rename = "type", default)]
        port_type: PortType,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<PortRepr> for Port {
    fn from(repr: PortRepr) -> Self {
        match repr {
            PortRepr::Bare(port_type) => Self {
                port_type,
                name: None,
            },
            PortRepr::Full { port_type, name } => Self { port_type, name },
        }
    }
}

impl Port {
    /// Creates a generic `main` port.
    #[must_use]
    pub fn main() -> Self {
        Self::typed(PortType::MAIN)
    }

    /// Creates a port with the given type tag.
    #[must_use]
    pub fn typed(tag: impl Into<String>) -> Self {
        Self {
            port_type: PortType::new(tag),
            name: None,
        }
    }
}

impl Default for Port {
    fn default() -> Self {
        Self::main()
    }
}

/// A configuration property declared by a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    /// Property key.
    pub name: String,
    /// Human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether the node refuses to run without a value.
    #[serde(default)]
    pub required: bool,
    /// Value used when none is supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
}

impl PropertyDescriptor {
    /// Creates an optional property.
    #[must_use]
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            required: false,
            default: None,
        }
    }

    /// Creates a required property with no default.
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::optional(name)
        }
    }

    /// Returns true if a value must come from upstream data.
    #[must_use]
    pub fn needs_value(&self) -> bool {
        self.required && self.default.is_none()
    }
}

/// The canonical description of a node type.
///
/// Missing collections deserialize as empty so partial catalog entries
/// still resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    /// Unique identifier within the catalog.
    pub name: String,
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// What the node does.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fully qualified integration type, when it differs from `name`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    /// Primary classification.
    #[serde(default)]
    pub category: String,
    /// Secondary classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Input ports, in declaration order.
    #[serde(default)]
    pub inputs: Vec<Port>,
    /// Output ports, in declaration order.
    #[serde(default)]
    pub outputs: Vec<Port>,
    /// Starts workflow executions.
    #[serde(default)]
    pub is_trigger: bool,
    /// Receives HTTP callbacks.
    #[serde(default)]
    pub is_webhook: bool,
    /// Transforms or routes data.
    #[serde(default)]
    pub is_processing: bool,
    /// Runs user-supplied code.
    #[serde(default)]
    pub has_custom_code: bool,
    /// Declared configuration properties.
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
}

impl NodeDescriptor {
    /// Creates a descriptor with no ports, flags or properties.
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            description: None,
            node_type: None,
            category: category.into(),
            subcategory: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            is_trigger: false,
            is_webhook: false,
            is_processing: false,
            has_custom_code: false,
            properties: Vec::new(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Sets the subcategory.
    #[must_use]
    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// Replaces the input ports.
    #[must_use]
    pub fn with_inputs(mut self, inputs: Vec<Port>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Replaces the output ports.
    #[must_use]
    pub fn with_outputs(mut self, outputs: Vec<Port>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Marks the node as a trigger.
    #[must_use]
    pub fn trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Marks the node as a webhook receiver.
    #[must_use]
    pub fn webhook(mut self) -> Self {
        self.is_webhook = true;
        self
    }

    /// Marks the node as a processing node.
    #[must_use]
    pub fn processing(mut self) -> Self {
        self.is_processing = true;
        self
    }

    /// Marks the node as running custom code.
    #[must_use]
    pub fn custom_code(mut self) -> Self {
        self.has_custom_code = true;
        self
    }

    /// Adds a declared property.
    #[must_use]
    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    /// Returns the integration type, falling back to the name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.node_type.as_deref().unwrap_or(&self.name)
    }

    /// Returns the display name, falling back to the name.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Derives the capability tags of this node.
    ///
    /// Tags come from the boolean flags plus the lower-cased subcategory.
    #[must_use]
    pub fn capabilities(&self) -> BTreeSet<String> {
        let flags = [
            (self.is_trigger, "trigger"),
            (self.is_webhook, "webhook"),
            (self.is_processing, "processing"),
            (self.has_custom_code, "custom-code"),
        ];
        let mut capabilities: BTreeSet<String> = flags
            .iter()
            .filter(|(set, _)| *set)
            .map(|(_, tag)| (*tag).to_string())
            .collect();

        if let Some(subcategory) = self
            .subcategory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            capabilities.insert(subcategory.to_lowercase());
        }

        capabilities
    }

    /// Returns the property with the given name, if any.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// A reference to a node: a catalog identifier or an inline descriptor.
///
/// Resolved exactly once at the engine boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
    /// A catalog name or display name.
    Name(String),
    /// A fully specified descriptor.
    Inline(Box<NodeDescriptor>),
}

impl NodeRef {
    /// Returns the identifier used in diagnostics.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Inline(descriptor) => &descriptor.name,
        }
    }
}

impl From<&str> for NodeRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for NodeRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<NodeDescriptor> for NodeRef {
    fn from(descriptor: NodeDescriptor) -> Self {
        Self::Inline(Box::new(descriptor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_connects_to_everything() {
        let main = PortType::main();
        let binary = PortType::new("binary");

        assert!(main.connects_to(&binary));
        assert!(binary.connects_to(&main));
        assert!(main.connects_to(&main));
    }

    #[test]
    fn distinct_typed_ports_do_not_connect() {
        let binary = PortType::new("binary");
        let ai_tool = PortType::new("ai_tool");

        assert!(!binary.connects_to(&ai_tool));
        assert!(binary.connects_to(&PortType::new("binary")));
    }

    #[test]
    fn port_deserializes_from_bare_tag_and_object() {
        let ports: Vec<Port> =
            serde_json::from_str(r#"["main", {"type": "binary", "name": "file"}, {}]"#)
                .expect("deserialize");

        assert_eq!(ports[0], Port::main());
        assert_eq!(ports[1].port_type.as_str(), "binary");
        assert_eq!(ports[1].name.as_deref(), Some("file"));
        assert!(ports[2].port_type.is_main());
    }

    #[test]
    fn capabilities_come_from_flags_and_subcategory() {
        let node = NodeDescriptor::new("webhook", "trigger")
            .with_subcategory("  Inbound ")
            .trigger()
            .webhook();

        let caps: Vec<_> = node.capabilities().into_iter().collect();
        assert_eq!(caps, vec!["inbound", "trigger", "webhook"]);
    }

    #[test]
    fn empty_subcategory_adds_no_capability() {
        let node = NodeDescriptor::new("code", "processing")
            .with_subcategory("")
            .custom_code();
        let caps = node.capabilities();
        assert_eq!(caps.len(), 1);
        assert!(caps.contains("custom-code"));
    }

    #[test]
    fn missing_collections_deserialize_as_empty() {
        let node: NodeDescriptor =
            serde_json::from_str(r#"{"name": "noop"}"#).expect("deserialize");
        assert!(node.inputs.is_empty());
        assert!(node.outputs.is_empty());
        assert!(node.properties.is_empty());
        assert!(node.capabilities().is_empty());
        assert_eq!(node.type_name(), "noop");
    }

    #[test]
    fn node_ref_is_untagged() {
        let by_name: NodeRef = serde_json::from_str(r#""slack""#).expect("deserialize");
        assert_eq!(by_name, NodeRef::from("slack"));

        let inline: NodeRef =
            serde_json::from_str(r#"{"name": "slack", "category": "communication"}"#)
                .expect("deserialize");
        match inline {
            NodeRef::Inline(descriptor) => assert_eq!(descriptor.category, "communication"),
            NodeRef::Name(_) => panic!("expected inline descriptor"),
        }
    }

    #[test]
    fn required_property_with_default_needs_no_value() {
        let mut property = PropertyDescriptor::required("method");
        assert!(property.needs_value());

        property.default = Some(serde_json::json!("GET"));
        assert!(!property.needs_value());
    }
}
