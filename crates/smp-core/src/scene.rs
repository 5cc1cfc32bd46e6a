//! Scene snapshot data model
//!
//! A read-only snapshot of the host editor's scene: a tree of named groups,
//! each carrying a list of objects. Objects may have a rigid body descriptor
//! and/or a six-DOF joint descriptor attached, plus free-form export
//! properties for collision shapes.

use serde::{Deserialize, Serialize};

/// Simulation kind of a rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// World-anchored collision/reference geometry, never simulated
    Fixed,
    /// Actively simulated body
    Driven,
}

impl BodyKind {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            BodyKind::Fixed => "fixed",
            BodyKind::Driven => "driven",
        }
    }
}

/// Rigid body settings attached to a scene object
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RigidBodyDesc {
    pub kind: BodyKind,
    /// Mass in kg
    pub mass: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub friction: f32,
    pub restitution: f32,
    pub collision_margin: f32,
}

impl RigidBodyDesc {
    /// Create a body descriptor with the editor's stock settings
    pub fn new(kind: BodyKind) -> Self {
        Self {
            kind,
            mass: 1.0,
            linear_damping: 0.04,
            angular_damping: 0.1,
            friction: 0.5,
            restitution: 0.0,
            collision_margin: 0.04,
        }
    }
}

/// One translational or rotational limit axis of a joint
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LimitAxis {
    /// Disabled axes export as zero bounds regardless of the raw values
    pub enabled: bool,
    pub lower: f32,
    pub upper: f32,
}

impl LimitAxis {
    pub fn new(lower: f32, upper: f32) -> Self {
        Self {
            enabled: true,
            lower,
            upper,
        }
    }
}

/// One translational or rotational spring axis of a joint
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SpringAxis {
    /// Disabled axes export as zero stiffness and damping
    pub enabled: bool,
    pub stiffness: f32,
    pub damping: f32,
}

impl SpringAxis {
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            enabled: true,
            stiffness,
            damping,
        }
    }
}

/// Six-DOF joint descriptor between two named scene objects
///
/// Endpoints reference objects by display name; `None` means the slot was
/// never assigned in the editor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JointDesc {
    pub body_a: Option<String>,
    pub body_b: Option<String>,
    /// X/Y/Z translation limits
    pub linear_limits: [LimitAxis; 3],
    /// X/Y/Z rotation limits
    pub angular_limits: [LimitAxis; 3],
    /// X/Y/Z translation springs
    pub linear_springs: [SpringAxis; 3],
    /// X/Y/Z rotation springs
    pub angular_springs: [SpringAxis; 3],
}

/// Collision mesh representation in the target engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Vertex,
    Triangle,
}

impl ShapeKind {
    /// Infix used in the `per-*-shape` element name
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Vertex => "vertex",
            ShapeKind::Triangle => "triangle",
        }
    }
}

/// Sharing mode of a collision shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sharing {
    #[default]
    Private,
    Public,
}

impl Sharing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sharing::Private => "private",
            Sharing::Public => "public",
        }
    }
}

/// Free-form export properties attached to a collision object
///
/// Every field is optional; defaults are applied when the collision shape
/// entity is constructed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeProps {
    pub mesh_kind: Option<ShapeKind>,
    pub sharing: Option<Sharing>,
    pub tag: Option<String>,
    pub no_collide_with: Vec<String>,
    pub collide_with: Vec<String>,
}

/// An object inside a scene group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default)]
    pub body: Option<RigidBodyDesc>,
    #[serde(default)]
    pub joint: Option<JointDesc>,
    #[serde(default)]
    pub props: ShapeProps,
}

impl SceneObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: None,
            joint: None,
            props: ShapeProps::default(),
        }
    }

    /// Attach a rigid body descriptor
    pub fn with_body(mut self, body: RigidBodyDesc) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a joint descriptor
    pub fn with_joint(mut self, joint: JointDesc) -> Self {
        self.joint = Some(joint);
        self
    }
}

/// A named group in the scene tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<SceneNode>,
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

impl SceneNode {
    /// Create an empty group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            objects: Vec::new(),
        }
    }

    /// Depth-first pre-order traversal of this subtree, starting with the
    /// node itself. A node is always yielded before its children.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Iterator over a subtree in depth-first pre-order
pub struct Descendants<'a> {
    stack: Vec<&'a SceneNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SceneNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so the first child is visited next
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}
