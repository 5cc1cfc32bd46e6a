//! Physics entity model
//!
//! Value types for the four exported entity kinds. Each entity is built
//! once during classification, is immutable afterwards, and knows how to
//! render its own XML fragment.

use glam::Vec3;

use crate::classify::strip_role_suffixes;
use crate::constants::{
    DEFAULT_GRAVITY_FACTOR, DEFAULT_INERTIA, DEFAULT_MARGIN_MULTIPLIER, DEFAULT_NO_COLLIDE_TAGS,
    DEFAULT_PENETRATION, DEFAULT_ROLLING_FRICTION, DEFAULT_SHAPE_TAG,
};
use crate::document::{fmt_decimal, xml_escape};
use crate::export::ExportError;
use crate::scene::{BodyKind, JointDesc, LimitAxis, RigidBodyDesc, SceneObject, ShapeKind, Sharing, SpringAxis};
use crate::transform::to_engine_space;

/// Defaults block heading the static bone section: every static bone
/// shares zero mass, inertia, damping, friction and restitution.
const STATIC_BONE_DEFAULTS: &str = "    <bone-default>
        <mass>0</mass>
        <inertia x=\"0\" y=\"0\" z=\"0\"/>
        <centerOfMassTransform>
            <basis x=\"0\" y=\"0\" z=\"0\" w=\"1\"/>
            <origin x=\"0\" y=\"0\" z=\"0\"/>
        </centerOfMassTransform>
        <linearDamping>0.0</linearDamping>
        <angularDamping>0.0</angularDamping>
            <friction>0.0</friction>
        <rollingFriction>0.0</rollingFriction>
        <restitution>0.0</restitution>
        <gravity-factor>0.000</gravity-factor>
    </bone-default>

";

/// Ordered set of immovable reference bones
///
/// Names are unique; insertion order is discovery order.
#[derive(Debug, Clone, Default)]
pub struct StaticBoneSet {
    bones: Vec<String>,
}

impl StaticBoneSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a bone by raw object name. Role suffixes are stripped, and a
    /// name already in the set keeps its first discovery position.
    pub fn push(&mut self, raw_name: &str) {
        let name = strip_role_suffixes(raw_name);
        if !self.bones.iter().any(|b| *b == name) {
            self.bones.push(name);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Bone names in discovery order
    pub fn names(&self) -> &[String] {
        &self.bones
    }

    /// Render the static-bone section. An empty set is an error: the
    /// document is useless without at least one immovable reference bone.
    pub fn write_xml(&self, out: &mut String) -> Result<(), ExportError> {
        if self.bones.is_empty() {
            return Err(ExportError::EmptyStaticSet);
        }
        out.push_str(STATIC_BONE_DEFAULTS);
        for bone in &self.bones {
            out.push_str(&format!("    <bone name=\"{}\"/>\n", xml_escape(bone)));
        }
        out.push('\n');
        Ok(())
    }
}

/// A simulated bone with its physics parameters
#[derive(Debug, Clone)]
pub struct KinematicBone {
    pub name: String,
    pub mass: f32,
    pub inertia: Vec3,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub friction: f32,
    pub restitution: f32,
    pub margin_multiplier: f32,
    pub rolling_friction: f32,
    pub gravity_factor: f32,
}

impl KinematicBone {
    /// Build from a driven rigid body object. Handing this anything but a
    /// driven body is a classifier bug.
    pub fn from_object(raw_name: &str, body: &RigidBodyDesc) -> Self {
        assert!(
            body.kind == BodyKind::Driven,
            "kinematic bone requires a driven body"
        );
        Self {
            name: strip_role_suffixes(raw_name),
            mass: body.mass,
            inertia: Vec3::splat(DEFAULT_INERTIA),
            linear_damping: body.linear_damping,
            angular_damping: body.angular_damping,
            friction: body.friction,
            restitution: body.restitution,
            margin_multiplier: DEFAULT_MARGIN_MULTIPLIER,
            rolling_friction: DEFAULT_ROLLING_FRICTION,
            gravity_factor: DEFAULT_GRAVITY_FACTOR,
        }
    }

    pub fn write_xml(&self, out: &mut String) {
        out.push_str(&format!(
            "    <bone name=\"{}\">\n",
            xml_escape(&self.name)
        ));
        out.push_str(&format!("        <mass>{}</mass>\n", fmt_decimal(self.mass)));
        out.push_str(&format!(
            "        <inertia x=\"{}\" y=\"{}\" z=\"{}\"/>\n",
            fmt_decimal(self.inertia.x),
            fmt_decimal(self.inertia.y),
            fmt_decimal(self.inertia.z)
        ));
        out.push_str("        <centerOfMassTransform>\n");
        out.push_str("            <basis x=\"0\" y=\"0\" z=\"0\" w=\"1\"/>\n");
        out.push_str("            <origin x=\"0\" y=\"0\" z=\"0\"/>\n");
        out.push_str("        </centerOfMassTransform>\n");
        out.push_str(&format!(
            "        <linearDamping>{}</linearDamping>\n",
            fmt_decimal(self.linear_damping)
        ));
        out.push_str(&format!(
            "        <angularDamping>{}</angularDamping>\n",
            fmt_decimal(self.angular_damping)
        ));
        out.push_str(&format!(
            "        <friction>{}</friction> \n",
            fmt_decimal(self.friction)
        ));
        out.push_str(&format!(
            "        <rollingFriction>{}</rollingFriction>\n",
            fmt_decimal(self.rolling_friction)
        ));
        out.push_str(&format!(
            "        <restitution>{}</restitution>\n",
            fmt_decimal(self.restitution)
        ));
        out.push_str(&format!(
            "        <margin-multiplier>{}</margin-multiplier>\n",
            fmt_decimal(self.margin_multiplier)
        ));
        out.push_str(&format!(
            "        <gravity-factor>{}</gravity-factor>\n",
            fmt_decimal(self.gravity_factor)
        ));
        out.push_str("    </bone>\n\n");
    }
}

/// World-anchored collision geometry
#[derive(Debug, Clone)]
pub struct CollisionShape {
    pub name: String,
    pub kind: ShapeKind,
    pub margin: f32,
    pub penetration: f32,
    pub sharing: Sharing,
    pub tag: String,
    pub no_collide_with: Vec<String>,
    pub collide_with: Vec<String>,
}

impl CollisionShape {
    /// Build from a fixed rigid body object, applying the documented
    /// defaults for every property the object does not override.
    pub fn from_object(obj: &SceneObject, body: &RigidBodyDesc) -> Self {
        debug_assert!(body.kind == BodyKind::Fixed);
        Self {
            name: obj.name.clone(),
            kind: obj.props.mesh_kind.unwrap_or_default(),
            margin: body.collision_margin,
            penetration: DEFAULT_PENETRATION,
            sharing: obj.props.sharing.unwrap_or_default(),
            tag: obj
                .props
                .tag
                .clone()
                .unwrap_or_else(|| DEFAULT_SHAPE_TAG.to_string()),
            no_collide_with: if obj.props.no_collide_with.is_empty() {
                DEFAULT_NO_COLLIDE_TAGS.iter().map(|s| s.to_string()).collect()
            } else {
                obj.props.no_collide_with.clone()
            },
            collide_with: obj.props.collide_with.clone(),
        }
    }

    pub fn write_xml(&self, out: &mut String) {
        let kind = self.kind.as_str();
        out.push_str(&format!(
            "    <per-{}-shape name=\"{}\">\n",
            kind,
            xml_escape(&self.name)
        ));
        out.push_str(&format!(
            "        <margin>{}</margin>\n",
            fmt_decimal(self.margin)
        ));
        out.push_str(&format!(
            "        <shared>{}</shared>\n",
            self.sharing.as_str()
        ));
        out.push_str(&format!(
            "        <penetration>{}</penetration>\n",
            fmt_decimal(self.penetration)
        ));
        out.push_str(&format!("        <tag>{}</tag>\n", xml_escape(&self.tag)));
        for tag in &self.no_collide_with {
            out.push_str(&format!(
                "        <no-collide-with-tag>{}</no-collide-with-tag>\n",
                xml_escape(tag)
            ));
        }
        for tag in &self.collide_with {
            out.push_str(&format!(
                "        <collide-with-tag>{}</collide-with-tag>\n",
                xml_escape(tag)
            ));
        }
        out.push_str(&format!("    </per-{}-shape>\n\n", kind));
    }
}

/// Six-DOF constraint between two named bodies, in engine space
#[derive(Debug, Clone)]
pub struct GenericConstraint {
    pub body_a: String,
    pub body_b: String,
    pub linear_lower: Vec3,
    pub linear_upper: Vec3,
    pub angular_lower: Vec3,
    pub angular_upper: Vec3,
    pub linear_stiffness: Vec3,
    pub linear_damping: Vec3,
    pub angular_stiffness: Vec3,
    pub angular_damping: Vec3,
    pub use_linear_reference_frame_a: bool,
}

impl GenericConstraint {
    /// Resolve a joint descriptor into engine-space constraint parameters.
    /// Endpoint names must already be stripped of role suffixes.
    pub fn new(body_a: String, body_b: String, joint: &JointDesc) -> Self {
        let (linear_lower, linear_upper) = resolve_axes(limit_axes(&joint.linear_limits), false);
        let (angular_lower, angular_upper) = resolve_axes(limit_axes(&joint.angular_limits), false);
        let (linear_stiffness, linear_damping) =
            resolve_axes(spring_axes(&joint.linear_springs), true);
        let (angular_stiffness, angular_damping) =
            resolve_axes(spring_axes(&joint.angular_springs), true);
        Self {
            body_a,
            body_b,
            linear_lower,
            linear_upper,
            angular_lower,
            angular_upper,
            linear_stiffness,
            linear_damping,
            angular_stiffness,
            angular_damping,
            use_linear_reference_frame_a: false,
        }
    }

    pub fn write_xml(&self, out: &mut String) {
        out.push_str(&format!(
            "    <generic-constraint bodyA=\"{}\" bodyB=\"{}\">\n",
            xml_escape(&self.body_a),
            xml_escape(&self.body_b)
        ));
        out.push_str(&format!(
            "        <useLinearReferenceFrameA>{}</useLinearReferenceFrameA>\n",
            self.use_linear_reference_frame_a
        ));
        write_axis_vector(out, "linearLowerLimit", self.linear_lower);
        write_axis_vector(out, "linearUpperLimit", self.linear_upper);
        write_axis_vector(out, "angularLowerLimit", self.angular_lower);
        write_axis_vector(out, "angularUpperLimit", self.angular_upper);
        write_axis_vector(out, "linearStiffness", self.linear_stiffness);
        write_axis_vector(out, "angularStiffness", self.angular_stiffness);
        write_axis_vector(out, "linearDamping", self.linear_damping);
        write_axis_vector(out, "angularDamping", self.angular_damping);
        out.push_str("        <linearEquilibrium x=\"0\" y=\"0\" z=\"0\" />\n");
        out.push_str("        <angularEquilibrium x=\"0\" y=\"0\" z=\"0\" />\n");
        out.push_str("        <linearBounce x=\"0\" y=\"0\" z=\"0\" />\n");
        out.push_str("        <angularBounce x=\"0\" y=\"0\" z=\"0\" />\n");
        out.push_str("    </generic-constraint>\n\n");
    }
}

fn write_axis_vector(out: &mut String, element: &str, v: Vec3) {
    out.push_str(&format!(
        "        <{element} x=\"{}\" y=\"{}\" z=\"{}\" />\n",
        fmt_decimal(v.x),
        fmt_decimal(v.y),
        fmt_decimal(v.z)
    ));
}

fn limit_axes(axes: &[LimitAxis; 3]) -> [(bool, f32, f32); 3] {
    axes.map(|a| (a.enabled, a.lower, a.upper))
}

fn spring_axes(axes: &[SpringAxis; 3]) -> [(bool, f32, f32); 3] {
    axes.map(|a| (a.enabled, a.stiffness, a.damping))
}

/// Resolve one axis table into a pair of engine-space vectors.
///
/// Disabled axes contribute exact zeros to both vectors; enabled axes copy
/// their value pair. Both vectors are then rotated into engine space.
/// `magnitudes` additionally forces every component non-negative — spring
/// stiffness/damping are directionless, so a sign flip introduced by the
/// rotation must not leak into the document. Limit bounds are left signed.
fn resolve_axes(axes: [(bool, f32, f32); 3], magnitudes: bool) -> (Vec3, Vec3) {
    let mut first = Vec3::ZERO;
    let mut second = Vec3::ZERO;
    for (i, (enabled, a, b)) in axes.into_iter().enumerate() {
        if enabled {
            first[i] = a;
            second[i] = b;
        }
    }
    let mut first = to_engine_space(first);
    let mut second = to_engine_space(second);
    if magnitudes {
        first = first.abs();
        second = second.abs();
    }
    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ShapeProps;

    fn driven_body(mass: f32) -> RigidBodyDesc {
        RigidBodyDesc {
            mass,
            ..RigidBodyDesc::new(BodyKind::Driven)
        }
    }

    #[test]
    fn test_static_set_strips_and_dedupes() {
        let mut set = StaticBoneSet::new();
        set.push("Root [Passive]");
        set.push("Pelvis [Passive]");
        set.push("Root [Passive]");
        assert_eq!(set.names(), ["Root", "Pelvis"]);
    }

    #[test]
    fn test_static_set_empty_is_error() {
        let set = StaticBoneSet::new();
        let mut out = String::new();
        assert!(matches!(
            set.write_xml(&mut out),
            Err(ExportError::EmptyStaticSet)
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_static_set_renders_defaults_then_bones() {
        let mut set = StaticBoneSet::new();
        set.push("Root [Passive]");
        set.push("Spine [Passive]");
        let mut out = String::new();
        set.write_xml(&mut out).unwrap();
        assert!(out.starts_with("    <bone-default>"));
        let root_pos = out.find("<bone name=\"Root\"/>").unwrap();
        let spine_pos = out.find("<bone name=\"Spine\"/>").unwrap();
        assert!(root_pos < spine_pos);
    }

    #[test]
    fn test_kinematic_bone_from_driven_body() {
        let bone = KinematicBone::from_object("Head [Active]", &driven_body(2.0));
        assert_eq!(bone.name, "Head");
        assert_eq!(bone.mass, 2.0);
        assert_eq!(bone.inertia, Vec3::splat(DEFAULT_INERTIA));
        assert_eq!(bone.gravity_factor, DEFAULT_GRAVITY_FACTOR);

        let mut out = String::new();
        bone.write_xml(&mut out);
        assert!(out.contains("<bone name=\"Head\">"));
        assert!(out.contains("<mass>2.0</mass>"));
        assert!(out.contains("<gravity-factor>1.0</gravity-factor>"));
    }

    #[test]
    #[should_panic(expected = "driven body")]
    fn test_kinematic_bone_rejects_fixed_body() {
        KinematicBone::from_object("Head", &RigidBodyDesc::new(BodyKind::Fixed));
    }

    #[test]
    fn test_collision_shape_defaults() {
        let mut body = RigidBodyDesc::new(BodyKind::Fixed);
        body.collision_margin = 0.2;
        let obj = SceneObject::new("Floor");
        let shape = CollisionShape::from_object(&obj, &body);
        assert_eq!(shape.name, "Floor");
        assert_eq!(shape.kind, ShapeKind::Vertex);
        assert_eq!(shape.margin, 0.2);
        assert_eq!(shape.penetration, DEFAULT_PENETRATION);
        assert_eq!(shape.sharing, Sharing::Private);
        assert_eq!(shape.tag, DEFAULT_SHAPE_TAG);
        assert_eq!(shape.no_collide_with.len(), DEFAULT_NO_COLLIDE_TAGS.len());
        assert!(shape.collide_with.is_empty());
    }

    #[test]
    fn test_collision_shape_overrides() {
        let body = RigidBodyDesc::new(BodyKind::Fixed);
        let mut obj = SceneObject::new("Chair");
        obj.props = ShapeProps {
            mesh_kind: Some(ShapeKind::Triangle),
            sharing: Some(Sharing::Public),
            tag: Some("furniture".to_string()),
            no_collide_with: vec!["hair".to_string()],
            collide_with: vec!["cloak".to_string()],
        };
        let shape = CollisionShape::from_object(&obj, &body);

        let mut out = String::new();
        shape.write_xml(&mut out);
        assert!(out.starts_with("    <per-triangle-shape name=\"Chair\">"));
        assert!(out.contains("<shared>public</shared>"));
        assert!(out.contains("<tag>furniture</tag>"));
        assert!(out.contains("<no-collide-with-tag>hair</no-collide-with-tag>"));
        // Collide tags come from the collide list, not the no-collide one
        assert!(out.contains("<collide-with-tag>cloak</collide-with-tag>"));
        assert!(out.trim_end().ends_with("</per-triangle-shape>"));
    }

    #[test]
    fn test_disabled_axes_resolve_to_zero() {
        let mut joint = JointDesc::default();
        // Raw garbage on disabled axes must not survive resolution
        joint.linear_limits[0] = LimitAxis {
            enabled: false,
            lower: -9.0,
            upper: 9.0,
        };
        let constraint = GenericConstraint::new("A".into(), "B".into(), &joint);
        assert_eq!(constraint.linear_lower, Vec3::ZERO);
        assert_eq!(constraint.linear_upper, Vec3::ZERO);
        assert_eq!(constraint.angular_lower, Vec3::ZERO);
        assert_eq!(constraint.linear_stiffness, Vec3::ZERO);
    }

    #[test]
    fn test_enabled_limit_axis_is_rotated() {
        let mut joint = JointDesc::default();
        joint.linear_limits[1] = LimitAxis::new(-1.0, 2.0);
        let constraint = GenericConstraint::new("A".into(), "B".into(), &joint);
        // Editor Y maps to engine -Z, bounds stay signed
        assert_eq!(constraint.linear_lower, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(constraint.linear_upper, Vec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn test_spring_magnitudes_are_non_negative() {
        let mut joint = JointDesc::default();
        joint.angular_springs[1] = SpringAxis::new(50.0, 5.0);
        joint.linear_springs[2] = SpringAxis::new(-10.0, 1.0);
        let constraint = GenericConstraint::new("A".into(), "B".into(), &joint);
        // Editor Y lands on engine Z with a sign flip; abs undoes it
        assert_eq!(constraint.angular_stiffness, Vec3::new(0.0, 0.0, 50.0));
        assert_eq!(constraint.angular_damping, Vec3::new(0.0, 0.0, 5.0));
        // Negative raw stiffness is clamped to a magnitude as well
        assert_eq!(constraint.linear_stiffness, Vec3::new(0.0, 10.0, 0.0));
        assert!(constraint.linear_damping.min_element() >= 0.0);
    }

    #[test]
    fn test_constraint_renders_lower_bounds_in_lower_slots() {
        let mut joint = JointDesc::default();
        joint.linear_limits[0] = LimitAxis::new(-3.0, 4.0);
        let constraint = GenericConstraint::new("A".into(), "B".into(), &joint);
        let mut out = String::new();
        constraint.write_xml(&mut out);
        assert!(out.contains("<generic-constraint bodyA=\"A\" bodyB=\"B\">"));
        assert!(out.contains("<useLinearReferenceFrameA>false</useLinearReferenceFrameA>"));
        assert!(out.contains("<linearLowerLimit x=\"-3.0\" y=\"0.0\" z=\"0.0\" />"));
        assert!(out.contains("<linearUpperLimit x=\"4.0\" y=\"0.0\" z=\"0.0\" />"));
    }
}
