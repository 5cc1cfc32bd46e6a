//! Scene classification
//!
//! Walks one scene snapshot and partitions its objects into the four
//! physics entity collections. All naming-convention parsing happens here,
//! once, at ingestion; downstream code only sees typed roles and stripped
//! names.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::constants::{
    ACTIVE_SUFFIX, ACTIVES_GROUP_MARKER, CONTAINER_SUFFIX, JOINTS_GROUP_MARKER, PASSIVE_SUFFIX,
    PASSIVES_GROUP_MARKER, RIGID_BODY_CONTAINER,
};
use crate::entity::{CollisionShape, GenericConstraint, KinematicBone, StaticBoneSet};
use crate::export::{Diagnostic, ExportError};
use crate::scene::{BodyKind, SceneNode, SceneObject};

/// Function of a sub-group inside an armature group, recognized by a
/// marker substring in its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRole {
    Passives,
    Actives,
    Joints,
}

impl GroupRole {
    /// Containment match, not exact match: "Foo [Actives] Bar" is an
    /// Actives group.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.contains(PASSIVES_GROUP_MARKER) {
            Some(Self::Passives)
        } else if name.contains(ACTIVES_GROUP_MARKER) {
            Some(Self::Actives)
        } else if name.contains(JOINTS_GROUP_MARKER) {
            Some(Self::Joints)
        } else {
            None
        }
    }
}

/// Strip object-level role suffixes so the exported identifier matches the
/// engine-side bone name. Bone names and constraint endpoint names go
/// through this same function, so constraint references line up exactly.
pub fn strip_role_suffixes(name: &str) -> String {
    name.replace(PASSIVE_SUFFIX, "").replace(ACTIVE_SUFFIX, "")
}

/// Entity collections produced by one classification pass
#[derive(Debug, Clone, Default)]
pub struct Classified {
    pub statics: StaticBoneSet,
    pub kinematics: Vec<KinematicBone>,
    pub constraints: Vec<GenericConstraint>,
    pub shapes: Vec<CollisionShape>,
    /// Non-fatal conditions, in discovery order
    pub diagnostics: Vec<Diagnostic>,
}

/// Classify one scene snapshot.
///
/// The dedicated container is processed first; every other top-level
/// subtree (and the scene's own object list) is then scanned for
/// incidental collision geometry.
pub fn classify(scene: &SceneNode) -> Result<Classified, ExportError> {
    let mut out = Classified::default();

    // Constraint endpoints may reference any object in the scene
    let known_objects: HashSet<&str> = scene
        .descendants()
        .flat_map(|node| node.objects.iter())
        .map(|obj| obj.name.as_str())
        .collect();

    if let Some(container) = scene
        .children
        .iter()
        .find(|child| child.name == RIGID_BODY_CONTAINER)
    {
        for armature in &container.children {
            classify_armature(armature, &known_objects, &mut out)?;
        }
    }

    for top in scene
        .children
        .iter()
        .filter(|child| child.name != RIGID_BODY_CONTAINER)
    {
        for node in top.descendants() {
            for obj in &node.objects {
                collect_incidental(obj, &mut out);
            }
        }
    }
    for obj in &scene.objects {
        collect_incidental(obj, &mut out);
    }

    debug!(
        statics = out.statics.len(),
        kinematics = out.kinematics.len(),
        constraints = out.constraints.len(),
        shapes = out.shapes.len(),
        "scene classified"
    );
    Ok(out)
}

/// One immediate child of the container is one armature setup.
fn classify_armature(
    armature: &SceneNode,
    known_objects: &HashSet<&str>,
    out: &mut Classified,
) -> Result<(), ExportError> {
    let armature_name = armature.name.replace(CONTAINER_SUFFIX, "");
    debug!(armature = %armature_name, "classifying armature group");

    for group in &armature.children {
        match GroupRole::from_name(&group.name) {
            Some(GroupRole::Passives) => {
                for obj in &group.objects {
                    out.statics.push(&obj.name);
                }
            }
            Some(GroupRole::Actives) => {
                for obj in &group.objects {
                    match &obj.body {
                        Some(body) if body.kind == BodyKind::Driven => {
                            out.kinematics.push(KinematicBone::from_object(&obj.name, body));
                        }
                        other => {
                            warn!(
                                object = %obj.name,
                                "object in an Actives group without a driven rigid body, skipping"
                            );
                            out.diagnostics.push(Diagnostic::MisclassifiedBody {
                                object: obj.name.clone(),
                                expected: BodyKind::Driven,
                                found: other.as_ref().map(|b| b.kind),
                            });
                        }
                    }
                }
            }
            Some(GroupRole::Joints) => {
                for obj in &group.objects {
                    // An empty joint slot is fine while authoring
                    let Some(joint) = &obj.joint else { continue };
                    let body_a = resolve_endpoint(&obj.name, joint.body_a.as_deref(), known_objects)?;
                    let body_b = resolve_endpoint(&obj.name, joint.body_b.as_deref(), known_objects)?;
                    out.constraints
                        .push(GenericConstraint::new(body_a, body_b, joint));
                }
            }
            None => {}
        }
    }
    Ok(())
}

/// A constraint with a dangling endpoint is unexportable.
fn resolve_endpoint(
    constraint: &str,
    endpoint: Option<&str>,
    known_objects: &HashSet<&str>,
) -> Result<String, ExportError> {
    match endpoint {
        Some(name) if known_objects.contains(name) => Ok(strip_role_suffixes(name)),
        other => Err(ExportError::DanglingConstraintEndpoint {
            constraint: constraint.to_string(),
            endpoint: other.unwrap_or_default().to_string(),
        }),
    }
}

/// Rigid bodies outside the dedicated container are collision geometry.
fn collect_incidental(obj: &SceneObject, out: &mut Classified) {
    match &obj.body {
        Some(body) if body.kind == BodyKind::Fixed => {
            out.shapes.push(CollisionShape::from_object(obj, body));
        }
        Some(body) => {
            // Very likely a modeling mistake, not worth aborting the export
            warn!(
                object = %obj.name,
                "found a driven rigid body outside the {} container; set it to fixed to export it as a collision mesh",
                RIGID_BODY_CONTAINER
            );
            out.diagnostics.push(Diagnostic::MisclassifiedBody {
                object: obj.name.clone(),
                expected: BodyKind::Fixed,
                found: Some(body.kind),
            });
        }
        None => {}
    }
}
