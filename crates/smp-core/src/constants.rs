//! Naming-convention markers and entity defaults for smp-core

/// Reserved name of the top-level group holding all rigid body bone setups
pub const RIGID_BODY_CONTAINER: &str = "RigidBodyBones";

/// Group-name marker for static bone groups (matched by containment)
pub const PASSIVES_GROUP_MARKER: &str = " [Passives]";

/// Group-name marker for kinematic bone groups (matched by containment)
pub const ACTIVES_GROUP_MARKER: &str = " [Actives]";

/// Group-name marker for constraint groups (matched by containment)
pub const JOINTS_GROUP_MARKER: &str = " [Joints]";

/// Object-name suffix marking a static bone, stripped before export
pub const PASSIVE_SUFFIX: &str = " [Passive]";

/// Object-name suffix marking a kinematic bone, stripped before export
pub const ACTIVE_SUFFIX: &str = " [Active]";

/// Decoration on armature group names inside the container
pub const CONTAINER_SUFFIX: &str = " [Container]";

/// Default collision margin when no body descriptor supplies one
pub const DEFAULT_SHAPE_MARGIN: f32 = 0.1;

/// Default collision shape penetration depth
pub const DEFAULT_PENETRATION: f32 = 0.1;

/// Default primary tag for collision shapes
pub const DEFAULT_SHAPE_TAG: &str = "collision_mesh";

/// Default no-collide tag list for collision shapes
pub const DEFAULT_NO_COLLIDE_TAGS: [&str; 5] =
    ["hair", "head", "hands", "body", "collision_mesh"];

/// Default per-axis inertia for kinematic bones
pub const DEFAULT_INERTIA: f32 = 1.0;

/// Default collision margin multiplier for kinematic bones
pub const DEFAULT_MARGIN_MULTIPLIER: f32 = 1.0;

/// Default rolling friction for kinematic bones
pub const DEFAULT_ROLLING_FRICTION: f32 = 0.0;

/// Default gravity factor for kinematic bones
pub const DEFAULT_GRAVITY_FACTOR: f32 = 1.0;
