//! Editor-to-engine coordinate conversion

use glam::Vec3;

/// Remap a vector from the editor's Z-up basis into the engine's Y-up
/// basis: `(x, y, z) -> (x, z, -y)`.
///
/// This is a one-way convention change, not a reversible camera transform.
/// Axis reassignment and sign flip only, no scaling. When applied to
/// magnitude vectors (spring stiffness/damping) the caller must force the
/// result non-negative afterwards.
pub fn to_engine_space(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, -v.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_remap() {
        let v = to_engine_space(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(v, Vec3::new(1.0, 3.0, -2.0));
    }

    #[test]
    fn test_zero_is_preserved() {
        assert_eq!(to_engine_space(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_up_axis_maps_to_engine_up() {
        // Editor up is +Z, engine up is +Y
        assert_eq!(to_engine_space(Vec3::Z), Vec3::Y);
    }

    #[test]
    fn test_no_scaling() {
        let v = Vec3::new(-4.5, 0.25, 7.0);
        assert_eq!(to_engine_space(v).length_squared(), v.length_squared());
    }
}
