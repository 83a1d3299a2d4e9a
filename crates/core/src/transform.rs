//! Per-pass matrices: perspective projection, cube model-view, and the
//! normal matrix used for lighting.

use glam::{Mat4, Vec3};

/// Vertical field of view in radians (45 degrees).
pub const FIELD_OF_VIEW: f32 = std::f32::consts::FRAC_PI_4;
/// Near clip plane distance.
pub const Z_NEAR: f32 = 0.1;
/// Far clip plane distance.
pub const Z_FAR: f32 = 100.0;
/// Distance the cube is pushed away from the eye along -Z.
pub const CUBE_DISTANCE: f32 = 6.0;

/// Width over height, falling back to 1.0 for a collapsed target.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

/// The three matrices uploaded as uniforms for one draw pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transforms {
    pub projection: Mat4,
    pub model_view: Mat4,
    pub normal: Mat4,
}

impl Transforms {
    /// Builds the matrices for a cube rotated by `angle` about Z and by
    /// `angle * spin` about Y, viewed with the given aspect ratio.
    pub fn new(angle: f32, spin: f32, aspect: f32) -> Self {
        let projection = Mat4::perspective_rh_gl(FIELD_OF_VIEW, aspect, Z_NEAR, Z_FAR);
        let model_view = Mat4::from_translation(Vec3::new(0.0, 0.0, -CUBE_DISTANCE))
            * Mat4::from_rotation_z(angle)
            * Mat4::from_rotation_y(angle * spin);
        let normal = model_view.inverse().transpose();

        Self {
            projection,
            model_view,
            normal,
        }
    }

    /// Column-major arrays ready for `uniformMatrix4fv`, in the order
    /// projection, model-view, normal.
    pub fn to_cols_arrays(&self) -> [[f32; 16]; 3] {
        [
            self.projection.to_cols_array(),
            self.model_view.to_cols_array(),
            self.normal.to_cols_array(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn aspect_ratio_divides_width_by_height() {
        assert!((aspect_ratio(640, 480) - 4.0 / 3.0).abs() < 1e-6);
        assert_eq!(aspect_ratio(256, 256), 1.0);
    }

    #[test]
    fn aspect_ratio_of_collapsed_target_is_one() {
        assert_eq!(aspect_ratio(300, 0), 1.0);
        assert_eq!(aspect_ratio(0, 150), 1.0);
    }

    #[test]
    fn zero_angle_model_view_is_pure_translation() {
        let t = Transforms::new(0.0, 0.7, 1.0);
        let origin = t.model_view.transform_point3(Vec3::ZERO);
        assert!(approx_eq(origin, Vec3::new(0.0, 0.0, -6.0)), "got {origin}");
        let x = t.model_view.transform_vector3(Vec3::X);
        assert!(approx_eq(x, Vec3::X), "got {x}");
    }

    #[test]
    fn z_rotation_applies_before_y_spin() {
        // M = T * Rz(a) * Ry(a * spin): a vector on the Y axis is unaffected
        // by the Y spin and then rotated about Z.
        let angle = std::f32::consts::FRAC_PI_2;
        let t = Transforms::new(angle, 0.3, 1.0);
        let y = t.model_view.transform_vector3(Vec3::Y);
        assert!(approx_eq(y, Vec3::new(-1.0, 0.0, 0.0)), "got {y}");
    }

    #[test]
    fn projection_maps_near_and_far_planes_to_gl_depth_range() {
        let t = Transforms::new(0.0, 0.0, 1.0);
        let near = t.projection * Vec4::new(0.0, 0.0, -Z_NEAR, 1.0);
        let far = t.projection * Vec4::new(0.0, 0.0, -Z_FAR, 1.0);
        assert!((near.z / near.w + 1.0).abs() < 1e-4, "near ndc z: {}", near.z / near.w);
        assert!((far.z / far.w - 1.0).abs() < 1e-4, "far ndc z: {}", far.z / far.w);
    }

    #[test]
    fn projection_has_45_degree_vertical_fov() {
        let t = Transforms::new(0.0, 0.0, 1.0);
        // A point on the top edge of the frustum at distance d sits at
        // y = d * tan(fov / 2) and lands on ndc y = 1.
        let d = 6.0;
        let top = Vec4::new(0.0, d * (FIELD_OF_VIEW / 2.0).tan(), -d, 1.0);
        let clip = t.projection * top;
        assert!((clip.y / clip.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn normal_matrix_rotates_normals_like_the_model_view() {
        let t = Transforms::new(1.3, 0.7, 1.5);
        for n in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::NEG_Z] {
            // The vertex shader multiplies vec4(normal, 1.0).
            let lit = (t.normal * n.extend(1.0)).truncate();
            let expected = t.model_view.transform_vector3(n);
            assert!(approx_eq(lit, expected), "normal {n}: {lit} vs {expected}");
        }
    }

    #[test]
    fn cols_arrays_are_in_upload_order() {
        let t = Transforms::new(0.4, 0.7, 2.0);
        let [p, mv, n] = t.to_cols_arrays();
        assert_eq!(p, t.projection.to_cols_array());
        assert_eq!(mv, t.model_view.to_cols_array());
        assert_eq!(n, t.normal.to_cols_array());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn cube_center_stays_in_front_of_the_eye(
                angle in -100.0_f32..100.0,
                spin in 0.0_f32..1.0
            ) {
                let t = Transforms::new(angle, spin, 1.0);
                let center = t.model_view.transform_point3(Vec3::ZERO);
                prop_assert!(approx_eq(center, Vec3::new(0.0, 0.0, -CUBE_DISTANCE)));
            }

            #[test]
            fn rotation_preserves_lengths(angle in -100.0_f32..100.0, spin in 0.0_f32..1.0) {
                let t = Transforms::new(angle, spin, 1.0);
                let v = t.model_view.transform_vector3(Vec3::new(1.0, -1.0, 1.0));
                prop_assert!((v.length() - 3.0_f32.sqrt()).abs() < 1e-4);
            }
        }
    }
}
