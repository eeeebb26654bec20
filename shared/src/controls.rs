//! First-person controls: direction keys to forces, mouse motion to view angles.
//!
//! Conventions
//! - Right-handed, +Y up. At `yaw = 0` the view looks down -Z.
//! - View orientation is stored as YXZ Euler angles: yaw about world +Y, then pitch about
//!   the local +X axis. Roll is always zero.
//! - Movement forces are planar. Pitch never tilts the push direction.

use crate::constants::{LOOK_SPEED, MOVE_SPEED, PITCH_LIMIT_RAD};
use nalgebra::{UnitQuaternion, Vector2, Vector3};
use std::f32::consts::{PI, TAU};

/// Direction keys held during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementInput {
    /// True when no direction key is held.
    #[inline]
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }
}

/// Camera view angles, integrated from relative mouse motion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LookController {
    /// Rotation about world +Y (radians), wrapped into `(-π, π]`.
    pub yaw: f32,
    /// Rotation about the local +X axis (radians), clamped to `[-π/2, π/2]`.
    pub pitch: f32,
}

impl LookController {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw: wrap_angle(yaw),
            pitch: pitch.clamp(-PITCH_LIMIT_RAD, PITCH_LIMIT_RAD),
        }
    }

    /// Integrate one frame of relative mouse motion (pixels).
    ///
    /// Moving the mouse right turns right (yaw decreases), moving it down looks down
    /// (pitch decreases). The step scales with `dt_seconds`.
    pub fn apply_mouse(&mut self, delta_px: Vector2<f32>, dt_seconds: f32) {
        let scale = LOOK_SPEED * dt_seconds.max(0.0);
        if scale == 0.0 || !delta_px.iter().all(|v| v.is_finite()) {
            return;
        }

        self.yaw = wrap_angle(self.yaw - delta_px.x * scale);
        self.pitch = (self.pitch - delta_px.y * scale).clamp(-PITCH_LIMIT_RAD, PITCH_LIMIT_RAD);
    }

    /// The view orientation: `Ry(yaw) * Rx(pitch)`.
    pub fn rotation(&self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.yaw)
            * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), self.pitch)
    }

    /// Recover view angles from a roll-free orientation produced by [`Self::rotation`].
    pub fn from_rotation(rotation: &UnitQuaternion<f32>) -> Self {
        // The local +X axis is untouched by pitch, so it carries the yaw even when
        // looking straight up or down.
        let right = rotation * Vector3::x();
        let forward = rotation * -Vector3::z();

        let yaw = (-right.z).atan2(right.x);
        let pitch = forward.y.clamp(-1.0, 1.0).asin();
        Self::new(yaw, pitch)
    }

    /// Horizontal unit vector the view faces.
    #[inline]
    pub fn forward_planar(&self) -> Vector3<f32> {
        let (sin, cos) = self.yaw.sin_cos();
        Vector3::new(-sin, 0.0, -cos)
    }

    /// Horizontal unit vector pointing to the viewer's left (`up × forward`).
    #[inline]
    pub fn left_planar(&self) -> Vector3<f32> {
        Vector3::y().cross(&self.forward_planar())
    }
}

/// Force to apply to the player body for this step.
///
/// Each held key contributes `MOVE_SPEED * mass` along its planar direction; opposite
/// keys cancel and diagonals add up.
pub fn movement_force(input: MovementInput, look: &LookController, mass: f32) -> Vector3<f32> {
    let forward = look.forward_planar();
    let left = look.left_planar();

    let mut direction = Vector3::zeros();
    if input.forward {
        direction += forward;
    }
    if input.backward {
        direction -= forward;
    }
    if input.left {
        direction += left;
    }
    if input.right {
        direction -= left;
    }

    direction * (MOVE_SPEED * mass.max(0.0))
}

/// Wrap an angle into `(-π, π]`.
#[inline]
pub fn wrap_angle(radians: f32) -> f32 {
    let wrapped = (radians + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1.0e-5;

    fn approx_vec(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).norm() < EPS
    }

    #[test]
    fn mouse_right_turns_right_and_down_looks_down() {
        let mut look = LookController::default();
        look.apply_mouse(Vector2::new(10.0, 5.0), 0.5);

        assert!((look.yaw - -1.0).abs() < EPS);
        assert!((look.pitch - -0.5).abs() < EPS);

        // Turning right from -Z heads toward +X.
        let f = look.forward_planar();
        assert!(f.x > 0.0 && f.z < 0.0);
    }

    #[test]
    fn pitch_is_clamped_at_vertical() {
        let mut look = LookController::default();
        look.apply_mouse(Vector2::new(0.0, -10_000.0), 1.0);
        assert!((look.pitch - FRAC_PI_2).abs() < EPS);

        look.apply_mouse(Vector2::new(0.0, 1.0e6), 1.0);
        assert!((look.pitch + FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn zero_dt_or_non_finite_motion_is_ignored() {
        let mut look = LookController::new(0.3, 0.1);
        look.apply_mouse(Vector2::new(100.0, 100.0), 0.0);
        look.apply_mouse(Vector2::new(f32::NAN, 1.0), 0.016);
        assert_eq!(look, LookController::new(0.3, 0.1));
    }

    #[test]
    fn yaw_wraps_into_half_open_range() {
        assert!((wrap_angle(3.0 * PI) - PI).abs() < EPS);
        assert!((wrap_angle(-PI) - PI).abs() < EPS);
        assert!((wrap_angle(TAU + 0.25) - 0.25).abs() < EPS);
        assert!((wrap_angle(-0.25) + 0.25).abs() < EPS);
    }

    #[test]
    fn rotation_looks_down_negative_z_by_default() {
        let look = LookController::default();
        let forward = look.rotation() * -Vector3::z();
        assert!(approx_vec(forward, -Vector3::z()));
    }

    #[test]
    fn rotation_round_trips_through_view_angles() {
        for &(yaw, pitch) in &[(0.0, 0.0), (1.2, -0.4), (-2.9, 0.7), (0.5, FRAC_PI_2)] {
            let look = LookController::new(yaw, pitch);
            let back = LookController::from_rotation(&look.rotation());
            assert!((back.yaw - look.yaw).abs() < 1.0e-3, "yaw {yaw}");
            assert!((back.pitch - look.pitch).abs() < 1.0e-3, "pitch {pitch}");
        }
    }

    #[test]
    fn left_is_left_of_forward() {
        let look = LookController::default();
        assert!(approx_vec(look.left_planar(), -Vector3::x()));

        let look = LookController::new(FRAC_PI_2, 0.0);
        assert!(approx_vec(look.forward_planar(), -Vector3::x()));
        assert!(approx_vec(look.left_planar(), Vector3::z()));
    }

    #[test]
    fn force_scales_with_mass_and_cancels() {
        let look = LookController::default();
        let forward = MovementInput {
            forward: true,
            ..Default::default()
        };
        let f = movement_force(forward, &look, 5.0);
        assert!(approx_vec(f, Vector3::new(0.0, 0.0, -25.0)));

        let both = MovementInput {
            forward: true,
            backward: true,
            left: true,
            right: true,
        };
        assert!(approx_vec(movement_force(both, &look, 5.0), Vector3::zeros()));
        assert!(movement_force(MovementInput::default(), &look, 5.0) == Vector3::zeros());
    }

    #[test]
    fn force_stays_planar_when_looking_straight_down() {
        let look = LookController::new(0.8, -FRAC_PI_2);
        let input = MovementInput {
            forward: true,
            right: true,
            ..Default::default()
        };
        let f = movement_force(input, &look, 5.0);
        assert_eq!(f.y, 0.0);
        // Forward plus strafe: two unit directions at right angles.
        assert!((f.norm() - 25.0 * 2.0_f32.sqrt()).abs() < 1.0e-3);
    }
}
