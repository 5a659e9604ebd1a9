//! Lighting State
//!
//! One animated directional light plus a bounded list of point lights. The
//! list is capped at [`MAX_POINT_LIGHTS`] because the lighting shader compiles
//! a fixed-size light array; exceeding it is a [`RenderError::LightCount`]
//! error at insertion time, not a silent truncation at upload time.
//!
//! Lighting state is mutable between frames only — passes read it through a
//! shared reference during prepare/run.

use glam::Vec3;
use smallvec::SmallVec;

use crate::errors::{RenderError, Result};

/// Maximum number of point lights the lighting shader supports.
pub const MAX_POINT_LIGHTS: usize = 4;

/// A directional light with classic ambient/diffuse/specular terms.
///
/// `direction` points *from the scene toward the light* (the vector used to
/// place the shadow camera).
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

/// A point light with distance attenuation and an HDR marker color used to
/// render its in-scene indicator sphere.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    /// (constant, linear, quadratic) attenuation coefficients.
    pub attenuation: Vec3,
    /// Emissive color of the marker sphere; intentionally above 1.0 so the
    /// bloom pass picks it up.
    pub marker_color: Vec3,
}

/// All lights affecting the scene for one frame.
pub struct LightingState {
    pub directional: DirectionalLight,
    points: SmallVec<[PointLight; MAX_POINT_LIGHTS]>,
}

impl LightingState {
    /// Creates a lighting state with only a directional light.
    #[must_use]
    pub fn new(directional: DirectionalLight) -> Self {
        Self {
            directional,
            points: SmallVec::new(),
        }
    }

    /// The demo lighting rig: a white orbiting sun and four colored point
    /// lights with HDR markers.
    #[must_use]
    pub fn demo() -> Self {
        let mut state = Self::new(DirectionalLight {
            direction: Vec3::new(0.0, 4.0, 5.0).normalize(),
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::splat(0.5),
            specular: Vec3::splat(1.0),
        });

        let attenuation = Vec3::new(1.0, 0.14, 0.07);
        let rig = [
            (
                Vec3::new(0.7, 3.0, 2.0),
                Vec3::splat(0.2),
                Vec3::splat(0.3),
                Vec3::splat(0.5),
                Vec3::splat(5.0),
            ),
            (
                Vec3::new(2.3, 3.0, -4.0),
                Vec3::new(0.2, 0.0, 0.0),
                Vec3::new(0.3, 0.0, 0.0),
                Vec3::new(0.5, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 0.0),
            ),
            (
                Vec3::new(-4.0, 2.0, -12.0),
                Vec3::new(0.0, 0.2, 0.0),
                Vec3::new(0.0, 0.3, 0.0),
                Vec3::new(0.0, 0.5, 0.0),
                Vec3::new(0.0, 15.0, 0.0),
            ),
            (
                Vec3::new(0.0, 3.0, -3.0),
                Vec3::new(0.0, 0.0, 0.2),
                Vec3::new(0.0, 0.0, 0.3),
                Vec3::new(0.0, 0.0, 0.5),
                Vec3::new(0.0, 0.0, 15.0),
            ),
        ];

        for (position, ambient, diffuse, specular, marker_color) in rig {
            // The demo rig never exceeds the shader maximum.
            let _ = state.push_point(PointLight {
                position,
                ambient,
                diffuse,
                specular,
                attenuation,
                marker_color,
            });
        }

        state
    }

    /// Adds a point light, rejecting lights beyond the shader's compiled-in
    /// maximum.
    pub fn push_point(&mut self, light: PointLight) -> Result<()> {
        if self.points.len() >= MAX_POINT_LIGHTS {
            return Err(RenderError::LightCount {
                count: self.points.len() + 1,
                max: MAX_POINT_LIGHTS,
            });
        }
        self.points.push(light);
        Ok(())
    }

    /// The active point lights, at most [`MAX_POINT_LIGHTS`].
    #[must_use]
    pub fn points(&self) -> &[PointLight] {
        &self.points
    }

    /// Advances the directional light along its orbit.
    pub fn animate(&mut self, elapsed: f32) {
        self.directional.direction =
            Vec3::new(elapsed.sin() * 5.0, 4.0, elapsed.cos() * 5.0).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_rig_has_four_point_lights() {
        let state = LightingState::demo();
        assert_eq!(state.points().len(), 4);
    }

    #[test]
    fn point_lights_are_bounded() {
        let mut state = LightingState::demo();
        let extra = state.points()[0];
        let err = state.push_point(extra);
        assert!(matches!(
            err,
            Err(RenderError::LightCount { count: 5, max: 4 })
        ));
        assert_eq!(state.points().len(), 4);
    }

    #[test]
    fn animated_direction_stays_normalized() {
        let mut state = LightingState::demo();
        for step in 0..32 {
            state.animate(step as f32 * 0.4);
            assert!((state.directional.direction.length() - 1.0).abs() < 1e-5);
            assert!(state.directional.direction.y > 0.0, "sun never dips below the horizon");
        }
    }
}
