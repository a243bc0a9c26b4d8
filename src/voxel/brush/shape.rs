use glam::Vec3;
use crate::math::Aabb;

/// Axis for oriented shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Get unit vector for this axis
    pub fn to_vec3(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// How a brush's weight fades from its surface to its core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Falloff {
    /// Full weight anywhere inside
    Constant,
    /// Weight grows linearly with depth below the surface
    #[default]
    Linear,
    /// Smoothstep of the linear weight
    Smooth,
}

impl Falloff {
    /// Weight for a normalized depth `t` in `[0, 1]`
    pub fn weight(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Falloff::Constant => 1.0,
            Falloff::Linear => t,
            Falloff::Smooth => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Brush shapes with SDF evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrushShape {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
    Capsule { radius: f32, half_height: f32, axis: Axis },
    Cylinder { radius: f32, half_height: f32, axis: Axis },
}

impl BrushShape {
    /// Signed distance from point to surface (negative = inside)
    /// Point is in shape space (shape centered at origin)
    pub fn sdf(&self, local_point: Vec3) -> f32 {
        match self {
            BrushShape::Sphere { radius } => {
                local_point.length() - radius
            }
            BrushShape::Box { half_extents } => {
                let q = local_point.abs() - *half_extents;
                q.max(Vec3::ZERO).length() + q.x.max(q.y.max(q.z)).min(0.0)
            }
            BrushShape::Capsule { radius, half_height, axis } => {
                let axis_vec = axis.to_vec3();
                let t = local_point.dot(axis_vec).clamp(-*half_height, *half_height);
                (local_point - axis_vec * t).length() - radius
            }
            BrushShape::Cylinder { radius, half_height, axis } => {
                let axis_vec = axis.to_vec3();
                let h = local_point.dot(axis_vec);
                let d_radial = (local_point - axis_vec * h).length() - radius;
                let d_height = h.abs() - half_height;
                let outside = Vec3::new(d_radial.max(0.0), d_height.max(0.0), 0.0).length();
                let inside = d_radial.max(d_height).min(0.0);
                outside + inside
            }
        }
    }

    /// Check if point is strictly inside the shape
    pub fn contains_point(&self, local_point: Vec3) -> bool {
        self.sdf(local_point) < 0.0
    }

    /// Radius capability. Only spheres define one; the cross-chunk sculpt
    /// treats `None` as zero reach.
    pub fn radius(&self) -> Option<f32> {
        match self {
            BrushShape::Sphere { radius } => Some(*radius),
            _ => None,
        }
    }

    /// Depth below the surface at which the falloff reaches full weight
    pub fn core_depth(&self) -> f32 {
        match self {
            BrushShape::Sphere { radius } => *radius,
            BrushShape::Box { half_extents } => half_extents.min_element(),
            BrushShape::Capsule { radius, .. } => *radius,
            BrushShape::Cylinder { radius, half_height, .. } => radius.min(*half_height),
        }
    }

    /// Weight in `[0, 1]` this shape applies at a shape-space point.
    /// Zero on and outside the surface.
    pub fn influence(&self, local_point: Vec3, falloff: Falloff) -> f32 {
        let depth = -self.sdf(local_point);
        if depth <= 0.0 {
            return 0.0;
        }
        let core = self.core_depth();
        let t = if core > 0.0 { depth / core } else { 1.0 };
        falloff.weight(t)
    }

    /// Get shape-space AABB (shape centered at origin)
    pub fn local_bounds(&self) -> Aabb {
        let half = match self {
            BrushShape::Sphere { radius } => Vec3::splat(*radius),
            BrushShape::Box { half_extents } => *half_extents,
            BrushShape::Capsule { radius, half_height, axis } => {
                axis.to_vec3() * *half_height + Vec3::splat(*radius)
            }
            BrushShape::Cylinder { radius, half_height, axis } => {
                let axis_vec = axis.to_vec3();
                axis_vec * *half_height + (Vec3::ONE - axis_vec) * *radius
            }
        };
        Aabb::from_center_half_extent(Vec3::ZERO, half)
    }
}
