use glam::Vec2;

/// Axis-aligned rectangle anchored at its upper-left corner.
///
/// World space grows rightward along x and downward along y, matching the
/// host canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Upper-left corner of the rectangle.
    pub min: Vec2,
    /// Width and height of the rectangle.
    pub size: Vec2,
}

impl Aabb {
    /// Creates a rectangle from its upper-left corner and size.
    #[must_use]
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Creates a rectangle of the provided size centred on `center`.
    #[must_use]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    /// Lower-right corner of the rectangle.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Centre point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Bottom edge of the rectangle.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Reports whether the two rectangles overlap with a non-zero area.
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }

    /// Penetration depth along each axis; non-positive components mean no overlap.
    #[must_use]
    pub fn overlap(&self, other: &Aabb) -> Vec2 {
        let a_max = self.max();
        let b_max = other.max();
        Vec2::new(
            a_max.x.min(b_max.x) - self.min.x.max(other.min.x),
            a_max.y.min(b_max.y) - self.min.y.max(other.min.y),
        )
    }
}

/// Tests whether the segment from `start` to `end` touches `rect`.
///
/// Uses slab clipping so beams that pass entirely through the rectangle
/// without an endpoint inside it still register.
#[must_use]
pub fn segment_intersects_aabb(start: Vec2, end: Vec2, rect: &Aabb) -> bool {
    let delta = end - start;
    let rect_max = rect.max();
    let mut t_min = 0.0_f32;
    let mut t_max = 1.0_f32;

    for (origin, direction, low, high) in [
        (start.x, delta.x, rect.min.x, rect_max.x),
        (start.y, delta.y, rect.min.y, rect_max.y),
    ] {
        if direction.abs() <= f32::EPSILON {
            if origin < low || origin > high {
                return false;
            }
            continue;
        }

        let inverse = 1.0 / direction;
        let mut near = (low - origin) * inverse;
        let mut far = (high - origin) * inverse;
        if near > far {
            std::mem::swap(&mut near, &mut far);
        }
        t_min = t_min.max(near);
        t_max = t_max.min(far);
        if t_min > t_max {
            return false;
        }
    }

    true
}

/// Playable extents of the arena.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArenaBounds {
    /// Width of the arena in world units.
    pub width: f32,
    /// Height of the arena in world units.
    pub height: f32,
    /// Vertical coordinate of the ground surface.
    pub ground_y: f32,
}

impl ArenaBounds {
    /// Horizontal centre of the arena.
    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.width * 0.5
    }

    /// Reports whether `rect` still touches the arena grown by `margin` on every side.
    #[must_use]
    pub fn contains(&self, rect: &Aabb, margin: f32) -> bool {
        let max = rect.max();
        max.x >= -margin
            && rect.min.x <= self.width + margin
            && max.y >= -margin
            && rect.min.y <= self.height + margin
    }

    /// Clamps the upper-left corner of `rect` between the side walls and above the ground.
    ///
    /// The top edge is left open so entities may descend into the arena from above.
    #[must_use]
    pub fn clamp_to_floor(&self, rect: &Aabb) -> Vec2 {
        let max_x = (self.width - rect.size.x).max(0.0);
        let max_y = self.ground_y - rect.size.y;
        Vec2::new(rect.min.x.clamp(0.0, max_x), rect.min.y.min(max_y))
    }
}
