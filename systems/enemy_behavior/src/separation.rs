use glam::Vec2;
use wave_arena_core::Enemy;

/// Pushes overlapping grounded enemies apart.
///
/// Every overlapping pair is pushed along the axis of smaller penetration,
/// each enemy moving half of `overlap * strength`. Drones and bosses are left
/// alone, as are enemies that are dead or scheduled for removal.
pub fn separate(enemies: &mut [Enemy], strength: f32) {
    if strength <= 0.0 {
        return;
    }

    for index in 1..enemies.len() {
        let (before, rest) = enemies.split_at_mut(index);
        let current = &mut rest[0];
        if !participates(current) {
            continue;
        }
        for other in before.iter_mut().filter(|other| participates(other)) {
            let Some(push) = push_apart(other, current, strength) else {
                continue;
            };
            other.position -= push;
            current.position += push;
        }
    }
}

fn participates(enemy: &Enemy) -> bool {
    enemy.is_alive() && enemy.kind.separates()
}

/// Displacement applied to `second` (and negated for `first`).
fn push_apart(first: &Enemy, second: &Enemy, strength: f32) -> Option<Vec2> {
    let (a, b) = (first.aabb(), second.aabb());
    if !a.intersects(&b) {
        return None;
    }
    let overlap = a.overlap(&b);
    let offset = second.center() - first.center();
    let push = if overlap.x < overlap.y {
        let sign = if offset.x < 0.0 { -1.0 } else { 1.0 };
        Vec2::new(overlap.x * sign, 0.0)
    } else {
        let sign = if offset.y < 0.0 { -1.0 } else { 1.0 };
        Vec2::new(0.0, overlap.y * sign)
    };
    Some(push * strength * 0.5)
}
