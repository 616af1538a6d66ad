use glam::Vec2;
use overworld_core::{Aabb, ROOM_HEIGHT, ROOM_WIDTH};

/// Moves a body by `displacement`, one axis at a time, stopping at solids.
///
/// Solids the body already overlaps before a step are ignored for that step
/// so a body placed inside geometry can walk out of it.
pub(crate) fn step_body(position: Vec2, size: Vec2, displacement: Vec2, solids: &[Aabb]) -> Vec2 {
    let half = size * 0.5;
    let mut current = position;

    if displacement.x != 0.0 {
        let before = Aabb::from_center(current, size);
        let mut x = current.x + displacement.x;
        let moved = Aabb::from_center(Vec2::new(x, current.y), size);
        for solid in solids {
            if before.intersects(solid) || !moved.intersects(solid) {
                continue;
            }
            x = if displacement.x > 0.0 {
                x.min(solid.min().x - half.x)
            } else {
                x.max(solid.max().x + half.x)
            };
        }
        current.x = x;
    }

    if displacement.y != 0.0 {
        let before = Aabb::from_center(current, size);
        let mut y = current.y + displacement.y;
        let moved = Aabb::from_center(Vec2::new(current.x, y), size);
        for solid in solids {
            if before.intersects(solid) || !moved.intersects(solid) {
                continue;
            }
            y = if displacement.y > 0.0 {
                y.min(solid.min().y - half.y)
            } else {
                y.max(solid.max().y + half.y)
            };
        }
        current.y = y;
    }

    current
}

/// Keeps a body of `size` fully inside the room.
pub(crate) fn clamp_to_room(position: Vec2, size: Vec2) -> Vec2 {
    let half = size * 0.5;
    position.clamp(half, Vec2::new(ROOM_WIDTH, ROOM_HEIGHT) - half)
}

/// Keeps a body's centre inside the room; its edges may still overhang.
pub(crate) fn clamp_center_to_room(position: Vec2) -> Vec2 {
    position.clamp(Vec2::ZERO, Vec2::new(ROOM_WIDTH, ROOM_HEIGHT))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: Vec2 = Vec2::new(16.0, 16.0);

    #[test]
    fn free_movement_applies_full_displacement() {
        let next = step_body(Vec2::new(100.0, 100.0), BODY, Vec2::new(3.0, -2.0), &[]);
        assert_eq!(next, Vec2::new(103.0, 98.0));
    }

    #[test]
    fn bodies_stop_flush_against_solids() {
        let wall = Aabb::new(Vec2::new(112.0, 0.0), Vec2::new(128.0, 240.0));
        let next = step_body(Vec2::new(100.0, 100.0), BODY, Vec2::new(10.0, 0.0), &[wall]);
        assert_eq!(next, Vec2::new(104.0, 100.0));
    }

    #[test]
    fn blocked_axis_does_not_stop_the_other() {
        let wall = Aabb::new(Vec2::new(112.0, 0.0), Vec2::new(128.0, 240.0));
        let next = step_body(Vec2::new(104.0, 100.0), BODY, Vec2::new(2.0, 2.0), &[wall]);
        assert_eq!(next, Vec2::new(104.0, 102.0));
    }

    #[test]
    fn bodies_inside_geometry_can_leave() {
        let wall = Aabb::new(Vec2::new(240.0, 96.0), Vec2::new(256.0, 112.0));
        let next = step_body(Vec2::new(248.0, 100.0), BODY, Vec2::new(-2.0, 0.0), &[wall]);
        assert_eq!(next, Vec2::new(246.0, 100.0));
    }

    #[test]
    fn clamping_keeps_bodies_in_the_room() {
        assert_eq!(clamp_to_room(Vec2::new(-5.0, 300.0), BODY), Vec2::new(8.0, 232.0));
        assert_eq!(clamp_to_room(Vec2::new(50.0, 60.0), BODY), Vec2::new(50.0, 60.0));
    }

    #[test]
    fn centre_clamping_leaves_the_doorway_strip_reachable() {
        assert_eq!(
            clamp_center_to_room(Vec2::new(263.5, 120.0)),
            Vec2::new(256.0, 120.0)
        );
        assert_eq!(
            clamp_center_to_room(Vec2::new(-2.0, -9.0)),
            Vec2::new(0.0, 0.0)
        );
        assert_eq!(
            clamp_center_to_room(Vec2::new(253.0, 239.0)),
            Vec2::new(253.0, 239.0)
        );
    }
}
