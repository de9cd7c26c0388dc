use bevy::math::{Vec2, Vec3};

pub(crate) fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Converts a position in viewport space (origin bottom-left, y up) into the
/// world space of a 2D camera centred on the origin.
pub(crate) fn to_world(position: Vec2, viewport: Vec2) -> Vec3 {
    (position - viewport / 2.).extend(0.)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let result = distance(Vec2::new(1., 2.), Vec2::new(4., 6.));
        assert_eq!(5., result);
    }

    #[test]
    fn viewport_center_is_world_origin() {
        let viewport = Vec2::new(1400., 1000.);
        assert_eq!(Vec3::ZERO, to_world(Vec2::new(700., 500.), viewport));
        assert_eq!(
            Vec3::new(-700., -500., 0.),
            to_world(Vec2::ZERO, viewport)
        );
    }
}
