use glam::Vec2;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit displacement for this direction, in screen coordinates (y grows downward).
    pub fn as_vec2(&self) -> Vec2 {
        (*self).into()
    }

    /// Facing angle in degrees: right 0, left 180, down -90, up 90.
    pub fn angle_degrees(&self) -> f32 {
        match self {
            Direction::Right => 0.0,
            Direction::Left => 180.0,
            Direction::Down => -90.0,
            Direction::Up => 90.0,
        }
    }

    /// Dominant axis of a velocity, horizontal checked before vertical.
    /// Returns `None` for the zero vector.
    pub fn from_velocity(velocity: Vec2) -> Option<Direction> {
        if velocity.x > 0.0 {
            Some(Direction::Right)
        } else if velocity.x < 0.0 {
            Some(Direction::Left)
        } else if velocity.y > 0.0 {
            Some(Direction::Down)
        } else if velocity.y < 0.0 {
            Some(Direction::Up)
        } else {
            None
        }
    }
}

impl From<Direction> for Vec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => -Vec2::Y,
            Direction::Down => Vec2::Y,
            Direction::Left => -Vec2::X,
            Direction::Right => Vec2::X,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn test_direction_as_vec2() {
        assert_eq!(Direction::Up.as_vec2(), -Vec2::Y);
        assert_eq!(Direction::Down.as_vec2(), Vec2::Y);
        assert_eq!(Direction::Left.as_vec2(), -Vec2::X);
        assert_eq!(Direction::Right.as_vec2(), Vec2::X);
    }

    #[test]
    fn test_direction_angles() {
        assert_eq!(Direction::Right.angle_degrees(), 0.0);
        assert_eq!(Direction::Left.angle_degrees(), 180.0);
        assert_eq!(Direction::Down.angle_degrees(), -90.0);
        assert_eq!(Direction::Up.angle_degrees(), 90.0);
    }

    #[test]
    fn test_from_velocity_prefers_horizontal() {
        assert_eq!(Direction::from_velocity(Vec2::new(6.0, 0.0)), Some(Direction::Right));
        assert_eq!(Direction::from_velocity(Vec2::new(-6.0, 0.0)), Some(Direction::Left));
        assert_eq!(Direction::from_velocity(Vec2::new(0.0, 6.0)), Some(Direction::Down));
        assert_eq!(Direction::from_velocity(Vec2::new(0.0, -6.0)), Some(Direction::Up));
        // Horizontal is evaluated first when both axes are non-zero
        assert_eq!(Direction::from_velocity(Vec2::new(2.0, 6.0)), Some(Direction::Right));
        assert_eq!(Direction::from_velocity(Vec2::ZERO), None);
    }

    #[test]
    fn test_directions_constant() {
        assert_eq!(DIRECTIONS.len(), 4);
        assert!(DIRECTIONS.contains(&Direction::Up));
        assert!(DIRECTIONS.contains(&Direction::Down));
        assert!(DIRECTIONS.contains(&Direction::Left));
        assert!(DIRECTIONS.contains(&Direction::Right));
    }
}
