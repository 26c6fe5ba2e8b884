use crate::FrameTime;

/// Vertical physics of one bird.
///
/// Horizontal position is fixed by the world (the course scrolls instead),
/// so a bird is just a height and a vertical velocity. Liveness and scoring
/// live on whoever owns the bird.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    y: f32,
    velocity: f32,
}

impl Bird {
    #[must_use]
    pub fn new(y: f32) -> Self {
        Self { y, velocity: 0.0 }
    }

    /// Center height, pixels from the playfield top.
    #[must_use]
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Vertical velocity in pixels per frame (negative = rising).
    #[must_use]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Integrates one step of free fall: velocity first, then position.
    pub fn apply_gravity(&mut self, gravity: f32, frame: &FrameTime) {
        let frames = frame.frames();
        self.velocity += gravity * frames;
        self.y += self.velocity * frames;
    }

    /// Replaces the vertical velocity with the flap impulse.
    pub fn jump(&mut self, impulse: f32) {
        self.velocity = impulse;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_accelerates_downward() {
        let mut bird = Bird::new(100.0);
        bird.apply_gravity(0.4, &FrameTime::STEP_60FPS);
        bird.apply_gravity(0.4, &FrameTime::STEP_60FPS);
        assert!(bird.velocity() > 0.0);
        assert!(bird.y() > 100.0);
    }

    #[test]
    fn jump_overrides_accumulated_velocity() {
        let mut bird = Bird::new(100.0);
        for _ in 0..30 {
            bird.apply_gravity(0.4, &FrameTime::STEP_60FPS);
        }
        bird.jump(-7.0);
        assert!((bird.velocity() - -7.0).abs() < f32::EPSILON);
    }

    #[test]
    fn rising_bird_decelerates_under_gravity() {
        let mut bird = Bird::new(100.0);
        bird.jump(-7.0);
        let before = bird.velocity();
        bird.apply_gravity(0.4, &FrameTime::STEP_60FPS);
        assert!(bird.velocity() > before);
    }
}
