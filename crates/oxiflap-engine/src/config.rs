use crate::ConfigError;

/// Flat world configuration consumed at construction time.
///
/// All lengths are in playfield pixels, all speeds in pixels per 60 FPS
/// frame. The defaults describe a 288x512 playfield with a 112 px solid
/// ground band, gravity expressed as a fraction of playfield height, and a
/// recycling pipe pair 144 px apart.
///
/// There is no dynamic reconfiguration: validate once, then hand copies to
/// the session or training population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    /// Playfield width in pixels.
    pub width: f32,
    /// Playfield height in pixels, ground band included.
    pub height: f32,
    /// Height of the solid ground band at the bottom of the playfield.
    pub ground_height: f32,
    /// Downward acceleration as a fraction of playfield height per frame^2.
    pub gravity_factor: f32,
    /// Horizontal course scroll speed in pixels per frame.
    pub scroll_speed: f32,
    /// Vertical velocity set by a flap, in pixels per frame (negative = up).
    pub jump_impulse: f32,
    /// Fixed horizontal position of every bird.
    pub bird_x: f32,
    /// Collision box width of a bird.
    pub bird_width: f32,
    /// Collision box height of a bird.
    pub bird_height: f32,
    /// Width of a pipe column.
    pub pipe_width: f32,
    /// Leading-edge distance between consecutive pipes.
    pub pipe_spacing: f32,
    /// Vertical size of the passable gap in each pipe.
    pub gap_height: f32,
    /// Minimum distance between a gap edge and the ceiling or ground.
    pub gap_margin: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 288.0,
            height: 512.0,
            ground_height: 112.0,
            gravity_factor: 0.0008,
            scroll_speed: 2.0,
            jump_impulse: -7.0,
            bird_x: 60.0,
            bird_width: 34.0,
            bird_height: 24.0,
            pipe_width: 52.0,
            pipe_spacing: 144.0,
            gap_height: 140.0,
            gap_margin: 30.0,
        }
    }
}

impl WorldConfig {
    /// Checks the record for internal consistency.
    ///
    /// Constructors that accept a `WorldConfig` call this once and refuse to
    /// build on error; the instance is never partially usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.ground_height < 0.0 || self.ground_height >= self.height {
            return Err(ConfigError::InvalidGround);
        }
        if self.gap_height <= 0.0
            || self.gap_margin < 0.0
            || self.gap_height + 2.0 * self.gap_margin > self.height - self.ground_height
        {
            return Err(ConfigError::InvalidGapGeometry);
        }
        if self.pipe_width <= 0.0 || self.pipe_spacing <= self.pipe_width {
            return Err(ConfigError::InvalidPipeLayout);
        }
        if self.scroll_speed <= 0.0 {
            return Err(ConfigError::InvalidScrollSpeed);
        }
        if self.gravity_factor <= 0.0 || self.jump_impulse >= 0.0 {
            return Err(ConfigError::InvalidPhysics);
        }
        Ok(())
    }

    /// Downward acceleration in pixels per frame^2.
    #[must_use]
    pub fn gravity(&self) -> f32 {
        self.gravity_factor * self.height
    }

    /// Y coordinate of the top of the ground band.
    #[must_use]
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_height
    }

    /// Vertical spawn position: the middle of the air column.
    #[must_use]
    pub fn start_y(&self) -> f32 {
        self.ground_y() / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        WorldConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let config = WorldConfig {
            width: 0.0,
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidDimensions));
    }

    #[test]
    fn ground_taller_than_playfield_is_rejected() {
        let config = WorldConfig {
            ground_height: 512.0,
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidGround));
    }

    #[test]
    fn gap_exceeding_air_column_is_rejected() {
        let config = WorldConfig {
            gap_height: 400.0,
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidGapGeometry));
    }

    #[test]
    fn overlapping_pipes_are_rejected() {
        let config = WorldConfig {
            pipe_spacing: 40.0,
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidPipeLayout));
    }

    #[test]
    fn upward_gravity_is_rejected() {
        let config = WorldConfig {
            gravity_factor: -0.0008,
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidPhysics));
    }
}
