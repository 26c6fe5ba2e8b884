use oxiflap_engine::{Bird, PipeCourse};

/// Sentinel distance reported when no obstacle is ahead of the bird.
///
/// Far enough that no sane `trigger_distance` reaches it, so policies
/// default to no-jump on an empty playfield.
pub const FAR_DISTANCE: f32 = 1.0e4;

/// The fixed feature vector a decision policy consumes.
///
/// Computed fresh each frame from the bird and the course's positional
/// queries; no state, no side effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    /// Horizontal distance to the next pipe's leading edge.
    pub distance_to_pipe: f32,
    /// Vertical offset below the gap's top edge (positive = below it).
    pub offset_to_gap_top: f32,
    /// Vertical offset above the gap's bottom edge (positive = above it).
    pub offset_to_gap_bottom: f32,
    /// The bird's vertical velocity in pixels per frame.
    pub vertical_velocity: f32,
}

impl SensorReading {
    /// Observes the next obstacle from the bird's position.
    #[must_use]
    pub fn observe(bird: &Bird, bird_x: f32, course: &PipeCourse) -> Self {
        match course.next_gap_after(bird_x) {
            Some(gap) => Self {
                distance_to_pipe: gap.distance,
                offset_to_gap_top: bird.y() - gap.gap_top,
                offset_to_gap_bottom: gap.gap_bottom - bird.y(),
                vertical_velocity: bird.velocity(),
            },
            None => Self::far(bird.velocity()),
        }
    }

    /// The "no obstacle in sight" reading.
    #[must_use]
    pub fn far(vertical_velocity: f32) -> Self {
        Self {
            distance_to_pipe: FAR_DISTANCE,
            offset_to_gap_top: 0.0,
            offset_to_gap_bottom: 0.0,
            vertical_velocity,
        }
    }
}

#[cfg(test)]
mod tests {
    use oxiflap_engine::{CourseSeed, WorldConfig};

    use super::*;

    #[test]
    fn observe_reports_the_nearest_gap() {
        let config = WorldConfig::default();
        let course = PipeCourse::new(&config, CourseSeed::from_u64(2));
        let bird = Bird::new(config.start_y());

        let reading = SensorReading::observe(&bird, config.bird_x, &course);
        let gap = course.next_gap_after(config.bird_x).unwrap();
        assert_eq!(reading.distance_to_pipe, gap.distance);
        assert_eq!(reading.offset_to_gap_top, bird.y() - gap.gap_top);
        assert_eq!(reading.offset_to_gap_bottom, gap.gap_bottom - bird.y());
    }

    #[test]
    fn observe_past_all_pipes_reads_far() {
        let config = WorldConfig::default();
        let course = PipeCourse::new(&config, CourseSeed::from_u64(2));
        let bird = Bird::new(config.start_y());

        let reading = SensorReading::observe(&bird, config.width * 10.0, &course);
        assert_eq!(reading.distance_to_pipe, FAR_DISTANCE);
    }

    #[test]
    fn offsets_are_signed_by_side_of_the_gap() {
        let config = WorldConfig::default();
        let course = PipeCourse::new(&config, CourseSeed::from_u64(2));
        let gap = course.next_gap_after(config.bird_x).unwrap();

        let below = Bird::new(gap.gap_bottom + 10.0);
        let reading = SensorReading::observe(&below, config.bird_x, &course);
        assert!(reading.offset_to_gap_top > 0.0);
        assert!(reading.offset_to_gap_bottom < 0.0);
    }
}
