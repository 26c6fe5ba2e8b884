use std::fmt::Write as _;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{FrameTime, WorldConfig};

/// Seed for deterministic course generation.
///
/// A 128-bit (16-byte) seed that initializes the course's random number
/// generator. The same seed always produces the same sequence of pipe gaps,
/// enabling:
///
/// - Fair comparison: every agent of a training generation, and every
///   generation of a training run, can face an identical course
/// - Reproducible runs for debugging and deterministic testing
///
/// Serialized as a 32-character hex string so it survives a trip through a
/// model file unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseSeed([u8; 16]);

impl CourseSeed {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Expands a small integer into a full seed, for CLI `--seed` flags.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    fn rng(&self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl Serialize for CourseSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for CourseSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

/// Allows generating random `CourseSeed` values with `rng.random()`.
impl Distribution<CourseSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> CourseSeed {
        CourseSeed(rng.random())
    }
}

/// Positional view of the next pipe gap, as seen from a given x coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapView {
    /// Horizontal distance to the pipe's leading edge; zero while inside
    /// the pipe's span.
    pub distance: f32,
    /// Y coordinate of the gap's top edge.
    pub gap_top: f32,
    /// Y coordinate of the gap's bottom edge.
    pub gap_bottom: f32,
}

#[derive(Debug, Clone, Copy)]
struct Pipe {
    x: f32,
    gap_top: f32,
}

/// The scrolling obstacle course: a recycling set of pipe columns.
///
/// Pipes scroll left at the configured speed; a pipe that leaves the
/// playfield re-enters behind the last one with a freshly sampled gap
/// height. Gap sampling is driven by a [`CourseSeed`]ed generator, so the
/// whole course is a pure function of its seed and the elapsed frames.
///
/// The query methods take no notice of birds. Within a frame the course is
/// read-only shared state; [`PipeCourse::advance`] is the only mutation.
#[derive(Debug, Clone)]
pub struct PipeCourse {
    pipes: Vec<Pipe>,
    rng: Pcg32,
    seed: CourseSeed,
    pipe_width: f32,
    scroll_speed: f32,
    recycle_distance: f32,
    gap_height: f32,
    gap_top_min: f32,
    gap_top_max: f32,
}

/// Phases of the initial pipes, in playfield widths past the right edge.
const PIPE_PHASES: [f32; 2] = [1.0, 1.5];

impl PipeCourse {
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn new(config: &WorldConfig, seed: CourseSeed) -> Self {
        let mut course = Self {
            pipes: Vec::with_capacity(PIPE_PHASES.len()),
            rng: seed.rng(),
            seed,
            pipe_width: config.pipe_width,
            scroll_speed: config.scroll_speed,
            recycle_distance: PIPE_PHASES.len() as f32 * config.pipe_spacing,
            gap_height: config.gap_height,
            gap_top_min: config.gap_margin,
            gap_top_max: config.ground_y() - config.gap_margin - config.gap_height,
        };
        course.populate(config.width);
        course
    }

    fn populate(&mut self, width: f32) {
        self.pipes.clear();
        for phase in PIPE_PHASES {
            let gap_top = self.sample_gap_top();
            self.pipes.push(Pipe {
                x: width * phase,
                gap_top,
            });
        }
    }

    fn sample_gap_top(&mut self) -> f32 {
        self.rng.random_range(self.gap_top_min..=self.gap_top_max)
    }

    /// Restores the seeded initial layout. Same seed, same course.
    pub fn reset(&mut self, config: &WorldConfig) {
        self.rng = self.seed.rng();
        self.populate(config.width);
    }

    #[must_use]
    pub fn seed(&self) -> CourseSeed {
        self.seed
    }

    /// Scrolls all pipes left, recycling those that left the playfield.
    pub fn advance(&mut self, frame: &FrameTime) {
        let dx = self.scroll_speed * frame.frames();
        let recycle_distance = self.recycle_distance;
        for i in 0..self.pipes.len() {
            self.pipes[i].x -= dx;
            if self.pipes[i].x + self.pipe_width < 0.0 {
                let gap_top = self.sample_gap_top();
                let pipe = &mut self.pipes[i];
                pipe.x += recycle_distance;
                pipe.gap_top = gap_top;
            }
        }
    }

    /// Returns the nearest gap whose pipe has not yet scrolled past `x`,
    /// or `None` when every pipe is behind it.
    #[must_use]
    pub fn next_gap_after(&self, x: f32) -> Option<GapView> {
        self.pipes
            .iter()
            .filter(|pipe| pipe.x + self.pipe_width >= x)
            .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap())
            .map(|pipe| GapView {
                distance: (pipe.x - x).max(0.0),
                gap_top: pipe.gap_top,
                gap_bottom: pipe.gap_top + self.gap_height,
            })
    }

    /// Whether the point lies inside any pipe's solid region.
    #[must_use]
    pub fn is_solid_at(&self, x: f32, y: f32) -> bool {
        self.pipes.iter().any(|pipe| {
            x >= pipe.x
                && x <= pipe.x + self.pipe_width
                && (y <= pipe.gap_top || y >= pipe.gap_top + self.gap_height)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod course_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: CourseSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: CourseSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_format_is_32_char_hex_string() {
            let seed: CourseSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let hex_str = serialized.trim_matches('"');
            assert_eq!(hex_str.len(), 32);
            assert!(hex_str.chars().all(|c| c.is_ascii_hexdigit()));
        }

        #[test]
        fn test_known_value_all_zeros() {
            let seed = CourseSeed::from_bytes([0u8; 16]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"00000000000000000000000000000000\"");
            let deserialized: CourseSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(deserialized, seed);
        }

        #[test]
        fn test_invalid_length_is_rejected() {
            let result: Result<CourseSeed, _> = serde_json::from_str("\"0011\"");
            assert!(result.is_err());
        }
    }

    mod pipe_course {
        use super::*;

        fn course_with_seed(value: u64) -> (WorldConfig, PipeCourse) {
            let config = WorldConfig::default();
            let course = PipeCourse::new(&config, CourseSeed::from_u64(value));
            (config, course)
        }

        #[test]
        fn same_seed_same_course() {
            let (config, mut a) = course_with_seed(7);
            let (_, mut b) = course_with_seed(7);
            for _ in 0..2000 {
                a.advance(&FrameTime::STEP_60FPS);
                b.advance(&FrameTime::STEP_60FPS);
            }
            let gap_a = a.next_gap_after(config.bird_x).unwrap();
            let gap_b = b.next_gap_after(config.bird_x).unwrap();
            assert_eq!(gap_a, gap_b);
        }

        #[test]
        fn reset_replays_the_course() {
            let (config, mut course) = course_with_seed(11);
            let initial = course.next_gap_after(0.0).unwrap();
            for _ in 0..3000 {
                course.advance(&FrameTime::STEP_60FPS);
            }
            course.reset(&config);
            assert_eq!(course.next_gap_after(0.0).unwrap(), initial);
        }

        #[test]
        fn gaps_stay_within_margins() {
            let (config, mut course) = course_with_seed(3);
            for _ in 0..20_000 {
                course.advance(&FrameTime::STEP_60FPS);
                let gap = course.next_gap_after(config.bird_x).unwrap();
                assert!(gap.gap_top >= config.gap_margin);
                assert!(gap.gap_bottom <= config.ground_y() - config.gap_margin);
            }
        }

        #[test]
        fn recycled_pipes_keep_a_gap_ahead_of_the_bird() {
            let (config, mut course) = course_with_seed(5);
            for _ in 0..20_000 {
                course.advance(&FrameTime::STEP_60FPS);
                assert!(course.next_gap_after(config.bird_x).is_some());
            }
        }

        #[test]
        fn no_pipe_ahead_of_far_right_query() {
            let (config, course) = course_with_seed(9);
            assert!(course.next_gap_after(config.width * 10.0).is_none());
        }

        #[test]
        fn gap_interior_is_not_solid() {
            let (config, course) = course_with_seed(13);
            let gap = course.next_gap_after(config.bird_x).unwrap();
            let pipe_x = config.bird_x + gap.distance + 1.0;
            let mid_gap = (gap.gap_top + gap.gap_bottom) / 2.0;
            assert!(!course.is_solid_at(pipe_x, mid_gap));
            assert!(course.is_solid_at(pipe_x, gap.gap_top - 1.0));
            assert!(course.is_solid_at(pipe_x, gap.gap_bottom + 1.0));
        }

        #[test]
        fn open_air_is_not_solid() {
            let (_, course) = course_with_seed(17);
            assert!(!course.is_solid_at(0.0, 100.0));
        }
    }
}
