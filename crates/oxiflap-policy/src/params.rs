use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::BoundsError;

/// Number of genes in a [`PolicyParams`] tuple.
pub const GENE_COUNT: usize = 5;

/// The evolvable parameter tuple governing a bird's jump decisions.
///
/// A tuple is immutable once assigned to an agent; evolution only ever
/// produces new tuples. The gene-array view ([`PolicyParams::to_genes`] /
/// [`PolicyParams::from_genes`]) is what the genetic operators work on, in
/// field declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyParams {
    /// Minimum time between jump decisions, in milliseconds.
    pub jump_cooldown_ms: f32,
    /// Horizontal distance at which the policy starts watching the pipe.
    pub trigger_distance: f32,
    /// Safety margin below the gap's top edge.
    pub top_margin: f32,
    /// Safety margin above the gap's bottom edge.
    pub bottom_margin: f32,
    /// Expected height regained by one jump; lowering it makes the policy
    /// jump earlier.
    pub jump_height: f32,
}

impl PolicyParams {
    /// The scripted autopilot's fixed parameter set.
    pub const AUTOPILOT: Self = Self {
        jump_cooldown_ms: 150.0,
        trigger_distance: 150.0,
        top_margin: 50.0,
        bottom_margin: 60.0,
        jump_height: 90.0,
    };

    #[must_use]
    pub fn to_genes(self) -> [f32; GENE_COUNT] {
        [
            self.jump_cooldown_ms,
            self.trigger_distance,
            self.top_margin,
            self.bottom_margin,
            self.jump_height,
        ]
    }

    #[must_use]
    pub fn from_genes(genes: [f32; GENE_COUNT]) -> Self {
        let [jump_cooldown_ms, trigger_distance, top_margin, bottom_margin, jump_height] = genes;
        Self {
            jump_cooldown_ms,
            trigger_distance,
            top_margin,
            bottom_margin,
            jump_height,
        }
    }
}

/// Closed value range of one gene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneRange {
    pub lo: f32,
    pub hi: f32,
}

impl GeneRange {
    #[must_use]
    pub fn new(lo: f32, hi: f32) -> Self {
        Self { lo, hi }
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.hi - self.lo
    }

    #[must_use]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.lo, self.hi)
    }

    pub fn sample<R>(&self, rng: &mut R) -> f32
    where
        R: Rng + ?Sized,
    {
        rng.random_range(self.lo..=self.hi)
    }
}

/// Valid ranges for every gene, used for random initialization and for
/// clamping after mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamBounds {
    pub jump_cooldown_ms: GeneRange,
    pub trigger_distance: GeneRange,
    pub top_margin: GeneRange,
    pub bottom_margin: GeneRange,
    pub jump_height: GeneRange,
}

impl Default for ParamBounds {
    fn default() -> Self {
        Self {
            jump_cooldown_ms: GeneRange::new(50.0, 500.0),
            trigger_distance: GeneRange::new(40.0, 288.0),
            top_margin: GeneRange::new(0.0, 120.0),
            bottom_margin: GeneRange::new(0.0, 120.0),
            jump_height: GeneRange::new(0.0, 160.0),
        }
    }
}

impl ParamBounds {
    #[must_use]
    pub fn as_array(&self) -> [GeneRange; GENE_COUNT] {
        [
            self.jump_cooldown_ms,
            self.trigger_distance,
            self.top_margin,
            self.bottom_margin,
            self.jump_height,
        ]
    }

    pub fn validate(&self) -> Result<(), BoundsError> {
        if self.as_array().iter().any(|range| range.lo > range.hi) {
            return Err(BoundsError);
        }
        Ok(())
    }

    /// Samples a uniformly random parameter tuple within bounds.
    pub fn sample<R>(&self, rng: &mut R) -> PolicyParams
    where
        R: Rng + ?Sized,
    {
        let mut genes = [0.0; GENE_COUNT];
        for (gene, range) in genes.iter_mut().zip(self.as_array()) {
            *gene = range.sample(rng);
        }
        PolicyParams::from_genes(genes)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn genes_round_trip_in_field_order() {
        let params = PolicyParams::AUTOPILOT;
        assert_eq!(PolicyParams::from_genes(params.to_genes()), params);
        assert_eq!(params.to_genes()[0], params.jump_cooldown_ms);
        assert_eq!(params.to_genes()[4], params.jump_height);
    }

    #[test]
    fn params_survive_json() {
        let params = PolicyParams::AUTOPILOT;
        let json = serde_json::to_string(&params).unwrap();
        let back: PolicyParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn default_bounds_are_valid() {
        ParamBounds::default().validate().unwrap();
    }

    #[test]
    fn inverted_range_is_rejected() {
        let bounds = ParamBounds {
            jump_height: GeneRange::new(160.0, 0.0),
            ..ParamBounds::default()
        };
        assert_eq!(bounds.validate(), Err(BoundsError));
    }

    #[test]
    fn samples_stay_within_bounds() {
        let bounds = ParamBounds::default();
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..100 {
            let genes = bounds.sample(&mut rng).to_genes();
            for (gene, range) in genes.iter().zip(bounds.as_array()) {
                assert!((range.lo..=range.hi).contains(gene));
            }
        }
    }
}
