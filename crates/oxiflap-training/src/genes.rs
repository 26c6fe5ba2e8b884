//! Gene-array operations for the genetic algorithm.
//!
//! Genes are the `[f32; GENE_COUNT]` view of a
//! [`PolicyParams`](oxiflap_policy::PolicyParams) tuple. These functions
//! implement the initialization, crossover, and mutation steps used by
//! [`GenerationEvolver`](crate::GenerationEvolver):
//!
//! - **Initialization**: [`random`] samples each gene uniformly within its
//!   bounds
//! - **Crossover**: [`uniform_crossover`] takes each gene from either parent
//!   with equal probability - parent genes pass through unchanged, which
//!   keeps offspring behavior reproducible gene-by-gene
//! - **Mutation**: [`mutate`] perturbs genes with Gaussian noise scaled to
//!   each gene's range, then clamps back into bounds
//!
//! Every function takes its random source as an argument; nothing here
//! reaches for ambient randomness.

use oxiflap_policy::{GENE_COUNT, GeneRange};
use rand::Rng;
use rand_distr::Normal;

pub type Genes = [f32; GENE_COUNT];

/// Samples a gene array uniformly within the given per-gene bounds.
pub fn random<R>(bounds: &[GeneRange; GENE_COUNT], rng: &mut R) -> Genes
where
    R: Rng + ?Sized,
{
    let mut genes = [0.0; GENE_COUNT];
    for (gene, range) in genes.iter_mut().zip(bounds) {
        *gene = range.sample(rng);
    }
    genes
}

/// Per-gene uniform crossover: each child gene comes from one parent or
/// the other with probability 0.5.
pub fn uniform_crossover<R>(p1: &Genes, p2: &Genes, rng: &mut R) -> Genes
where
    R: Rng + ?Sized,
{
    let mut child = [0.0; GENE_COUNT];
    for (i, gene) in child.iter_mut().enumerate() {
        *gene = if rng.random_bool(0.5) { p1[i] } else { p2[i] };
    }
    child
}

/// Applies Gaussian mutation to a gene array in-place.
///
/// Each gene mutates with probability `rate`; the perturbation is drawn
/// from `N(0, sigma_scale * range_width)` and the result is clamped back
/// into the gene's bounds. Scaling sigma by the range width gives every
/// gene the same relative mutation strength regardless of its units.
pub fn mutate<R>(
    genes: &mut Genes,
    rate: f32,
    sigma_scale: f32,
    bounds: &[GeneRange; GENE_COUNT],
    rng: &mut R,
) where
    R: Rng + ?Sized,
{
    for (gene, range) in genes.iter_mut().zip(bounds) {
        if rng.random_bool(rate.into()) {
            let normal = Normal::new(0.0, sigma_scale * range.width()).unwrap();
            *gene = range.clamp(*gene + rng.sample(normal));
        }
    }
}

#[cfg(test)]
mod tests {
    use oxiflap_policy::ParamBounds;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn crossover_only_mixes_parent_genes() {
        let mut rng = Pcg32::seed_from_u64(3);
        let p1 = [1.0, 2.0, 3.0, 4.0, 5.0];
        let p2 = [10.0, 20.0, 30.0, 40.0, 50.0];
        for _ in 0..100 {
            let child = uniform_crossover(&p1, &p2, &mut rng);
            for (i, gene) in child.iter().enumerate() {
                assert!(*gene == p1[i] || *gene == p2[i]);
            }
        }
    }

    #[test]
    fn mutation_respects_bounds() {
        let bounds = ParamBounds::default().as_array();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut genes = random(&bounds, &mut rng);
        for _ in 0..1000 {
            mutate(&mut genes, 1.0, 0.5, &bounds, &mut rng);
            for (gene, range) in genes.iter().zip(&bounds) {
                assert!((range.lo..=range.hi).contains(gene));
            }
        }
    }

    #[test]
    fn zero_rate_leaves_genes_untouched() {
        let bounds = ParamBounds::default().as_array();
        let mut rng = Pcg32::seed_from_u64(7);
        let original = random(&bounds, &mut rng);
        let mut genes = original;
        mutate(&mut genes, 0.0, 0.1, &bounds, &mut rng);
        assert_eq!(genes, original);
    }
}
