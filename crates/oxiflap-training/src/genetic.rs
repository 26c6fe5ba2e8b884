use oxiflap_policy::{ParamBounds, PolicyParams};
use rand::Rng;

use crate::genes;

/// Produces the next generation's parameter tuples from a finished one.
///
/// Stateless apart from the caller-provided random source: ranking,
/// selection, crossover, and mutation all operate on the snapshot of
/// `(parameters, fitness)` pairs alone, never on live agents.
///
/// Selection is fitness-proportional ("roulette"): a parent is drawn with
/// probability `fitness / total_fitness`. A generation in which every
/// agent scored zero would divide by zero there, so that case falls back
/// to uniform random selection and the run recovers on its own.
#[derive(Debug, Clone, Copy)]
pub struct GenerationEvolver {
    /// Copy the best tuple unchanged into the next generation's first slot.
    pub elitism: bool,
    /// Per-gene mutation probability.
    pub mutation_rate: f32,
    /// Gaussian mutation sigma, as a fraction of each gene's range width.
    pub mutation_sigma: f32,
}

impl GenerationEvolver {
    /// Evolves a finished generation into `count` fresh parameter tuples.
    ///
    /// `previous` is ranked by fitness descending with a stable sort, so
    /// equal fitness resolves by slot order and a fixed seed replays the
    /// same selection.
    ///
    /// # Panics
    ///
    /// Panics if `previous` is empty; the population manager guarantees a
    /// non-empty snapshot.
    pub fn evolve<R>(
        &self,
        previous: &[(PolicyParams, f32)],
        count: usize,
        bounds: &ParamBounds,
        rng: &mut R,
    ) -> Vec<PolicyParams>
    where
        R: Rng + ?Sized,
    {
        assert!(!previous.is_empty());

        let mut ranked: Vec<&(PolicyParams, f32)> = previous.iter().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
        let total_fitness: f32 = ranked.iter().map(|(_, fitness)| fitness).sum();

        let gene_bounds = bounds.as_array();
        let mut next = Vec::with_capacity(count);

        if self.elitism && count > 0 {
            next.push(ranked[0].0);
        }

        while next.len() < count {
            let p1 = roulette_select(&ranked, total_fitness, rng);
            let p2 = roulette_select(&ranked, total_fitness, rng);
            let mut child = genes::uniform_crossover(&p1.to_genes(), &p2.to_genes(), rng);
            genes::mutate(
                &mut child,
                self.mutation_rate,
                self.mutation_sigma,
                &gene_bounds,
                rng,
            );
            next.push(PolicyParams::from_genes(child));
        }

        next
    }
}

/// Selects a parent with probability proportional to fitness.
///
/// Falls back to uniform selection when the generation's total fitness is
/// zero.
fn roulette_select<R>(
    ranked: &[&(PolicyParams, f32)],
    total_fitness: f32,
    rng: &mut R,
) -> PolicyParams
where
    R: Rng + ?Sized,
{
    if total_fitness <= 0.0 {
        return ranked[rng.random_range(0..ranked.len())].0;
    }

    let mut threshold = rng.random_range(0.0..total_fitness);
    for (params, fitness) in ranked.iter().copied() {
        threshold -= fitness;
        if threshold < 0.0 {
            return *params;
        }
    }
    // Float round-off can leave a sliver above the last slot.
    ranked.last().unwrap().0
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn evolver() -> GenerationEvolver {
        GenerationEvolver {
            elitism: true,
            mutation_rate: 0.1,
            mutation_sigma: 0.1,
        }
    }

    fn params(cooldown: f32) -> PolicyParams {
        PolicyParams {
            jump_cooldown_ms: cooldown,
            ..PolicyParams::AUTOPILOT
        }
    }

    #[test]
    fn produces_exactly_the_requested_count() {
        let bounds = ParamBounds::default();
        let previous = vec![(params(100.0), 5.0), (params(200.0), 1.0)];
        let mut rng = Pcg32::seed_from_u64(1);
        for count in [1, 2, 50, 200] {
            let next = evolver().evolve(&previous, count, &bounds, &mut rng);
            assert_eq!(next.len(), count);
        }
    }

    #[test]
    fn elitism_copies_the_best_tuple_into_slot_zero() {
        let bounds = ParamBounds::default();
        let best = params(123.0);
        let previous = vec![(params(100.0), 1.0), (best, 9.0), (params(200.0), 3.0)];
        let mut rng = Pcg32::seed_from_u64(2);
        let next = evolver().evolve(&previous, 3, &bounds, &mut rng);
        assert_eq!(next[0], best);
    }

    #[test]
    fn equal_fitness_resolves_by_slot_order() {
        let bounds = ParamBounds::default();
        let first = params(111.0);
        let previous = vec![(first, 4.0), (params(222.0), 4.0), (params(333.0), 4.0)];
        let mut rng = Pcg32::seed_from_u64(3);
        let next = evolver().evolve(&previous, 3, &bounds, &mut rng);
        assert_eq!(next[0], first);
    }

    #[test]
    fn dominant_parent_wins_almost_all_selections() {
        let dominant = params(77.0);
        let previous = vec![(params(100.0), 0.0), (dominant, 1000.0), (params(200.0), 0.0)];
        let mut rng = Pcg32::seed_from_u64(4);
        // With all fitness mass on one parent, every selection returns it.
        for _ in 0..100 {
            let ranked: Vec<_> = previous.iter().collect();
            let picked = roulette_select(&ranked, 1000.0, &mut rng);
            assert_eq!(picked, dominant);
        }
    }

    #[test]
    fn all_zero_fitness_falls_back_to_uniform_selection() {
        let bounds = ParamBounds::default();
        let previous = vec![(params(100.0), 0.0), (params(200.0), 0.0)];
        let mut rng = Pcg32::seed_from_u64(5);
        let next = evolver().evolve(&previous, 50, &bounds, &mut rng);
        assert_eq!(next.len(), 50);
        for tuple in &next {
            assert!(tuple.to_genes().iter().all(|gene| gene.is_finite()));
        }
    }

    #[test]
    fn fixed_seed_replays_identically() {
        let bounds = ParamBounds::default();
        let previous = vec![(params(100.0), 2.0), (params(200.0), 7.0), (params(300.0), 4.0)];
        let mut rng_a = Pcg32::seed_from_u64(6);
        let mut rng_b = Pcg32::seed_from_u64(6);
        let next_a = evolver().evolve(&previous, 20, &bounds, &mut rng_a);
        let next_b = evolver().evolve(&previous, 20, &bounds, &mut rng_b);
        assert_eq!(next_a, next_b);
    }
}
