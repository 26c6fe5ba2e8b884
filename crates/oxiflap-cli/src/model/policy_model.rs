use chrono::{DateTime, Utc};
use oxiflap_engine::CourseSeed;
use oxiflap_policy::PolicyParams;
use serde::{Deserialize, Serialize};

/// Exported training result: the best parameter tuple of a run plus enough
/// metadata to reproduce and compare it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    /// Survival time of the best agent, in milliseconds.
    pub final_fitness_ms: f32,
    /// Number of generations the run evolved through.
    pub generations: usize,
    /// Seed of the course the run trained against.
    pub course_seed: CourseSeed,
    pub params: PolicyParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_survives_json() {
        let model = PolicyModel {
            name: "trained".to_owned(),
            trained_at: Utc::now(),
            final_fitness_ms: 61_234.5,
            generations: 120,
            course_seed: CourseSeed::from_u64(99),
            params: PolicyParams::AUTOPILOT,
        };
        let json = serde_json::to_string_pretty(&model).unwrap();
        let back: PolicyModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, model.name);
        assert_eq!(back.course_seed, model.course_seed);
        assert_eq!(back.params, model.params);
    }
}
