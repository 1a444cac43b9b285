use proptest::prelude::*;

use crate::mdp::{tests::fixtures::self_loop, value_iteration::ValueIterationAgent};

proptest! {
    #[test]
    fn passes_follow_the_finite_horizon_sum(
        loop_prob in 0.0f64..0.95,
        reward in -5.0f64..5.0,
        discount in 0.0f64..0.99,
        passes in 0usize..40,
    ) {
        let agent = ValueIterationAgent::solve(self_loop(loop_prob, reward), discount, passes);

        // Each pass adds exactly one more discounted step: V_k = r + discount * p * V_{k-1}.
        let ratio = discount * loop_prob;
        let expected = reward * (1.0 - ratio.powi(passes as i32)) / (1.0 - ratio);

        prop_assert!((agent.value(&"a") - expected).abs() < 1e-9);
        prop_assert_eq!(agent.residuals().len(), passes);
        prop_assert_eq!(agent.value(&"done"), 0.0);
    }
}
