// Mamdani inference for the AI paddle

use super::membership::{LinguisticVariable, MembershipFn};
use super::rules::{Rule, VelocityTerm, XDiffTerm, YDiffTerm};
use crate::config::FuzzyConfig;

/// Maps (x_diff, y_diff) to a paddle velocity
///
/// Built once from a [`FuzzyConfig`] and never mutated. Output terms are
/// defined on the normalized axis [-1, 1] and scaled by `max_speed`, so the
/// crisp output always lies in `[-max_speed, max_speed]`.
#[derive(Debug, Clone)]
pub struct FuzzyController {
    x_diff: LinguisticVariable<3>,
    y_diff: LinguisticVariable<3>,
    velocity: [MembershipFn; 5],
    rules: Vec<Rule>,
    max_speed: f32,
}

/// Every intermediate value of one evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    /// Inputs after clamping to their domains
    pub x_diff: f32,
    pub y_diff: f32,
    pub x_degrees: [f32; 3],
    pub y_degrees: [f32; 3],
    /// Firing strength per rule, in rule-table order
    pub firing: Vec<f32>,
    /// Aggregated degree per output term
    pub output: [f32; 5],
    pub velocity: f32,
}

impl Inference {
    pub fn dominant_x(&self) -> XDiffTerm {
        XDiffTerm::ALL[argmax(&self.x_degrees)]
    }

    pub fn dominant_y(&self) -> YDiffTerm {
        YDiffTerm::ALL[argmax(&self.y_degrees)]
    }

    /// Strongest output term, or `None` when no rule fired
    pub fn dominant_velocity(&self) -> Option<VelocityTerm> {
        let i = argmax(&self.output);
        (self.output[i] > 0.0).then(|| VelocityTerm::ALL[i])
    }
}

fn argmax(values: &[f32]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f32::MIN), |best, (i, &v)| if v > best.1 { (i, v) } else { best })
        .0
}

impl FuzzyController {
    /// Controller using the slow-ball `center` term
    pub fn new(config: &FuzzyConfig, max_speed: f32) -> Self {
        Self::with_center(config, config.x_diff.center, max_speed)
    }

    /// Controller tuned to the ball's horizontal speed
    ///
    /// The paddle may move as fast as the ball travels sideways. Past
    /// `fast_ball_threshold` the `center` term narrows to
    /// `fast_ball_center` so the paddle keeps chasing instead of settling.
    pub fn for_ball_speed(config: &FuzzyConfig, ball_speed_x: f32) -> Self {
        let speed = ball_speed_x.abs();
        let center = if speed > config.fast_ball_threshold {
            config.fast_ball_center
        } else {
            config.x_diff.center
        };
        Self::with_center(config, center, speed)
    }

    fn with_center(config: &FuzzyConfig, center: MembershipFn, max_speed: f32) -> Self {
        let max_speed = if max_speed.is_finite() {
            max_speed.abs()
        } else {
            0.0
        };

        Self {
            x_diff: LinguisticVariable::new(
                (config.x_domain[0], config.x_domain[1]),
                [config.x_diff.left, center, config.x_diff.right],
            ),
            y_diff: LinguisticVariable::new(
                (config.y_domain[0], config.y_domain[1]),
                [config.y_diff.close, config.y_diff.medium, config.y_diff.far],
            ),
            velocity: config.velocity.all(),
            rules: config.rules.clone(),
            max_speed,
        }
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Crisp paddle velocity for this frame
    pub fn compute_velocity(&self, x_diff: f32, y_diff: f32) -> f32 {
        let x_degrees = self.x_diff.fuzzify(x_diff);
        let y_degrees = self.y_diff.fuzzify(y_diff);
        let output = self.aggregate(&x_degrees, &y_degrees, |_| {});
        self.defuzzify(&output)
    }

    /// Same as [`compute_velocity`](Self::compute_velocity), keeping the trace
    pub fn infer(&self, x_diff: f32, y_diff: f32) -> Inference {
        let x_degrees = self.x_diff.fuzzify(x_diff);
        let y_degrees = self.y_diff.fuzzify(y_diff);

        let mut firing = Vec::with_capacity(self.rules.len());
        let output = self.aggregate(&x_degrees, &y_degrees, |strength| firing.push(strength));

        Inference {
            x_diff: self.x_diff.clamp(x_diff),
            y_diff: self.y_diff.clamp(y_diff),
            x_degrees,
            y_degrees,
            firing,
            velocity: self.defuzzify(&output),
            output,
        }
    }

    /// Min over each rule's antecedents, max over rules sharing a consequent.
    /// `record` sees every firing strength in rule-table order.
    fn aggregate(
        &self,
        x_degrees: &[f32; 3],
        y_degrees: &[f32; 3],
        mut record: impl FnMut(f32),
    ) -> [f32; 5] {
        let mut output = [0.0f32; 5];
        for rule in &self.rules {
            let strength = rule.firing_strength(x_degrees, y_degrees);
            record(strength);
            let slot = &mut output[rule.velocity.index()];
            *slot = slot.max(strength);
        }
        output
    }

    /// Weighted average of term peaks; zero when nothing fired
    fn defuzzify(&self, output: &[f32; 5]) -> f32 {
        let total: f32 = output.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }

        let weighted: f32 = output
            .iter()
            .zip(&self.velocity)
            .map(|(degree, term)| degree * term.peak())
            .sum();

        (weighted / total * self.max_speed).clamp(-self.max_speed, self.max_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MAX_SPEED: f32 = 120.0;

    fn controller() -> FuzzyController {
        FuzzyController::new(&FuzzyConfig::default(), MAX_SPEED)
    }

    #[test]
    fn test_aligned_paddle_stops() {
        let ctrl = controller();
        for y in [0.0, 10.0, 100.0, 250.0, 400.0, 1000.0] {
            assert!(ctrl.compute_velocity(0.0, y).abs() < 1e-6, "y_diff = {}", y);
        }
    }

    #[test]
    fn test_far_outside_domain_saturates() {
        let ctrl = controller();

        let right = ctrl.compute_velocity(1000.0, 400.0);
        assert!((right - MAX_SPEED).abs() < 1e-4, "got {}", right);

        let left = ctrl.compute_velocity(-1000.0, 1e6);
        assert!((left + MAX_SPEED).abs() < 1e-4, "got {}", left);
    }

    #[test]
    fn test_close_ball_moves_slower_than_far_ball() {
        let ctrl = controller();
        let close = ctrl.compute_velocity(150.0, 0.0);
        let far = ctrl.compute_velocity(150.0, 350.0);

        assert!(close > 0.0);
        assert!(far > close);
        // right_slow peak
        assert!((close - 0.7 * MAX_SPEED).abs() < 1e-3);
    }

    #[test]
    fn test_no_rule_fires_returns_zero() {
        // Gap between the x terms: nothing covers 10..200
        let mut config = FuzzyConfig::default();
        config.x_diff.left = MembershipFn::Trapezoid([-400.0, -400.0, -300.0, -200.0]);
        config.x_diff.right = MembershipFn::Trapezoid([200.0, 300.0, 400.0, 400.0]);
        let ctrl = FuzzyController::new(&config, MAX_SPEED);

        let velocity = ctrl.compute_velocity(100.0, 200.0);
        assert_eq!(velocity, 0.0);

        let trace = ctrl.infer(100.0, 200.0);
        assert_eq!(trace.output, [0.0; 5]);
        assert_eq!(trace.velocity, 0.0);
        assert_eq!(trace.dominant_velocity(), None);
    }

    #[test]
    fn test_empty_rule_table_returns_zero() {
        let mut config = FuzzyConfig::default();
        config.rules.clear();
        let ctrl = FuzzyController::new(&config, MAX_SPEED);
        assert_eq!(ctrl.compute_velocity(300.0, 300.0), 0.0);
    }

    #[test]
    fn test_monotone_in_x_diff() {
        let ctrl = controller();
        // Every half unit of the y domain, plus both sides of the close/medium boundary
        let ys = (0..=800)
            .map(|i| i as f32 * 0.5)
            .chain([19.99, 20.01, 199.99, 200.01]);

        for y in ys {
            let mut previous = ctrl.compute_velocity(-500.0, y);
            for step in -499..=500 {
                let velocity = ctrl.compute_velocity(step as f32, y);
                assert!(
                    velocity >= previous - 1e-4,
                    "velocity dropped at x_diff = {}, y_diff = {}: {} -> {}",
                    step,
                    y,
                    previous,
                    velocity
                );
                previous = velocity;
            }
        }
    }

    #[test]
    fn test_close_ball_keeps_speed_as_it_moves_away() {
        let ctrl = FuzzyController::new(&FuzzyConfig::default(), 100.0);
        let speeds: Vec<f32> = [10.0, 20.0, 40.0, 100.0, 200.0]
            .iter()
            .map(|&x| ctrl.compute_velocity(x, 10.0))
            .collect();

        for pair in speeds.windows(2) {
            assert!(pair[1] >= pair[0] - 1e-4, "{:?}", speeds);
        }
        assert!((speeds[4] - 70.0).abs() < 1e-3);
    }

    #[test]
    fn test_fast_ball_narrows_center() {
        let config = FuzzyConfig::default();
        let slow = FuzzyController::for_ball_speed(&config, 200.0);
        let fast = FuzzyController::for_ball_speed(&config, -400.0);

        assert_eq!(slow.max_speed(), 200.0);
        assert_eq!(fast.max_speed(), 400.0);

        // 5 units off: the wide center still damps, the narrow one does not
        let slow_ratio = slow.compute_velocity(5.0, 100.0) / slow.max_speed();
        let fast_ratio = fast.compute_velocity(5.0, 100.0) / fast.max_speed();
        assert!(slow_ratio.abs() < 0.1);
        assert!(fast_ratio > 0.9);
    }

    #[test]
    fn test_bad_max_speed_is_sanitized() {
        let config = FuzzyConfig::default();
        assert_eq!(FuzzyController::new(&config, -50.0).max_speed(), 50.0);
        assert_eq!(FuzzyController::new(&config, f32::NAN).max_speed(), 0.0);
        assert_eq!(
            FuzzyController::new(&config, f32::NAN).compute_velocity(300.0, 300.0),
            0.0
        );
    }

    #[test]
    fn test_infer_matches_compute_velocity() {
        let ctrl = controller();
        let trace = ctrl.infer(-120.0, 15.0);

        assert_eq!(trace.velocity, ctrl.compute_velocity(-120.0, 15.0));
        assert_eq!(trace.firing.len(), 7);
        assert_eq!(trace.dominant_x(), XDiffTerm::Left);
        assert_eq!(trace.dominant_y(), YDiffTerm::Close);
        assert_eq!(trace.dominant_velocity(), Some(VelocityTerm::LeftSlow));
        assert!(trace.velocity < 0.0);
    }

    proptest! {
        #[test]
        fn prop_velocity_within_bounds(
            x in -2000.0f32..2000.0f32,
            y in -500.0f32..2000.0f32,
            max_speed in 0.0f32..1000.0f32
        ) {
            let ctrl = FuzzyController::new(&FuzzyConfig::default(), max_speed);
            let velocity = ctrl.compute_velocity(x, y);
            prop_assert!(velocity.is_finite());
            prop_assert!(velocity.abs() <= max_speed);
        }

        #[test]
        fn prop_mirror_symmetric_in_x_diff(
            x in -600.0f32..600.0f32,
            y in 0.0f32..400.0f32
        ) {
            let ctrl = controller();
            let forward = ctrl.compute_velocity(x, y);
            let mirrored = ctrl.compute_velocity(-x, y);
            prop_assert!((forward + mirrored).abs() < 1e-3);
        }

        #[test]
        fn prop_infer_agrees_with_compute_velocity(
            x in -600.0f32..600.0f32,
            y in -100.0f32..500.0f32,
            max_speed in 0.0f32..1000.0f32
        ) {
            let ctrl = FuzzyController::new(&FuzzyConfig::default(), max_speed);
            prop_assert_eq!(ctrl.infer(x, y).velocity, ctrl.compute_velocity(x, y));
        }

        #[test]
        fn prop_degrees_in_unit_interval(
            x in -2000.0f32..2000.0f32,
            y in -2000.0f32..2000.0f32
        ) {
            let trace = controller().infer(x, y);
            for degree in trace.x_degrees.iter()
                .chain(&trace.y_degrees)
                .chain(&trace.output)
                .chain(&trace.firing)
            {
                prop_assert!((0.0..=1.0).contains(degree));
            }
        }
    }
}
