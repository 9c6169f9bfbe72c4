// Fuzzy-logic opponent for the top paddle

use crate::config::FuzzyConfig;
use crate::fuzzy::{FuzzyController, Inference};
use crate::game::GameState;

/// Drives the AI paddle with a [`FuzzyController`]
///
/// The controller is rebuilt whenever the ball's horizontal speed changes,
/// so the paddle can always move as fast as the ball travels sideways.
pub struct FuzzyBot {
    config: FuzzyConfig,
    controller: FuzzyController,
    tuned_speed: f32,
}

impl FuzzyBot {
    pub fn new(config: FuzzyConfig) -> Self {
        let controller = FuzzyController::for_ball_speed(&config, 0.0);
        Self {
            config,
            controller,
            tuned_speed: 0.0,
        }
    }

    /// (x_diff, y_diff) between the ball and the AI paddle center
    pub fn inputs(game_state: &GameState) -> (f32, f32) {
        let paddle = &game_state.ai_paddle;
        let x_diff = game_state.ball.x - paddle.center_x();
        let y_diff = (game_state.ball.y - paddle.center_y()).abs();
        (x_diff, y_diff)
    }

    /// Paddle velocity for this frame, in units per second
    pub fn get_velocity(&mut self, game_state: &GameState) -> f32 {
        self.retune(game_state.ball.vx.abs());
        let (x_diff, y_diff) = Self::inputs(game_state);
        self.controller.compute_velocity(x_diff, y_diff)
    }

    /// Full inference trace for the current state (HUD, `--eval`)
    pub fn inspect(&self, game_state: &GameState) -> Inference {
        let (x_diff, y_diff) = Self::inputs(game_state);
        self.controller.infer(x_diff, y_diff)
    }

    pub fn controller(&self) -> &FuzzyController {
        &self.controller
    }

    /// Forget the tuned speed (new game or new round)
    pub fn reset(&mut self) {
        self.controller = FuzzyController::for_ball_speed(&self.config, 0.0);
        self.tuned_speed = 0.0;
    }

    pub fn name(&self) -> &str {
        "Fuzzy"
    }

    fn retune(&mut self, ball_speed_x: f32) {
        if ball_speed_x == self.tuned_speed {
            return;
        }
        self.controller = FuzzyController::for_ball_speed(&self.config, ball_speed_x);
        self.tuned_speed = ball_speed_x;
        tracing::debug!(
            ball_speed_x,
            fast_ball = ball_speed_x > self.config.fast_ball_threshold,
            "retuned fuzzy controller"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;
    use crate::game::{physics, update_with_events, Player};

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (GameState, FuzzyBot) {
        (
            GameState::new(&PhysicsConfig::default()),
            FuzzyBot::new(FuzzyConfig::default()),
        )
    }

    #[test]
    fn test_inputs_are_relative_to_paddle_center() {
        let (mut state, _) = setup();
        state.ball.x = 450.0;
        state.ball.y = 137.5;

        // AI paddle center is (400, 37.5)
        assert_eq!(FuzzyBot::inputs(&state), (50.0, 100.0));

        state.ball.y = 0.0;
        assert_eq!(FuzzyBot::inputs(&state), (50.0, 37.5));
    }

    #[test]
    fn test_moves_toward_ball() {
        let (mut state, mut bot) = setup();

        state.ball.x = 650.0;
        assert!(bot.get_velocity(&state) > 0.0);

        state.ball.x = 100.0;
        assert!(bot.get_velocity(&state) < 0.0);

        state.ball.x = state.ai_paddle.center_x();
        assert_eq!(bot.get_velocity(&state), 0.0);
    }

    #[test]
    fn test_retunes_to_ball_speed() {
        let (mut state, mut bot) = setup();

        bot.get_velocity(&state);
        assert_eq!(bot.controller().max_speed(), 120.0);

        state.ball.speed_up(12.0);
        state.ball.vx = -state.ball.vx;
        bot.get_velocity(&state);
        assert_eq!(bot.controller().max_speed(), 132.0);

        // Never faster than the ball moves sideways
        state.ball.x = 800.0;
        assert!(bot.get_velocity(&state) <= 132.0);

        bot.reset();
        assert_eq!(bot.controller().max_speed(), 0.0);
    }

    #[test]
    fn test_returns_an_incoming_ball() {
        let (mut state, mut bot) = setup();
        state.ball.x = 430.0;
        state.ball.y = 300.0;
        state.ball.vx = 60.0;
        state.ball.vy = -120.0;

        let mut returned = false;
        for _ in 0..200 {
            let velocity = bot.get_velocity(&state);
            physics::apply_velocity(&mut state.ai_paddle, velocity, DT, state.field_width);
            let events = update_with_events(&mut state, DT);
            assert_ne!(events.point_scored, Some(Player::Human));
            if events.paddle_bounce == Some(Player::Ai) {
                returned = true;
                break;
            }
        }
        assert!(returned);
    }

    #[test]
    fn test_inspect_reports_current_state() {
        let (mut state, mut bot) = setup();
        state.ball.x = 100.0;
        bot.get_velocity(&state);

        let trace = bot.inspect(&state);
        assert_eq!(trace.x_diff, -300.0);
        assert_eq!(trace.velocity, bot.get_velocity(&state));
        assert_eq!(bot.name(), "Fuzzy");
    }
}
