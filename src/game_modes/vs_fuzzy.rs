use std::time::Instant;

use ratatui::Terminal;

use crate::ai::FuzzyBot;
use crate::config::Config;
use crate::game::{self, poll_input, GameState, InputAction, PhysicsEvents, Player};
use crate::ui;

use super::common::{frame_duration, limit_frame_rate};

/// Player vs fuzzy AI: everything the loop mutates between frames
pub struct Session {
    pub state: GameState,
    pub bot: FuzzyBot,
    pub show_hud: bool,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            state: GameState::new(&config.physics),
            bot: FuzzyBot::new(config.fuzzy.clone()),
            show_hud: config.display.show_fuzzy_hud,
        }
    }

    /// Apply one input action; returns false when the player quits
    pub fn handle_action(&mut self, action: InputAction) -> bool {
        let state = &mut self.state;
        match action {
            InputAction::Quit => return false,
            InputAction::Rematch => {
                if state.game_over {
                    state.reset_game();
                    self.bot.reset();
                    tracing::info!("rematch");
                }
            }
            InputAction::Pause => {
                if !state.game_over {
                    state.paused = !state.paused;
                }
            }
            InputAction::ToggleHud => self.show_hud = !self.show_hud,
            InputAction::PaddleLeft if !state.paused => {
                game::physics::move_paddle_left(
                    &mut state.player_paddle,
                    state.tap_seconds,
                    state.field_width,
                );
            }
            InputAction::PaddleRight if !state.paused => {
                game::physics::move_paddle_right(
                    &mut state.player_paddle,
                    state.tap_seconds,
                    state.field_width,
                );
            }
            InputAction::PaddleLeft | InputAction::PaddleRight => {}
        }
        true
    }

    /// Move the AI paddle, then advance the ball by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> PhysicsEvents {
        let state = &mut self.state;
        if state.game_over || state.paused {
            return PhysicsEvents::default();
        }

        let velocity = self.bot.get_velocity(state);
        game::physics::apply_velocity(&mut state.ai_paddle, velocity, dt, state.field_width);

        let events = game::update_with_events(state, dt);

        if let Some(scorer) = events.point_scored {
            tracing::info!(
                ?scorer,
                ai = state.ai_score,
                player = state.player_score,
                "point scored"
            );
            if state.game_over {
                tracing::info!(winner = ?state.winner, "game over");
            } else {
                self.bot.reset();
            }
        }

        events
    }

    pub fn overlay(&self) -> Option<ui::OverlayMessage> {
        if self.state.game_over {
            let winner_text = match self.state.winner {
                Some(Player::Human) => "YOU WIN!",
                Some(Player::Ai) => "FUZZY WINS",
                None => "GAME OVER",
            };
            Some(ui::OverlayMessage::info(vec![
                winner_text.to_string(),
                "".to_string(),
                "R to Rematch  |  Q to Quit".to_string(),
            ]))
        } else if self.state.paused {
            Some(
                ui::OverlayMessage::warning(vec!["P to Resume  |  Q to Quit".to_string()])
                    .with_title("Paused"),
            )
        } else {
            None
        }
    }

    pub fn hud_line(&self) -> Option<String> {
        self.show_hud.then(|| {
            let trace = self.bot.inspect(&self.state);
            ui::fuzzy_hud(&trace, self.bot.controller().max_speed())
        })
    }
}

/// Run single-player game against the fuzzy AI
pub fn run_game_vs_fuzzy<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
) -> anyhow::Result<()> {
    let mut session = Session::new(config);
    let palette = ui::Palette::from_config(&config.display);
    let hint = ui::controls_hint(&config.keybindings);
    let frame_budget = frame_duration(config.display.target_fps);
    // Simulated time per frame matches the sleep budget
    let dt = frame_budget.as_secs_f32();

    tracing::info!(
        bot = session.bot.name(),
        target_fps = config.display.target_fps,
        "game start"
    );

    loop {
        let now = Instant::now();

        for action in poll_input(&config.keybindings)? {
            if !session.handle_action(action) {
                tracing::info!("quit");
                return Ok(());
            }
        }

        session.tick(dt);

        let overlay = session.overlay();
        let hud = session.hud_line();
        terminal.draw(|f| {
            ui::render(
                f,
                &session.state,
                &palette,
                &hint,
                hud.as_deref(),
                overlay.as_ref(),
            )
        })?;

        limit_frame_rate(now, frame_budget);
    }
}
