use rand::Rng;

use crate::config::PhysicsConfig;

// Paddle rows, measured from the top edge of the field
const AI_PADDLE_Y: f32 = 30.0;
const PLAYER_PADDLE_BOTTOM_GAP: f32 = 40.0;

#[derive(Debug, Clone)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
}

impl Ball {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius,
        }
    }

    pub fn reset(&mut self, x: f32, y: f32, vx: f32, vy: f32) {
        self.x = x;
        self.y = y;
        self.vx = vx;
        self.vy = vy;
    }

    /// Grow both velocity components by `amount`, keeping their direction
    pub fn speed_up(&mut self, amount: f32) {
        self.vx = grow(self.vx, amount);
        self.vy = grow(self.vy, amount);
    }
}

// A zero component stays zero; `f32::signum(0.0)` is 1
fn grow(v: f32, amount: f32) -> f32 {
    if v == 0.0 {
        0.0
    } else {
        v.signum() * (v.abs() + amount)
    }
}

/// A horizontal paddle; (x, y) is the top-left corner
#[derive(Debug, Clone)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Units per second (player paddle only, the AI speed follows the ball)
    pub speed: f32,
}

impl Paddle {
    pub fn new(x: f32, y: f32, width: f32, height: f32, speed: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            speed,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Keep the paddle within the field
    pub fn clamp(&mut self, field_width: f32) {
        self.x = self.x.clamp(0.0, (field_width - self.width).max(0.0));
    }

    /// Does the ball's bounding box overlap the paddle
    pub fn overlaps(&self, ball: &Ball) -> bool {
        ball.x + ball.radius > self.x
            && ball.x - ball.radius < self.x + self.width
            && ball.y + ball.radius > self.y
            && ball.y - ball.radius < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    /// Bottom paddle, keyboard controlled
    Human,
    /// Top paddle, fuzzy controlled
    Ai,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub ball: Ball,
    pub player_paddle: Paddle,
    pub ai_paddle: Paddle,
    pub player_score: u8,
    pub ai_score: u8,
    pub game_over: bool,
    pub winner: Option<Player>,
    pub last_hit: Option<Player>, // Colors the ball after the last paddle that touched it
    pub paused: bool,
    pub field_width: f32,
    pub field_height: f32,
    pub ball_initial_speed: f32,
    pub ball_serve_speed: f32,
    pub paddle_initial_speed: f32,
    pub tap_seconds: f32,
    pub speed_growth: f32,
    pub winning_score: u8,
}

impl GameState {
    pub fn new(physics: &PhysicsConfig) -> Self {
        let field_width = physics.field_width;
        let field_height = physics.field_height;

        let mut state = Self {
            ball: Ball::new(field_width / 2.0, field_height / 2.0, physics.ball_radius),
            player_paddle: Paddle::new(
                0.0,
                field_height - PLAYER_PADDLE_BOTTOM_GAP,
                physics.paddle_width,
                physics.paddle_height,
                physics.paddle_initial_speed,
            ),
            ai_paddle: Paddle::new(
                0.0,
                AI_PADDLE_Y,
                physics.paddle_width,
                physics.paddle_height,
                physics.paddle_initial_speed,
            ),
            player_score: 0,
            ai_score: 0,
            game_over: false,
            winner: None,
            last_hit: None,
            paused: false,
            field_width,
            field_height,
            ball_initial_speed: physics.ball_initial_speed,
            ball_serve_speed: physics.ball_serve_speed,
            paddle_initial_speed: physics.paddle_initial_speed,
            tap_seconds: physics.tap_seconds,
            speed_growth: physics.speed_growth,
            winning_score: physics.winning_score,
        };
        state.reset_game();
        state
    }

    /// Reset the entire game for a rematch (scores, game_over, winner, ball, paddles)
    pub fn reset_game(&mut self) {
        self.player_score = 0;
        self.ai_score = 0;
        self.game_over = false;
        self.winner = None;
        self.paused = false;

        // Opening serve heads down and to the right, toward the player
        let speed = self.ball_initial_speed;
        self.ball
            .reset(self.field_width / 2.0, self.field_height / 2.0, speed, speed);
        self.reset_paddles();
    }

    /// Serve after a point, in a random horizontal direction
    pub fn reset_ball(&mut self) {
        let toward_right = rand::thread_rng().gen_bool(0.5);
        self.serve(toward_right);
    }

    /// Re-center ball and paddles; the ball heads down toward the player
    pub fn serve(&mut self, toward_right: bool) {
        let speed = self.ball_serve_speed;
        let vx = if toward_right { speed } else { -speed };
        self.ball
            .reset(self.field_width / 2.0, self.field_height / 2.0, vx, speed);
        self.reset_paddles();
    }

    fn reset_paddles(&mut self) {
        self.last_hit = None;

        self.player_paddle.x = self.field_width / 2.0 + 100.0;
        self.player_paddle.speed = self.paddle_initial_speed;
        self.player_paddle.clamp(self.field_width);

        self.ai_paddle.x = (self.field_width - self.ai_paddle.width) / 2.0;
        self.ai_paddle.clamp(self.field_width);
    }

    /// Score a point; returns true when it wins the game
    pub fn award_point(&mut self, scorer: Player) -> bool {
        let score = match scorer {
            Player::Human => &mut self.player_score,
            Player::Ai => &mut self.ai_score,
        };
        *score = score.saturating_add(1);

        if self.winning_score > 0 && *score >= self.winning_score {
            self.game_over = true;
            self.winner = Some(scorer);
            return true;
        }
        false
    }
}
