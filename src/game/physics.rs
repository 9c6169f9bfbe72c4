use super::state::{GameState, Paddle, Player};

/// What happened during one physics step
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PhysicsEvents {
    pub wall_bounce: bool,
    pub paddle_bounce: Option<Player>,
    pub point_scored: Option<Player>,
}

pub fn update_with_events(state: &mut GameState, dt: f32) -> PhysicsEvents {
    let mut events = PhysicsEvents::default();
    if state.game_over || state.paused {
        return events;
    }

    let ball = &mut state.ball;
    ball.x += ball.vx * dt;
    ball.y += ball.vy * dt;

    // Side walls
    if ball.x - ball.radius <= 0.0 {
        ball.x = ball.radius;
        ball.vx = ball.vx.abs();
        events.wall_bounce = true;
    } else if ball.x + ball.radius >= state.field_width {
        ball.x = state.field_width - ball.radius;
        ball.vx = -ball.vx.abs();
        events.wall_bounce = true;
    }

    events.paddle_bounce = check_paddle_collision(state);

    // Goals: the ball is out once its center leaves the field
    let scorer = if state.ball.y < 0.0 {
        Some(Player::Human)
    } else if state.ball.y > state.field_height {
        Some(Player::Ai)
    } else {
        None
    };

    if let Some(scorer) = scorer {
        events.point_scored = Some(scorer);
        if !state.award_point(scorer) {
            state.reset_ball();
        }
    }

    events
}

// Only a ball travelling toward a paddle can bounce off it
fn check_paddle_collision(state: &mut GameState) -> Option<Player> {
    if state.ball.vy > 0.0 && state.player_paddle.overlaps(&state.ball) {
        state.ball.vy = -state.ball.vy;
        state.ball.y = state.player_paddle.y - state.ball.radius;
        speed_up(state, Player::Human);
        return Some(Player::Human);
    }

    if state.ball.vy < 0.0 && state.ai_paddle.overlaps(&state.ball) {
        state.ball.vy = -state.ball.vy;
        state.ball.y = state.ai_paddle.y + state.ai_paddle.height + state.ball.radius;
        speed_up(state, Player::Ai);
        return Some(Player::Ai);
    }

    None
}

fn speed_up(state: &mut GameState, hitter: Player) {
    state.ball.speed_up(state.speed_growth);
    state.player_paddle.speed += state.speed_growth;
    state.last_hit = Some(hitter);
    tracing::debug!(
        ?hitter,
        vx = state.ball.vx,
        vy = state.ball.vy,
        "paddle bounce, ball sped up"
    );
}

/// One key press worth of player movement
pub fn move_paddle_left(paddle: &mut Paddle, tap_seconds: f32, field_width: f32) {
    paddle.x -= paddle.speed * tap_seconds;
    paddle.clamp(field_width);
}

pub fn move_paddle_right(paddle: &mut Paddle, tap_seconds: f32, field_width: f32) {
    paddle.x += paddle.speed * tap_seconds;
    paddle.clamp(field_width);
}

/// Integrate a controller velocity over `dt`
pub fn apply_velocity(paddle: &mut Paddle, velocity: f32, dt: f32, field_width: f32) {
    paddle.x += velocity * dt;
    paddle.clamp(field_width);
}
