// FuzzyPong configuration types
// Every section falls back to the built-in game when omitted

use serde::{Deserialize, Serialize};

use crate::fuzzy::{default_rules, MembershipFn, Rule};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub fuzzy: FuzzyConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    // Player paddle (bottom)
    pub paddle_left: String,
    pub paddle_right: String,

    // Game controls
    pub quit: String,
    pub pause: String,
    pub rematch: String,
    pub toggle_hud: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            paddle_left: "Left".to_string(),
            paddle_right: "Right".to_string(),
            quit: "Q".to_string(),
            pause: "P".to_string(),
            rematch: "R".to_string(),
            toggle_hud: "F".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // Virtual field dimensions
    pub field_width: f32,
    pub field_height: f32,

    pub ball_radius: f32,

    // Per-axis ball speed (units per second) at game start and on every serve after a point
    pub ball_initial_speed: f32,
    pub ball_serve_speed: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,

    // Player paddle speed (units per second); the AI speed follows the ball
    pub paddle_initial_speed: f32,

    // How long one key press drives the player paddle, in seconds
    pub tap_seconds: f32,

    // Added to |vx|, |vy| and the player paddle speed on every paddle bounce
    pub speed_growth: f32,

    // Points needed to win; 0 plays forever
    pub winning_score: u8,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 400.0,
            ball_radius: 10.0,
            ball_initial_speed: 120.0,
            ball_serve_speed: 180.0,
            paddle_width: 100.0,
            paddle_height: 15.0,
            paddle_initial_speed: 120.0,
            tap_seconds: 0.25,
            speed_growth: 12.0,
            winning_score: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub target_fps: u64,

    // Show the fuzzy controller's state under the score line
    pub show_fuzzy_hud: bool,

    // Colors (RGB values 0-255)
    pub player_color: [u8; 3],
    pub ai_color: [u8; 3],
    pub border_color: [u8; 3],
    pub score_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            show_fuzzy_hud: false,
            player_color: [198, 159, 213],
            ai_color: [143, 83, 184],
            border_color: [100, 100, 100],
            score_color: [255, 255, 217],
        }
    }
}

/// Breakpoints of the `x_diff` terms (ball.x - paddle center x)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct XDiffTerms {
    pub left: MembershipFn,
    pub center: MembershipFn,
    pub right: MembershipFn,
}

/// Breakpoints of the `y_diff` terms (|ball.y - paddle center y|)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct YDiffTerms {
    pub close: MembershipFn,
    pub medium: MembershipFn,
    pub far: MembershipFn,
}

/// Output terms on the normalized velocity axis [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VelocityTerms {
    pub left_fast: MembershipFn,
    pub left_slow: MembershipFn,
    pub stop: MembershipFn,
    pub right_slow: MembershipFn,
    pub right_fast: MembershipFn,
}

impl VelocityTerms {
    pub fn all(&self) -> [MembershipFn; 5] {
        [
            self.left_fast,
            self.left_slow,
            self.stop,
            self.right_slow,
            self.right_fast,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FuzzyConfig {
    // Inputs outside these ranges are clamped to the nearest edge
    pub x_domain: [f32; 2],
    pub y_domain: [f32; 2],

    // Ball |vx| (units per second) above which `fast_ball_center` replaces `x_diff.center`
    pub fast_ball_threshold: f32,
    pub fast_ball_center: MembershipFn,

    pub x_diff: XDiffTerms,
    pub y_diff: YDiffTerms,
    pub velocity: VelocityTerms,
    pub rules: Vec<Rule>,
}

impl Default for XDiffTerms {
    fn default() -> Self {
        Self {
            left: MembershipFn::Trapezoid([-400.0, -400.0, -200.0, 0.0]),
            center: MembershipFn::Triangle([-10.0, 0.0, 10.0]),
            right: MembershipFn::Trapezoid([0.0, 200.0, 400.0, 400.0]),
        }
    }
}

impl Default for YDiffTerms {
    fn default() -> Self {
        Self {
            // close and medium must not overlap, or velocity stops being monotone in x_diff
            close: MembershipFn::Trapezoid([0.0, 0.0, 20.0, 20.0]),
            medium: MembershipFn::Triangle([20.0, 200.0, 300.0]),
            far: MembershipFn::Trapezoid([200.0, 300.0, 400.0, 400.0]),
        }
    }
}

impl Default for VelocityTerms {
    fn default() -> Self {
        use MembershipFn::Triangle;

        Self {
            left_fast: Triangle([-1.0, -1.0, -0.9]),
            left_slow: Triangle([-0.9, -0.7, -0.5]),
            stop: Triangle([-0.5, 0.0, 0.5]),
            right_slow: Triangle([0.5, 0.7, 0.9]),
            right_fast: Triangle([0.9, 1.0, 1.0]),
        }
    }
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            x_domain: [-400.0, 400.0],
            y_domain: [0.0, 400.0],
            fast_ball_threshold: 360.0,
            fast_ball_center: MembershipFn::Triangle([-1.0, 0.0, 1.0]),
            x_diff: XDiffTerms::default(),
            y_diff: YDiffTerms::default(),
            velocity: VelocityTerms::default(),
            rules: default_rules(),
        }
    }
}

impl FuzzyConfig {
    /// Reject tables the controller cannot evaluate sensibly
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, [lo, hi]) in [("x_domain", self.x_domain), ("y_domain", self.y_domain)] {
            anyhow::ensure!(
                lo.is_finite() && hi.is_finite() && lo < hi,
                "{} must be a finite, non-empty range, got [{}, {}]",
                name,
                lo,
                hi
            );
        }

        anyhow::ensure!(
            self.fast_ball_threshold.is_finite() && self.fast_ball_threshold >= 0.0,
            "fast_ball_threshold must be a non-negative number, got {}",
            self.fast_ball_threshold
        );

        let inputs = [
            ("x_diff.left", self.x_diff.left),
            ("x_diff.center", self.x_diff.center),
            ("x_diff.right", self.x_diff.right),
            ("fast_ball_center", self.fast_ball_center),
            ("y_diff.close", self.y_diff.close),
            ("y_diff.medium", self.y_diff.medium),
            ("y_diff.far", self.y_diff.far),
        ];
        for (name, term) in inputs {
            term.validate()
                .map_err(|e| anyhow::anyhow!("{}: {}", name, e))?;
        }

        for term in self.velocity.all() {
            term.validate()?;
            anyhow::ensure!(
                (-1.0..=1.0).contains(&term.peak()),
                "velocity term peaks must lie in [-1, 1]: {:?}",
                term
            );
        }

        anyhow::ensure!(!self.rules.is_empty(), "rule table is empty");
        if let Some(rule) = self.rules.iter().find(|rule| !rule.has_antecedent()) {
            anyhow::bail!("rule has no antecedent: {:?}", rule);
        }

        Ok(())
    }
}
