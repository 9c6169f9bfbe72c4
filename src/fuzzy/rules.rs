// Linguistic terms and the rule table

use serde::{Deserialize, Serialize};

/// Terms of `x_diff`: where the ball is horizontally relative to the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XDiffTerm {
    Left,
    Center,
    Right,
}

impl XDiffTerm {
    pub const ALL: [XDiffTerm; 3] = [XDiffTerm::Left, XDiffTerm::Center, XDiffTerm::Right];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            XDiffTerm::Left => "left",
            XDiffTerm::Center => "center",
            XDiffTerm::Right => "right",
        }
    }
}

/// Terms of `y_diff`: how far the ball is from the paddle vertically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum YDiffTerm {
    Close,
    Medium,
    Far,
}

impl YDiffTerm {
    pub const ALL: [YDiffTerm; 3] = [YDiffTerm::Close, YDiffTerm::Medium, YDiffTerm::Far];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            YDiffTerm::Close => "close",
            YDiffTerm::Medium => "medium",
            YDiffTerm::Far => "far",
        }
    }
}

/// Terms of the output `paddle_velocity`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityTerm {
    LeftFast,
    LeftSlow,
    Stop,
    RightSlow,
    RightFast,
}

impl VelocityTerm {
    pub const ALL: [VelocityTerm; 5] = [
        VelocityTerm::LeftFast,
        VelocityTerm::LeftSlow,
        VelocityTerm::Stop,
        VelocityTerm::RightSlow,
        VelocityTerm::RightFast,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            VelocityTerm::LeftFast => "left_fast",
            VelocityTerm::LeftSlow => "left_slow",
            VelocityTerm::Stop => "stop",
            VelocityTerm::RightSlow => "right_slow",
            VelocityTerm::RightFast => "right_fast",
        }
    }
}

/// "if x_diff is X and y_diff is Y then paddle_velocity is V"
///
/// A `None` antecedent matches anything. Antecedents are ANDed with `min`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_diff: Option<XDiffTerm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_diff: Option<YDiffTerm>,
    pub velocity: VelocityTerm,
}

impl Rule {
    pub const fn new(x_diff: XDiffTerm, y_diff: YDiffTerm, velocity: VelocityTerm) -> Self {
        Self {
            x_diff: Some(x_diff),
            y_diff: Some(y_diff),
            velocity,
        }
    }

    /// Rule conditioned on `x_diff` alone
    pub const fn when_x(x_diff: XDiffTerm, velocity: VelocityTerm) -> Self {
        Self {
            x_diff: Some(x_diff),
            y_diff: None,
            velocity,
        }
    }

    /// Firing strength given the fuzzified inputs
    pub fn firing_strength(&self, x_degrees: &[f32; 3], y_degrees: &[f32; 3]) -> f32 {
        let x = self.x_diff.map_or(1.0, |term| x_degrees[term.index()]);
        let y = self.y_diff.map_or(1.0, |term| y_degrees[term.index()]);
        x.min(y)
    }

    pub fn has_antecedent(&self) -> bool {
        self.x_diff.is_some() || self.y_diff.is_some()
    }
}

/// Chase hard when the ball is anywhere but close, ease in when it is close,
/// hold still once lined up
pub fn default_rules() -> Vec<Rule> {
    use VelocityTerm::*;
    use XDiffTerm::*;
    use YDiffTerm::*;

    vec![
        Rule::new(Left, Far, LeftFast),
        Rule::new(Left, Medium, LeftFast),
        Rule::when_x(Center, Stop),
        Rule::new(Right, Medium, RightFast),
        Rule::new(Right, Far, RightFast),
        Rule::new(Left, Close, LeftSlow),
        Rule::new(Right, Close, RightSlow),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_indices_match_all_order() {
        for (i, term) in XDiffTerm::ALL.iter().enumerate() {
            assert_eq!(term.index(), i);
        }
        for (i, term) in YDiffTerm::ALL.iter().enumerate() {
            assert_eq!(term.index(), i);
        }
        for (i, term) in VelocityTerm::ALL.iter().enumerate() {
            assert_eq!(term.index(), i);
        }
    }

    #[test]
    fn test_firing_strength_is_min_of_antecedents() {
        let rule = Rule::new(XDiffTerm::Left, YDiffTerm::Far, VelocityTerm::LeftFast);
        let x = [0.8, 0.2, 0.0];
        let y = [0.0, 0.5, 0.3];
        assert_eq!(rule.firing_strength(&x, &y), 0.3);

        let x_only = Rule::when_x(XDiffTerm::Center, VelocityTerm::Stop);
        assert_eq!(x_only.firing_strength(&x, &y), 0.2);
    }

    #[test]
    fn test_default_rules_are_mirror_symmetric() {
        let rules = default_rules();
        assert_eq!(rules.len(), 7);

        let mirror_x = |t: XDiffTerm| match t {
            XDiffTerm::Left => XDiffTerm::Right,
            XDiffTerm::Center => XDiffTerm::Center,
            XDiffTerm::Right => XDiffTerm::Left,
        };
        let mirror_v = |t: VelocityTerm| VelocityTerm::ALL[4 - t.index()];

        for rule in &rules {
            let mirrored = Rule {
                x_diff: rule.x_diff.map(mirror_x),
                y_diff: rule.y_diff,
                velocity: mirror_v(rule.velocity),
            };
            assert!(rules.contains(&mirrored), "no mirror for {:?}", rule);
        }
    }
}
