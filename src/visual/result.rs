use bevy::prelude::*;
use std::time::Duration;

use crate::placement::EntryPoint;

use super::{
    routing::Invoke,
    surface::{QuestionCard, ResultCard, ResultText},
    utils::ease_out_cubic,
};

/// Where the question -> result hand-off is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionPhase {
    Asking,
    /// Question card fading out
    Leaving { elapsed: Duration },
    /// Result card visible, fading in
    Answered { elapsed: Duration },
}

#[derive(Resource, Debug, Clone)]
pub struct ResultTransition {
    pub phase: TransitionPhase,
    pub fade: Duration,
}

impl Default for ResultTransition {
    fn default() -> Self {
        Self {
            phase: TransitionPhase::Asking,
            fade: Duration::from_millis(380),
        }
    }
}

impl ResultTransition {
    pub fn new(fade: Duration) -> Self {
        Self {
            phase: TransitionPhase::Asking,
            fade,
        }
    }

    /// Both controls stop reacting once the answer is in
    pub fn controls_disabled(&self) -> bool {
        self.phase != TransitionPhase::Asking
    }

    /// Returns false if the answer was already given
    pub fn begin(&mut self) -> bool {
        if self.controls_disabled() {
            return false;
        }
        self.phase = if self.fade.is_zero() {
            TransitionPhase::Answered {
                elapsed: Duration::ZERO,
            }
        } else {
            TransitionPhase::Leaving {
                elapsed: Duration::ZERO,
            }
        };
        true
    }

    pub fn advance(&mut self, dt: Duration) {
        self.phase = match self.phase {
            TransitionPhase::Asking => TransitionPhase::Asking,
            TransitionPhase::Leaving { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.fade {
                    TransitionPhase::Answered {
                        elapsed: Duration::ZERO,
                    }
                } else {
                    TransitionPhase::Leaving { elapsed }
                }
            }
            TransitionPhase::Answered { elapsed } => TransitionPhase::Answered {
                elapsed: (elapsed + dt).min(self.fade),
            },
        };
    }

    fn fraction(&self, elapsed: Duration) -> f32 {
        if self.fade.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.fade.as_secs_f32()).clamp(0.0, 1.0)
        }
    }

    pub fn question_opacity(&self) -> f32 {
        match self.phase {
            TransitionPhase::Asking => 1.0,
            TransitionPhase::Leaving { elapsed } => 1.0 - ease_out_cubic(self.fraction(elapsed)),
            TransitionPhase::Answered { .. } => 0.0,
        }
    }

    pub fn result_opacity(&self) -> f32 {
        match self.phase {
            TransitionPhase::Answered { elapsed } => ease_out_cubic(self.fraction(elapsed)),
            _ => 0.0,
        }
    }
}

/// System: Start the hand-off when the accept control is activated
pub fn handle_accept(
    mut invocations: MessageReader<Invoke>,
    mut transition: ResMut<ResultTransition>,
) {
    for invoke in invocations.read() {
        if invoke.0 != EntryPoint::Accept {
            continue;
        }
        if transition.begin() {
            info!("Accepted! Showing the result card");
        }
    }
}

/// System: Fade cards and swap their visibility
pub fn animate_result(
    time: Res<Time>,
    mut transition: ResMut<ResultTransition>,
    mut question: Query<&mut Visibility, (With<QuestionCard>, Without<ResultCard>)>,
    mut result: Query<&mut Visibility, (With<ResultCard>, Without<QuestionCard>)>,
    mut texts: Query<&mut TextColor, With<ResultText>>,
) {
    if !transition.controls_disabled() {
        return;
    }
    transition.advance(time.delta());

    if let TransitionPhase::Answered { .. } = transition.phase {
        for mut visibility in &mut question {
            *visibility = Visibility::Hidden;
        }
        for mut visibility in &mut result {
            *visibility = Visibility::Inherited;
        }
        let alpha = transition.result_opacity();
        for mut color in &mut texts {
            color.0.set_alpha(alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_only_once() {
        let mut transition = ResultTransition::default();

        assert!(!transition.controls_disabled());
        assert!(transition.begin());
        assert!(transition.controls_disabled());
        assert!(!transition.begin());
    }

    #[test]
    fn test_leaving_then_answered() {
        let mut transition = ResultTransition::new(Duration::from_millis(380));
        transition.begin();

        transition.advance(Duration::from_millis(190));
        assert!(matches!(transition.phase, TransitionPhase::Leaving { .. }));
        let mid = transition.question_opacity();
        assert!(mid > 0.0 && mid < 1.0);
        assert_eq!(transition.result_opacity(), 0.0);

        transition.advance(Duration::from_millis(200));
        assert!(matches!(transition.phase, TransitionPhase::Answered { .. }));
        assert_eq!(transition.question_opacity(), 0.0);

        transition.advance(Duration::from_secs(1));
        assert!((transition.result_opacity() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_fade_answers_immediately() {
        let mut transition = ResultTransition::new(Duration::ZERO);
        transition.begin();

        assert!(matches!(transition.phase, TransitionPhase::Answered { .. }));
        assert_eq!(transition.result_opacity(), 1.0);
    }
}
