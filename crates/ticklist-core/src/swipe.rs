//! Swipe-to-dismiss gesture state machine.
//!
//! Turns the continuous position stream of a horizontal drag into a discrete
//! keep-or-dismiss decision for one list row. The machine is pure state: it
//! receives [`SwipeEvent`]s and answers with [`SwipeAction`]s, so it can be
//! driven and tested without any rendering surface. The presentation layer
//! owns the actual tweening; the machine only hands out target offsets and
//! reports when a row should be removed.

/// Lifecycle of one drag interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipePhase {
    /// No active gesture on the row.
    Idle,
    /// Finger down, offset tracking the clamped drag position.
    Dragging,
    /// Drag ended past the threshold; exit animation in flight.
    Committing,
    /// Drag ended short of the threshold (or was cancelled); snap-back in flight.
    Resetting,
}

/// Discrete inputs fed in by the gesture source and the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwipeEvent {
    /// Finger down on the row.
    Started,
    /// Position update with the raw horizontal translation.
    Moved { translation: f32 },
    /// Finger lifted; the final offset decides commit vs. reset.
    Ended,
    /// The gesture was interrupted before it ended.
    Cancelled,
    /// The presentation finished animating to the last requested target.
    AnimationCompleted,
}

/// What the caller should do after handing the machine an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwipeAction {
    /// Nothing to do.
    None,
    /// Tween the row offset toward `target` and report back with
    /// [`SwipeEvent::AnimationCompleted`].
    AnimateTo { target: f32 },
    /// The exit animation finished; remove the row now.
    Dismiss,
}

/// Tuning for the drag range and the commit decision.
///
/// `max_translation` is the leftmost offset a row can reach (a negative
/// number of display units); it bounds how much of the back view a drag can
/// ever expose. `commit_ratio` is the fraction of that bound the final offset
/// must pass for the drag to count as a dismiss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeConfig {
    pub max_translation: f32,
    pub commit_ratio: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            max_translation: -128.0,
            commit_ratio: 0.2,
        }
    }
}

impl SwipeConfig {
    /// Offset the final drag position must pass (strictly) to dismiss.
    pub fn threshold(&self) -> f32 {
        self.max_translation * self.commit_ratio
    }
}

/// State machine for a single row's swipe gesture.
///
/// One machine lives exactly as long as one gesture session: created when a
/// drag starts, discarded once it settles back to [`SwipePhase::Idle`].
/// Events that make no sense in the current phase (an end without a start, a
/// move while an animation runs, a second start mid-drag) are dropped rather
/// than acted on.
#[derive(Clone, Debug)]
pub struct SwipeMachine {
    config: SwipeConfig,
    phase: SwipePhase,
    translation: f32,
}

impl SwipeMachine {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            phase: SwipePhase::Idle,
            translation: 0.0,
        }
    }

    pub fn phase(&self) -> SwipePhase {
        self.phase
    }

    /// Current clamped horizontal offset of the row.
    pub fn translation(&self) -> f32 {
        self.translation
    }

    pub fn is_idle(&self) -> bool {
        self.phase == SwipePhase::Idle
    }

    /// Advance the machine with one event.
    ///
    /// The commit decision uses strict inequality on the final offset at
    /// gesture end: a drag that crossed the threshold mid-gesture but pulled
    /// back before the finger lifted does not dismiss, and neither does one
    /// resting exactly on the threshold.
    pub fn handle(&mut self, event: SwipeEvent) -> SwipeAction {
        match (self.phase, event) {
            (SwipePhase::Idle, SwipeEvent::Started) => {
                self.phase = SwipePhase::Dragging;
                self.translation = 0.0;
                SwipeAction::None
            }
            (SwipePhase::Dragging, SwipeEvent::Moved { translation }) => {
                self.translation = translation.clamp(self.config.max_translation, 0.0);
                SwipeAction::None
            }
            (SwipePhase::Dragging, SwipeEvent::Ended) => {
                if self.translation < self.config.threshold() {
                    self.phase = SwipePhase::Committing;
                    SwipeAction::AnimateTo {
                        target: self.config.max_translation,
                    }
                } else {
                    self.phase = SwipePhase::Resetting;
                    SwipeAction::AnimateTo { target: 0.0 }
                }
            }
            (SwipePhase::Dragging, SwipeEvent::Cancelled) => {
                self.phase = SwipePhase::Resetting;
                SwipeAction::AnimateTo { target: 0.0 }
            }
            (SwipePhase::Committing, SwipeEvent::AnimationCompleted) => {
                // The store mutation must not run before this point, or the
                // row vanishes mid-animation.
                self.phase = SwipePhase::Idle;
                self.translation = self.config.max_translation;
                SwipeAction::Dismiss
            }
            (SwipePhase::Resetting, SwipeEvent::AnimationCompleted) => {
                self.phase = SwipePhase::Idle;
                self.translation = 0.0;
                SwipeAction::None
            }
            // Inconsistent with the current phase; drop it.
            _ => SwipeAction::None,
        }
    }
}
