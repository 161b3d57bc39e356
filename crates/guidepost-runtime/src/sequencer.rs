#![forbid(unsafe_code)]

//! Step sequencer: the tour state machine.
//!
//! Pure state; it never touches a surface. Each transition returns the
//! [`TourEvent`] it produced so the driver can render or tear down.
//!
//! # States
//!
//! `Idle` (nothing highlighted) and `Active(i)`. Walking past the last step
//! returns to `Idle`; there is no separate finished state.

use guidepost_core::error::{Result, TourError};
use guidepost_core::step::Step;

/// Why the active step changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourAdvanceReason {
    ManualNext,
    ManualPrev,
    Jump,
}

/// A state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourEvent {
    /// Entered `Active(index)` from `Idle`.
    Started { index: usize },
    /// `start` was called again for the step already active.
    Restarted { index: usize },
    StepChanged {
        from: usize,
        to: usize,
        reason: TourAdvanceReason,
    },
    /// `next` was called on the last step; the tour is `Idle` again.
    Finished { last: usize },
    /// `hide` was called while a step was active.
    Hidden { index: usize },
}

/// Sequencer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TourPhase {
    #[default]
    Idle,
    Active(usize),
}

/// State machine over an ordered, immutable list of steps.
#[derive(Debug, Clone, Default)]
pub struct StepSequencer {
    steps: Vec<Step>,
    active_index: usize,
    phase: TourPhase,
}

impl StepSequencer {
    pub fn new(steps: impl Into<Vec<Step>>) -> Self {
        Self {
            steps: steps.into(),
            active_index: 0,
            phase: TourPhase::Idle,
        }
    }

    pub fn phase(&self) -> TourPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, TourPhase::Active(_))
    }

    /// Most recently activated index. Kept after the tour returns to `Idle`.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// The highlighted step, if any.
    pub fn active_step(&self) -> Option<&Step> {
        match self.phase {
            TourPhase::Active(index) => self.steps.get(index),
            TourPhase::Idle => None,
        }
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Progress text such as `"2 of 5"` while a step is active.
    pub fn progress(&self) -> Option<String> {
        match self.phase {
            TourPhase::Active(index) => Some(format!("{} of {}", index + 1, self.steps.len())),
            TourPhase::Idle => None,
        }
    }

    /// Activate `index`.
    ///
    /// Fails without changing state if the list is empty or `index` is out
    /// of range.
    pub fn start(&mut self, index: usize) -> Result<TourEvent> {
        if self.steps.is_empty() {
            return Err(TourError::EmptyStepList);
        }
        if index >= self.steps.len() {
            return Err(TourError::IndexOutOfRange {
                index,
                len: self.steps.len(),
            });
        }

        let event = match self.phase {
            TourPhase::Idle => TourEvent::Started { index },
            TourPhase::Active(from) if from == index => TourEvent::Restarted { index },
            TourPhase::Active(from) => TourEvent::StepChanged {
                from,
                to: index,
                reason: TourAdvanceReason::Jump,
            },
        };
        self.active_index = index;
        self.phase = TourPhase::Active(index);
        Ok(event)
    }

    /// Advance from `active_index`, or finish when it is the last step.
    ///
    /// Works from `Idle` too: a fresh or hidden tour resumes at the step
    /// after the last one shown. Finishing from `Idle` returns `None`.
    /// No-op when there are no steps.
    pub fn next(&mut self) -> Option<TourEvent> {
        if self.steps.is_empty() {
            return None;
        }
        let to = self.active_index + 1;
        if to >= self.steps.len() {
            return match std::mem::take(&mut self.phase) {
                TourPhase::Active(last) => Some(TourEvent::Finished { last }),
                TourPhase::Idle => None,
            };
        }
        Some(self.move_to(to, TourAdvanceReason::ManualNext))
    }

    /// Go back from `active_index`. No-op at index 0 or with no steps.
    ///
    /// Like [`next`](Self::next), this also works from `Idle`.
    pub fn previous(&mut self) -> Option<TourEvent> {
        if self.steps.is_empty() || self.active_index == 0 {
            return None;
        }
        Some(self.move_to(self.active_index - 1, TourAdvanceReason::ManualPrev))
    }

    fn move_to(&mut self, to: usize, reason: TourAdvanceReason) -> TourEvent {
        let event = match self.phase {
            TourPhase::Active(from) => TourEvent::StepChanged { from, to, reason },
            TourPhase::Idle => TourEvent::Started { index: to },
        };
        self.active_index = to;
        self.phase = TourPhase::Active(to);
        event
    }

    /// Return to `Idle` from any state.
    pub fn hide(&mut self) -> Option<TourEvent> {
        match std::mem::take(&mut self.phase) {
            TourPhase::Active(index) => Some(TourEvent::Hidden { index }),
            TourPhase::Idle => None,
        }
    }
}
