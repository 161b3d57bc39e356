#![forbid(unsafe_code)]

//! Tour driver: composes the sequencer, the overlay, and the position engine
//! over a [`RenderSurface`].
//!
//! Every transition that lands on a step runs pass 1 immediately and leaves
//! a [`PaintTicket`] with the surface. The host hands that ticket back to
//! [`Tour::after_paint`] after its next paint, which runs pass 2.
//!
//! # Stale continuations
//!
//! Each pass 1, [`Tour::hidden`], and finishing the tour bump the
//! generation. A ticket from an older generation resolves to
//! [`PaintOutcome::Stale`] and writes nothing.
//!
//! # Missing targets
//!
//! If a step's target cannot be measured, the call fails with
//! [`TourError::MissingTarget`] but the sequencer has already moved to that
//! step. The overlay keeps whatever it last drew.
//!
//! # Surface failures
//!
//! [`Tour::hidden`] detaches the overlay before going idle, so a failed
//! detach leaves the step active and mounted. Finishing through
//! [`Tour::next`] goes idle first; if that detach fails the tour is idle
//! with the overlay still mounted, and a later `hidden` retries it.

use guidepost_backend::{PaintTicket, RenderSurface};
use guidepost_core::config::TourConfig;
use guidepost_core::error::{Result, TourError};
use guidepost_core::geometry::Rect;
use guidepost_core::position::{OverlayGeometry, compute_message_geometry, compute_pass_one};
use guidepost_core::step::{Placement, Step};

use crate::overlay::OverlayLifecycle;
use crate::sequencer::{StepSequencer, TourEvent, TourPhase};

const TOUR_TARGET: &str = "guidepost.tour";
const LAYOUT_TARGET: &str = "guidepost.layout";

/// Result of running a pass-2 continuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintOutcome {
    /// Message geometry was computed and written.
    Applied(OverlayGeometry),
    /// The ticket no longer matches the active step; nothing was written.
    Stale,
}

impl PaintOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Pass-1 state carried to pass 2.
#[derive(Debug, Clone, Copy)]
struct PendingLayout {
    ticket: PaintTicket,
    /// Document-absolute target rect measured in pass 1.
    target: Rect,
    placement: Placement,
    geometry: OverlayGeometry,
}

/// A guided tour over a fixed list of steps.
#[derive(Debug)]
pub struct Tour {
    sequencer: StepSequencer,
    overlay: OverlayLifecycle,
    config: TourConfig,
    generation: u64,
    pending: Option<PendingLayout>,
}

impl Tour {
    /// Create a tour and its overlay primitives.
    ///
    /// Fails with [`TourError::EmptyStepList`] for an empty list and
    /// [`TourError::InvalidConfig`] when `config` does not validate.
    pub fn new<S: RenderSurface>(
        surface: &mut S,
        steps: impl Into<Vec<Step>>,
        config: TourConfig,
    ) -> Result<Self> {
        let steps = steps.into();
        if steps.is_empty() {
            return Err(TourError::EmptyStepList);
        }
        let errors = config.validate();
        if !errors.is_empty() {
            tracing::warn!(target: TOUR_TARGET, errors = ?errors, "rejected tour config");
            return Err(TourError::InvalidConfig(errors));
        }

        let overlay = OverlayLifecycle::new(surface, config.mount_point)?;
        tracing::debug!(target: TOUR_TARGET, steps = steps.len(), "tour created");

        Ok(Self {
            sequencer: StepSequencer::new(steps),
            overlay,
            config,
            generation: 0,
            pending: None,
        })
    }

    /// Show step `index`.
    pub fn start<S: RenderSurface>(&mut self, surface: &mut S, index: usize) -> Result<TourEvent> {
        let event = self.sequencer.start(index)?;
        log_transition(&event);
        self.render(surface, index)?;
        Ok(event)
    }

    /// Show the first step.
    pub fn start_first<S: RenderSurface>(&mut self, surface: &mut S) -> Result<TourEvent> {
        self.start(surface, 0)
    }

    /// Advance one step, or hide the overlay when on the last step.
    ///
    /// From idle this shows the step after the last one shown. Returns
    /// `Ok(None)` when there is nothing to do.
    pub fn next<S: RenderSurface>(&mut self, surface: &mut S) -> Result<Option<TourEvent>> {
        let Some(event) = self.sequencer.next() else {
            return Ok(None);
        };
        log_transition(&event);
        match event {
            TourEvent::Finished { .. } => {
                self.invalidate();
                self.overlay.unmount(surface)?;
            }
            _ => {
                self.render(surface, self.sequencer.active_index())?;
            }
        }
        Ok(Some(event))
    }

    /// Go back one step, from idle too. Returns `Ok(None)` at the first step.
    pub fn previous<S: RenderSurface>(&mut self, surface: &mut S) -> Result<Option<TourEvent>> {
        let Some(event) = self.sequencer.previous() else {
            return Ok(None);
        };
        log_transition(&event);
        self.render(surface, self.sequencer.active_index())?;
        Ok(Some(event))
    }

    /// Hide the overlay and return to idle. Safe to call in any state.
    ///
    /// The overlay is detached before the sequencer goes idle, so a failed
    /// detach leaves the step active.
    pub fn hidden<S: RenderSurface>(&mut self, surface: &mut S) -> Result<Option<TourEvent>> {
        self.invalidate();
        self.overlay.unmount(surface)?;
        let event = self.sequencer.hide();
        if let Some(event) = &event {
            log_transition(event);
        }
        Ok(event)
    }

    /// Re-run pass 1 for the active step, e.g. after the host resized.
    ///
    /// Returns the new ticket, or `None` when idle.
    pub fn refresh<S: RenderSurface>(&mut self, surface: &mut S) -> Result<Option<PaintTicket>> {
        match self.sequencer.phase() {
            TourPhase::Active(index) => self.render(surface, index).map(Some),
            TourPhase::Idle => Ok(None),
        }
    }

    /// Run the pass-2 continuation for `ticket`.
    ///
    /// A ticket is honoured at most once.
    pub fn after_paint<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        ticket: PaintTicket,
    ) -> Result<PaintOutcome> {
        let pending = match self.pending {
            Some(pending) if pending.ticket == ticket => pending,
            _ => {
                tracing::debug!(
                    target: LAYOUT_TARGET,
                    ticket = %ticket,
                    current = self.generation,
                    "stale paint continuation"
                );
                return Ok(PaintOutcome::Stale);
            }
        };
        self.pending = None;

        if self.sequencer.phase() != TourPhase::Active(ticket.step()) || !self.overlay.is_mounted() {
            tracing::debug!(target: LAYOUT_TARGET, ticket = %ticket, "tour no longer showing step");
            return Ok(PaintOutcome::Stale);
        }

        let span = tracing::debug_span!(
            target: LAYOUT_TARGET,
            "tour.pass_two",
            step = ticket.step(),
            generation = ticket.generation(),
            placement = pending.placement.as_str()
        );
        let _guard = span.enter();

        let height = self
            .overlay
            .message_box_height(surface)
            .ok_or_else(|| TourError::surface("message box cannot be measured"))?;
        let message = compute_message_geometry(pending.target, height, pending.placement, &self.config);
        let geometry = pending.geometry.with_message(message);
        self.overlay.apply_geometry(surface, &geometry)?;

        tracing::debug!(
            target: LAYOUT_TARGET,
            height,
            message_y = message.message_y,
            arrow_x = message.arrow_origin.x,
            "message positioned"
        );
        Ok(PaintOutcome::Applied(geometry))
    }

    pub fn sequencer(&self) -> &StepSequencer {
        &self.sequencer
    }

    pub fn overlay(&self) -> &OverlayLifecycle {
        &self.overlay
    }

    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    /// Last geometry written to the overlay.
    pub fn geometry(&self) -> Option<&OverlayGeometry> {
        self.overlay.geometry()
    }

    /// Ticket awaiting pass 2, if any.
    pub fn pending_ticket(&self) -> Option<PaintTicket> {
        self.pending.map(|p| p.ticket)
    }

    /// Current layout generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    /// Pass 1 for step `index`.
    fn render<S: RenderSurface>(&mut self, surface: &mut S, index: usize) -> Result<PaintTicket> {
        self.invalidate();

        let Some(step) = self.sequencer.step(index) else {
            return Err(TourError::IndexOutOfRange {
                index,
                len: self.sequencer.step_count(),
            });
        };
        let placement = step.placement_mode();

        let span = tracing::debug_span!(
            target: LAYOUT_TARGET,
            "tour.pass_one",
            step = index,
            generation = self.generation,
            placement = placement.as_str()
        );
        let _guard = span.enter();

        let Some(measurement) = surface.measure(step.target()) else {
            tracing::warn!(
                target: LAYOUT_TARGET,
                step = index,
                node = %step.target(),
                "step target is not on the surface"
            );
            return Err(TourError::MissingTarget { index });
        };
        let target = measurement.to_document();
        let viewport = surface.viewport();
        let geometry = compute_pass_one(target, placement, &self.config, viewport.height);

        self.overlay.apply_geometry(surface, &geometry)?;
        self.overlay.set_content(surface, step.content())?;
        self.overlay.mount(surface)?;
        surface.scroll_to(geometry.scroll.x, geometry.scroll.y, self.config.scroll_behavior);

        let ticket = PaintTicket::new(self.generation, index);
        surface.on_next_paint(ticket);
        self.pending = Some(PendingLayout {
            ticket,
            target,
            placement,
            geometry,
        });

        tracing::debug!(
            target: LAYOUT_TARGET,
            scroll_y = geometry.scroll.y,
            backdrop_y = geometry.backdrop.y,
            "backdrop positioned"
        );
        Ok(ticket)
    }
}

fn log_transition(event: &TourEvent) {
    match event {
        TourEvent::Started { index } => {
            tracing::info!(target: TOUR_TARGET, step = index, "tour started");
        }
        TourEvent::Finished { last } => {
            tracing::info!(target: TOUR_TARGET, last = last, "tour finished");
        }
        other => {
            tracing::debug!(target: TOUR_TARGET, event = ?other, "tour transition");
        }
    }
}
