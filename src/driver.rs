//! Frame loop lifecycle
//!
//! The browser calls `tick` from `requestAnimationFrame`; tests call it in a
//! plain loop. Every scheduled frame carries the `FrameToken` it was
//! scheduled for, so a callback that fires after a stop or restart finds a
//! stale token and does nothing.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::input::InputSampler;
use crate::sim::{self, Bounds, SessionState, SimError, TickStatus};
use crate::tuning::{Tuning, TuningError};

/// Final result of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub won: bool,
    pub score: u64,
}

/// Receives the one and only end-of-session call
pub trait OutcomeReporter {
    fn on_session_end(&mut self, outcome: Outcome);
}

impl<F: FnMut(Outcome)> OutcomeReporter for F {
    fn on_session_end(&mut self, outcome: Outcome) {
        self(outcome)
    }
}

/// Identifies the session a scheduled frame belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

/// Owns the live session and decides which ticks may touch it
pub struct Driver<R = Pcg32> {
    tuning: Tuning,
    bounds: Bounds,
    rng: R,
    session: Option<SessionState>,
    /// Bumped on every start; tokens from older sessions are stale
    generation: u64,
    active: bool,
}

impl Driver<Pcg32> {
    /// Driver with a seeded PCG random source
    pub fn with_seed(bounds: Bounds, tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        Self::new(bounds, tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Driver<R> {
    /// Rejects tuning the step cannot run with (zero intervals, non-falling speeds)
    pub fn new(bounds: Bounds, tuning: Tuning, rng: R) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            bounds,
            rng,
            session: None,
            generation: 0,
            active: false,
        })
    }

    /// Begin a fresh session, replacing any previous one
    pub fn start(&mut self) -> FrameToken {
        self.generation += 1;
        self.session = Some(SessionState::new(self.bounds, &self.tuning));
        self.active = true;
        let (w, h) = self.bounds.size();
        log::info!("Session {} started on {}x{} surface", self.generation, w, h);
        FrameToken(self.generation)
    }

    /// Stop ticking. Safe to call any number of times.
    pub fn stop(&mut self) {
        if self.active {
            self.active = false;
            log::debug!("Session {} stopped", self.generation);
        }
    }

    /// Stop and drop the session entirely (logout)
    pub fn discard(&mut self) {
        self.stop();
        self.session = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Token for scheduling the next frame, if a session is running
    pub fn token(&self) -> Option<FrameToken> {
        self.active.then_some(FrameToken(self.generation))
    }

    /// Run one simulation step for the session `token` was issued for
    ///
    /// Stale tokens and stopped drivers return `Halted` without touching
    /// anything. A finishing tick stops the driver before the reporter runs.
    pub fn tick(
        &mut self,
        token: FrameToken,
        input: &InputSampler,
        reporter: &mut dyn OutcomeReporter,
    ) -> Result<TickStatus, SimError> {
        if !self.active || token.0 != self.generation {
            log::trace!("Ignoring stale frame for session {}", token.0);
            return Ok(TickStatus::Halted);
        }
        let Some(session) = self.session.as_mut() else {
            return Ok(TickStatus::Halted);
        };

        let status = sim::tick(session, input, self.bounds, &self.tuning, &mut self.rng)?;
        if let TickStatus::Finished(outcome) = status {
            self.stop();
            reporter.on_session_end(outcome);
        }
        Ok(status)
    }

    /// Accept new host surface size and put the player back at bottom centre
    ///
    /// Invalid sizes are rejected and the previous bounds stay in effect.
    /// A finished session is left as it ended.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<Bounds, SimError> {
        let bounds = Bounds::from_host(width, height).inspect_err(|e| {
            log::warn!("Rejected resize: {}", e);
        })?;
        self.bounds = bounds;
        if self.active {
            if let Some(session) = self.session.as_mut() {
                session.place_player(bounds, &self.tuning);
            }
        }
        log::info!("Surface resized to {}x{}", bounds.size().0, bounds.size().1);
        Ok(bounds)
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}
