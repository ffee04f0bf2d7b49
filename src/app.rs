//! Application shell
//!
//! Ties screen flow, the session driver, input, HUD and quotes together
//! behind the handful of calls the browser glue makes.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::driver::{Driver, FrameToken};
use crate::flow::{FlowError, Screen, ScreenFlow};
use crate::hud::{Hud, HudSnapshot};
use crate::input::InputSampler;
use crate::quotes::QuoteBoard;
use crate::renderer::{FrameStyle, Vertex, build_frame};
use crate::sim::{Bounds, SessionState, SimError, TickStatus};
use crate::tuning::{Tuning, TuningError};

pub struct App {
    flow: ScreenFlow,
    driver: Driver,
    input: InputSampler,
    hud: Hud,
    quotes: QuoteBoard,
    quote_rng: Pcg32,
}

impl App {
    pub fn new(
        bounds: Bounds,
        tuning: Tuning,
        seed: u64,
        quotes: Vec<String>,
    ) -> Result<Self, TuningError> {
        let driver = Driver::with_seed(bounds, tuning, seed)?;
        log::info!("App created (seed {})", seed);
        Ok(Self {
            flow: ScreenFlow::new(),
            driver,
            input: InputSampler::new(),
            hud: Hud::new(),
            quotes: QuoteBoard::new(quotes),
            quote_rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
        })
    }

    pub fn screen(&self) -> Screen {
        self.flow.screen()
    }

    /// Leave the login gate and start playing
    pub fn login(&mut self) -> Result<FrameToken, FlowError> {
        self.flow.login()?;
        Ok(self.start_session())
    }

    /// Fresh session with cleared input, HUD and quote bubble
    pub fn start_session(&mut self) -> FrameToken {
        self.input.clear();
        self.hud.invalidate();
        self.quotes.reset();
        self.driver.start()
    }

    /// Play again from a terminal screen
    pub fn restart(&mut self) -> Result<FrameToken, FlowError> {
        self.flow.restart()?;
        Ok(self.start_session())
    }

    /// Back to the gate; a running session is dropped without an outcome
    pub fn logout(&mut self) -> Result<(), FlowError> {
        self.flow.logout()?;
        self.driver.discard();
        self.input.clear();
        self.quotes.reset();
        Ok(())
    }

    /// One animation frame. The flow receives the outcome if this tick ends the session.
    pub fn frame(&mut self, token: FrameToken) -> TickStatus {
        match self.driver.tick(token, &self.input, &mut self.flow) {
            Ok(status) => status,
            Err(e) => {
                log::error!("Simulation step failed: {}", e);
                self.driver.stop();
                TickStatus::Halted
            }
        }
    }

    /// Returns true when the key is one of ours (caller suppresses the default action)
    pub fn key_down(&mut self, code: &str) -> bool {
        self.input.press(code)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.input.release(code)
    }

    /// Window lost focus: no keyup will arrive for held keys
    pub fn blur(&mut self) {
        self.input.clear();
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<Bounds, SimError> {
        self.driver.resize(width, height)
    }

    /// HUD values, only when they changed since the last call
    pub fn hud_update(&mut self) -> Option<HudSnapshot> {
        let session = self.driver.session()?;
        self.hud.refresh(session)
    }

    /// Vertices for the current session, if there is one
    pub fn render(&self, style: &FrameStyle) -> Option<Vec<Vertex>> {
        self.driver
            .session()
            .map(|session| build_frame(session, self.driver.bounds(), style))
    }

    /// Pick the next professor quote; nothing outside of play
    pub fn show_quote(&mut self) -> Option<String> {
        if self.flow.screen() != Screen::Playing {
            return None;
        }
        self.quotes.show_next(&mut self.quote_rng).map(str::to_string)
    }

    pub fn hide_quote(&mut self) {
        self.quotes.hide();
    }

    pub fn visible_quote(&self) -> Option<&str> {
        self.quotes.visible_quote()
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.driver.session()
    }

    /// Token for the next animation frame while a session runs
    pub fn token(&self) -> Option<FrameToken> {
        self.driver.token()
    }

    pub fn bounds(&self) -> Bounds {
        self.driver.bounds()
    }
}
