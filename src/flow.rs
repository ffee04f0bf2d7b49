//! Screen flow
//!
//! Login -> Playing -> (GameOver | Victory), with restart back into Playing
//! and logout back to Login. The flow is the production outcome reporter:
//! the end-of-session call moves it onto the matching terminal screen.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::driver::{Outcome, OutcomeReporter};

/// Which screen the page is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Login,
    Playing,
    GameOver { score: u64 },
    Victory { score: u64 },
}

impl Screen {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Screen::GameOver { .. } | Screen::Victory { .. })
    }

    /// Final score shown on a terminal screen
    pub fn final_score(&self) -> Option<u64> {
        match self {
            Screen::GameOver { score } | Screen::Victory { score } => Some(*score),
            _ => None,
        }
    }

    /// DOM id of the panel for this screen
    pub fn panel_id(&self) -> &'static str {
        match self {
            Screen::Login => "login",
            Screen::Playing => "hud",
            Screen::GameOver { .. } => "game-over",
            Screen::Victory { .. } => "victory",
        }
    }
}

/// User or game action driving the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowAction {
    Login,
    Finish,
    Restart,
    Logout,
}

impl fmt::Display for FlowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowAction::Login => "login",
            FlowAction::Finish => "finish",
            FlowAction::Restart => "restart",
            FlowAction::Logout => "logout",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("cannot {action} from {from:?}")]
    InvalidTransition { from: Screen, action: FlowAction },
}

/// Screen state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenFlow {
    screen: Screen,
}

impl Default for ScreenFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenFlow {
    pub fn new() -> Self {
        Self {
            screen: Screen::Login,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Gate passed; start playing
    pub fn login(&mut self) -> Result<(), FlowError> {
        match self.screen {
            Screen::Login => self.enter(Screen::Playing),
            from => Err(FlowError::InvalidTransition {
                from,
                action: FlowAction::Login,
            }),
        }
    }

    /// Session ended with `outcome`
    pub fn finish(&mut self, outcome: Outcome) -> Result<(), FlowError> {
        match self.screen {
            Screen::Playing => {
                let score = outcome.score;
                self.enter(if outcome.won {
                    Screen::Victory { score }
                } else {
                    Screen::GameOver { score }
                })
            }
            from => Err(FlowError::InvalidTransition {
                from,
                action: FlowAction::Finish,
            }),
        }
    }

    /// Play again from a terminal screen
    pub fn restart(&mut self) -> Result<(), FlowError> {
        if self.screen.is_terminal() {
            self.enter(Screen::Playing)
        } else {
            Err(FlowError::InvalidTransition {
                from: self.screen,
                action: FlowAction::Restart,
            })
        }
    }

    /// Back to the login gate from anywhere but the gate itself
    pub fn logout(&mut self) -> Result<(), FlowError> {
        match self.screen {
            Screen::Login => Err(FlowError::InvalidTransition {
                from: Screen::Login,
                action: FlowAction::Logout,
            }),
            _ => self.enter(Screen::Login),
        }
    }

    fn enter(&mut self, next: Screen) -> Result<(), FlowError> {
        log::info!("Screen {:?} -> {:?}", self.screen, next);
        self.screen = next;
        Ok(())
    }
}

impl OutcomeReporter for ScreenFlow {
    fn on_session_end(&mut self, outcome: Outcome) {
        if let Err(e) = self.finish(outcome) {
            log::error!("Dropped session outcome {:?}: {}", outcome, e);
        }
    }
}
