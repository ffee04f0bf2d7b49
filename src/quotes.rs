//! Professor quote bubble
//!
//! Every few seconds the professor shouts a random line for a short while.
//! The board is plain state; on the web two browser timers drive it and are
//! torn down with the session.

use rand::Rng;

/// Time between quotes
pub const QUOTE_INTERVAL_MS: i32 = 4000;
/// How long a quote stays up
pub const QUOTE_VISIBLE_MS: i32 = 2000;

/// Which quote (if any) is on screen
#[derive(Debug, Clone, Default)]
pub struct QuoteBoard {
    quotes: Vec<String>,
    current: Option<usize>,
    visible: bool,
}

impl QuoteBoard {
    pub fn new(quotes: Vec<String>) -> Self {
        Self {
            quotes,
            current: None,
            visible: false,
        }
    }

    /// Pick a random quote and show it
    pub fn show_next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&str> {
        if self.quotes.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.quotes.len());
        self.current = Some(index);
        self.visible = true;
        Some(&self.quotes[index])
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Back to the initial state (session teardown)
    pub fn reset(&mut self) {
        self.current = None;
        self.visible = false;
    }

    /// Quote to draw this frame
    pub fn visible_quote(&self) -> Option<&str> {
        if !self.visible {
            return None;
        }
        self.current.map(|i| self.quotes[i].as_str())
    }
}

#[cfg(target_arch = "wasm32")]
pub use timers::QuoteTimers;

#[cfg(target_arch = "wasm32")]
mod timers {
    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use super::{QUOTE_INTERVAL_MS, QUOTE_VISIBLE_MS};

    /// Owns the show interval and the pending hide timeout
    ///
    /// Both are cleared on `cancel` and on drop.
    pub struct QuoteTimers {
        interval_id: Option<i32>,
        hide_id: Rc<Cell<Option<i32>>>,
        _show: Closure<dyn FnMut()>,
        _hide: Rc<Closure<dyn FnMut()>>,
    }

    impl QuoteTimers {
        pub fn start(mut on_show: impl FnMut() + 'static, mut on_hide: impl FnMut() + 'static) -> Self {
            let hide_id = Rc::new(Cell::new(None));

            let hide = {
                let hide_id = hide_id.clone();
                Rc::new(Closure::<dyn FnMut()>::new(move || {
                    hide_id.set(None);
                    on_hide();
                }))
            };

            let show = {
                let hide_id = hide_id.clone();
                let hide = hide.clone();
                Closure::<dyn FnMut()>::new(move || {
                    on_show();
                    let Some(window) = web_sys::window() else {
                        return;
                    };
                    if let Some(id) = hide_id.take() {
                        window.clear_timeout_with_handle(id);
                    }
                    let callback: &js_sys::Function = (*hide).as_ref().unchecked_ref();
                    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
                        callback,
                        QUOTE_VISIBLE_MS,
                    ) {
                        Ok(id) => hide_id.set(Some(id)),
                        Err(e) => log::warn!("Failed to schedule quote hide: {:?}", e),
                    }
                })
            };

            let interval_id = web_sys::window().and_then(|w| {
                w.set_interval_with_callback_and_timeout_and_arguments_0(
                    show.as_ref().unchecked_ref(),
                    QUOTE_INTERVAL_MS,
                )
                .map_err(|e| log::warn!("Failed to start quote timer: {:?}", e))
                .ok()
            });

            Self {
                interval_id,
                hide_id,
                _show: show,
                _hide: hide,
            }
        }

        /// Clear both timers. Idempotent.
        pub fn cancel(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(id) = self.interval_id.take() {
                window.clear_interval_with_handle(id);
            }
            if let Some(id) = self.hide_id.take() {
                window.clear_timeout_with_handle(id);
            }
        }
    }

    impl Drop for QuoteTimers {
        fn drop(&mut self) {
            self.cancel();
        }
    }
}
