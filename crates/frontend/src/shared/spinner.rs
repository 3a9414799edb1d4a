//! Busy indicator shown in place of a button label.
//!
//! The animation is driven by a local clock, never by network progress.
//! The clock is reached through the `Ticker` seam: in the browser it is a
//! `gloo_timers` interval, in tests a manually advanced clock.

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use std::any::Any;
use std::rc::Rc;

pub const GLYPHS: [char; 4] = ['|', '/', '—', '\\'];
pub const SPINNER_PERIOD_MS: u32 = 120;

/// Owns a running periodic timer; dropping it cancels the timer
pub struct TickHandle {
    _timer: Box<dyn Any>,
}

impl TickHandle {
    pub fn new<T: 'static>(timer: T) -> Self {
        Self {
            _timer: Box::new(timer),
        }
    }
}

pub trait Ticker {
    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> TickHandle;
}

/// `setInterval` based ticker
pub struct IntervalTicker;

impl Ticker for IntervalTicker {
    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> TickHandle {
        TickHandle::new(Interval::new(period_ms, tick))
    }
}

pub struct Spinner {
    ticker: Rc<dyn Ticker>,
    index: RwSignal<usize>,
    timer: Option<TickHandle>,
}

impl Spinner {
    pub fn new(ticker: Rc<dyn Ticker>) -> Self {
        Self {
            ticker,
            index: RwSignal::new(0),
            timer: None,
        }
    }

    /// Start cycling from the first glyph. Restarts if already running.
    pub fn start(&mut self) {
        self.timer = None;
        self.index.set(0);
        let index = self.index;
        self.timer = Some(self.ticker.every(
            SPINNER_PERIOD_MS,
            Box::new(move || {
                index.try_update(|i| *i = (*i + 1) % GLYPHS.len());
            }),
        ));
    }

    /// Release the timer and reset to the first glyph
    pub fn stop(&mut self) {
        if self.timer.take().is_some() || self.index.get_untracked() != 0 {
            self.index.set(0);
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn current_glyph(&self) -> char {
        GLYPHS[self.index.get_untracked() % GLYPHS.len()]
    }

    /// Reactive view of the current glyph
    pub fn glyph_signal(&self) -> Signal<char> {
        let index = self.index;
        Signal::derive(move || GLYPHS[index.get() % GLYPHS.len()])
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ManualTicker;
    use super::*;

    fn spinner() -> (Spinner, ManualTicker) {
        let ticker = ManualTicker::new();
        (Spinner::new(Rc::new(ticker.clone())), ticker)
    }

    #[test]
    fn test_cycles_every_period() {
        let (mut spinner, clock) = spinner();
        spinner.start();
        assert_eq!(spinner.current_glyph(), '|');
        clock.advance(119);
        assert_eq!(spinner.current_glyph(), '|');
        clock.advance(1);
        assert_eq!(spinner.current_glyph(), '/');
        clock.advance(120);
        assert_eq!(spinner.current_glyph(), '—');
        clock.advance(120);
        assert_eq!(spinner.current_glyph(), '\\');
        clock.advance(120);
        assert_eq!(spinner.current_glyph(), '|');
    }

    #[test]
    fn test_stop_releases_timer_and_resets() {
        let (mut spinner, clock) = spinner();
        spinner.start();
        clock.advance(240);
        assert_eq!(clock.active_timers(), 1);
        spinner.stop();
        assert_eq!(clock.active_timers(), 0);
        assert_eq!(spinner.current_glyph(), '|');
        clock.advance(480);
        assert_eq!(spinner.current_glyph(), '|');
        spinner.stop();
        assert!(!spinner.is_running());
    }

    #[test]
    fn test_restart_does_not_stack_timers() {
        let (mut spinner, clock) = spinner();
        spinner.start();
        clock.advance(120);
        spinner.start();
        assert_eq!(clock.active_timers(), 1);
        assert_eq!(spinner.current_glyph(), '|');
        clock.advance(120);
        assert_eq!(spinner.current_glyph(), '/');
    }

    #[test]
    fn test_drop_releases_timer() {
        let (mut spinner, clock) = spinner();
        spinner.start();
        drop(spinner);
        assert_eq!(clock.active_timers(), 0);
    }
}
