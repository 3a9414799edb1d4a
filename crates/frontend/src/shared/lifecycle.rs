//! Request lifecycle shared by every panel.
//!
//! A panel is in exactly one `LoadingPhase` at a time. Leaving `Idle` starts
//! the spinner, returning to `Idle` stops it. Every started operation is
//! settled by a `PhaseGuard` drop, so a failed, panicking or abandoned call
//! still brings the panel back to `Idle`.
//!
//! A panel can be unmounted while one of its requests is in flight. Once its
//! signals are disposed every accessor here degrades to a no-op and `begin`
//! refuses to start, so a late continuation never touches dead state.

use crate::shared::error::{ApiError, ApiResult};
use crate::shared::spinner::{IntervalTicker, Spinner, Ticker};
use leptos::prelude::*;
use std::future::Future;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingPhase {
    #[default]
    Idle,
    ListLoading,
    OperationBusy,
}

/// Button face: the spinner glyph while `required` is active, else the label
pub fn button_face(phase: LoadingPhase, required: LoadingPhase, label: &str, glyph: char) -> String {
    if phase == required {
        glyph.to_string()
    } else {
        label.to_string()
    }
}

#[derive(Clone, Copy)]
pub struct Lifecycle {
    phase: RwSignal<LoadingPhase>,
    error: RwSignal<Option<String>>,
    spinner: StoredValue<Spinner, LocalStorage>,
    glyph: Signal<char>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::with_ticker(Rc::new(IntervalTicker))
    }

    pub fn with_ticker(ticker: Rc<dyn Ticker>) -> Self {
        let spinner = Spinner::new(ticker);
        let glyph = spinner.glyph_signal();
        Self {
            phase: RwSignal::new(LoadingPhase::Idle),
            error: RwSignal::new(None),
            spinner: StoredValue::new_local(spinner),
            glyph,
        }
    }

    /// Current phase (tracked)
    pub fn phase(&self) -> LoadingPhase {
        self.phase.try_get().unwrap_or_default()
    }

    pub fn phase_untracked(&self) -> LoadingPhase {
        self.phase.try_get_untracked().unwrap_or_default()
    }

    /// True once the owning panel has been unmounted
    pub fn is_disposed(&self) -> bool {
        self.phase.is_disposed()
    }

    pub fn is_idle(&self) -> bool {
        self.phase() == LoadingPhase::Idle
    }

    pub fn is_active(&self, phase: LoadingPhase) -> bool {
        self.phase() == phase
    }

    /// Spinner glyph (tracked)
    pub fn glyph(&self) -> char {
        self.glyph.get()
    }

    /// Face of a button whose call runs in `required` (tracked)
    pub fn face(&self, required: LoadingPhase, label: &str) -> String {
        button_face(self.phase(), required, label, self.glyph())
    }

    pub fn spinner_running(&self) -> bool {
        self.spinner
            .try_with_value(|s| s.is_running())
            .unwrap_or(false)
    }

    /// Most recent failure (tracked)
    pub fn error(&self) -> Option<String> {
        self.error.try_get().flatten()
    }

    pub fn error_untracked(&self) -> Option<String> {
        self.error.try_get_untracked().flatten()
    }

    pub fn set_error(&self, error: &ApiError) {
        let message = error.to_string();
        log::error!("{}", message);
        let _ = self.error.try_set(Some(message));
    }

    pub fn clear_error(&self) {
        if self.error_untracked().is_some() {
            let _ = self.error.try_set(None);
        }
    }

    /// Enter `phase` from `Idle`. The returned guard settles back to `Idle`
    /// when dropped.
    pub fn begin(&self, phase: LoadingPhase) -> ApiResult<PhaseGuard> {
        if phase == LoadingPhase::Idle {
            return Err(ApiError::validation("Cannot begin the idle phase"));
        }
        let Some(current) = self.phase.try_get_untracked() else {
            return Err(ApiError::validation("Panel is no longer mounted"));
        };
        if current != LoadingPhase::Idle {
            return Err(ApiError::validation(format!(
                "Another operation is in progress ({:?})",
                current
            )));
        }
        log::debug!("lifecycle: Idle -> {:?}", phase);
        let _ = self.phase.try_set(phase);
        self.clear_error();
        let _ = self.spinner.try_update_value(|s| s.start());
        Ok(PhaseGuard {
            lifecycle: *self,
            phase,
        })
    }

    fn settle(&self, from: LoadingPhase) {
        log::debug!("lifecycle: {:?} -> Idle", from);
        let _ = self.phase.try_set(LoadingPhase::Idle);
        let _ = self.spinner.try_update_value(|s| s.stop());
    }

    /// Run one operation inside `phase`.
    ///
    /// Returns `None` when the lifecycle is busy (the request is dropped) or
    /// the operation failed; failures become the current error.
    pub async fn run<T, F>(&self, phase: LoadingPhase, operation: F) -> Option<T>
    where
        F: Future<Output = ApiResult<T>>,
    {
        let _guard = match self.begin(phase) {
            Ok(guard) => guard,
            Err(e) => {
                log::warn!("Rejected overlapping request: {}", e);
                return None;
            }
        };
        match operation.await {
            Ok(value) => Some(value),
            Err(e) => {
                let _ = self.error.try_set(Some(e.to_string()));
                log::error!("{}", e);
                None
            }
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Settles the lifecycle back to `Idle` on drop
#[must_use]
pub struct PhaseGuard {
    lifecycle: Lifecycle,
    phase: LoadingPhase,
}

impl PhaseGuard {
    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }
}

impl Drop for PhaseGuard {
    fn drop(&mut self) {
        self.lifecycle.settle(self.phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::spinner::testing::ManualTicker;

    fn lifecycle() -> (Lifecycle, ManualTicker) {
        let clock = ManualTicker::new();
        (Lifecycle::with_ticker(Rc::new(clock.clone())), clock)
    }

    #[test]
    fn test_begin_and_settle() {
        let (lc, clock) = lifecycle();
        assert_eq!(lc.phase_untracked(), LoadingPhase::Idle);
        let guard = lc.begin(LoadingPhase::ListLoading).unwrap();
        assert_eq!(lc.phase_untracked(), LoadingPhase::ListLoading);
        assert!(lc.spinner_running());
        assert_eq!(clock.active_timers(), 1);
        drop(guard);
        assert_eq!(lc.phase_untracked(), LoadingPhase::Idle);
        assert!(!lc.spinner_running());
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn test_overlapping_begin_rejected() {
        let (lc, _clock) = lifecycle();
        let _busy = lc.begin(LoadingPhase::OperationBusy).unwrap();
        assert!(matches!(
            lc.begin(LoadingPhase::ListLoading),
            Err(ApiError::Validation(_))
        ));
        assert!(lc.begin(LoadingPhase::OperationBusy).is_err());
        assert_eq!(lc.phase_untracked(), LoadingPhase::OperationBusy);
        assert!(lc.begin(LoadingPhase::Idle).is_err());
    }

    #[test]
    fn test_glyph_only_moves_while_busy() {
        let (lc, clock) = lifecycle();
        clock.advance(360);
        assert_eq!(lc.glyph.get_untracked(), '|');
        let guard = lc.begin(LoadingPhase::OperationBusy).unwrap();
        clock.advance(240);
        assert_eq!(lc.glyph.get_untracked(), '—');
        drop(guard);
        assert_eq!(lc.glyph.get_untracked(), '|');
        clock.advance(120);
        assert_eq!(lc.glyph.get_untracked(), '|');
    }

    #[tokio::test]
    async fn test_run_failure_records_error_and_settles() {
        let (lc, clock) = lifecycle();
        let result: Option<()> = lc
            .run(LoadingPhase::OperationBusy, async {
                Err(ApiError::Http {
                    status: 500,
                    detail: Some("boom".into()),
                })
            })
            .await;
        assert!(result.is_none());
        assert_eq!(lc.phase_untracked(), LoadingPhase::Idle);
        assert_eq!(clock.active_timers(), 0);
        assert_eq!(
            lc.error_untracked().as_deref(),
            Some("HTTP error! status: 500, description: boom")
        );
    }

    #[tokio::test]
    async fn test_run_clears_previous_error() {
        let (lc, _clock) = lifecycle();
        lc.set_error(&ApiError::parse("speed"));
        let value = lc
            .run(LoadingPhase::ListLoading, async { Ok::<_, ApiError>(7) })
            .await;
        assert_eq!(value, Some(7));
        assert_eq!(lc.error_untracked(), None);
    }

    #[tokio::test]
    async fn test_run_while_busy_is_dropped() {
        let (lc, _clock) = lifecycle();
        let _busy = lc.begin(LoadingPhase::ListLoading).unwrap();
        lc.set_error(&ApiError::parse("speed"));
        let value = lc
            .run(LoadingPhase::OperationBusy, async { Ok::<_, ApiError>(1) })
            .await;
        assert_eq!(value, None);
        assert_eq!(lc.phase_untracked(), LoadingPhase::ListLoading);
        assert_eq!(lc.error_untracked().as_deref(), Some("Invalid speed value"));
    }

    #[test]
    fn test_abandoned_operation_still_settles() {
        let (lc, clock) = lifecycle();
        let pending = lc.run(LoadingPhase::OperationBusy, std::future::pending::<ApiResult<()>>());
        let mut pending = Box::pin(pending);
        let waker = std::task::Waker::noop();
        let mut cx = std::task::Context::from_waker(waker);
        assert!(pending.as_mut().poll(&mut cx).is_pending());
        assert_eq!(lc.phase_untracked(), LoadingPhase::OperationBusy);
        drop(pending);
        assert_eq!(lc.phase_untracked(), LoadingPhase::Idle);
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn test_button_face() {
        let busy = LoadingPhase::OperationBusy;
        assert_eq!(button_face(busy, busy, "Get Status", '/'), "/");
        assert_eq!(
            button_face(LoadingPhase::ListLoading, busy, "Get Status", '/'),
            "Get Status"
        );
    }

    #[test]
    fn test_unmounted_lifecycle_refuses_to_begin() {
        let owner = Owner::new();
        owner.set();
        let (lc, clock) = lifecycle();
        owner.cleanup();
        assert!(lc.is_disposed());
        assert!(matches!(
            lc.begin(LoadingPhase::OperationBusy),
            Err(ApiError::Validation(_))
        ));
        lc.set_error(&ApiError::parse("speed"));
        assert_eq!(lc.phase_untracked(), LoadingPhase::Idle);
        assert_eq!(lc.error_untracked(), None);
        assert_eq!(clock.active_timers(), 0);
    }
}
