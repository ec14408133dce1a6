//! Session lifecycle state machine.
//!
//! Transition triggers arrive from the runtime's event queue; the machine
//! only acts on READY (begin the session) and STOPPING (end it). It is
//! pure over a [`SessionControl`] implementation so transitions can be
//! driven by stubs in tests and by the live session in production.

use log::{debug, error, warn};
use openxr as xr;

use crate::error::Result;

/// The begin/end half of the runtime session the lifecycle drives.
pub trait SessionControl {
    fn begin(&mut self) -> Result<()>;
    fn end(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No READY event processed yet.
    NotStarted,
    /// Between a successful begin and the next STOPPING.
    Active,
    /// Ended after STOPPING; a later READY may reactivate.
    Stopped,
}

#[derive(Debug)]
pub struct SessionLifecycle {
    phase: SessionPhase,
    last_state: xr::SessionState,
    resumed: bool,
    exit_requested: bool,
}

impl Default for SessionLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLifecycle {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::NotStarted,
            last_state: xr::SessionState::UNKNOWN,
            resumed: false,
            exit_requested: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// True only between a successful begin and the next STOPPING.
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    pub fn is_resumed(&self) -> bool {
        self.resumed
    }

    pub fn set_resumed(&mut self, resumed: bool) {
        self.resumed = resumed;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn last_state(&self) -> xr::SessionState {
        self.last_state
    }

    /// Applies one SessionStateChanged event.
    ///
    /// A failed begin leaves the session inactive and is not propagated;
    /// frame code later no-ops on the inactive flag. STOPPING always
    /// deactivates, even if the end call itself fails.
    pub fn on_state_change(&mut self, state: xr::SessionState, control: &mut dyn SessionControl) {
        match state {
            xr::SessionState::READY => {
                debug_assert!(
                    self.resumed && !self.is_active(),
                    "READY while resumed={} active={}",
                    self.resumed,
                    self.is_active()
                );
                match control.begin() {
                    Ok(()) => {
                        debug!("session begun");
                        self.phase = SessionPhase::Active;
                    }
                    Err(e) => {
                        error!("session begin failed: {e}");
                    }
                }
            }
            xr::SessionState::STOPPING => {
                debug_assert!(self.is_active(), "STOPPING while inactive");
                if let Err(e) = control.end() {
                    warn!("session end failed: {e}");
                }
                self.phase = SessionPhase::Stopped;
            }
            xr::SessionState::EXITING | xr::SessionState::LOSS_PENDING => {
                warn!("session state {state:?}, shutdown requested");
                self.exit_requested = true;
            }
            other => {
                debug!("session state {other:?}");
            }
        }
        self.last_state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XrError;

    /// Scripted control: begin results are consumed front to back.
    struct StubControl {
        begin_results: Vec<std::result::Result<(), ()>>,
        begins: usize,
        ends: usize,
    }

    impl StubControl {
        fn new(begin_results: Vec<std::result::Result<(), ()>>) -> Self {
            Self {
                begin_results,
                begins: 0,
                ends: 0,
            }
        }
    }

    impl SessionControl for StubControl {
        fn begin(&mut self) -> Result<()> {
            let result = self.begin_results.remove(0);
            self.begins += 1;
            result.map_err(|_| XrError::Runtime("begin rejected".to_string()))
        }

        fn end(&mut self) -> Result<()> {
            self.ends += 1;
            Ok(())
        }
    }

    #[test]
    fn test_cold_start_is_inactive() {
        let lifecycle = SessionLifecycle::new();
        assert_eq!(lifecycle.phase(), SessionPhase::NotStarted);
        assert!(!lifecycle.is_active());
        assert!(!lifecycle.exit_requested());
    }

    #[test]
    fn test_ready_begins_session() {
        let mut lifecycle = SessionLifecycle::new();
        lifecycle.set_resumed(true);
        let mut control = StubControl::new(vec![Ok(())]);
        lifecycle.on_state_change(xr::SessionState::READY, &mut control);
        assert!(lifecycle.is_active());
        assert_eq!(control.begins, 1);
    }

    #[test]
    fn test_failed_begin_stays_inactive() {
        let mut lifecycle = SessionLifecycle::new();
        lifecycle.set_resumed(true);
        let mut control = StubControl::new(vec![Err(())]);
        lifecycle.on_state_change(xr::SessionState::READY, &mut control);
        assert!(!lifecycle.is_active());
    }

    #[test]
    fn test_stopping_always_deactivates() {
        let mut lifecycle = SessionLifecycle::new();
        lifecycle.set_resumed(true);
        let mut control = StubControl::new(vec![Ok(())]);
        lifecycle.on_state_change(xr::SessionState::READY, &mut control);
        lifecycle.on_state_change(xr::SessionState::STOPPING, &mut control);
        assert!(!lifecycle.is_active());
        assert_eq!(control.ends, 1);
    }

    #[test]
    fn test_informational_states_do_not_mutate() {
        let mut lifecycle = SessionLifecycle::new();
        lifecycle.set_resumed(true);
        let mut control = StubControl::new(vec![Ok(())]);
        lifecycle.on_state_change(xr::SessionState::READY, &mut control);
        for state in [
            xr::SessionState::SYNCHRONIZED,
            xr::SessionState::VISIBLE,
            xr::SessionState::FOCUSED,
        ] {
            lifecycle.on_state_change(state, &mut control);
            assert!(lifecycle.is_active());
        }
        assert_eq!(control.begins, 1);
        assert_eq!(control.ends, 0);
    }

    #[test]
    fn test_exiting_requests_shutdown() {
        let mut lifecycle = SessionLifecycle::new();
        let mut control = StubControl::new(vec![]);
        lifecycle.on_state_change(xr::SessionState::EXITING, &mut control);
        assert!(lifecycle.exit_requested());
        assert!(!lifecycle.is_active());
    }

    #[test]
    fn test_active_iff_last_ready_begin_succeeded() {
        // Full restart cycle: begin ok, stop, begin rejected, begin ok.
        let mut lifecycle = SessionLifecycle::new();
        lifecycle.set_resumed(true);
        let mut control = StubControl::new(vec![Ok(()), Err(()), Ok(())]);

        lifecycle.on_state_change(xr::SessionState::READY, &mut control);
        assert!(lifecycle.is_active());

        lifecycle.on_state_change(xr::SessionState::STOPPING, &mut control);
        assert!(!lifecycle.is_active());

        lifecycle.on_state_change(xr::SessionState::READY, &mut control);
        assert!(!lifecycle.is_active());

        lifecycle.on_state_change(xr::SessionState::READY, &mut control);
        assert!(lifecycle.is_active());
    }
}
