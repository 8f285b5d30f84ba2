//! Tween driver for the ring's progress value.
//!
//! The animator does not own the progress value. It reads the starting value
//! once when a session starts and afterwards writes every interpolated value
//! through the setter it is handed on each [`ProgressAnimator::advance`] call,
//! so the widget's own `set_progress` stays the single write path.
//!
//! ```rust
//! use bubbletea_ring::animator::{AnimatorState, ProgressAnimator};
//! use bubbletea_ring::easing::Easing;
//! use std::time::Duration;
//!
//! let mut progress = 0.0_f32;
//! let mut animator = ProgressAnimator::new();
//! animator.start(progress, 80.0, Duration::from_millis(500), Easing::decelerate(), None);
//!
//! while animator.is_running() {
//!     animator.advance(Duration::from_millis(16), &mut |v| progress = v);
//! }
//! assert_eq!(animator.state(), AnimatorState::Completed);
//! assert_eq!(progress, 80.0);
//! ```

use crate::easing::Easing;
use std::fmt;
use std::time::Duration;

/// Receives lifecycle events of an animation session.
///
/// Every method has an empty default so implementors only override what they
/// care about. Each event fires at most once per session; none fire per frame.
pub trait ProgressListener: Send {
    /// The session started.
    fn on_progress_start(&mut self) {}
    /// The session reached its target.
    fn on_progress_complete(&mut self) {}
    /// The session was cancelled before reaching its target.
    fn on_progress_cancel(&mut self) {}
}

/// Lifecycle of the animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimatorState {
    /// No session has been started yet.
    #[default]
    Idle,
    /// A session is in progress.
    Running,
    /// The last session reached its target.
    Completed,
    /// The last session was cancelled.
    Cancelled,
}

/// Drives a single scalar from a start value to a target over a duration.
pub struct ProgressAnimator {
    state: AnimatorState,
    from: f32,
    target: f32,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
    listener: Option<Box<dyn ProgressListener>>,
}

impl ProgressAnimator {
    /// Creates an idle animator with no session.
    pub fn new() -> Self {
        Self {
            state: AnimatorState::Idle,
            from: 0.0,
            target: 0.0,
            duration: Duration::ZERO,
            elapsed: Duration::ZERO,
            easing: Easing::default(),
            listener: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// True while a session is playing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_ring::animator::ProgressAnimator;
    /// use bubbletea_ring::easing::Easing;
    /// use std::time::Duration;
    ///
    /// let mut animator = ProgressAnimator::new();
    /// assert!(!animator.is_running());
    /// animator.start(0.0, 1.0, Duration::from_millis(500), Easing::Linear, None);
    /// assert!(animator.is_running());
    /// ```
    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Running
    }

    /// Value the current or last session animates towards.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Time played so far in the current or last session.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Length of the current or last session.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Starts a session from `from` to `target`.
    ///
    /// A session that is still running is cancelled first, and its listener
    /// receives `on_progress_cancel`. Returns `true` when that happened. The
    /// new listener, if any, receives `on_progress_start` before this returns.
    pub fn start(
        &mut self,
        from: f32,
        target: f32,
        duration: Duration,
        easing: Easing,
        listener: Option<Box<dyn ProgressListener>>,
    ) -> bool {
        let superseded = self.cancel();

        self.state = AnimatorState::Running;
        self.from = from;
        self.target = target;
        self.duration = duration;
        self.elapsed = Duration::ZERO;
        self.easing = easing;
        self.listener = listener;

        tracing::debug!(
            from,
            to = target,
            duration_ms = duration.as_millis() as u64,
            "progress animation started"
        );

        if let Some(listener) = self.listener.as_mut() {
            listener.on_progress_start();
        }
        superseded
    }

    /// Advances the session by `dt` and writes the new value via `set_progress`.
    ///
    /// Does nothing unless running. When the duration is reached the target is
    /// written exactly, the listener is told the session completed and the
    /// animator moves to [`AnimatorState::Completed`].
    pub fn advance(&mut self, dt: Duration, set_progress: &mut dyn FnMut(f32)) -> AnimatorState {
        if self.state != AnimatorState::Running {
            return self.state;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.duration {
            set_progress(self.target);
            self.finish();
            return self.state;
        }

        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let value = self.from + (self.target - self.from) * self.easing.apply(t);
        set_progress(value);
        self.state
    }

    /// Cancels a running session. Returns `false` if nothing was running.
    pub fn cancel(&mut self) -> bool {
        if self.state != AnimatorState::Running {
            return false;
        }

        self.state = AnimatorState::Cancelled;
        tracing::debug!(
            to = self.target,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "progress animation cancelled"
        );
        if let Some(mut listener) = self.listener.take() {
            listener.on_progress_cancel();
        }
        true
    }

    fn finish(&mut self) {
        self.state = AnimatorState::Completed;
        tracing::debug!(to = self.target, "progress animation completed");
        if let Some(mut listener) = self.listener.take() {
            listener.on_progress_complete();
        }
    }
}

impl Default for ProgressAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProgressAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressAnimator")
            .field("state", &self.state)
            .field("from", &self.from)
            .field("target", &self.target)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("easing", &self.easing)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}
