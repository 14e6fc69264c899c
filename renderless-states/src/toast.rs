//! Toast notification state with auto-dismiss timers and swipe gestures.
//!
//! ## Usage
//!
//! [`ToastManager`] owns the active toasts. Auto-dismiss is modeled as a
//! plain deadline the embedding loop polls; pausing (hover, drag) stows the
//! remaining time and resuming restores it, so no callback can leak past a
//! toast's lifetime. Each toast tracks one swipe gesture at a time; the
//! aggregate offset resets exactly once when a gesture starts and once when
//! it ends.

use std::time::{Duration, Instant};

use derive_setters::Setters;

const DEFAULT_DRAG_THRESHOLD: f64 = 100.0;

/// Request data for showing a toast.
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct ToastRequest {
    /// Message carried by the toast.
    #[setters(into)]
    pub message: String,
    /// Whether the toast dismisses itself after `duration`.
    pub auto_dismiss: bool,
    /// How long an auto-dismissing toast stays up.
    pub duration: Duration,
    /// Horizontal offset past which a swipe dismisses the toast.
    pub drag_threshold: f64,
}

impl ToastRequest {
    /// Creates a request with the required message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            auto_dismiss: false,
            duration: Duration::ZERO,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }
}

impl From<&str> for ToastRequest {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ToastRequest {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// One active toast.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    id: u64,
    message: String,
    auto_dismiss: bool,
    duration: Duration,
    drag_threshold: f64,
    deadline: Option<Instant>,
    paused_remaining: Option<Duration>,
    gesture_origin: Option<f64>,
    offset: f64,
}

impl Toast {
    /// Returns the unique toast id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the message carried by the toast.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the current swipe offset, for the presentation transform.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Returns whether a swipe gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.gesture_origin.is_some()
    }

    /// Returns whether the toast dismisses itself.
    pub fn auto_dismiss(&self) -> bool {
        self.auto_dismiss
    }

    /// Returns the configured auto-dismiss duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    fn pause(&mut self, now: Instant) {
        if let Some(deadline) = self.deadline.take() {
            self.paused_remaining = Some(deadline.saturating_duration_since(now));
        }
    }

    fn resume(&mut self, now: Instant) {
        if let Some(remaining) = self.paused_remaining.take() {
            self.deadline = Some(now + remaining);
        }
    }
}

/// State engine managing the active toast collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastManager {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a toast and returns its id.
    ///
    /// The auto-dismiss deadline starts counting from `now`.
    pub fn show(&mut self, request: impl Into<ToastRequest>, now: Instant) -> u64 {
        let request = request.into();
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        let deadline = request.auto_dismiss.then(|| now + request.duration);
        self.toasts.push(Toast {
            id,
            message: request.message,
            auto_dismiss: request.auto_dismiss,
            duration: request.duration,
            drag_threshold: request.drag_threshold,
            deadline,
            paused_remaining: None,
            gesture_origin: None,
            offset: 0.0,
        });
        id
    }

    /// Returns the active toasts in display order.
    pub fn active(&self) -> &[Toast] {
        &self.toasts
    }

    /// Returns one active toast by id.
    pub fn get(&self, id: u64) -> Option<&Toast> {
        self.toasts.iter().find(|toast| toast.id == id)
    }

    /// Retires every toast whose deadline has passed, returning their ids.
    pub fn poll(&mut self, now: Instant) -> Vec<u64> {
        let mut expired = Vec::new();
        self.toasts.retain(|toast| {
            let due = toast.deadline.is_some_and(|deadline| deadline <= now);
            if due {
                tracing::debug!(id = toast.id, "toast expired");
                expired.push(toast.id);
            }
            !due
        });
        expired
    }

    /// Removes a toast explicitly.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        before != self.toasts.len()
    }

    /// Suspends the auto-dismiss countdown (hover enter).
    pub fn pause(&mut self, id: u64, now: Instant) {
        if let Some(toast) = self.get_mut(id) {
            toast.pause(now);
        }
    }

    /// Restarts the auto-dismiss countdown with the stowed remainder
    /// (hover leave).
    pub fn resume(&mut self, id: u64, now: Instant) {
        if let Some(toast) = self.get_mut(id) {
            toast.resume(now);
        }
    }

    /// Begins a swipe gesture at pointer position `x`.
    ///
    /// A second gesture on the same toast is ignored while one is active.
    /// Starting a gesture suspends the auto-dismiss countdown.
    pub fn drag_start(&mut self, id: u64, x: f64, now: Instant) {
        if let Some(toast) = self.get_mut(id)
            && toast.gesture_origin.is_none()
        {
            toast.gesture_origin = Some(x - toast.offset);
            toast.pause(now);
        }
    }

    /// Tracks a pointer move within an active gesture.
    ///
    /// Returns `true` when the aggregate offset crossed the drag threshold
    /// and the toast was swiped out.
    pub fn drag_move(&mut self, id: u64, x: f64) -> bool {
        let Some(toast) = self.get_mut(id) else {
            return false;
        };
        let Some(origin) = toast.gesture_origin else {
            return false;
        };
        toast.offset = x - origin;
        if toast.offset.abs() > toast.drag_threshold {
            tracing::debug!(id, offset = toast.offset, "toast swiped out");
            self.dismiss(id);
            return true;
        }
        false
    }

    /// Ends a swipe gesture, resetting the offset and resuming the
    /// auto-dismiss countdown.
    pub fn drag_end(&mut self, id: u64, now: Instant) {
        if let Some(toast) = self.get_mut(id)
            && toast.gesture_origin.take().is_some()
        {
            toast.offset = 0.0;
            toast.resume(now);
        }
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Toast> {
        self.toasts.iter_mut().find(|toast| toast.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto(message: &str, secs: u64) -> ToastRequest {
        ToastRequest::new(message)
            .auto_dismiss(true)
            .duration(Duration::from_secs(secs))
    }

    #[test]
    fn auto_dismiss_expires_at_the_deadline() {
        let start = Instant::now();
        let mut manager = ToastManager::new();
        let id = manager.show(auto("saved", 4), start);

        assert!(manager.poll(start + Duration::from_secs(3)).is_empty());
        assert_eq!(manager.poll(start + Duration::from_secs(4)), vec![id]);
        assert!(manager.active().is_empty());
    }

    #[test]
    fn toasts_without_auto_dismiss_stay_until_dismissed() {
        let start = Instant::now();
        let mut manager = ToastManager::new();
        let id = manager.show("sticky", start);

        assert!(manager.poll(start + Duration::from_secs(3600)).is_empty());
        assert!(manager.dismiss(id));
        assert!(!manager.dismiss(id));
    }

    #[test]
    fn pausing_stows_the_remaining_time() {
        let start = Instant::now();
        let mut manager = ToastManager::new();
        let id = manager.show(auto("uploading", 10), start);

        manager.pause(id, start + Duration::from_secs(4));
        assert!(manager.poll(start + Duration::from_secs(60)).is_empty());

        // Six seconds were left; resuming restarts from there.
        let resumed = start + Duration::from_secs(60);
        manager.resume(id, resumed);
        assert!(manager.poll(resumed + Duration::from_secs(5)).is_empty());
        assert_eq!(manager.poll(resumed + Duration::from_secs(6)), vec![id]);
    }

    #[test]
    fn swiping_past_the_threshold_dismisses() {
        let start = Instant::now();
        let mut manager = ToastManager::new();
        let id = manager.show(ToastRequest::new("swipe me").drag_threshold(100.0), start);

        manager.drag_start(id, 10.0, start);
        assert!(!manager.drag_move(id, 60.0));
        assert_eq!(manager.get(id).map(Toast::offset), Some(50.0));
        assert!(manager.drag_move(id, 111.0));
        assert!(manager.get(id).is_none());
    }

    #[test]
    fn releasing_below_the_threshold_resets_the_offset() {
        let start = Instant::now();
        let mut manager = ToastManager::new();
        let id = manager.show(auto("draggable", 10), start);

        manager.drag_start(id, 0.0, start);
        manager.drag_move(id, -40.0);
        manager.drag_end(id, start + Duration::from_secs(1));
        let toast = manager.get(id).expect("toast still active");
        assert_eq!(toast.offset(), 0.0);
        assert!(!toast.is_dragging());
    }

    #[test]
    fn dragging_suspends_the_countdown() {
        let start = Instant::now();
        let mut manager = ToastManager::new();
        let id = manager.show(auto("busy", 2), start);

        manager.drag_start(id, 0.0, start + Duration::from_secs(1));
        assert!(manager.poll(start + Duration::from_secs(30)).is_empty());
        manager.drag_end(id, start + Duration::from_secs(30));
        assert_eq!(manager.poll(start + Duration::from_secs(31)), vec![id]);
    }

    #[test]
    fn a_second_gesture_on_the_same_toast_is_ignored() {
        let start = Instant::now();
        let mut manager = ToastManager::new();
        let id = manager.show("single gesture", start);

        manager.drag_start(id, 0.0, start);
        manager.drag_move(id, 30.0);
        // Another capture attempt must not reset the origin.
        manager.drag_start(id, 500.0, start);
        manager.drag_move(id, 40.0);
        assert_eq!(manager.get(id).map(Toast::offset), Some(40.0));
    }

    #[test]
    fn moves_without_a_gesture_are_ignored() {
        let start = Instant::now();
        let mut manager = ToastManager::new();
        let id = manager.show("idle", start);
        assert!(!manager.drag_move(id, 300.0));
        assert_eq!(manager.get(id).map(Toast::offset), Some(0.0));
    }
}
