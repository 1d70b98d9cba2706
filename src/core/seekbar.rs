//! Seek-bar drag protocol.
//!
//! Separate from the gesture machine: the seek bar is its own scrub surface
//! with simpler rules. Grabbing it pauses playback (remembering whether to
//! resume), rapid input events are coalesced to one position write per
//! frame (latest wins), and a pointer-up anywhere in the window concludes a
//! drag in progress.

use std::time::{Duration, Instant};

use log::debug;

use super::player::PlayerCore;
use super::timers::TimerKind;

/// State of an in-progress seek-bar drag
#[derive(Debug, Clone, Default)]
pub struct SeekBarDrag {
    pub active: bool,
    /// Playback was running when the drag started; resume on release
    resume_on_release: bool,
    /// Latest requested target, committed on the next frame
    pending_target: Option<f64>,
}

impl PlayerCore {
    /// Pointer-down on the seek bar: pause playback for the duration of
    /// the drag and remember whether to resume.
    pub fn seek_bar_grab(&mut self) {
        if self.seek_drag.active || !self.transport.is_loaded() {
            return;
        }
        self.seek_drag.active = true;
        self.seek_drag.resume_on_release = !self.transport.is_paused();
        debug!(
            "seek bar grabbed (resume_on_release={})",
            self.seek_drag.resume_on_release
        );
        self.transport.pause();
    }

    /// A seek-bar input event: stage the target and commit it on the next
    /// frame. Multiple inputs before the frame elapses collapse into one
    /// write using the last value.
    pub fn seek_bar_input(&mut self, target: f64, now: Instant) {
        if !self.transport.is_loaded() {
            return;
        }
        if !self.seek_drag.active {
            self.seek_bar_grab();
        }
        self.seek_drag.pending_target = Some(target);
        self.timers
            .schedule(TimerKind::SeekFrame, Duration::ZERO, now, |core| {
                core.commit_pending_seek();
            });
    }

    /// Pointer-up: commit any staged target now, then resume playback if
    /// it was running when the drag began.
    pub fn seek_bar_release(&mut self) {
        if !self.seek_drag.active {
            return;
        }
        self.timers.cancel(TimerKind::SeekFrame);
        self.commit_pending_seek();
        if self.seek_drag.resume_on_release {
            self.transport.play();
        }
        debug!("seek bar released at {:.2}s", self.transport.position());
        self.seek_drag = SeekBarDrag::default();
    }

    /// A pointer-up anywhere in the window concludes a drag in progress
    /// (the release may land outside the bar).
    pub fn conclude_seek_drag(&mut self) {
        if self.seek_drag.active {
            self.seek_bar_release();
        }
    }

    pub fn seek_drag_active(&self) -> bool {
        self.seek_drag.active
    }

    pub(crate) fn commit_pending_seek(&mut self) {
        if let Some(target) = self.seek_drag.pending_target.take() {
            self.transport.seek(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::GestureConfig;
    use crate::core::player_events::PlayerEventSender;
    use crate::core::transport::testing::FakeMedia;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn core_with_media(duration: f64) -> (PlayerCore, FakeMedia) {
        let mut core = PlayerCore::new(GestureConfig::default(), PlayerEventSender::dummy());
        let fake = FakeMedia::new(duration);
        core.transport.load("clip", Box::new(fake.clone()));
        (core, fake)
    }

    // N input events within one frame -> exactly one position write,
    // using the last value.
    #[test]
    fn test_inputs_coalesce_to_last_value() {
        let (mut core, fake) = core_with_media(120.0);
        let t0 = Instant::now();

        core.seek_bar_grab();
        for target in [10.0, 20.0, 30.0, 44.5] {
            core.seek_bar_input(target, t0);
        }
        assert!(fake.seek_log().is_empty(), "no write before the frame");

        core.tick(t0 + ms(16));
        assert_eq!(fake.seek_log(), vec![44.5]);

        // Next frame with no new input writes nothing further
        core.tick(t0 + ms(32));
        assert_eq!(fake.seek_log().len(), 1);
    }

    #[test]
    fn test_grab_pauses_and_release_resumes() {
        let (mut core, fake) = core_with_media(120.0);
        let t0 = Instant::now();
        fake.set_paused(false);

        core.seek_bar_grab();
        assert!(fake.paused(), "drag must pause playback");

        core.seek_bar_input(60.0, t0);
        core.seek_bar_release();
        assert_eq!(*fake.seek_log().last().unwrap(), 60.0);
        assert!(!fake.paused(), "playback resumes after the drag");
    }

    #[test]
    fn test_release_does_not_resume_when_paused_before() {
        let (mut core, fake) = core_with_media(120.0);
        let t0 = Instant::now();

        core.seek_bar_grab();
        core.seek_bar_input(15.0, t0);
        core.seek_bar_release();
        assert!(fake.paused(), "was paused before the drag, stays paused");
        assert_eq!(fake.seek_log(), vec![15.0]);
    }

    #[test]
    fn test_release_commits_staged_target() {
        let (mut core, fake) = core_with_media(120.0);
        let t0 = Instant::now();

        core.seek_bar_input(80.0, t0);
        // Released before any frame elapsed - the value must not be lost
        core.seek_bar_release();
        assert_eq!(fake.seek_log(), vec![80.0]);
        assert!(!core.timers.is_pending(TimerKind::SeekFrame));
    }

    #[test]
    fn test_global_pointer_up_concludes_drag() {
        let (mut core, fake) = core_with_media(120.0);
        let t0 = Instant::now();
        fake.set_paused(false);

        core.seek_bar_input(25.0, t0);
        assert!(core.seek_drag_active());

        // Pointer released somewhere outside the bar
        core.conclude_seek_drag();
        assert!(!core.seek_drag_active());
        assert!(!fake.paused());

        // Idempotent when no drag is active
        core.conclude_seek_drag();
    }

    #[test]
    fn test_input_without_media_is_noop() {
        let mut core = PlayerCore::new(GestureConfig::default(), PlayerEventSender::dummy());
        let t0 = Instant::now();
        core.seek_bar_grab();
        core.seek_bar_input(10.0, t0);
        assert!(!core.seek_drag_active());
        core.tick(t0 + ms(16));
        // Nothing to assert beyond "did not panic"; no media, no writes.
    }

    #[test]
    fn test_targets_clamped_by_transport() {
        let (mut core, fake) = core_with_media(100.0);
        let t0 = Instant::now();
        core.seek_bar_input(500.0, t0);
        core.tick(t0 + ms(16));
        assert_eq!(fake.seek_log(), vec![100.0]);
    }
}
