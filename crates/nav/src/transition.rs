//! Panel transition interpolation.
//!
//! Geometry changes between intro and sidebar mode are eased over a short
//! fixed duration. With reduced motion the final geometry is returned from the
//! very first sample.

use std::time::{Duration, Instant};

use crate::geometry::ContentOffset;

/// Duration of a panel transition.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(300);

/// Cubic ease-in-out: slow start, fast middle, slow finish.
/// `t` is clamped to `[0, 1]`.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// One eased value travelling towards a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    started: Option<Instant>,
    duration: Duration,
}

impl Tween {
    pub fn settled(value: u16, duration: Duration) -> Self {
        Self {
            from: f32::from(value),
            to: f32::from(value),
            started: None,
            duration,
        }
    }

    /// Jumps straight to `target`.
    pub fn snap(&mut self, target: u16) {
        self.from = f32::from(target);
        self.to = f32::from(target);
        self.started = None;
    }

    /// Starts easing from the current sampled value to `target`. Keeps a
    /// running animation untouched when the target did not move.
    pub fn retarget(&mut self, target: u16, now: Instant, reduced_motion: bool) {
        if reduced_motion || self.duration.is_zero() {
            self.snap(target);
            return;
        }
        let target = f32::from(target);
        if target == self.to {
            return;
        }
        self.from = self.value_at(now);
        self.to = target;
        self.started = Some(now);
    }

    fn value_at(&self, now: Instant) -> f32 {
        let Some(started) = self.started else {
            return self.to;
        };
        let progress = now.saturating_duration_since(started).as_secs_f32() / self.duration.as_secs_f32();
        if progress >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_in_out_cubic(progress)
    }

    pub fn sample(&self, now: Instant) -> u16 {
        self.value_at(now).round().clamp(0.0, f32::from(u16::MAX)) as u16
    }

    pub fn target(&self) -> u16 {
        self.to as u16
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.started
            .is_some_and(|started| now.saturating_duration_since(started) < self.duration)
    }
}

/// Geometry of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellFrame {
    pub panel_width: u16,
    pub content_offset: ContentOffset,
}

/// Panel width and content offset animated together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellAnimation {
    panel: Tween,
    offset: Tween,
}

impl ShellAnimation {
    pub fn new(frame: ShellFrame, duration: Duration) -> Self {
        Self {
            panel: Tween::settled(frame.panel_width, duration),
            offset: Tween::settled(frame.content_offset.columns(), duration),
        }
    }

    pub fn retarget(&mut self, frame: ShellFrame, now: Instant, reduced_motion: bool) {
        self.panel.retarget(frame.panel_width, now, reduced_motion);
        self.offset.retarget(frame.content_offset.columns(), now, reduced_motion);
    }

    /// Moves to `frame` without animating (terminal resizes).
    pub fn snap(&mut self, frame: ShellFrame) {
        self.panel.snap(frame.panel_width);
        self.offset.snap(frame.content_offset.columns());
    }

    pub fn sample(&self, now: Instant) -> ShellFrame {
        ShellFrame {
            panel_width: self.panel.sample(now),
            content_offset: ContentOffset(self.offset.sample(now)),
        }
    }

    pub fn target(&self) -> ShellFrame {
        ShellFrame {
            panel_width: self.panel.target(),
            content_offset: ContentOffset(self.offset.target()),
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.panel.is_animating(now) || self.offset.is_animating(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTRO: ShellFrame = ShellFrame {
        panel_width: 120,
        content_offset: ContentOffset::ZERO,
    };
    const SIDEBAR: ShellFrame = ShellFrame {
        panel_width: 32,
        content_offset: ContentOffset(32),
    };

    #[test]
    fn easing_is_clamped_and_symmetric() {
        assert_eq!(ease_in_out_cubic(-1.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < f32::EPSILON);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_eq!(ease_in_out_cubic(3.0), 1.0);
        assert!(ease_in_out_cubic(0.25) < 0.25);
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn reduced_motion_lands_on_the_final_frame_immediately() {
        let start = Instant::now();
        let mut animation = ShellAnimation::new(INTRO, DEFAULT_TRANSITION);
        animation.retarget(SIDEBAR, start, true);
        assert_eq!(animation.sample(start), SIDEBAR);
        assert!(!animation.is_animating(start));
    }

    #[test]
    fn animated_transition_moves_through_intermediate_frames() {
        let start = Instant::now();
        let mut animation = ShellAnimation::new(INTRO, DEFAULT_TRANSITION);
        animation.retarget(SIDEBAR, start, false);

        assert_eq!(animation.sample(start), INTRO);
        assert!(animation.is_animating(start));

        let midway = animation.sample(start + DEFAULT_TRANSITION / 2);
        assert!(midway.panel_width < INTRO.panel_width && midway.panel_width > SIDEBAR.panel_width);
        assert_eq!(midway.panel_width, 76);
        assert_eq!(midway.content_offset, ContentOffset(16));

        let done = start + DEFAULT_TRANSITION;
        assert_eq!(animation.sample(done), SIDEBAR);
        assert!(!animation.is_animating(done));
        assert_eq!(animation.target(), SIDEBAR);
    }

    #[test]
    fn retargeting_to_the_same_frame_keeps_the_animation_running() {
        let start = Instant::now();
        let mut animation = ShellAnimation::new(INTRO, DEFAULT_TRANSITION);
        animation.retarget(SIDEBAR, start, false);
        let later = start + Duration::from_millis(100);
        animation.retarget(SIDEBAR, later, false);
        assert!(animation.is_animating(later));
        assert_ne!(animation.sample(later), INTRO);
    }

    #[test]
    fn turning_on_reduced_motion_mid_flight_snaps() {
        let start = Instant::now();
        let mut animation = ShellAnimation::new(INTRO, DEFAULT_TRANSITION);
        animation.retarget(SIDEBAR, start, false);
        let later = start + Duration::from_millis(50);
        animation.retarget(SIDEBAR, later, true);
        assert_eq!(animation.sample(later), SIDEBAR);
    }
}
