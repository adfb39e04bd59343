// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe-driven image lightbox.
//!
//! [`Lightbox`] owns a circular index into a fixed, non-empty item list, an
//! open/closed presence, and a drag gesture state machine:
//!
//! ```text
//!            pointer down               pointer up / cancel
//!   Idle ───────────────────► Dragging ─────────┬──────────────► Cancelling
//!    ▲                                          │                    │
//!    │                                          ▼                    │
//!    │          slide in done          Committing(SlideOut)          │
//!    ├─────────────── Committing(SlideIn) ◄─────┘ slide out done     │
//!    │                                                               │
//!    └───────────────────────────── snap back done ◄─────────────────┘
//! ```
//!
//! Every animated step hands a [`Settle`] to the caller. The caller waits for
//! the view's transition to finish (or for [`Settle::timeout`] to elapse) and
//! then calls [`Lightbox::transition_finished`] with the settle token. Closing
//! the lightbox invalidates outstanding tokens, so a wait that outlives its
//! gesture is ignored.
//!
//! The state machine never touches a platform API directly; all output goes
//! through a [`LightboxView`].

use alloc::string::String;
use alloc::vec::Vec;

use crate::backend::{ImagePlacement, LightboxView, Motion};
use crate::input::{Key, PointerId, PointerSample};
use crate::time::{Duration, HostTime};

/// One image in the lightbox.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LightboxItem {
    /// Source shown in the page.
    pub src: String,
    /// Optional full-resolution source, preferred inside the lightbox.
    pub full_src: Option<String>,
}

impl LightboxItem {
    /// Creates an item with only a base source.
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            full_src: None,
        }
    }

    /// Adds a full-resolution source. Empty strings are ignored.
    #[must_use]
    pub fn with_full_src(mut self, full_src: impl Into<String>) -> Self {
        let full_src = full_src.into();
        self.full_src = (!full_src.is_empty()).then_some(full_src);
        self
    }

    /// The source to display: full resolution if present, else the base.
    #[must_use]
    pub fn resolved_src(&self) -> &str {
        self.full_src.as_deref().unwrap_or(&self.src)
    }
}

/// Maps any signed index onto `0..len`, wrapping in both directions.
///
/// Returns `None` for an empty list.
#[must_use]
pub fn normalize_index(index: isize, len: usize) -> Option<usize> {
    let len = isize::try_from(len).ok().filter(|len| *len > 0)?;
    usize::try_from(index.rem_euclid(len)).ok()
}

/// Swipe direction of a committed gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Leftward swipe; shows the following item.
    Next,
    /// Rightward swipe; shows the preceding item.
    Prev,
}

impl Direction {
    /// Direction implied by a horizontal drag delta.
    #[must_use]
    pub fn from_delta(delta_x: f64) -> Self {
        if delta_x < 0.0 { Self::Next } else { Self::Prev }
    }

    /// Sign of the side the current image leaves through.
    #[must_use]
    pub const fn exit_sign(self) -> f64 {
        match self {
            Self::Next => -1.0,
            Self::Prev => 1.0,
        }
    }
}

/// Outcome of a completed drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Release {
    /// The drag counts as a swipe.
    Commit(Direction),
    /// The drag snaps back.
    Cancel,
}

/// Gesture thresholds and animation timing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightboxConfig {
    /// A drag longer than this fraction of the viewport width commits.
    pub commit_distance_ratio: f64,
    /// A drag faster than this many px/ms commits.
    pub commit_velocity: f64,
    /// Drag distance, as a fraction of viewport width, at which the fade is
    /// fully applied.
    pub fade_span_ratio: f64,
    /// Maximum opacity reduction while dragging.
    pub fade_depth: f64,
    /// Opacity of the image while it slides off and back on screen.
    pub settle_opacity: f64,
    /// Duration of the slide-out and slide-in animations.
    pub slide_duration: Duration,
    /// Duration of the snap-back animation.
    pub snap_duration: Duration,
    /// Extra wait beyond an animation's duration before completion is
    /// assumed.
    pub completion_slack: Duration,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            commit_distance_ratio: 0.18,
            commit_velocity: 0.65,
            fade_span_ratio: 0.9,
            fade_depth: 0.25,
            settle_opacity: 0.9,
            slide_duration: Duration::from_millis(240),
            snap_duration: Duration::from_millis(200),
            completion_slack: Duration::from_millis(150),
        }
    }
}

impl LightboxConfig {
    /// Drag velocity in px/ms.
    ///
    /// Elapsed time is floored at 1 ms so a zero-duration drag stays finite.
    #[must_use]
    pub fn velocity(delta_x: f64, elapsed: Duration) -> f64 {
        delta_x / elapsed.as_millis_f64().max(1.0)
    }

    /// Classifies a finished drag by distance OR velocity.
    #[must_use]
    pub fn classify(&self, delta_x: f64, velocity: f64, viewport_width: f64) -> Release {
        let far = delta_x.abs() > self.commit_distance_ratio * viewport_width;
        let fast = velocity.abs() > self.commit_velocity;
        if far || fast {
            Release::Commit(Direction::from_delta(delta_x))
        } else {
            Release::Cancel
        }
    }

    /// Placement while dragging: follows the pointer and fades with distance.
    #[must_use]
    pub fn drag_placement(&self, delta_x: f64, viewport_width: f64) -> ImagePlacement {
        let span = viewport_width * self.fade_span_ratio;
        let fraction = if span > 0.0 {
            (delta_x.abs() / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        ImagePlacement {
            offset_x: delta_x,
            opacity: 1.0 - fraction * self.fade_depth,
            motion: Motion::Immediate,
        }
    }
}

/// An in-progress drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    /// The only pointer allowed to drive this drag.
    pub pointer: PointerId,
    /// Client x at pointer down.
    pub start_x: f64,
    /// Current horizontal offset from `start_x`.
    pub delta_x: f64,
    /// Time of pointer down.
    pub started_at: HostTime,
}

/// Which half of a commit animation is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommitPhase {
    /// Current image leaving the screen.
    SlideOut,
    /// New image entering from the opposite side.
    SlideIn,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Gesture {
    Idle,
    Dragging(DragSession),
    Committing {
        direction: Direction,
        phase: CommitPhase,
    },
    Cancelling,
}

/// Coarse gesture state, for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// No pointer interaction.
    Idle,
    /// A pointer is dragging the image.
    Dragging,
    /// Slide animation after a committed swipe.
    Committing,
    /// Snap-back animation after a cancelled drag.
    Cancelling,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Presence<T> {
    Closed,
    Open { restore_focus: T },
}

/// Identifies the animated step an outstanding completion wait belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SettleToken(u32);

/// An animated step the caller must wait for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settle {
    /// Pass back to [`Lightbox::transition_finished`].
    pub token: SettleToken,
    /// Give up waiting for the view and proceed after this long.
    pub timeout: Duration,
}

/// Swipeable, circular image lightbox state.
///
/// `T` is the trigger handle that regains focus on close.
#[derive(Clone, Debug)]
pub struct Lightbox<T> {
    items: Vec<LightboxItem>,
    index: usize,
    presence: Presence<T>,
    gesture: Gesture,
    config: LightboxConfig,
    /// Token of the step currently awaited. Bumped per step and on close.
    step_seq: u32,
}

impl<T> Lightbox<T> {
    /// Creates a closed lightbox at index 0.
    ///
    /// Returns `None` for an empty item list.
    #[must_use]
    pub fn new(items: Vec<LightboxItem>, config: LightboxConfig) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self {
            items,
            index: 0,
            presence: Presence::Closed,
            gesture: Gesture::Idle,
            config,
            step_seq: 0,
        })
    }

    /// Number of items (at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; a lightbox has at least one item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current item index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Currently displayed item.
    #[must_use]
    pub fn current(&self) -> &LightboxItem {
        &self.items[self.index]
    }

    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[LightboxItem] {
        &self.items
    }

    /// Gesture thresholds and timing.
    #[must_use]
    pub const fn config(&self) -> &LightboxConfig {
        &self.config
    }

    /// Whether the lightbox is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.presence, Presence::Open { .. })
    }

    /// Whether a commit or cancel animation is in flight.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        matches!(
            self.gesture,
            Gesture::Committing { .. } | Gesture::Cancelling
        )
    }

    /// The active drag, if any.
    #[must_use]
    pub const fn drag(&self) -> Option<&DragSession> {
        match &self.gesture {
            Gesture::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Coarse gesture state.
    #[must_use]
    pub const fn phase(&self) -> GesturePhase {
        match self.gesture {
            Gesture::Idle => GesturePhase::Idle,
            Gesture::Dragging(_) => GesturePhase::Dragging,
            Gesture::Committing { .. } => GesturePhase::Committing,
            Gesture::Cancelling => GesturePhase::Cancelling,
        }
    }

    /// Opens at `index` (wrapped), remembering `trigger` for focus restore.
    ///
    /// Returns `false` if already open.
    pub fn open<V>(&mut self, index: usize, trigger: T, view: &mut V) -> bool
    where
        V: LightboxView<Trigger = T>,
    {
        if self.is_open() {
            return false;
        }
        self.presence = Presence::Open {
            restore_focus: trigger,
        };
        self.gesture = Gesture::Idle;
        view.set_open(true);
        view.lock_scroll(true);
        view.place_image(ImagePlacement::NEUTRAL);
        self.show(index % self.items.len(), view);
        true
    }

    /// Closes and returns focus to the trigger.
    ///
    /// Any in-flight gesture is abandoned. Returns `false` if already closed.
    pub fn close<V>(&mut self, view: &mut V) -> bool
    where
        V: LightboxView<Trigger = T>,
    {
        let Presence::Open { restore_focus } =
            core::mem::replace(&mut self.presence, Presence::Closed)
        else {
            return false;
        };
        self.gesture = Gesture::Idle;
        self.step_seq = self.step_seq.wrapping_add(1);
        view.set_open(false);
        view.lock_scroll(false);
        view.place_image(ImagePlacement::NEUTRAL);
        view.restore_focus(&restore_focus);
        true
    }

    /// Shows the item at `index`, wrapping negative and out-of-range values.
    ///
    /// Returns the normalized index.
    pub fn navigate_to(&mut self, index: isize, view: &mut impl LightboxView) -> usize {
        // `items` is never empty, so normalization cannot fail.
        let index = normalize_index(index, self.items.len()).unwrap_or(0);
        self.show(index, view);
        index
    }

    /// Shows the preceding item. Ignored while animating.
    pub fn prev(&mut self, view: &mut impl LightboxView) -> bool {
        self.step(Direction::Prev, view)
    }

    /// Shows the following item. Ignored while animating.
    pub fn next(&mut self, view: &mut impl LightboxView) -> bool {
        self.step(Direction::Next, view)
    }

    /// Handles a key press. Only acts while open.
    ///
    /// Returns `true` if the key was consumed.
    pub fn handle_key<V>(&mut self, key: Key, view: &mut V) -> bool
    where
        V: LightboxView<Trigger = T>,
    {
        if !self.is_open() {
            return false;
        }
        match key {
            Key::Escape => self.close(view),
            Key::ArrowLeft => self.prev(view),
            Key::ArrowRight => self.next(view),
            Key::Other => false,
        }
    }

    /// Starts a drag. Ignored unless open and idle.
    ///
    /// On `true` the caller should capture the pointer.
    pub fn pointer_down(&mut self, sample: PointerSample, now: HostTime) -> bool {
        if !self.is_open() || self.gesture != Gesture::Idle {
            return false;
        }
        self.gesture = Gesture::Dragging(DragSession {
            pointer: sample.id,
            start_x: sample.position.x,
            delta_x: 0.0,
            started_at: now,
        });
        true
    }

    /// Follows the drag. Samples from other pointers are ignored.
    pub fn pointer_move(
        &mut self,
        sample: PointerSample,
        viewport_width: f64,
        view: &mut impl LightboxView,
    ) -> bool {
        let Gesture::Dragging(session) = &mut self.gesture else {
            return false;
        };
        if session.pointer != sample.id {
            return false;
        }
        session.delta_x = sample.position.x - session.start_x;
        view.place_image(self.config.drag_placement(session.delta_x, viewport_width));
        true
    }

    /// Ends the drag and starts the commit or snap-back animation.
    ///
    /// Returns the step to wait for, or `None` if the sample was ignored or
    /// the drag never moved.
    pub fn pointer_up(
        &mut self,
        sample: PointerSample,
        now: HostTime,
        viewport_width: f64,
        view: &mut impl LightboxView,
    ) -> Option<Settle> {
        let Gesture::Dragging(session) = self.gesture else {
            return None;
        };
        if session.pointer != sample.id {
            return None;
        }
        let delta_x = sample.position.x - session.start_x;
        let velocity =
            LightboxConfig::velocity(delta_x, now.saturating_duration_since(session.started_at));

        match self.config.classify(delta_x, velocity, viewport_width) {
            Release::Commit(direction) => {
                self.gesture = Gesture::Committing {
                    direction,
                    phase: CommitPhase::SlideOut,
                };
                view.place_image(ImagePlacement {
                    offset_x: direction.exit_sign() * viewport_width,
                    opacity: self.config.settle_opacity,
                    motion: Motion::Animated(self.config.slide_duration),
                });
                Some(self.settle(self.config.slide_duration))
            }
            // A tap: nothing moved, so no transition will ever fire.
            Release::Cancel if delta_x == 0.0 => {
                self.gesture = Gesture::Idle;
                view.place_image(ImagePlacement::NEUTRAL);
                None
            }
            Release::Cancel => {
                self.gesture = Gesture::Cancelling;
                view.place_image(ImagePlacement {
                    offset_x: 0.0,
                    opacity: 1.0,
                    motion: Motion::Animated(self.config.snap_duration),
                });
                Some(self.settle(self.config.snap_duration))
            }
        }
    }

    /// Pointer cancellation ends the drag exactly like a release.
    pub fn pointer_cancel(
        &mut self,
        sample: PointerSample,
        now: HostTime,
        viewport_width: f64,
        view: &mut impl LightboxView,
    ) -> Option<Settle> {
        self.pointer_up(sample, now, viewport_width, view)
    }

    /// Advances past a finished animation step.
    ///
    /// Returns the next step to wait for, if any. Tokens of earlier steps and
    /// of gestures abandoned by [`close`](Self::close) are ignored.
    pub fn transition_finished(
        &mut self,
        token: SettleToken,
        viewport_width: f64,
        view: &mut impl LightboxView,
    ) -> Option<Settle> {
        if token != SettleToken(self.step_seq) {
            return None;
        }
        match self.gesture {
            Gesture::Committing {
                direction,
                phase: CommitPhase::SlideOut,
            } => {
                self.step_unchecked(direction, view);
                view.place_image(ImagePlacement {
                    offset_x: -direction.exit_sign() * viewport_width,
                    opacity: self.config.settle_opacity,
                    motion: Motion::Immediate,
                });
                view.place_image(ImagePlacement {
                    offset_x: 0.0,
                    opacity: 1.0,
                    motion: Motion::Animated(self.config.slide_duration),
                });
                self.gesture = Gesture::Committing {
                    direction,
                    phase: CommitPhase::SlideIn,
                };
                Some(self.settle(self.config.slide_duration))
            }
            Gesture::Committing {
                phase: CommitPhase::SlideIn,
                ..
            }
            | Gesture::Cancelling => {
                view.place_image(ImagePlacement::NEUTRAL);
                self.gesture = Gesture::Idle;
                None
            }
            Gesture::Idle | Gesture::Dragging(_) => None,
        }
    }

    fn settle(&mut self, duration: Duration) -> Settle {
        self.step_seq = self.step_seq.wrapping_add(1);
        Settle {
            token: SettleToken(self.step_seq),
            timeout: duration.saturating_add(self.config.completion_slack),
        }
    }

    fn step(&mut self, direction: Direction, view: &mut impl LightboxView) -> bool {
        if self.is_animating() {
            return false;
        }
        self.step_unchecked(direction, view);
        true
    }

    fn step_unchecked(&mut self, direction: Direction, view: &mut impl LightboxView) {
        let len = self.items.len();
        let index = match direction {
            Direction::Next => (self.index + 1) % len,
            Direction::Prev => (self.index + len - 1) % len,
        };
        self.show(index, view);
    }

    /// Displays `index` (already in range) and warms up its neighbors.
    fn show(&mut self, index: usize, view: &mut impl LightboxView) {
        let len = self.items.len();
        self.index = index;
        view.show_image(self.items[index].resolved_src());

        let next = (index + 1) % len;
        let prev = (index + len - 1) % len;
        if next != index {
            view.preload(self.items[next].resolved_src());
        }
        if prev != index && prev != next {
            view.preload(self.items[prev].resolved_src());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;
    use alloc::vec;

    #[derive(Debug, PartialEq)]
    enum Op {
        Open(bool),
        Scroll(bool),
        Show(String),
        Preload(String),
        Place(ImagePlacement),
        Focus(u32),
    }

    #[derive(Default)]
    struct RecordingView {
        ops: Vec<Op>,
    }

    impl RecordingView {
        fn last_placement(&self) -> Option<ImagePlacement> {
            self.ops.iter().rev().find_map(|op| match op {
                Op::Place(p) => Some(*p),
                _ => None,
            })
        }

        fn shown(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Show(s) => Some(s.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl LightboxView for RecordingView {
        type Trigger = u32;

        fn set_open(&mut self, open: bool) {
            self.ops.push(Op::Open(open));
        }
        fn lock_scroll(&mut self, locked: bool) {
            self.ops.push(Op::Scroll(locked));
        }
        fn show_image(&mut self, src: &str) {
            self.ops.push(Op::Show(src.to_string()));
        }
        fn preload(&mut self, src: &str) {
            self.ops.push(Op::Preload(src.to_string()));
        }
        fn place_image(&mut self, placement: ImagePlacement) {
            self.ops.push(Op::Place(placement));
        }
        fn restore_focus(&mut self, trigger: &u32) {
            self.ops.push(Op::Focus(*trigger));
        }
    }

    const WIDTH: f64 = 1_000.0;
    const POINTER: PointerId = PointerId(1);

    fn items(n: usize) -> Vec<LightboxItem> {
        (0..n).map(|i| LightboxItem::new(format!("img{i}.jpg"))).collect()
    }

    fn open_box(n: usize, at: usize) -> (Lightbox<u32>, RecordingView) {
        let mut lb = Lightbox::new(items(n), LightboxConfig::default()).expect("non-empty");
        let mut view = RecordingView::default();
        assert!(lb.open(at, 7, &mut view));
        (lb, view)
    }

    fn at(x: f64) -> PointerSample {
        PointerSample::new(POINTER, x, 300.0)
    }

    /// Drags from x=500 by `delta` over `ms` milliseconds.
    fn drag(lb: &mut Lightbox<u32>, view: &mut RecordingView, delta: f64, ms: u64) -> Option<Settle> {
        assert!(lb.pointer_down(at(500.0), HostTime::from_millis(10_000)));
        lb.pointer_move(at(500.0 + delta / 2.0), WIDTH, view);
        lb.pointer_move(at(500.0 + delta), WIDTH, view);
        lb.pointer_up(at(500.0 + delta), HostTime::from_millis(10_000 + ms), WIDTH, view)
    }

    /// Feeds completions until the gesture settles.
    fn settle_all(lb: &mut Lightbox<u32>, view: &mut RecordingView, mut next: Option<Settle>) {
        while let Some(settle) = next {
            next = lb.transition_finished(settle.token, WIDTH, view);
        }
    }

    #[test]
    fn empty_item_list_is_inert() {
        assert!(Lightbox::<u32>::new(Vec::new(), LightboxConfig::default()).is_none());
        assert_eq!(normalize_index(3, 0), None, "no division by zero");
    }

    #[test]
    fn resolved_source_prefers_full_resolution() {
        let base = LightboxItem::new("thumb.jpg");
        assert_eq!(base.resolved_src(), "thumb.jpg");
        let full = LightboxItem::new("thumb.jpg").with_full_src("full.jpg");
        assert_eq!(full.resolved_src(), "full.jpg");
        let blank = LightboxItem::new("thumb.jpg").with_full_src("");
        assert_eq!(blank.resolved_src(), "thumb.jpg", "empty attribute ignored");
    }

    #[test]
    fn circular_navigation() {
        assert_eq!(normalize_index(-1, 5), Some(4));
        assert_eq!(normalize_index(5, 5), Some(0));
        assert_eq!(normalize_index(-11, 5), Some(4));
        assert_eq!(normalize_index(2, 1), Some(0));

        let (mut lb, mut view) = open_box(5, 0);
        assert_eq!(lb.navigate_to(-1, &mut view), 4, "-1 wraps to N-1");
        assert_eq!(lb.navigate_to(5, &mut view), 0, "N wraps to 0");
    }

    #[test]
    fn scenario_next_prev_prev() {
        let (mut lb, mut view) = open_box(5, 2);
        assert_eq!(lb.index(), 2);
        assert!(lb.next(&mut view));
        assert_eq!(lb.index(), 3);
        assert!(lb.prev(&mut view));
        assert!(lb.prev(&mut view));
        assert_eq!(lb.index(), 1);
    }

    #[test]
    fn open_wires_view_and_preloads_neighbors() {
        let (lb, view) = open_box(5, 2);
        assert!(lb.is_open());
        assert_eq!(
            view.ops,
            vec![
                Op::Open(true),
                Op::Scroll(true),
                Op::Place(ImagePlacement::NEUTRAL),
                Op::Show("img2.jpg".into()),
                Op::Preload("img3.jpg".into()),
                Op::Preload("img1.jpg".into()),
            ]
        );
    }

    #[test]
    fn small_galleries_preload_without_duplicates() {
        let (_, view) = open_box(1, 0);
        assert!(!view.ops.iter().any(|op| matches!(op, Op::Preload(_))), "no neighbors");

        let (_, view) = open_box(2, 0);
        let preloads = view.ops.iter().filter(|op| matches!(op, Op::Preload(_))).count();
        assert_eq!(preloads, 1, "both neighbors are the same item");
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let (mut lb, mut view) = open_box(3, 0);
        assert!(!lb.open(1, 9, &mut view), "already open");
        assert_eq!(lb.index(), 0, "second open ignored");

        assert!(lb.close(&mut view));
        assert!(!lb.close(&mut view), "already closed");
        assert_eq!(
            view.ops[view.ops.len() - 4..],
            [
                Op::Open(false),
                Op::Scroll(false),
                Op::Place(ImagePlacement::NEUTRAL),
                Op::Focus(7),
            ],
            "focus goes back to the original trigger"
        );
    }

    #[test]
    fn keyboard_only_while_open() {
        let mut lb = Lightbox::new(items(4), LightboxConfig::default()).expect("non-empty");
        let mut view = RecordingView::default();
        assert!(!lb.handle_key(Key::ArrowRight, &mut view), "closed");

        lb.open(0, 1, &mut view);
        assert!(lb.handle_key(Key::ArrowRight, &mut view));
        assert_eq!(lb.index(), 1);
        assert!(lb.handle_key(Key::ArrowLeft, &mut view));
        assert!(lb.handle_key(Key::ArrowLeft, &mut view));
        assert_eq!(lb.index(), 3, "wraps backwards");
        assert!(!lb.handle_key(Key::Other, &mut view));
        assert!(lb.handle_key(Key::Escape, &mut view));
        assert!(!lb.is_open());
    }

    #[test]
    fn commit_thresholds() {
        let config = LightboxConfig::default();
        let w = WIDTH;
        assert_eq!(
            config.classify(-(0.18 * w + 1.0), 0.0, w),
            Release::Commit(Direction::Next),
            "distance alone commits"
        );
        assert_eq!(
            config.classify(0.18 * w - 1.0, 0.64, w),
            Release::Cancel,
            "short and slow cancels"
        );
        assert_eq!(
            config.classify(0.1 * w, 0.66, w),
            Release::Commit(Direction::Prev),
            "velocity alone commits"
        );
        assert_eq!(config.classify(0.18 * w, 0.65, w), Release::Cancel, "strict bounds");
    }

    #[test]
    fn velocity_is_distance_per_millisecond() {
        let v = LightboxConfig::velocity(-200.0, Duration::from_millis(250));
        assert!((v + 0.8).abs() < 1e-12, "−200 px / 250 ms");
        let v = LightboxConfig::velocity(50.0, Duration::ZERO);
        assert!((v - 50.0).abs() < 1e-12, "elapsed floored at 1 ms");
    }

    #[test]
    fn drag_fades_proportionally() {
        let config = LightboxConfig::default();
        let p = config.drag_placement(-450.0, WIDTH);
        assert_eq!(p.offset_x, -450.0);
        assert!((p.opacity - 0.875).abs() < 1e-12, "half the fade span");
        let p = config.drag_placement(5_000.0, WIDTH);
        assert!((p.opacity - 0.75).abs() < 1e-12, "clamped at full fade");
        let p = config.drag_placement(30.0, 0.0);
        assert_eq!(p.opacity, 1.0, "zero-width viewport does not fade");
    }

    #[test]
    fn scenario_fast_left_swipe_commits_next() {
        let (mut lb, mut view) = open_box(5, 2);
        let settle = drag(&mut lb, &mut view, -200.0, 250).expect("animated commit");
        assert_eq!(lb.phase(), GesturePhase::Committing);
        assert_eq!(
            view.last_placement(),
            Some(ImagePlacement {
                offset_x: -WIDTH,
                opacity: 0.9,
                motion: Motion::Animated(Duration::from_millis(240)),
            }),
            "slides out to the left"
        );
        assert_eq!(settle.timeout, Duration::from_millis(390));
        assert_eq!(lb.index(), 2, "index changes only after slide out");

        let slide_in = lb
            .transition_finished(settle.token, WIDTH, &mut view)
            .expect("slide in follows");
        assert_eq!(lb.index(), 3, "leftward swipe advances");
        let n = view.ops.len();
        assert_eq!(
            view.ops[n - 2..],
            [
                Op::Place(ImagePlacement {
                    offset_x: WIDTH,
                    opacity: 0.9,
                    motion: Motion::Immediate,
                }),
                Op::Place(ImagePlacement {
                    offset_x: 0.0,
                    opacity: 1.0,
                    motion: Motion::Animated(Duration::from_millis(240)),
                }),
            ],
            "enters from the opposite side"
        );

        assert_eq!(lb.transition_finished(slide_in.token, WIDTH, &mut view), None);
        assert_eq!(lb.phase(), GesturePhase::Idle);
        assert_eq!(view.last_placement(), Some(ImagePlacement::NEUTRAL));
    }

    #[test]
    fn rightward_commit_goes_back() {
        let (mut lb, mut view) = open_box(5, 0);
        let settle = drag(&mut lb, &mut view, 300.0, 600);
        settle_all(&mut lb, &mut view, settle);
        assert_eq!(lb.index(), 4, "positive delta wraps to previous");
        assert_eq!(view.shown().last(), Some(&"img4.jpg"));
    }

    #[test]
    fn short_slow_drag_snaps_back() {
        let (mut lb, mut view) = open_box(5, 1);
        let settle = drag(&mut lb, &mut view, -100.0, 400).expect("animated cancel");
        assert_eq!(lb.phase(), GesturePhase::Cancelling);
        assert_eq!(
            view.last_placement(),
            Some(ImagePlacement {
                offset_x: 0.0,
                opacity: 1.0,
                motion: Motion::Animated(Duration::from_millis(200)),
            })
        );
        assert_eq!(lb.transition_finished(settle.token, WIDTH, &mut view), None);
        assert_eq!(lb.phase(), GesturePhase::Idle);
        assert_eq!(lb.index(), 1, "cancel keeps the index");
    }

    #[test]
    fn tap_settles_immediately() {
        let (mut lb, mut view) = open_box(3, 0);
        assert_eq!(drag(&mut lb, &mut view, 0.0, 80), None);
        assert_eq!(lb.phase(), GesturePhase::Idle);
    }

    #[test]
    fn no_new_drag_while_animating() {
        let (mut lb, mut view) = open_box(5, 2);
        let settle = drag(&mut lb, &mut view, -400.0, 300).expect("commit");
        assert!(lb.is_animating());
        assert!(
            !lb.pointer_down(at(100.0), HostTime::from_millis(20_000)),
            "pointer down ignored mid-animation"
        );
        assert!(lb.drag().is_none());
        assert!(!lb.next(&mut view), "button navigation ignored");
        assert!(!lb.handle_key(Key::ArrowLeft, &mut view), "keys ignored");
        assert_eq!(lb.index(), 2);
        settle_all(&mut lb, &mut view, Some(settle));
        assert!(lb.pointer_down(at(100.0), HostTime::from_millis(20_000)));
    }

    #[test]
    fn pointer_down_requires_open_lightbox() {
        let mut lb = Lightbox::<u32>::new(items(2), LightboxConfig::default()).expect("non-empty");
        assert!(!lb.pointer_down(at(0.0), HostTime(0)));
    }

    #[test]
    fn foreign_pointers_are_ignored() {
        let (mut lb, mut view) = open_box(5, 0);
        assert!(lb.pointer_down(at(500.0), HostTime(0)));
        lb.pointer_move(at(450.0), WIDTH, &mut view);

        let other = PointerSample::new(PointerId(2), 100.0, 0.0);
        assert!(!lb.pointer_down(other, HostTime(0)), "second drag rejected");
        assert!(!lb.pointer_move(other, WIDTH, &mut view));
        assert_eq!(lb.drag().map(|d| d.delta_x), Some(-50.0), "delta unchanged");
        assert_eq!(lb.pointer_up(other, HostTime(10), WIDTH, &mut view), None);
        assert_eq!(lb.phase(), GesturePhase::Dragging, "session survives");
    }

    #[test]
    fn pointer_cancel_classifies_like_release() {
        let (mut lb, mut view) = open_box(5, 0);
        lb.pointer_down(at(500.0), HostTime(0));
        let settle = lb.pointer_cancel(at(100.0), HostTime::from_millis(900), WIDTH, &mut view);
        assert!(settle.is_some());
        assert_eq!(lb.phase(), GesturePhase::Committing, "400 px > 180 px");
    }

    #[test]
    fn close_mid_animation_invalidates_settle() {
        let (mut lb, mut view) = open_box(5, 2);
        let settle = drag(&mut lb, &mut view, -400.0, 300).expect("commit");
        assert!(lb.close(&mut view));
        assert_eq!(lb.phase(), GesturePhase::Idle, "close abandons the gesture");

        lb.open(0, 7, &mut view);
        assert_eq!(
            lb.transition_finished(settle.token, WIDTH, &mut view),
            None,
            "stale completion ignored"
        );
        assert_eq!(lb.index(), 0, "no late index change");
    }

    #[test]
    fn slide_out_completion_cannot_finish_slide_in() {
        let (mut lb, mut view) = open_box(5, 2);
        let slide_out = drag(&mut lb, &mut view, -400.0, 100).expect("commit");
        let slide_in = lb
            .transition_finished(slide_out.token, WIDTH, &mut view)
            .expect("slide-in follows slide-out");
        assert_ne!(slide_out.token, slide_in.token, "each step has its own token");

        let recorded = view.ops.len();
        assert_eq!(
            lb.transition_finished(slide_out.token, WIDTH, &mut view),
            None,
            "a second slide-out completion is stale"
        );
        assert_eq!(view.ops.len(), recorded, "slide-in left animating");
        assert_eq!(
            view.last_placement().map(|p| p.motion),
            Some(Motion::Animated(lb.config().slide_duration)),
            "image still sliding in"
        );
        assert_eq!(lb.phase(), GesturePhase::Committing, "still committing");

        assert_eq!(
            lb.transition_finished(slide_in.token, WIDTH, &mut view),
            None,
            "commit ends after slide-in"
        );
        assert_eq!(lb.phase(), GesturePhase::Idle, "own completion settles");
        assert_eq!(lb.index(), 3, "advanced once");
    }
}
