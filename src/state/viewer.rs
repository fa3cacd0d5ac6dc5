//! Full-screen viewer state: which image is shown, whether the overlay is
//! visible, and the pinch/pan gesture currently in flight.
//!
//! Every transition goes through [`ViewerState::apply`], so the touch handling
//! can be exercised without a browser.

use std::rc::Rc;
use yew::Reducible;
use yew::virtual_dom::AttrValue;

use super::gesture::{Gesture, TouchPoint, Transform, ZoomLimits};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Closed,
    Open,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewerState {
    pub visibility: Visibility,
    pub current_image: Option<AttrValue>,
    pub transform: Transform,
    pub gesture: Gesture,
    pub limits: ZoomLimits,
    /// Ticket of the close whose release timer is still outstanding.
    pub pending_release: Option<u32>,
}

#[derive(Clone, Debug)]
pub enum ViewerAction {
    Open(AttrValue),
    /// `ticket` identifies this close so only its own timer may release.
    Close { ticket: u32 },
    /// Fired once the close transition has finished.
    ReleaseImage { ticket: u32 },
    TouchStart(Vec<TouchPoint>),
    TouchMove(Vec<TouchPoint>),
    /// touchend and touchcancel.
    TouchEnd,
}

impl ViewerState {
    pub fn new(limits: ZoomLimits) -> Self {
        let mut transform = Transform::default();
        transform.reset(limits);
        Self {
            transform,
            limits,
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    pub fn apply(&mut self, action: ViewerAction) {
        use ViewerAction::*;
        match action {
            Open(image) => {
                self.current_image = Some(image);
                self.visibility = Visibility::Open;
                self.transform.reset(self.limits);
                self.gesture = Gesture::Idle;
                self.pending_release = None;
            }
            Close { ticket } => {
                self.visibility = Visibility::Closed;
                self.gesture = Gesture::Idle;
                self.pending_release = Some(ticket);
            }
            ReleaseImage { ticket } => {
                // Timers from a close that was followed by a re-open are stale.
                if self.visibility == Visibility::Closed && self.pending_release == Some(ticket) {
                    self.current_image = None;
                    self.transform.reset(self.limits);
                    self.pending_release = None;
                }
            }
            TouchStart(points) => self.touch_start(&points),
            TouchMove(points) => self.touch_move(&points),
            TouchEnd => {
                self.gesture = Gesture::Idle;
                if self.transform.scale < self.limits.min {
                    self.transform.reset(self.limits);
                }
            }
        }
    }

    fn touch_start(&mut self, points: &[TouchPoint]) {
        match points {
            [a, b] => {
                self.gesture = Gesture::Pinching {
                    separation: a.distance(*b),
                };
            }
            [p] if self.transform.scale > self.limits.min => {
                let t = self.transform.translation();
                self.gesture = Gesture::Panning {
                    anchor: TouchPoint::new(p.x - t.x, p.y - t.y),
                };
            }
            _ => {}
        }
    }

    fn touch_move(&mut self, points: &[TouchPoint]) {
        match (points, self.gesture) {
            ([a, b], Gesture::Pinching { separation }) => {
                let current = a.distance(*b);
                if separation > 0.0 {
                    let candidate = self.transform.scale * (current / separation);
                    if self.limits.contains(candidate) {
                        self.transform.scale = candidate;
                    }
                }
                self.gesture = Gesture::Pinching {
                    separation: current,
                };
            }
            ([a, b], _) => {
                // Second finger landed mid-drag; start tracking from here.
                self.gesture = Gesture::Pinching {
                    separation: a.distance(*b),
                };
            }
            ([p], Gesture::Panning { anchor }) => {
                self.transform.x = p.x - anchor.x;
                self.transform.y = p.y - anchor.y;
            }
            _ => {}
        }
    }
}

impl Reducible for ViewerState {
    type Action = ViewerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        new.apply(action);
        if new == *self { self } else { Rc::new(new) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_viewer() -> ViewerState {
        let mut s = ViewerState::new(ZoomLimits::default());
        s.apply(ViewerAction::Open(AttrValue::from("images/3.jpg")));
        s
    }

    fn pinch(from: f64, to: f64) -> [ViewerAction; 2] {
        [
            ViewerAction::TouchStart(vec![TouchPoint::new(0.0, 0.0), TouchPoint::new(from, 0.0)]),
            ViewerAction::TouchMove(vec![TouchPoint::new(0.0, 0.0), TouchPoint::new(to, 0.0)]),
        ]
    }

    #[test]
    fn open_sets_image_and_resets_transform() {
        let mut s = open_viewer();
        s.transform = Transform { scale: 3.0, x: 5.0, y: -7.0 };
        s.apply(ViewerAction::Open(AttrValue::from("images/4.jpg")));
        assert!(s.is_open());
        assert_eq!(s.current_image.as_deref(), Some("images/4.jpg"));
        assert_eq!(s.transform, Transform::default());
        assert_eq!(s.gesture, Gesture::Idle);
    }

    #[test]
    fn pinch_tracks_separation_between_moves() {
        let mut s = open_viewer();
        for a in pinch(100.0, 150.0) {
            s.apply(a);
        }
        assert_eq!(s.transform.scale, 1.5);
        assert_eq!(s.gesture, Gesture::Pinching { separation: 150.0 });

        s.apply(ViewerAction::TouchMove(vec![TouchPoint::new(0.0, 0.0), TouchPoint::new(100.0, 0.0)]));
        assert!((s.transform.scale - 1.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_candidates_leave_scale_unchanged() {
        let mut s = open_viewer();
        for a in pinch(100.0, 50.0) {
            s.apply(a);
        }
        assert_eq!(s.transform.scale, 1.0);
        // Baseline still moves so the next spread is measured from 50.
        assert_eq!(s.gesture, Gesture::Pinching { separation: 50.0 });

        s.apply(ViewerAction::TouchMove(vec![TouchPoint::new(0.0, 0.0), TouchPoint::new(150.0, 0.0)]));
        assert_eq!(s.transform.scale, 3.0);
        s.apply(ViewerAction::TouchMove(vec![TouchPoint::new(0.0, 0.0), TouchPoint::new(300.0, 0.0)]));
        assert_eq!(s.transform.scale, 3.0);
    }

    #[test]
    fn scale_stays_within_limits_for_any_move_sequence() {
        let mut s = open_viewer();
        s.apply(ViewerAction::TouchStart(vec![TouchPoint::new(0.0, 0.0), TouchPoint::new(100.0, 0.0)]));
        let separations = [130.0, 180.0, 260.0, 400.0, 90.0, 20.0, 75.0, 140.0, 333.0, 1.0, 999.0, 120.0];
        for d in separations.iter().cycle().take(120) {
            s.apply(ViewerAction::TouchMove(vec![TouchPoint::new(10.0, 10.0), TouchPoint::new(10.0 + d, 10.0)]));
            assert!(s.transform.scale >= 1.0 && s.transform.scale <= 4.0, "scale {}", s.transform.scale);
        }
    }

    #[test]
    fn zero_separation_never_divides() {
        let mut s = open_viewer();
        s.apply(ViewerAction::TouchStart(vec![TouchPoint::new(5.0, 5.0), TouchPoint::new(5.0, 5.0)]));
        s.apply(ViewerAction::TouchMove(vec![TouchPoint::new(5.0, 5.0), TouchPoint::new(50.0, 5.0)]));
        assert_eq!(s.transform.scale, 1.0);
        assert_eq!(s.gesture, Gesture::Pinching { separation: 45.0 });
    }

    #[test]
    fn single_finger_drag_at_base_scale_does_not_pan() {
        let mut s = open_viewer();
        s.apply(ViewerAction::TouchStart(vec![TouchPoint::new(10.0, 10.0)]));
        s.apply(ViewerAction::TouchMove(vec![TouchPoint::new(80.0, 40.0)]));
        assert_eq!(s.gesture, Gesture::Idle);
        assert_eq!(s.transform.translation(), TouchPoint::new(0.0, 0.0));
    }

    #[test]
    fn drag_when_zoomed_sets_translation_from_anchor() {
        let mut s = open_viewer();
        s.transform = Transform { scale: 2.0, x: 20.0, y: -10.0 };
        s.apply(ViewerAction::TouchStart(vec![TouchPoint::new(100.0, 100.0)]));
        assert_eq!(s.gesture, Gesture::Panning { anchor: TouchPoint::new(80.0, 110.0) });

        s.apply(ViewerAction::TouchMove(vec![TouchPoint::new(130.0, 90.0)]));
        assert_eq!(s.transform.translation(), TouchPoint::new(50.0, -20.0));
        s.apply(ViewerAction::TouchMove(vec![TouchPoint::new(100.0, 100.0)]));
        assert_eq!(s.transform.translation(), TouchPoint::new(20.0, -10.0));

        s.apply(ViewerAction::TouchEnd);
        assert_eq!(s.gesture, Gesture::Idle);
        assert_eq!(s.transform.scale, 2.0);
        s.apply(ViewerAction::TouchMove(vec![TouchPoint::new(0.0, 0.0)]));
        assert_eq!(s.transform.translation(), TouchPoint::new(20.0, -10.0));
    }

    #[test]
    fn release_below_floor_snaps_back() {
        let mut s = open_viewer();
        s.transform = Transform { scale: 0.9999999, x: 3.0, y: 4.0 };
        s.apply(ViewerAction::TouchEnd);
        assert_eq!(s.transform, Transform::default());

        s.transform = Transform { scale: 1.5, x: 3.0, y: 4.0 };
        s.apply(ViewerAction::TouchEnd);
        assert_eq!(s.transform, Transform { scale: 1.5, x: 3.0, y: 4.0 });
    }

    #[test]
    fn close_keeps_image_until_release() {
        let mut s = open_viewer();
        s.transform.scale = 2.0;
        s.apply(ViewerAction::Close { ticket: 1 });
        assert!(!s.is_open());
        assert_eq!(s.current_image.as_deref(), Some("images/3.jpg"));

        s.apply(ViewerAction::ReleaseImage { ticket: 1 });
        assert_eq!(s.current_image, None);
        assert_eq!(s.transform, Transform::default());
        assert_eq!(s.pending_release, None);
    }

    #[test]
    fn release_after_reopen_is_ignored() {
        let mut s = open_viewer();
        s.apply(ViewerAction::Close { ticket: 1 });
        s.apply(ViewerAction::Open(AttrValue::from("images/5.jpg")));
        s.apply(ViewerAction::ReleaseImage { ticket: 1 });
        assert!(s.is_open());
        assert_eq!(s.current_image.as_deref(), Some("images/5.jpg"));
    }

    #[test]
    fn earlier_close_timer_cannot_release_a_later_close() {
        let mut s = ViewerState::new(ZoomLimits::default());
        s.apply(ViewerAction::Open(AttrValue::from("images/1.jpg")));
        s.apply(ViewerAction::Close { ticket: 1 });
        s.apply(ViewerAction::Open(AttrValue::from("images/2.jpg")));
        s.apply(ViewerAction::Close { ticket: 2 });

        // First timer fires while the second fade-out is still running.
        s.apply(ViewerAction::ReleaseImage { ticket: 1 });
        assert_eq!(s.current_image.as_deref(), Some("images/2.jpg"));

        s.apply(ViewerAction::ReleaseImage { ticket: 2 });
        assert_eq!(s.current_image, None);
    }

    #[test]
    fn stray_touch_end_after_close_is_harmless() {
        let mut s = open_viewer();
        s.apply(ViewerAction::Close { ticket: 7 });
        s.apply(ViewerAction::ReleaseImage { ticket: 7 });
        let before = s.clone();
        s.apply(ViewerAction::TouchEnd);
        assert_eq!(s, before);
    }

    #[test]
    fn reducer_returns_same_state_when_nothing_changes() {
        let s = Rc::new(ViewerState::new(ZoomLimits::default()));
        let next = s.clone().reduce(ViewerAction::TouchEnd);
        assert!(Rc::ptr_eq(&s, &next));
    }
}
