// Active-dot tracking fed by visibility observer batches.
use std::rc::Rc;
use yew::Reducible;

/// Host intersection ratios are rounded, so a crossing exactly at the
/// threshold can be reported slightly under it.
const RATIO_SLACK: f64 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityReport {
    pub index: usize,
    pub ratio: f64,
    pub intersecting: bool,
}

impl VisibilityReport {
    pub fn is_focused(&self, threshold: f64) -> bool {
        self.intersecting && self.ratio + RATIO_SLACK >= threshold
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorState {
    pub len: usize,
    pub active: Option<usize>,
    pub threshold: f64,
}

#[derive(Clone, Debug)]
pub enum IndicatorAction {
    /// One observer callback batch, in host delivery order.
    Observed(Vec<VisibilityReport>),
}

impl IndicatorState {
    pub fn new(len: usize, threshold: f64) -> Self {
        Self {
            len,
            active: None,
            threshold,
        }
    }

    /// Simultaneous crossings resolve to whichever report comes last.
    pub fn observe(&mut self, reports: &[VisibilityReport]) {
        for r in reports {
            if r.index < self.len && r.is_focused(self.threshold) {
                self.active = Some(r.index);
            }
        }
    }

    /// `true` for the active dot, one entry per feed item.
    pub fn dots(&self) -> Vec<bool> {
        (0..self.len).map(|i| self.active == Some(i)).collect()
    }
}

impl Reducible for IndicatorState {
    type Action = IndicatorAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            IndicatorAction::Observed(reports) => {
                let mut new = (*self).clone();
                new.observe(&reports);
                if new == *self { self } else { Rc::new(new) }
            }
        }
    }
}
