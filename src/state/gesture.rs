// Touch geometry and the image transform driven by it.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: TouchPoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Collects page coordinates of every contact currently on the surface.
pub fn touch_points(touches: &web_sys::TouchList) -> Vec<TouchPoint> {
    (0..touches.length())
        .filter_map(|i| touches.item(i))
        .map(|t| TouchPoint::new(t.page_x() as f64, t.page_y() as f64))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: 1.0, max: 4.0 }
    }
}

impl ZoomLimits {
    pub fn contains(&self, scale: f64) -> bool {
        scale >= self.min && scale <= self.max
    }
}

/// Translate (device pixels) followed by a uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            x: 0.0,
            y: 0.0,
        }
    }
}

impl Transform {
    pub fn reset(&mut self, limits: ZoomLimits) {
        *self = Self {
            scale: limits.min,
            ..Self::default()
        };
    }

    pub fn translation(&self) -> TouchPoint {
        TouchPoint::new(self.x, self.y)
    }

    pub fn to_css(&self) -> String {
        format!("translate({}px, {}px) scale({})", self.x, self.y, self.scale)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Separation is the distance seen on the previous move, not at pinch start.
    Pinching { separation: f64 },
    /// Contact position minus translation at drag start.
    Panning { anchor: TouchPoint },
}
