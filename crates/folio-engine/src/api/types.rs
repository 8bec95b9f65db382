use glam::Vec2;

/// Handle for a document element known to the coordinator.
/// The host owns the element; the engine only ever refers to it by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// Animation family of a watched element. Each family gets its own visibility watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// `data-animate="fade"`: fade up into place.
    Fade,
    /// `data-animate="scale"`: grow from 80% with overshoot.
    Scale,
    /// `data-animate="slide"`: slide in horizontally.
    Slide,
    /// Generic `.scroll-animate*` elements: a CSS class does the work.
    ScrollReveal,
}

impl Family {
    pub const ALL: [Family; 4] = [Family::Fade, Family::Scale, Family::Slide, Family::ScrollReveal];

    /// Parse a `data-animate` marker. Only the three executor families have markers.
    pub fn from_marker(value: &str) -> Option<Self> {
        match value.trim() {
            "fade" => Some(Family::Fade),
            "scale" => Some(Family::Scale),
            "slide" => Some(Family::Slide),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Family::Fade => "fade",
            Family::Scale => "scale",
            Family::Slide => "slide",
            Family::ScrollReveal => "scroll-reveal",
        }
    }
}

/// Slide-in direction. Anything other than `left` slides in from the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("left") => Direction::Left,
            _ => Direction::Right,
        }
    }

    /// Horizontal offset (px) the element starts from before sliding to 0.
    pub fn start_offset_px(self) -> f32 {
        match self {
            Direction::Left => -50.0,
            Direction::Right => 50.0,
        }
    }
}

/// Axis-aligned box in viewport (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.origin() + self.size() / 2.0
    }

    /// True when any part of the box overlaps a viewport of the given height.
    pub fn overlaps_viewport(&self, viewport_height: f32) -> bool {
        self.top < viewport_height && self.bottom() > 0.0
    }
}

/// A pointer position over a tagged element, with that element's current box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub client: Vec2,
    pub rect: Rect,
}

impl PointerSample {
    pub fn new(client_x: f32, client_y: f32, rect: Rect) -> Self {
        Self {
            client: Vec2::new(client_x, client_y),
            rect,
        }
    }

    /// Pointer offset from the element's center.
    pub fn offset_from_center(&self) -> Vec2 {
        self.client - self.rect.center()
    }
}

/// Document scroll state sampled once per animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Current vertical scroll offset.
    pub scroll_y: f32,
    /// Full height of the document.
    pub scroll_height: f32,
    /// Height of the visible window.
    pub viewport_height: f32,
}

impl ScrollMetrics {
    /// Distance the document can actually scroll. Zero or negative on short pages.
    pub fn scrollable_height(&self) -> f32 {
        self.scroll_height - self.viewport_height
    }
}

/// The user's reduced-motion preference, probed once at startup and then fixed.
/// Callers that want a live update must build a new coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionPreference {
    pub reduced_motion: bool,
}

impl MotionPreference {
    pub fn full() -> Self {
        Self { reduced_motion: false }
    }

    pub fn reduced() -> Self {
        Self { reduced_motion: true }
    }
}
