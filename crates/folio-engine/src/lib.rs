pub mod api;
pub mod core;
pub mod systems;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{Capabilities, PageConfig, PointerConfig, RevealDefaults, WatcherConfig, WatcherOptions};
pub use api::ops::{css_number, DomOp, OpBuffer, StyleProp};
pub use api::types::{Direction, ElementId, Family, MotionPreference, PointerSample, Rect, ScrollMetrics};
pub use crate::core::coordinator::{MotionCoordinator, MotionTask};
pub use crate::core::registry::{layer_speed, parallax_speed, RevealAttrs, RevealConfig, Trigger, TriggerKind, TriggerRegistry};
pub use crate::core::scheduler::{Scheduler, TimerId};
pub use crate::core::watcher::VisibilityWatcher;
pub use systems::morph::{MorphState, MORPH_SHAPES};
pub use systems::scroll::FrameGate;

// Page behaviours beside the coordinator
pub use extensions::{
    ContactError, ContactForm, NoticeKind,
    CountUp,
    DeviceClass, DeviceProbe,
    Easing,
    Language,
    NavConfig, NavState, SectionPos,
    ParticleConfig, ParticleField, ParticleSpec,
    Showcase, ShowcaseTask,
    Typewriter, TypingStep, TypingTimings,
};
