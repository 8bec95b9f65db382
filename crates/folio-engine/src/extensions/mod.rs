// extensions/mod.rs
//
// Page-level behaviours that sit beside the motion coordinator.
// Each is a small state machine or table with no DOM access; the web bridge
// decides when to drive them and writes their output into the page.

pub mod contact;
pub mod counter;
pub mod device;
pub mod easing;
pub mod i18n;
pub mod nav;
pub mod particles;
pub mod rng;
pub mod showcase;
pub mod typing;

pub use contact::{ContactError, ContactForm, NoticeKind};
pub use counter::CountUp;
pub use device::{DeviceClass, DeviceProbe};
pub use easing::Easing;
pub use i18n::Language;
pub use nav::{NavConfig, NavState, SectionPos};
pub use particles::{ParticleConfig, ParticleField, ParticleSpec};
pub use showcase::{Showcase, ShowcaseTask};
pub use typing::{Typewriter, TypingStep, TypingTimings};
