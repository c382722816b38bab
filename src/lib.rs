#![forbid(unsafe_code)]
//! microcosm: animated glass-sphere dioramas.
//!
//! Sixteen scenes simulate their populations tick by tick; a CPU renderer paints each one inside
//! the sphere with a shared glass overlay; a cancelable loop drives the two; captures export the
//! loop's output as video or GIF.

pub mod capture;
pub mod config;
pub mod encode;
pub mod foundation;
pub mod render;
pub mod runtime;
pub mod scene;

pub use capture::{CaptureArtifact, CaptureFormat, Capturer, Pacer, Recorder};
pub use config::GlobeConfig;
pub use encode::VideoContainer;
pub use foundation::core::{Canvas, GLOBE_RADIUS, GROUND_Y_OFFSET, Rgba8, SURFACE_SIZE, Vec2};
pub use foundation::error::{MicrocosmError, MicrocosmResult};
pub use render::backend::FrameRGBA;
pub use render::cpu::GlobeRenderer;
pub use render::engraving::Engraving;
pub use runtime::{FrameTap, Globe, LoopHandle, Stage};
pub use scene::{
    CustomSceneConfig, Feature, Population, Scene, SceneInit, SceneKind, census,
    containment_violations, registry,
};
