//! Live simulation: one scene, its renderer, and the loop that drives them.

pub mod globe;
pub mod scheduler;
pub mod tap;

pub use globe::Globe;
pub use scheduler::{LoopHandle, Stage};
pub use tap::FrameTap;
