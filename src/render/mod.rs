//! CPU rendering of the sphere: scene painting, chrome overlay and pixel read-back.

pub mod backend;
pub(crate) mod blur;
pub mod chrome;
pub mod cpu;
pub mod engraving;
pub mod paint;
pub mod painter;
