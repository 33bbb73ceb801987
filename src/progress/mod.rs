//! Progress reporting for detect and build

mod emitter;

pub use emitter::{Emitter, LogLevel};
