//! Library exports for the airboard hand-tracked whiteboard.
//!
//! A host drives an [`session::InteractionSession`] once per frame with its
//! hand tracker and renderer. The same modules back the `airboard` replay
//! binary and the schema-dump tool, so configuration parsing and validation
//! are shared between them.

pub mod config;
pub mod draw;
pub mod geometry;
pub mod input;
pub mod render;
pub mod replay;
pub mod scene;
pub mod session;
pub mod util;

pub use config::Config;
pub use session::InteractionSession;
