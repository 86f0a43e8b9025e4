//! Shared fakes for the lazybind test suites.
//!
//! Provides a scripted item source whose event stream the test drives
//! directly, a recording observer for the structural change stream,
//! simple binders and views, and a small item hierarchy with declared
//! ancestry.

mod binders;
mod items;
mod recording;
mod scripted;

pub use binders::*;
pub use items::*;
pub use recording::*;
pub use scripted::*;
