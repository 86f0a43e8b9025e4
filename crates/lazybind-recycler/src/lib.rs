//! Host-side bridging for recycler-style list hosts.
//!
//! Hosts of this family key their view recycling pools by small dense
//! integers and expose a notification API stricter than the
//! [`DataObserver`](lazybind_core::DataObserver) stream an
//! [`ItemSource`](lazybind_core::ItemSource) emits. This crate closes
//! both gaps:
//!
//! - [`ViewTypeInterner`] — dense integer interning of opaque view-type
//!   tokens
//! - [`ConverterAdapter`] / [`HostObserver`] — the change-notification
//!   bridge, which mirrors the source's item count and refuses to forward
//!   an event stream that disagrees with it

mod converter;
mod interner;

pub use converter::*;
pub use interner::*;
