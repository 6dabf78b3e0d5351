//! The list-management contract shared by every Larder view.
//!
//! A view owns exactly one [`ListStore`] for the lifetime of a session and
//! talks to it through a [`ListView`], which caches the acknowledged records
//! for rendering. Two stores exist:
//!
//! - [`LocalListStore`] -- ordered, in-memory, lost on exit (meals, deals)
//! - `RemoteLeftoverStore` in `larder-client` -- backed by the HTTP API
//!
//! Stores give no ordering guarantee between concurrently issued calls; the
//! last response to land wins.

pub mod local;
pub mod store;
pub mod view;

pub use local::LocalListStore;
pub use store::ListStore;
pub use view::ListView;
