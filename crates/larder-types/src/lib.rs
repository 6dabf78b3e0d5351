//! Foundation types for Larder.
//!
//! Every list in Larder holds [`Record`]s: a stable [`RecordId`], creation and
//! update timestamps, and a view-specific field set implementing [`Fields`].
//! Field sets are flattened into the record on the wire, so a leftover record
//! serializes as
//! `{id, name, level, description, createdAt, updatedAt}`.
//!
//! # Field sets
//!
//! - [`Leftover`]: leftover food with a fill level bounded to `[0, 60]`
//! - [`Meal`]: a planned meal that can be ticked off
//! - [`Deal`]: a discounted product seen at a store
//!
//! The [`api`] module holds the JSON bodies and endpoint paths shared by the
//! server and the client.
//!
//! Each field set names its key-value namespace ([`Fields::NAMESPACE`]), the
//! draft used to create it, and the partial patch used to update it.

pub mod api;
pub mod deal;
pub mod error;
pub mod id;
pub mod leftover;
pub mod meal;
pub mod record;

pub use api::{endpoints, DeleteResponse, ErrorBody, HealthResponse};
pub use deal::{Deal, DealPatch, DealSummary, DiscountTier, NewDeal};
pub use error::{TypeError, TypeResult};
pub use id::RecordId;
pub use leftover::{
    clamp_level, LevelTier, Leftover, LeftoverFood, LeftoverInput, LeftoverPatch, LeftoverSummary,
    NewLeftover,
    DEFAULT_LEVEL, MAX_LEVEL, MIN_LEVEL,
};
pub use meal::{Meal, MealPatch, MealSummary, NewMeal};
pub use record::{Fields, Record};
