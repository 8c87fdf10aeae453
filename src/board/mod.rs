//! Board model: spaces, properties and color groups.
//!
//! ## Key Types
//!
//! - `Property`: price, mortgage, rent schedule and building state of one
//!   ownable position
//! - `Space`: one board position with at most one `SpaceEffect` or property
//! - `Board`: the cyclic space sequence, the property arena, and the
//!   ownership/monopoly queries the turn engine relies on

pub mod layout;
pub mod property;
pub mod space;

pub use layout::Board;
pub use property::Property;
pub use space::{Space, SpaceEffect};
