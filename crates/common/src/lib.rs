//! Shared value types used by every axisview crate.

mod types;

pub use types::{Color3, EntityId, RegionId, SurfaceSize, Transform};
