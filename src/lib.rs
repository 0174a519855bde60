// src/lib.rs

//! Facade over the geofuse workspace. Re-exports the core engine so demos
//! and downstream users depend on a single crate name.

pub use geofuse_core::*;

pub mod prelude {
    pub use geofuse_core::prelude::*;
}
