//! The detergent holder itself: parameter resolution and the ordered
//! modeling pipeline that produces the printable solid.
//!
//! Everything here is deterministic and synchronous. The resolver is pure;
//! each pipeline stage consumes a solid handle and returns the next one,
//! so a build is a left-to-right fold over the stages.

pub mod arm;
pub mod connector;
pub mod finish;
pub mod marks;
pub mod pipeline;
pub mod resolver;
pub mod shell;
pub mod vents;

pub use pipeline::{build_arm_stub, build_holder, BuildError, HolderBuild};
pub use resolver::{resolve, ConfigError, DerivedDimensions, EPS};
