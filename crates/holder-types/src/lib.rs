pub mod pattern;
pub mod render;
pub mod spec;
pub mod topo;

pub use pattern::*;
pub use render::*;
pub use spec::*;
pub use topo::*;
