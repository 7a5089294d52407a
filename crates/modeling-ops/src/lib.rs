pub mod chamfer;
pub mod fillet;
pub mod kernel_ext;
pub mod pattern;
pub mod prism;
pub mod select;
pub mod shell;
pub mod types;

pub use chamfer::execute_chamfer;
pub use fillet::execute_fillet;
pub use kernel_ext::KernelBundle;
pub use pattern::execute_pattern_cut;
pub use prism::{execute_box, execute_prism};
pub use select::{face_plane, select_edges, select_faces, select_one_face};
pub use shell::execute_shell;
pub use types::*;
