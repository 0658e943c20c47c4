//! Tree editing: alignment against a reference, path mutation and draft merge.
//!
//! Every operation takes trees by reference and returns new values.

mod align;
mod merge;
mod mutation;

pub use align::{
    AlignEvent,
    AlignedEntry,
    ObjectMarker,
    align,
};
pub use merge::merge;
pub use mutation::set_at_path;
