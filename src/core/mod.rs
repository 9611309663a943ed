//! Pure data model and algorithms, free of I/O.
//!
//! - `tree`: value trees, scalars and leaf paths
//! - `codec`: flattening trees to `key[seg]=value` lines and back
//! - `merge`: reconciling stored trees with the reference shape

pub mod codec;
pub mod merge;
pub mod tree;

pub use codec::{
    Leaf, ParsedLine, decode_key, encode_key, flatten_leaves, format_line, parse_line,
    rebuild_tree,
};
pub use merge::{conform_rebuilt, merge_shape, overlay, restore_scalar_types};
pub use tree::{LeafPath, Scalar, Segment, ValueTree};
