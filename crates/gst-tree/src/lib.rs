/*!
This crate builds generalized suffix trees over sets of words and derives
suffix arrays and LCP arrays from them.

Construction is Ukkonen's on-line algorithm, extended to multiple words by
sealing each word with its own sentinel symbol before concatenation. The
whole pipeline is linear in the total input length:

- [`Text`] interleaves words and sentinels and validates the input,
- a guarded [`NodeStore`](store::NodeStore) owns the nodes and rejects the
  aliasing mistakes Ukkonen implementations are prone to,
- the [`Builder`] streams the text phase by phase, maintaining the active
  point, the pending-suffix counter, and the shared open leaf end,
- a tidy pass freezes every leaf at its word's sentinel and materializes
  the suffix and LCP arrays in one lexicographic traversal.

# Usage Example

```rust
use gst_tree::Tree;

let tree = Tree::build(&["abab"], "XYZ").expect("valid input");
assert_eq!(tree.suffix_array(), &[4, 2, 0, 3, 1]);
assert_eq!(tree.lcp_array(), &[0, 0, 2, 0, 1]);
assert_eq!(tree.string_suffixes()[1], "abX");
```

# Guarantees

- Every suffix of every word ends at exactly one leaf; suffixes of
  different words never merge past a sentinel.
- At most `2·|T|` nodes are allocated for a text of `|T|` symbols.
- A construction is synchronous and self-contained: the shared leaf-end
  cell is scoped to one [`Builder`], so independent constructions may run
  in parallel.
- Ill-formed input fails fast with an input error before any node is
  allocated; structural guard failures surface the offending node id and
  operation.
*/

pub mod build;
pub mod error;
pub mod store;
pub mod text;
mod tidy;
pub mod tree;

pub use build::{Builder, Phase};
pub use error::{GstError, Result};
pub use store::{Node, NodeId, NodeStore};
pub use text::Text;
pub use tree::Tree;
