use crate::build::Builder;
use crate::error::{GstError, Result};
use crate::store::{Node, NodeId, NodeStore};
use crate::text::Text;
use crate::tidy::Arrays;

/// A tidied generalized suffix tree with its derived arrays.
///
/// Every suffix of the concatenated text corresponds to exactly one
/// root-to-leaf path, truncated at (and including) the first sentinel the
/// suffix meets. The suffix and LCP arrays are materialized once during
/// the tidy pass and served as slices.
#[derive(Debug)]
pub struct Tree {
    text: Text,
    store: NodeStore,
    sa: Vec<usize>,
    lcp: Vec<usize>,
}

impl Tree {
    /// Builds the tree for `words`, sealing the i-th word with the i-th
    /// terminator symbol.
    ///
    /// ```
    /// use gst_tree::Tree;
    ///
    /// let tree = Tree::build(&["abab"], "XYZ").unwrap();
    /// assert_eq!(tree.suffix_array(), &[4, 2, 0, 3, 1]);
    /// assert_eq!(tree.lcp_array(), &[0, 0, 2, 0, 1]);
    /// ```
    pub fn build<W: AsRef<str>>(words: &[W], terminators: &str) -> Result<Self> {
        Builder::new(Text::compose(words, terminators)?).finish()
    }

    pub(crate) fn from_parts(text: Text, store: NodeStore, arrays: Arrays) -> Self {
        Self {
            text,
            store,
            sa: arrays.sa,
            lcp: arrays.lcp,
        }
    }

    /// Start positions of all suffixes of the concatenated text, in
    /// sorted order.
    #[inline]
    pub fn suffix_array(&self) -> &[usize] {
        &self.sa
    }

    /// `lcp_array()[r]` is the length of the longest common prefix of the
    /// suffixes at ranks `r - 1` and `r`; entry 0 is 0.
    #[inline]
    pub fn lcp_array(&self) -> &[usize] {
        &self.lcp
    }

    /// The suffixes in suffix-array order, each truncated at its first
    /// sentinel inclusive.
    pub fn string_suffixes(&self) -> Vec<String> {
        self.sa
            .iter()
            .map(|&start| {
                let end = self.text.sentinel_after(start) + 1;
                String::from_utf8_lossy(&self.text.bytes()[start..end]).into_owned()
            })
            .collect()
    }

    /// Handle of the root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The node behind `id`.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        self.store.node(id)
    }

    /// The underlying node store.
    #[inline]
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// Total number of nodes, root included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.store.len()
    }

    /// Length of the concatenated text, sentinels included.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The `index`-th input word.
    pub fn word(&self, index: usize) -> Option<&str> {
        self.text.word(index)
    }

    /// All input words.
    pub fn words(&self) -> &[String] {
        self.text.words()
    }

    /// Index of the word owning `position` of the concatenated text.
    pub fn word_of(&self, position: usize) -> usize {
        self.text.word_of(position)
    }

    /// The concatenated text.
    pub fn text(&self) -> &Text {
        &self.text
    }

    /// Checks the structural invariants of the tidied tree and its
    /// arrays, reporting the first violation found.
    ///
    /// This is a diagnostic for tests and debugging; a tree returned by
    /// [`Tree::build`] is expected to pass.
    pub fn verify(&self) -> Result<()> {
        let t = self.text.bytes();
        let n = t.len();
        if self.store.len() > 2 * n {
            return Err(GstError::invariant(0, "more nodes than twice the text length"));
        }
        if self.sa.len() != n || self.lcp.len() != n {
            return Err(GstError::invariant(0, "array length differs from text length"));
        }

        // Depth-first sweep: check each edge against its parent's implied
        // path-label occurrence; by induction every root-to-node path then
        // spells T[occ(node)..end(node)).
        let mut depth_of = vec![usize::MAX; self.store.len()];
        depth_of[NodeId::ROOT.index()] = 0;
        let mut suffixes = Vec::with_capacity(n);
        let mut stack = vec![(NodeId::ROOT, 0usize, 0usize)];
        while let Some((parent, parent_depth, parent_occ)) = stack.pop() {
            for (&symbol, &id) in self.store.node(parent).children() {
                let node = self.store.node(id);
                let end = node
                    .end()
                    .ok_or_else(|| GstError::invariant(id.index(), "open edge after tidy"))?;
                if end <= node.start() {
                    return Err(GstError::invariant(id.index(), "empty edge"));
                }
                if symbol != t[node.start()] {
                    return Err(GstError::invariant(id.index(), "child keyed by wrong symbol"));
                }
                if node.start() < parent_depth {
                    return Err(GstError::invariant(id.index(), "edge starts above its depth"));
                }
                let occ = node.start() - parent_depth;
                if t[occ..node.start()] != t[parent_occ..parent_occ + parent_depth] {
                    return Err(GstError::invariant(
                        id.index(),
                        "edge disagrees with its path label",
                    ));
                }
                if node.is_leaf() {
                    if end != self.text.sentinel_after(node.start()) + 1 {
                        return Err(GstError::invariant(
                            id.index(),
                            "leaf end not at its word's sentinel",
                        ));
                    }
                    if node.suffix_start() != Some(occ) {
                        return Err(GstError::invariant(id.index(), "leaf suffix start mismatch"));
                    }
                    let rank = node
                        .sa_rank()
                        .ok_or_else(|| GstError::invariant(id.index(), "unranked leaf"))?;
                    if self.sa.get(rank) != Some(&occ) {
                        return Err(GstError::invariant(id.index(), "rank disagrees with array"));
                    }
                    suffixes.push(occ);
                } else {
                    if node.children().len() < 2 {
                        return Err(GstError::invariant(
                            id.index(),
                            "internal node with fewer than two children",
                        ));
                    }
                    depth_of[id.index()] = parent_depth + (end - node.start());
                    stack.push((id, depth_of[id.index()], occ));
                }
            }
        }

        // Leaf suffixes form a permutation of the text positions.
        let mut sorted = suffixes.clone();
        sorted.sort_unstable();
        if sorted.len() != n || sorted.iter().enumerate().any(|(i, &s)| i != s) {
            return Err(GstError::invariant(
                0,
                "leaf suffixes are not a permutation of text positions",
            ));
        }

        // Installed suffix links drop exactly the first symbol.
        for id in self.store.ids() {
            let node = self.store.node(id);
            let Some(link) = node.suffix_link() else {
                continue;
            };
            if id.is_root() {
                continue;
            }
            let depth = depth_of[id.index()];
            let target_depth = depth_of[link.index()];
            if depth == usize::MAX || target_depth == usize::MAX || target_depth + 1 != depth {
                return Err(GstError::invariant(id.index(), "suffix link skips depth"));
            }
            let end = self.store.node(id).end().unwrap_or(0);
            let target_end = self.store.node(link).end().unwrap_or(0);
            if t[end - depth + 1..end] != t[target_end - target_depth..target_end] {
                return Err(GstError::invariant(id.index(), "suffix link label mismatch"));
            }
        }

        // SA is sorted and LCP matches direct comparison.
        if self.lcp.first() != Some(&0) && n > 0 {
            return Err(GstError::invariant(0, "LCP[0] is not 0"));
        }
        for r in 1..n {
            let a = self.sa[r - 1];
            let b = self.sa[r];
            let mut l = 0;
            while a + l < n && b + l < n && t[a + l] == t[b + l] {
                l += 1;
            }
            if self.lcp[r] != l {
                return Err(GstError::invariant(0, "LCP disagrees with direct comparison"));
            }
            let ordered = match (t.get(a + l), t.get(b + l)) {
                (Some(x), Some(y)) => x < y,
                (None, Some(_)) => true,
                _ => false,
            };
            if !ordered {
                return Err(GstError::invariant(0, "suffix array out of order"));
            }
        }
        Ok(())
    }
}
