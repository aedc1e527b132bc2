use crate::error::Result;
use crate::store::{NodeId, NodeStore};
use crate::text::Text;
use crate::tidy;
use crate::tree::Tree;

/// Statistics for one construction phase, reported by [`Builder::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    /// Text position the phase consumed.
    pub position: usize,
    /// Symbol at that position.
    pub symbol: u8,
    /// Leaves created during the phase.
    pub new_leaves: usize,
    /// Internal nodes created by edge splits during the phase.
    pub new_internals: usize,
    /// Suffixes still pending when the phase stopped.
    pub remaining: usize,
}

/// On-line Ukkonen construction over one concatenated text.
///
/// The builder streams the text left to right, one phase per symbol.
/// Extending every existing leaf by the new symbol costs nothing: open
/// leaves have no end of their own and resolve against `open_end`, which
/// the phase bumps once. The work in a phase is inserting the pending
/// suffixes that are not yet in the tree, driven by the active point and
/// the `remaining` counter.
///
/// `open_end` lives here, on the builder, so two constructions running in
/// the same process never alias each other's leaf ends.
#[derive(Debug)]
pub struct Builder {
    text: Text,
    store: NodeStore,
    active_node: NodeId,
    active_edge: u8,
    active_length: usize,
    remaining: usize,
    open_end: usize,
    position: usize,
}

impl Builder {
    /// A builder ready to stream `text`.
    pub fn new(text: Text) -> Self {
        let store = NodeStore::with_capacity(text.len());
        Self {
            text,
            store,
            active_node: NodeId::ROOT,
            active_edge: 0,
            active_length: 0,
            remaining: 0,
            open_end: 0,
            position: 0,
        }
    }

    /// Runs the next phase, or returns `None` once the text is exhausted.
    pub fn step(&mut self) -> Result<Option<Phase>> {
        if self.position >= self.text.len() {
            return Ok(None);
        }
        let position = self.position;
        let before = self.store.len();
        self.extend(position)?;
        self.position += 1;

        let new_leaves = self
            .store
            .ids()
            .skip(before)
            .filter(|&id| self.store.node(id).is_leaf())
            .count();
        Ok(Some(Phase {
            position,
            symbol: self.text.symbol(position),
            new_leaves,
            new_internals: self.store.len() - before - new_leaves,
            remaining: self.remaining,
        }))
    }

    /// Drains the remaining phases, runs the tidy pass, and hands back the
    /// finished tree.
    pub fn finish(mut self) -> Result<Tree> {
        while self.step()?.is_some() {}
        let Self {
            text, mut store, ..
        } = self;
        let arrays = tidy::freeze_and_rank(&text, &mut store);
        Ok(Tree::from_parts(text, store, arrays))
    }

    /// True once every phase has run.
    pub fn is_done(&self) -> bool {
        self.position >= self.text.len()
    }

    /// The text being streamed.
    pub fn text(&self) -> &Text {
        &self.text
    }

    /// The node store in its current (possibly still implicit) state.
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// Exclusive end shared by all open leaves.
    pub fn open_end(&self) -> usize {
        self.open_end
    }

    /// Suffixes pending insertion.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// The active point: node, edge symbol (when on an edge), and offset
    /// into that edge.
    pub fn active(&self) -> (NodeId, Option<u8>, usize) {
        let edge = (self.active_length > 0).then_some(self.active_edge);
        (self.active_node, edge, self.active_length)
    }

    /// Length of the edge entering `id`, resolving open leaves against the
    /// current open end.
    fn edge_length(&self, id: NodeId) -> usize {
        let node = self.store.node(id);
        node.end_or(self.open_end) - node.start()
    }

    /// One phase: extend the tree with `T[i]`, inserting every pending
    /// suffix that the new symbol makes explicit.
    fn extend(&mut self, i: usize) -> Result<()> {
        self.open_end = i + 1;
        self.remaining += 1;
        let symbol = self.text.symbol(i);
        // Internal node waiting for its suffix link; never outlives the phase.
        let mut last_new_internal: Option<NodeId> = None;

        while self.remaining > 0 {
            if self.active_length == 0 {
                self.active_edge = symbol;
            }
            match self.store.child(self.active_node, self.active_edge) {
                None => {
                    // Rule 2 at a node: hang a fresh leaf off the active node.
                    let leaf = self.store.new_leaf(i);
                    self.store.attach_child(self.active_node, self.active_edge, leaf)?;
                    if let Some(pending) = last_new_internal.take() {
                        self.store.set_suffix_link(pending, self.active_node)?;
                    }
                }
                Some(next) => {
                    let edge_length = self.edge_length(next);
                    if self.active_length >= edge_length {
                        // Skip/count: the active point walked off this edge.
                        self.active_node = next;
                        self.active_length -= edge_length;
                        self.active_edge = self.text.symbol(i - self.active_length);
                        continue;
                    }
                    let on_edge = self.store.edge_symbol_at(&self.text, next, self.active_length);
                    if on_edge == symbol {
                        // Rule 3: already present; the phase is over, later
                        // phases will make this suffix explicit.
                        self.active_length += 1;
                        if let Some(pending) = last_new_internal.take() {
                            self.store.set_suffix_link(pending, self.active_node)?;
                        }
                        break;
                    }
                    // Rule 2 on an edge: split it where the mismatch sits and
                    // hang the new leaf off the split node.
                    let next_start = self.store.node(next).start();
                    let split = self
                        .store
                        .new_internal(next_start, next_start + self.active_length);
                    self.store.advance_start(next, next_start + self.active_length);
                    self.store.repoint_child(self.active_node, self.active_edge, split)?;
                    self.store.attach_child(split, on_edge, next)?;
                    let leaf = self.store.new_leaf(i);
                    self.store.attach_child(split, symbol, leaf)?;
                    if let Some(pending) = last_new_internal.take() {
                        self.store.set_suffix_link(pending, split)?;
                    }
                    last_new_internal = Some(split);
                }
            }

            self.remaining -= 1;
            if self.active_node == NodeId::ROOT && self.active_length > 0 {
                self.active_length -= 1;
                self.active_edge = self.text.symbol(i - self.remaining + 1);
            } else if self.active_node != NodeId::ROOT {
                self.active_node = self
                    .store
                    .node(self.active_node)
                    .suffix_link()
                    .unwrap_or(NodeId::ROOT);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(words: &[&str], terminators: &str) -> Builder {
        let mut builder = Builder::new(Text::compose(words, terminators).unwrap());
        while builder.step().unwrap().is_some() {}
        builder
    }

    fn leaf_count(store: &NodeStore) -> usize {
        store.ids().filter(|&id| store.node(id).is_leaf()).count()
    }

    #[test]
    fn test_phase_per_symbol() {
        let mut builder = Builder::new(Text::compose(&["banana"], "X").unwrap());
        let mut phases = 0;
        while let Some(phase) = builder.step().unwrap() {
            assert_eq!(phase.position, phases);
            phases += 1;
        }
        assert_eq!(phases, 7);
        assert!(builder.is_done());
        assert!(builder.step().unwrap().is_none());
    }

    #[test]
    fn test_every_position_gets_a_leaf() {
        let builder = built(&["banana"], "X");
        assert_eq!(builder.remaining(), 0);
        assert_eq!(leaf_count(builder.store()), builder.text().len());
    }

    #[test]
    fn test_repetitive_text_split_counts() {
        // a^n with a sentinel: n+1 leaves and n-1 internal splits.
        let n = 50;
        let word = "a".repeat(n);
        let builder = built(&[word.as_str()], "X");
        let store = builder.store();
        assert_eq!(leaf_count(store), n + 1);
        assert_eq!(store.len(), 1 + (n + 1) + (n - 1));
        assert!(store.len() <= 2 * builder.text().len());
    }

    #[test]
    fn test_walkdown_and_links_install() {
        // The classic walk-down exercise: phases 6..9 of abcabxabcd ride
        // the "ab" edge and the splits chain their links in-phase.
        let builder = built(&["abcabxabcd"], "A");
        let store = builder.store();
        for id in store.ids() {
            let node = store.node(id);
            if !node.is_leaf() && !id.is_root() {
                assert!(
                    node.suffix_link().is_some(),
                    "internal node {} has no suffix link",
                    id.index()
                );
            }
        }
    }

    #[test]
    fn test_node_counts_on_multiple_words() {
        let builder = built(&["abaabaab", "abbaabbab"], "AB");
        assert_eq!(builder.text().len(), 19);
        assert_eq!(leaf_count(builder.store()), 19);
        assert!(builder.store().len() <= 38);
    }

    #[test]
    fn test_phase_statistics_add_up() {
        let mut builder = Builder::new(Text::compose(&["mississippi"], "X").unwrap());
        let mut leaves = 0;
        let mut internals = 0;
        while let Some(phase) = builder.step().unwrap() {
            leaves += phase.new_leaves;
            internals += phase.new_internals;
        }
        assert_eq!(leaves, builder.text().len());
        assert_eq!(builder.store().len(), 1 + leaves + internals);
        assert_eq!(builder.remaining(), 0);
    }

    #[test]
    fn test_active_point_resets_between_words() {
        // After a word's sentinel phase nothing is pending and the active
        // point is back at the root.
        let mut builder = Builder::new(Text::compose(&["ab", "ab"], "AB").unwrap());
        for _ in 0..3 {
            builder.step().unwrap();
        }
        assert_eq!(builder.remaining(), 0);
        let (node, edge, length) = builder.active();
        assert!(node.is_root());
        assert_eq!(edge, None);
        assert_eq!(length, 0);
    }
}
