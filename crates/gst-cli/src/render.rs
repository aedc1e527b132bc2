use gst_tree::{NodeId, NodeStore, Text, Tree};

/// Prints the word table and the concatenated text.
pub fn word_table(text: &Text) {
    for (index, word) in text.words().iter().enumerate() {
        println!(
            "word {index}: {word:?}  sentinel {:?}",
            text.sentinel(index) as char
        );
    }
    println!("text: {}", String::from_utf8_lossy(text.bytes()));
    println!();
}

/// Prints the tidied tree.
pub fn tree(tree: &Tree) {
    println!("(root)");
    subtree(tree.text(), tree.store(), NodeId::ROOT, tree.len(), 1);
}

/// Prints an in-progress tree, resolving open leaf edges at `open_end`.
pub fn snapshot(text: &Text, store: &NodeStore, open_end: usize) {
    println!("  (root)");
    subtree(text, store, NodeId::ROOT, open_end, 2);
}

fn subtree(text: &Text, store: &NodeStore, id: NodeId, open_end: usize, indent: usize) {
    let pad = indent * 2;
    for (_, &child) in store.node(id).children() {
        let node = store.node(child);
        let end = node.end_or(open_end);
        let label = String::from_utf8_lossy(&text.bytes()[node.start()..end]);
        if node.is_leaf() {
            match (node.sa_rank(), node.suffix_start()) {
                (Some(rank), Some(suffix)) => println!(
                    "{:pad$}{label}  [leaf {} rank {rank} suffix {suffix}]",
                    "",
                    child.index()
                ),
                _ => println!("{:pad$}{label}  [leaf {}]", "", child.index()),
            }
        } else {
            match node.suffix_link() {
                Some(link) => println!(
                    "{:pad$}{label}  [node {} link {}]",
                    "",
                    child.index(),
                    link.index()
                ),
                None => println!("{:pad$}{label}  [node {}]", "", child.index()),
            }
            subtree(text, store, child, open_end, indent + 1);
        }
    }
}
