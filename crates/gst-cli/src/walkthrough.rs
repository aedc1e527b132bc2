use anyhow::Result;
use gst_tree::{Builder, Text};

use crate::{join, render};

/// Narrates the construction phase by phase: one snapshot of the implicit
/// tree after every extension, then the tidied tree and its arrays.
pub fn run(text: Text) -> Result<()> {
    let total = text.len();
    let mut builder = Builder::new(text);
    while let Some(phase) = builder.step()? {
        println!(
            "phase {}/{total}: read {:?} at position {}",
            phase.position + 1,
            phase.symbol as char,
            phase.position
        );
        println!(
            "  created {} leaves and {} internal nodes; {} suffixes pending",
            phase.new_leaves, phase.new_internals, phase.remaining
        );
        let (node, edge, length) = builder.active();
        match edge {
            Some(symbol) => println!(
                "  active point: node {}, edge {:?}, length {length}",
                node.index(),
                symbol as char
            ),
            None => println!("  active point: node {}", node.index()),
        }
        render::snapshot(builder.text(), builder.store(), builder.open_end());
        println!();
    }

    let tree = builder.finish()?;
    println!("tidied tree:");
    render::tree(&tree);
    println!("sa:  {}", join(tree.suffix_array()));
    println!("lcp: {}", join(tree.lcp_array()));
    Ok(())
}
