//! Header-keyed section tree for collapsible rendering.

use std::collections::HashSet;
use std::iter::Peekable;
use std::vec::IntoIter;

use crate::block::Block;

/// A node of the section tree: a leaf block, or a header together with
/// everything it dominates.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionNode {
    Content(Block),
    Section {
        header: Block,
        children: Vec<SectionNode>,
    },
}

impl SectionNode {
    /// Stable id for render diffing, borrowed from the underlying block.
    pub fn id(&self) -> &str {
        match self {
            SectionNode::Content(block) => block.id(),
            SectionNode::Section { header, .. } => header.id(),
        }
    }
}

/// Nest a flat block list by header level.
///
/// A header at level L owns every following block until the next header
/// at level <= L, which starts a sibling (or closes an ancestor).
/// Skipped levels nest one step: an H3 right after an H1 sits directly
/// under the H1.
pub fn build_section_tree(blocks: Vec<Block>) -> Vec<SectionNode> {
    let mut blocks = blocks.into_iter().peekable();
    collect_children(&mut blocks, 0)
}

fn collect_children(blocks: &mut Peekable<IntoIter<Block>>, parent_level: u8) -> Vec<SectionNode> {
    let mut nodes = Vec::new();

    while let Some(next) = blocks.peek() {
        if let Some(level) = next.header_level() {
            if level <= parent_level {
                break;
            }
        }

        let Some(block) = blocks.next() else {
            break;
        };

        match block.header_level() {
            Some(level) => {
                let children = collect_children(blocks, level);
                nodes.push(SectionNode::Section {
                    header: block,
                    children,
                });
            }
            None => nodes.push(SectionNode::Content(block)),
        }
    }

    nodes
}

/// Collapsed header ids, kept by the caller across reparses.
///
/// Collapse state lives outside the tree on purpose: the tree is
/// rebuilt from scratch on every text change, and line-indexed header
/// ids survive that rebuild while node identity does not. The renderer
/// is expected to ignore toggle input until the turn is complete.
#[derive(Debug, Clone, Default)]
pub struct CollapsedSections {
    collapsed: HashSet<String>,
}

impl CollapsedSections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_collapsed(&self, header_id: &str) -> bool {
        self.collapsed.contains(header_id)
    }

    pub fn toggle(&mut self, header_id: &str) {
        if !self.collapsed.remove(header_id) {
            self.collapsed.insert(header_id.to_string());
        }
    }

    pub fn collapse(&mut self, header_id: &str) {
        self.collapsed.insert(header_id.to_string());
    }

    pub fn expand(&mut self, header_id: &str) {
        self.collapsed.remove(header_id);
    }

    pub fn clear(&mut self) {
        self.collapsed.clear();
    }
}
