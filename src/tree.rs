//! Sorted file-tree rendering of recovered entries.

use std::collections::BTreeMap;
use std::io::{self, Write};

#[derive(Debug, Default)]
struct TreeNode {
    is_dir: bool,
    children: BTreeMap<String, TreeNode>,
}

/// A file tree assembled from entry paths.
///
/// Children are kept in a `BTreeMap`, so rendering is lexicographically
/// sorted without a separate sort pass.
#[derive(Debug, Default)]
pub struct FileTree {
    root: TreeNode,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one entry path.
    ///
    /// Intermediate components are directories regardless of whether a
    /// `dir/` entry was inserted before them.
    pub fn insert(&mut self, name: &str, is_dir: bool) {
        let components: Vec<&str> = name.split('/').filter(|c| !c.is_empty()).collect();

        let mut node = &mut self.root;
        for (depth, component) in components.iter().enumerate() {
            let last = depth == components.len() - 1;
            node = node.children.entry(component.to_string()).or_default();
            if !last || is_dir {
                node.is_dir = true;
            }
        }
    }

    /// Writes the tree, one name per line, indented one space per level,
    /// directories suffixed with `/`.
    pub fn write_sorted<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "/")?;
        write_children(&self.root, " ", writer)
    }
}

fn write_children<W: Write>(node: &TreeNode, indent: &str, writer: &mut W) -> io::Result<()> {
    for (name, child) in &node.children {
        let suffix = if child.is_dir { "/" } else { "" };
        writeln!(writer, "{indent}{name}{suffix}")?;
        write_children(child, &format!("{indent} "), writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(tree: &FileTree) -> String {
        let mut out = Vec::new();
        tree.write_sorted(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn sorted_tree_with_directory_entries() {
        let mut tree = FileTree::new();
        tree.insert("assets/", true);
        tree.insert("assets/b.txt", false);
        tree.insert("assets/a.txt", false);

        assert_eq!(render(&tree), "/\n assets/\n  a.txt\n  b.txt\n");
    }

    #[test]
    fn intermediate_components_become_directories() {
        let mut tree = FileTree::new();
        // No explicit "deep/" or "deep/er/" entries.
        tree.insert("deep/er/file.bin", false);
        tree.insert("top.txt", false);

        assert_eq!(render(&tree), "/\n deep/\n  er/\n   file.bin\n top.txt\n");
    }

    #[test]
    fn empty_tree_is_just_the_root() {
        assert_eq!(render(&FileTree::new()), "/\n");
    }
}
