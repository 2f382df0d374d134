//! Render a [`RankMap`] as a Graphviz DOT file, one filled circle per
//! node with the fill following the link color.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::node::{Color, Node};
use crate::rankmap::RankMap;

impl<K, V> RankMap<K, V>
where
    K: Ord + Display,
{
    /// Write the tree to `path` in DOT format.
    ///
    /// # Example
    /// ```rust,no_run
    /// use llrb_rank_map::RankMap;
    ///
    /// let mut map = RankMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// map.draw("./map.dot").unwrap();
    /// ```
    #[inline]
    pub fn draw<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        writeln!(out, "digraph rank_map {{")?;
        writeln!(out, "    node [shape=circle, style=filled, fontcolor=white];")?;
        if let Some(root) = self.root_node() {
            Self::draw_node(&mut out, root)?;
        }
        writeln!(out, "}}")?;
        out.flush()
    }

    fn draw_node<W: Write>(out: &mut W, node: &Node<K, V>) -> io::Result<()> {
        let fill = match node.color() {
            Color::Red => "red3",
            Color::Black => "gray15",
        };
        writeln!(out, "    \"{}\" [fillcolor={}];", node.key(), fill)?;
        for child in [node.left(), node.right()].into_iter().flatten() {
            writeln!(out, "    \"{}\" -> \"{}\";", node.key(), child.key())?;
            Self::draw_node(out, child)?;
        }
        Ok(())
    }
}
