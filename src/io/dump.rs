//! # Dump
//!
//! The dump lists every node in ascending order as
//! ```text
//! <node> (
//!   <destination> | <weight>
//!   ...
//! )
//! ```
//! with one line per outgoing edge in ascending `(destination, weight)` order. A graph without
//! nodes is dumped as a single empty line.
//!
//! The indentation of edge lines and the separator between destination and weight can be changed
//! via [`DumpWriter::indent`] and [`DumpWriter::separator`]; the defaults produce the format above,
//! which is also what `to_string()` returns for every graph.
use std::{
    fmt::{self, Display},
    fs::File,
    io::{BufWriter, Result, Write},
    path::Path,
};

use super::*;
use crate::{ops::*, repr::Neighborhood};

/// A writer for the Dump-Format
#[derive(Debug, Clone)]
pub struct DumpWriter {
    /// Prefix of every edge line (default: two spaces)
    indent: String,
    /// Between destination and weight (default: ` | `)
    separator: String,
}

impl Default for DumpWriter {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            separator: " | ".to_string(),
        }
    }
}

impl DumpWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prefix of every edge line
    pub fn indent<S>(mut self, indent: S) -> Self
    where
        S: Into<String>,
    {
        self.indent = indent.into();
        self
    }

    /// Set the separator between destination and weight of an edge line
    pub fn separator<S>(mut self, separator: S) -> Self
    where
        S: Into<String>,
    {
        self.separator = separator.into();
        self
    }

    /// Returns a [`Display`]-able view of `graph` using the settings in `self`
    pub fn display<'a, G>(&'a self, graph: &'a G) -> Dump<'a, G>
    where
        G: AdjacencyList,
        G::Node: Display,
        G::Weight: Display,
    {
        Dump {
            writer: self,
            graph,
        }
    }
}

/// A graph formatted by a [`DumpWriter`], created by [`DumpWriter::display`]
pub struct Dump<'a, G> {
    writer: &'a DumpWriter,
    graph: &'a G,
}

impl<G> Display for Dump<'_, G>
where
    G: AdjacencyList,
    G::Node: Display,
    G::Weight: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.graph.is_empty() {
            return writeln!(f);
        }

        for u in self.graph.vertices() {
            writeln!(f, "{u} (")?;
            if let Some(nbs) = self.graph.neighborhood_of(u) {
                for edge in nbs.as_slice() {
                    writeln!(
                        f,
                        "{}{}{}{}",
                        self.writer.indent, edge.dst, self.writer.separator, edge.weight
                    )?;
                }
            }
            writeln!(f, ")")?;
        }

        Ok(())
    }
}

impl<G> GraphWriter<G> for DumpWriter
where
    G: AdjacencyList,
    G::Node: Display,
    G::Weight: Display,
{
    fn try_write_graph<W: Write>(&self, graph: &G, mut writer: W) -> Result<()> {
        write!(writer, "{}", self.display(graph))
    }
}

/// Trait for writing a graph to a writer in the Dump-Format.
/// Shorthand for default settings.
pub trait DumpWrite {
    /// Tries to write the graph to a writer
    fn try_write_dump<W: Write>(&self, writer: W) -> Result<()>;

    /// Tries to write the graph to a file
    fn try_write_dump_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_dump(&mut writer)?;
        writer.flush()
    }
}

impl<G> DumpWrite for G
where
    G: AdjacencyList,
    G::Node: Display,
    G::Weight: Display,
{
    fn try_write_dump<W: Write>(&self, writer: W) -> Result<()> {
        DumpWriter::default().try_write_graph(self, writer)
    }
}
