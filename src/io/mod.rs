/*!
# IO

Utilities for writing graphs in a human-readable form.

## Output Formats

Currently supported output formats:
- **Dump**: every node in ascending order followed by its outgoing edges, one per line, in ascending
  `(destination, weight)` order. This is also the [`Display`](std::fmt::Display) format of all
  graphs. It is meant for reading, not for round-trip parsing.

## Traits

- [`GraphWriter`] is implemented by writers for a specific format and carries their settings.
- Format-specific shorthand traits (e.g. [`DumpWrite`]) write with default settings.
*/

pub mod dump;

use std::{
    fs::File,
    io::{BufWriter, Result, Write},
    path::Path,
};

pub use dump::*;

/// Trait for types that can write graphs in a specific format.
///
/// This trait provides both a low-level method to write to any
/// [`Write`] instance and a convenience wrapper to write directly
/// to files.
pub trait GraphWriter<G> {
    /// Writes the given graph to the provided writer according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if writing fails (e.g., IO errors).
    fn try_write_graph<W>(&self, graph: &G, writer: W) -> Result<()>
    where
        W: Write;

    /// Writes the given graph to a file according to the settings in `self`.
    ///
    /// Internally wraps the file in a buffered writer.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or if writing fails.
    fn try_write_graph_file<P>(&self, graph: &G, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_graph(graph, &mut writer)?;
        writer.flush()
    }
}
