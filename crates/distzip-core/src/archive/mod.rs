//! Archive assembly.
//!
//! [`ArchiveBuilder`] drives pattern resolution and feeds the results into a
//! [`ZipSink`], which owns the zip stream for the duration of one build.

pub mod builder;
pub mod sink;

pub use builder::ArchiveBuilder;
pub use sink::AddOutcome;
pub use sink::ZipSink;
pub use sink::entry_name;
