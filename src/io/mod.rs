// Purpose - external interfaces: where finished blocks leave the core

pub mod sink;

#[cfg(feature = "rtrb")]
pub use sink::RingSink;
pub use sink::{NullSink, OutputSink};
