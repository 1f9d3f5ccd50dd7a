//! `hx-output` — run output writers for the hexswarm simulator.
//!
//! | Writer               | Files created                                   |
//! |----------------------|-------------------------------------------------|
//! | [`CsvWriter`]        | `agent_snapshots.csv`, `tick_summaries.csv`     |
//! | [`JsonSummaryWriter`]| `result.json`                                   |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `hx_sim::SimObserver`.  A pair `(A, B)` of writers is
//! itself a writer, so one run can feed both.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hx_output::{CsvWriter, JsonSummaryWriter, SimOutputObserver};
//!
//! let writer = (CsvWriter::new(dir)?, JsonSummaryWriter::new(dir)?);
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use json::{JsonSummaryWriter, RunReport};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
