//! # tq-frame
//!
//! Response Normalization Engine for transitq.
//!
//! [`normalize`] flattens a JSON:API document (primary `data` plus
//! side-loaded `included` resources) into one [`Table`] through prefixing
//! and left joins. [`compact_memory`] dictionary-encodes low-cardinality
//! columns. [`QueryResults`] wraps both behind a result-level error so a
//! failed query renders instead of aborting.

mod cell;
mod clean;
mod column;
mod compact;
mod error;
mod export;
mod geo;
mod join;
mod normalize;
mod results;
mod table;

pub use cell::{Cell, CellKey, DataType};
pub use clean::{clean_resources, relationship_id};
pub use column::{Column, ColumnData};
pub use compact::compact_memory;
pub use error::FrameError;
pub use export::arrow_type;
pub use geo::{CoordinatePair, coordinate_pairs};
pub use join::left_join;
pub use normalize::normalize;
pub use results::{QueryResults, ResultsSummary, error_details};
pub use table::{RowView, Table};
