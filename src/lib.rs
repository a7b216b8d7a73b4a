//! Concatenate the partitioned negation-dataset CSVs into one file per `csv_type`.

pub mod combine;
pub mod modes;
pub mod paths;
pub mod table;

pub use combine::{combine, CombineOutcome, CombineSummary};
