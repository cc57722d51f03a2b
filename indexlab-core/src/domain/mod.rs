//! Domain types for IndexLab

pub mod bar;
pub mod index;

pub use bar::{DailyBar, YearlyBar};
pub use index::IndexDescriptor;
