//! Tabular exchange formats
//!
//! This crate handles:
//! - Loading the area-code source table into an index
//! - Writing generated numbers
//! - Relocating arbitrary tables (rewriting the area column by resolution)
//! - Comparing two tables row by row

pub mod error;
pub mod fs;
pub mod source;
pub mod output;
pub mod relocate;
pub mod compare;

pub use error::TableError;
pub use source::{load_area_codes, read_area_codes};
pub use output::{write_generated, write_generated_file, NumberWriter};
pub use relocate::{relocate, relocate_file, Relocation};
pub use compare::{compare_files, compare_tables, RowMismatch, TableComparison};
