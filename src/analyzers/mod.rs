//! Grade parsing and aggregation.
//!
//! This module turns raw grade tokens into numbers, groups them by subject
//! and computes per-subject and overall means for presentation.

pub mod aggregate;
pub mod grade;
pub mod types;
pub mod utility;
