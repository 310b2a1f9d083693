//! Rental index computation.
//!
//! This module fits rent trends per ZIP, ranks the resulting metrics across
//! each apartment size's cohort, combines the ranks into a rental index and
//! joins population-density data onto the ZIPs it found.

pub mod analyzer;
pub mod density;
pub mod normalize;
pub mod rental_index;
pub mod report;
pub mod types;
pub mod utility;
