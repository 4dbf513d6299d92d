//! Bulk import of JIRA-exported task data.
//!
//! Pure building blocks of the import pipeline, leaves first:
//!
//! - [`vocabulary`] -- fixed enumerations and the mapping tables onto them.
//! - [`keys`] -- DATACO key normalization.
//! - [`payload`] -- typed input records.
//! - [`classification`] -- calibration-parent detection and label derivation.
//! - [`validator`] -- structural validation of the raw JSON payload.
//! - [`report`] -- the per-row / per-parent import report.
//! - [`store`] -- the store seam the resolver and writer run against.

pub mod classification;
pub mod keys;
pub mod payload;
pub mod report;
pub mod store;
pub mod validator;
pub mod vocabulary;
