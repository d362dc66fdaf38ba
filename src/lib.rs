//! cam2gerber: run EAGLE CAM jobs from the command line
//!
//! EAGLE's CAM processor GUI runs a `.cam` job to produce every Gerber and
//! Excellon file of a board in one go, but its command line form renders a
//! single file per call with everything spelled out as options. This library
//! reads a `.cam` job and produces one `eaglecon` call per job section.
//!
//! # Modules
//!
//! - [`cam`] — CAM job file parsing
//! - [`eagle`] — `eaglecon` command construction
//! - [`job`] — running a job section by section
//! - [`context`] — warning/error counts and per-run caches
//! - [`config`] — Configuration loading and validation

pub mod cam;
pub mod config;
pub mod context;
pub mod eagle;
pub mod job;
