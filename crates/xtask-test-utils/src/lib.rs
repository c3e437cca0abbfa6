//! Shared test utilities for the xtask workspace.
//!
//! This crate provides standardised test fixtures so the crate test suites do
//! not each build their own. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git repository fixtures at two realism levels
//! - [`project`]: [`project::TestProject`], a temporary copy of a fixture tree

pub mod git;
pub mod project;
