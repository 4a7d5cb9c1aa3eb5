//! Deliverable generation collaborator.
//!
//! Submissions are turned into a static site by a [`ports::SiteGenerator`].
//! The intake services only see the port; [`adapters::LocalSiteGenerator`]
//! renders a single page to the local filesystem.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
