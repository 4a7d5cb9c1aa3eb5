//! Adapter implementations for deliverable generation.

mod local;

pub use local::LocalSiteGenerator;

#[cfg(test)]
pub(crate) use local::slugify as local_slugify;
