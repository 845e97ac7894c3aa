//! Concourse-Up — deploy and tear down Concourse CI.
//!
//! Every release, stemcell and companion binary is pinned at build time.
//! The provenance gate refuses to run a binary whose pins were never set.

pub mod cli;
pub mod core;
pub mod provenance;
