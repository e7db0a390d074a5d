//! Command line front end.

pub(crate) mod cli;
