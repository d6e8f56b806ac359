//! HTTP plumbing shared by remote backends.

pub mod http;
