//! Library target of the server crate so integration tests can build the
//! router in-process.

pub mod routes;
