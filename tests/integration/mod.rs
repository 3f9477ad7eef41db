// tests/integration/mod.rs
//! Integration tests for notionx
//!
//! Both clients are pointed at a `mockito` server; the assertions cover the
//! wire shape of requests and the mapping of failure responses.

#[cfg(test)]
mod blocking_client;

#[cfg(test)]
mod async_client;
