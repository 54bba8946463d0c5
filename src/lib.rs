//! Trace-driven model of a set-associative hardware cache.
//!
//! A [`cache::Model`] classifies each address of a trace as a hit or a
//! miss under a configurable replacement policy (LRU or FIFO), for
//! comparing hit rates across geometries and policies. It models
//! residency only: no timing, no hierarchy, no write policies.

pub mod cache;
pub mod config;
pub mod error;
pub mod replace;
pub mod set;
pub mod trace;
