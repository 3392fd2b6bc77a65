//! Background Tasks Module
//!
//! Optional background work layered on top of the cache.
//!
//! # Tasks
//! - Sweeper: eagerly purges expired entries at a fixed interval

mod sweeper;

pub use sweeper::spawn_sweeper;
