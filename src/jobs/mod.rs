//! Background Jobs Module
//!
//! Periodic maintenance tasks scheduled and executed by the job scheduler
//! service, independently of user requests.
//!
//! # Available Jobs
//!
//! - `cache_purge_job` - Deletes expired rows from the persistent news cache
//!   and prunes the in-process layer
//!
//! Jobs are idempotent and fault-tolerant: failures are logged and the next
//! scheduled run is unaffected.

pub mod cache_purge_job;
