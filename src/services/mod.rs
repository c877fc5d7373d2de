pub mod cache;
pub mod impact;
pub mod job_scheduler_service;
pub mod search;
pub mod sentiment;
