pub mod cv;
pub mod interview;
pub mod job;
pub mod profile;
