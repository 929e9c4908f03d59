pub mod repo;
pub mod resume;
