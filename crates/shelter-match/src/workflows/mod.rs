pub mod adoption;
pub mod guidance;
pub mod ranking;
pub mod records;
pub mod scoring;
pub mod sessions;
