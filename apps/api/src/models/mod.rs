pub mod appreciation;
pub mod brief;
pub mod candidate;
pub mod cv;
