pub mod executor;
pub mod multiplatform;
