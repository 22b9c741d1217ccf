pub mod cmake;
pub mod context;
