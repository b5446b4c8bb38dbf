pub mod debates;
pub mod types;
