pub mod actor;
pub mod usecase;
