pub mod policy;
pub mod provider;
