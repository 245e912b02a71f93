pub mod book;
pub mod identity;
pub mod used_basic_auth;
