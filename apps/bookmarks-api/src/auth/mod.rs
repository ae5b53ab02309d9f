pub mod authenticator;
pub mod basic;
pub mod middleware;
