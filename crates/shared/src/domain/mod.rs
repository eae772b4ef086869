pub mod balance;
pub mod context;
pub mod request;
pub mod response;
pub mod scope;
