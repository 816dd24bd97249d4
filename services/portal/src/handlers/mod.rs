pub mod account;
pub mod admin;
pub mod contact;
pub mod context;
pub mod health;
pub mod page;
pub mod plans;
pub mod session;
pub mod settings;
pub mod signup;
