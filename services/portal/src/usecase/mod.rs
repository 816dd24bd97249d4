pub mod account;
pub mod activity;
pub mod contact;
pub mod ids;
pub mod registration;
pub mod seed;
pub mod session;
pub mod settings;
