pub mod health;
pub mod notify;
pub mod root;
pub mod webhook;
