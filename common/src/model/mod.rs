pub mod api;
pub mod event;
pub mod signup;
pub mod slot;
