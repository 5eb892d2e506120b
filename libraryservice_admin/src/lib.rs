pub mod api;

pub mod staff;
