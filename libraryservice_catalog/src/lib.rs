pub mod api;

pub mod catalog_store;

pub mod title;
