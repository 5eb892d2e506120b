pub mod api;

pub mod clock;

pub mod loan;

pub mod patron;

pub mod policy;
