//! Route registration for generated list endpoints

pub mod route;

pub use route::register_list_route;
