//! CRUD over `&DatabaseConnection`, one module per entity.

pub mod garages;
pub mod services;
pub mod auto_parts_shops;
