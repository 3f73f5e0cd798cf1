pub mod errors;
pub mod db;
pub mod validation;
pub mod garage;
pub mod garage_service;
pub mod auto_parts_shop;

#[cfg(test)]
mod tests;
