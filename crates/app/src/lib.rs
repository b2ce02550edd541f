//! Commission rates catalog: listing query compiler, soft-delete lifecycle
//! and `PostgreSQL` persistence.

pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

mod uuids;
