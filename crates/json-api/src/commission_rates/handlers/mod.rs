//! Commission Rate Handlers

pub(crate) mod active;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod restore;
pub(crate) mod update;
