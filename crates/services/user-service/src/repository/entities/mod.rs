//! SeaORM entities backing the relational store.

pub mod user;
