//! User Service Library
//!
//! This crate provides user management: the storage contract with its
//! in-memory and PostgreSQL implementations, and the service that enforces
//! validation and email uniqueness on top of it.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use common::StorageBackend;
use sea_orm::DbErr;
use tracing::info;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::{InMemoryUserStore, UserRepository, UserStore};
use crate::service::UserManager;

/// The store selected at startup, plus the database handle when there is one.
#[derive(Clone)]
pub struct Storage {
    pub backend: StorageBackend,
    pub repository: Arc<dyn UserRepository>,
    pub database: Option<Database>,
}

impl Storage {
    /// Build the store named by the configuration.
    ///
    /// The relational backend connects, pings, and migrates before returning.
    pub async fn connect(config: &UserServiceConfig) -> Result<Self, DbErr> {
        match config.backend {
            StorageBackend::Memory => {
                info!("Using in-memory repository");
                Ok(Self::in_memory())
            }
            StorageBackend::Postgres => {
                let database = Database::connect(&config.database).await?;
                info!("Using PostgreSQL repository");
                Ok(Self {
                    backend: StorageBackend::Postgres,
                    repository: Arc::new(UserStore::new(database.get_connection())),
                    database: Some(database),
                })
            }
        }
    }

    /// A fresh, empty process-local store.
    pub fn in_memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            repository: Arc::new(InMemoryUserStore::new()),
            database: None,
        }
    }

    /// Build the user service on top of this store.
    pub fn user_service(&self) -> UserManager {
        UserManager::new(self.repository.clone())
    }
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &UserServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}
