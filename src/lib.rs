use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub mod error;
pub mod events;
pub mod participants;
pub mod schema;
pub mod schools;
pub mod state;
pub mod tournaments;
pub mod validation;
pub mod venues;

#[cfg(test)]
mod test;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();
