use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{RegistryError, RegistryResult, invalid},
    schema::tournaments,
    validation::is_valid_name,
};

pub mod rounds;
pub mod sections;

#[derive(
    Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = tournaments)]
#[diesel(check_for_backend(Sqlite))]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub host_school_id: String,
    pub director_id: String,
    pub building_id: Option<String>,
}

impl Tournament {
    pub fn create(
        name: &str,
        host_school_id: &str,
        director_id: &str,
        building_id: Option<&str>,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Tournament> {
        is_valid_name(name).map_err(|reason| invalid("name", reason))?;

        let tournament = Tournament {
            id: Uuid::now_v7().to_string(),
            name: name.trim().to_string(),
            host_school_id: host_school_id.to_string(),
            director_id: director_id.to_string(),
            building_id: building_id.map(str::to_string),
        };

        diesel::insert_into(tournaments::table)
            .values(&tournament)
            .execute(conn)?;

        tracing::debug!(tournament = %tournament.id, "created tournament");

        Ok(tournament)
    }

    pub fn fetch(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Tournament> {
        tournaments::table
            .filter(tournaments::id.eq(id))
            .first::<Tournament>(conn)
            .optional()?
            .ok_or(RegistryError::NotFound { entity: "tournament" })
    }

    pub fn update(
        id: &str,
        name: &str,
        director_id: &str,
        building_id: Option<&str>,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        is_valid_name(name).map_err(|reason| invalid("name", reason))?;

        let n =
            diesel::update(tournaments::table.filter(tournaments::id.eq(id)))
                .set((
                    tournaments::name.eq(name.trim()),
                    tournaments::director_id.eq(director_id),
                    tournaments::building_id.eq(building_id),
                ))
                .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "tournament" }),
            _ => Ok(()),
        }
    }

    pub fn delete(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        let n =
            diesel::delete(tournaments::table.filter(tournaments::id.eq(id)))
                .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "tournament" }),
            _ => Ok(()),
        }
    }
}
