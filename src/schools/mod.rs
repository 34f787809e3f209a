use chrono::NaiveDateTime;
use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{RegistryError, RegistryResult, invalid},
    events::SchoolClass,
    schema::schools,
    validation::is_valid_name,
};

#[derive(
    Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = schools)]
#[diesel(check_for_backend(Sqlite))]
pub struct School {
    pub id: String,
    pub name: String,
    pub class: SchoolClass,
    pub registered_at: NaiveDateTime,
}

impl School {
    pub fn create(
        name: &str,
        class: SchoolClass,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<School> {
        is_valid_name(name).map_err(|reason| invalid("name", reason))?;

        let school = School {
            id: Uuid::now_v7().to_string(),
            name: name.trim().to_string(),
            class,
            registered_at: chrono::Utc::now().naive_utc(),
        };

        diesel::insert_into(schools::table)
            .values(&school)
            .execute(conn)?;

        tracing::debug!(school = %school.id, "registered school");

        Ok(school)
    }

    pub fn fetch(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<School> {
        schools::table
            .filter(schools::id.eq(id))
            .first::<School>(conn)
            .optional()?
            .ok_or(RegistryError::NotFound { entity: "school" })
    }

    pub fn all(
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Vec<School>> {
        Ok(schools::table
            .order_by(schools::name.asc())
            .load::<School>(conn)?)
    }

    pub fn update(
        id: &str,
        name: &str,
        class: SchoolClass,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        is_valid_name(name).map_err(|reason| invalid("name", reason))?;

        let n = diesel::update(schools::table.filter(schools::id.eq(id)))
            .set((
                schools::name.eq(name.trim()),
                schools::class.eq(class),
            ))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "school" }),
            _ => Ok(()),
        }
    }

    /// Deletes a school. Fails with a foreign key violation while any
    /// student, coach, judge association, or building still references it.
    pub fn delete(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        let n = diesel::delete(schools::table.filter(schools::id.eq(id)))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "school" }),
            _ => Ok(()),
        }
    }
}
