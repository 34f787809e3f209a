//! The tournament venue: the hosting school's building and the rooms in
//! which sections run.

use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{RegistryError, RegistryResult, invalid},
    schema::{buildings, rooms},
    validation::{is_valid_name, is_valid_zip},
};

#[derive(
    Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = buildings)]
#[diesel(check_for_backend(Sqlite))]
pub struct Building {
    pub id: String,
    pub school_id: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Building {
    /// Registers a school's venue. Each school has at most one building;
    /// a second insert for the same school is a uniqueness violation.
    pub fn create(
        school_id: &str,
        street: &str,
        city: &str,
        state: &str,
        zip: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Building> {
        is_valid_name(street).map_err(|reason| invalid("street", reason))?;
        is_valid_name(city).map_err(|reason| invalid("city", reason))?;
        is_valid_zip(zip).map_err(|reason| invalid("zip", reason))?;

        let building = Building {
            id: Uuid::now_v7().to_string(),
            school_id: school_id.to_string(),
            street: street.trim().to_string(),
            city: city.trim().to_string(),
            state: state.trim().to_string(),
            zip: zip.to_string(),
        };

        diesel::insert_into(buildings::table)
            .values(&building)
            .execute(conn)?;

        tracing::debug!(building = %building.id, "registered building");

        Ok(building)
    }

    pub fn fetch(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Building> {
        buildings::table
            .filter(buildings::id.eq(id))
            .first::<Building>(conn)
            .optional()?
            .ok_or(RegistryError::NotFound { entity: "building" })
    }

    pub fn of_school(
        school_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Option<Building>> {
        Ok(buildings::table
            .filter(buildings::school_id.eq(school_id))
            .first::<Building>(conn)
            .optional()?)
    }

    pub fn update(
        id: &str,
        street: &str,
        city: &str,
        state: &str,
        zip: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        is_valid_name(street).map_err(|reason| invalid("street", reason))?;
        is_valid_name(city).map_err(|reason| invalid("city", reason))?;
        is_valid_zip(zip).map_err(|reason| invalid("zip", reason))?;

        let n = diesel::update(buildings::table.filter(buildings::id.eq(id)))
            .set((
                buildings::street.eq(street.trim()),
                buildings::city.eq(city.trim()),
                buildings::state.eq(state.trim()),
                buildings::zip.eq(zip),
            ))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "building" }),
            _ => Ok(()),
        }
    }

    pub fn delete(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        let n = diesel::delete(buildings::table.filter(buildings::id.eq(id)))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "building" }),
            _ => Ok(()),
        }
    }

    pub fn rooms(
        &self,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Vec<Room>> {
        Ok(rooms::table
            .filter(rooms::building_id.eq(&self.id))
            .order_by(rooms::designation.asc())
            .load::<Room>(conn)?)
    }
}

#[derive(
    Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(Sqlite))]
pub struct Room {
    pub id: String,
    pub building_id: String,
    pub designation: String,
    pub capacity: i64,
}

impl Room {
    pub fn create(
        building_id: &str,
        designation: &str,
        capacity: i64,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Room> {
        is_valid_name(designation)
            .map_err(|reason| invalid("designation", reason))?;
        if capacity <= 0 {
            return Err(invalid("capacity", "must be positive"));
        }

        let room = Room {
            id: Uuid::now_v7().to_string(),
            building_id: building_id.to_string(),
            designation: designation.trim().to_string(),
            capacity,
        };

        diesel::insert_into(rooms::table).values(&room).execute(conn)?;

        tracing::debug!(room = %room.id, "registered room");

        Ok(room)
    }

    pub fn fetch(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Room> {
        rooms::table
            .filter(rooms::id.eq(id))
            .first::<Room>(conn)
            .optional()?
            .ok_or(RegistryError::NotFound { entity: "room" })
    }

    pub fn update(
        id: &str,
        designation: &str,
        capacity: i64,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        is_valid_name(designation)
            .map_err(|reason| invalid("designation", reason))?;
        if capacity <= 0 {
            return Err(invalid("capacity", "must be positive"));
        }

        let n = diesel::update(rooms::table.filter(rooms::id.eq(id)))
            .set((
                rooms::designation.eq(designation.trim()),
                rooms::capacity.eq(capacity),
            ))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "room" }),
            _ => Ok(()),
        }
    }

    pub fn delete(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        let n = diesel::delete(rooms::table.filter(rooms::id.eq(id)))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "room" }),
            _ => Ok(()),
        }
    }
}
