use chrono::NaiveDateTime;
use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{RegistryError, RegistryResult},
    events::Event,
    schema::rounds,
};

/// One scheduled timeslot of competition for a given event. Sections hang
/// off rounds.
#[derive(
    Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = rounds)]
#[diesel(check_for_backend(Sqlite))]
pub struct Round {
    pub id: String,
    pub event: Event,
    pub scheduled_at: NaiveDateTime,
}

impl Round {
    pub fn create(
        event: Event,
        scheduled_at: NaiveDateTime,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Round> {
        let round = Round {
            id: Uuid::now_v7().to_string(),
            event,
            scheduled_at,
        };

        diesel::insert_into(rounds::table)
            .values(&round)
            .execute(conn)?;

        tracing::debug!(round = %round.id, event = event.code(), "created round");

        Ok(round)
    }

    pub fn fetch(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Round> {
        rounds::table
            .filter(rounds::id.eq(id))
            .first::<Round>(conn)
            .optional()?
            .ok_or(RegistryError::NotFound { entity: "round" })
    }

    /// All rounds for an event, soonest first.
    pub fn of_event(
        event: Event,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Vec<Round>> {
        Ok(rounds::table
            .filter(rounds::event.eq(event))
            .order_by(rounds::scheduled_at.asc())
            .load::<Round>(conn)?)
    }

    pub fn reschedule(
        id: &str,
        scheduled_at: NaiveDateTime,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        let n = diesel::update(rounds::table.filter(rounds::id.eq(id)))
            .set(rounds::scheduled_at.eq(scheduled_at))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "round" }),
            _ => Ok(()),
        }
    }

    pub fn delete(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        let n = diesel::delete(rounds::table.filter(rounds::id.eq(id)))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "round" }),
            _ => Ok(()),
        }
    }
}
