//! Sections: the groupings actually contested. A section holds a set of
//! competing students, a judging panel, and a room, scheduled within one
//! round. All three memberships are plain sets; adding an existing member
//! is a no-op and edits to one membership never touch the others or the
//! round.

use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{RegistryError, RegistryResult, invalid},
    events::event_name,
    participants::{Judge, Student},
    schema::{
        section_judges, section_rooms, section_students, sections,
    },
    tournaments::rounds::Round,
    venues::Room,
};

#[derive(
    Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = sections)]
#[diesel(check_for_backend(Sqlite))]
pub struct Section {
    pub id: String,
    pub round_id: String,
}

impl Section {
    pub fn create(
        round_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Section> {
        let section = Section {
            id: Uuid::now_v7().to_string(),
            round_id: round_id.to_string(),
        };

        diesel::insert_into(sections::table)
            .values(&section)
            .execute(conn)?;

        tracing::debug!(section = %section.id, round = round_id, "created section");

        Ok(section)
    }

    pub fn fetch(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Section> {
        sections::table
            .filter(sections::id.eq(id))
            .first::<Section>(conn)
            .optional()?
            .ok_or(RegistryError::NotFound { entity: "section" })
    }

    pub fn of_round(
        round_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Vec<Section>> {
        Ok(sections::table
            .filter(sections::round_id.eq(round_id))
            .load::<Section>(conn)?)
    }

    /// Deletes a section along with its room/student/judge memberships.
    pub fn delete(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        let n = diesel::delete(sections::table.filter(sections::id.eq(id)))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "section" }),
            _ => Ok(()),
        }
    }

    pub fn add_room(
        &self,
        room_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        diesel::insert_into(section_rooms::table)
            .values((
                section_rooms::id.eq(Uuid::now_v7().to_string()),
                section_rooms::section_id.eq(&self.id),
                section_rooms::room_id.eq(room_id),
            ))
            .on_conflict_do_nothing()
            .execute(conn)?;

        Ok(())
    }

    pub fn remove_room(
        &self,
        room_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        diesel::delete(
            section_rooms::table.filter(
                section_rooms::section_id
                    .eq(&self.id)
                    .and(section_rooms::room_id.eq(room_id)),
            ),
        )
        .execute(conn)?;

        Ok(())
    }

    pub fn rooms(
        &self,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Vec<Room>> {
        Ok(section_rooms::table
            .inner_join(crate::schema::rooms::table)
            .filter(section_rooms::section_id.eq(&self.id))
            .select(Room::as_select())
            .load::<Room>(conn)?)
    }

    /// Places a student into this section. The student must compete in the
    /// event of the section's round.
    pub fn add_student(
        &self,
        student_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        let round = Round::fetch(&self.round_id, conn)?;
        let student = Student::fetch(student_id, conn)?;

        if student.event != round.event {
            return Err(invalid(
                "event",
                format!(
                    "student competes in {} but the round is {}",
                    event_name(student.event),
                    event_name(round.event)
                ),
            ));
        }

        diesel::insert_into(section_students::table)
            .values((
                section_students::id.eq(Uuid::now_v7().to_string()),
                section_students::section_id.eq(&self.id),
                section_students::student_id.eq(student_id),
            ))
            .on_conflict_do_nothing()
            .execute(conn)?;

        Ok(())
    }

    pub fn remove_student(
        &self,
        student_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        diesel::delete(
            section_students::table.filter(
                section_students::section_id
                    .eq(&self.id)
                    .and(section_students::student_id.eq(student_id)),
            ),
        )
        .execute(conn)?;

        Ok(())
    }

    pub fn students(
        &self,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Vec<Student>> {
        Ok(section_students::table
            .inner_join(crate::schema::students::table)
            .filter(section_students::section_id.eq(&self.id))
            .select(Student::as_select())
            .load::<Student>(conn)?)
    }

    pub fn add_judge(
        &self,
        judge_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        diesel::insert_into(section_judges::table)
            .values((
                section_judges::id.eq(Uuid::now_v7().to_string()),
                section_judges::section_id.eq(&self.id),
                section_judges::judge_id.eq(judge_id),
            ))
            .on_conflict_do_nothing()
            .execute(conn)?;

        Ok(())
    }

    pub fn remove_judge(
        &self,
        judge_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        diesel::delete(
            section_judges::table.filter(
                section_judges::section_id
                    .eq(&self.id)
                    .and(section_judges::judge_id.eq(judge_id)),
            ),
        )
        .execute(conn)?;

        Ok(())
    }

    pub fn judges(
        &self,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Vec<Judge>> {
        Ok(section_judges::table
            .inner_join(crate::schema::judges::table)
            .filter(section_judges::section_id.eq(&self.id))
            .select(Judge::as_select())
            .load::<Judge>(conn)?)
    }
}
