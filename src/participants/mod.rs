//! The people registered for a tournament season: students (competitors),
//! coaches, and judges, each belonging to (or associated with) schools.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{RegistryError, RegistryResult, invalid},
    events::{Event, YearInSchool},
    schema::{coaches, judge_schools, judges, schools, students},
    schools::School,
    validation::is_valid_name,
};

#[derive(
    Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(Sqlite))]
pub struct Student {
    pub id: String,
    pub school_id: String,
    pub first_name: String,
    pub last_name: String,
    pub year_in_school: YearInSchool,
    pub event: Event,
    pub account_id: Option<String>,
    pub registered_at: NaiveDateTime,
}

impl Student {
    pub fn create(
        school_id: &str,
        first_name: &str,
        last_name: &str,
        year_in_school: YearInSchool,
        event: Event,
        account_id: Option<&str>,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Student> {
        is_valid_name(first_name)
            .map_err(|reason| invalid("first_name", reason))?;
        is_valid_name(last_name)
            .map_err(|reason| invalid("last_name", reason))?;

        let student = Student {
            id: Uuid::now_v7().to_string(),
            school_id: school_id.to_string(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            year_in_school,
            event,
            account_id: account_id.map(str::to_string),
            registered_at: chrono::Utc::now().naive_utc(),
        };

        diesel::insert_into(students::table)
            .values(&student)
            .execute(conn)?;

        tracing::debug!(student = %student.id, event = event.code(), "registered student");

        Ok(student)
    }

    pub fn fetch(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Student> {
        students::table
            .filter(students::id.eq(id))
            .first::<Student>(conn)
            .optional()?
            .ok_or(RegistryError::NotFound { entity: "student" })
    }

    pub fn update(
        id: &str,
        first_name: &str,
        last_name: &str,
        year_in_school: YearInSchool,
        event: Event,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        is_valid_name(first_name)
            .map_err(|reason| invalid("first_name", reason))?;
        is_valid_name(last_name)
            .map_err(|reason| invalid("last_name", reason))?;

        let n = diesel::update(students::table.filter(students::id.eq(id)))
            .set((
                students::first_name.eq(first_name.trim()),
                students::last_name.eq(last_name.trim()),
                students::year_in_school.eq(year_in_school),
                students::event.eq(event),
            ))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "student" }),
            _ => Ok(()),
        }
    }

    /// Attaches (or, with `None`, detaches) the external user account for
    /// this student. At most one student may reference a given account.
    pub fn link_account(
        id: &str,
        account_id: Option<&str>,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        let n = diesel::update(students::table.filter(students::id.eq(id)))
            .set(students::account_id.eq(account_id))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "student" }),
            _ => Ok(()),
        }
    }

    pub fn delete(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        let n = diesel::delete(students::table.filter(students::id.eq(id)))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "student" }),
            _ => Ok(()),
        }
    }

    pub fn is_underclassman(&self) -> bool {
        self.year_in_school.is_underclassman()
    }

    pub fn is_upperclass(&self) -> bool {
        self.year_in_school.is_upperclass()
    }
}

#[derive(
    Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = coaches)]
#[diesel(check_for_backend(Sqlite))]
pub struct Coach {
    pub id: String,
    pub school_id: String,
    pub first_name: String,
    pub last_name: String,
    pub is_director: bool,
    pub account_id: Option<String>,
    pub registered_at: NaiveDateTime,
}

impl Coach {
    pub fn create(
        school_id: &str,
        first_name: &str,
        last_name: &str,
        is_director: bool,
        account_id: Option<&str>,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Coach> {
        is_valid_name(first_name)
            .map_err(|reason| invalid("first_name", reason))?;
        is_valid_name(last_name)
            .map_err(|reason| invalid("last_name", reason))?;

        let coach = Coach {
            id: Uuid::now_v7().to_string(),
            school_id: school_id.to_string(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            is_director,
            account_id: account_id.map(str::to_string),
            registered_at: chrono::Utc::now().naive_utc(),
        };

        diesel::insert_into(coaches::table)
            .values(&coach)
            .execute(conn)?;

        tracing::debug!(coach = %coach.id, "registered coach");

        Ok(coach)
    }

    pub fn fetch(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Coach> {
        coaches::table
            .filter(coaches::id.eq(id))
            .first::<Coach>(conn)
            .optional()?
            .ok_or(RegistryError::NotFound { entity: "coach" })
    }

    pub fn update(
        id: &str,
        first_name: &str,
        last_name: &str,
        is_director: bool,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        is_valid_name(first_name)
            .map_err(|reason| invalid("first_name", reason))?;
        is_valid_name(last_name)
            .map_err(|reason| invalid("last_name", reason))?;

        let n = diesel::update(coaches::table.filter(coaches::id.eq(id)))
            .set((
                coaches::first_name.eq(first_name.trim()),
                coaches::last_name.eq(last_name.trim()),
                coaches::is_director.eq(is_director),
            ))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "coach" }),
            _ => Ok(()),
        }
    }

    pub fn link_account(
        id: &str,
        account_id: Option<&str>,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        let n = diesel::update(coaches::table.filter(coaches::id.eq(id)))
            .set(coaches::account_id.eq(account_id))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "coach" }),
            _ => Ok(()),
        }
    }

    pub fn delete(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        let n = diesel::delete(coaches::table.filter(coaches::id.eq(id)))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "coach" }),
            _ => Ok(()),
        }
    }
}

#[derive(
    Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = judges)]
#[diesel(check_for_backend(Sqlite))]
pub struct Judge {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub event: Event,
    pub coach_id: Option<String>,
    pub account_id: Option<String>,
}

impl Judge {
    pub fn create(
        first_name: &str,
        last_name: &str,
        event: Event,
        coach_id: Option<&str>,
        account_id: Option<&str>,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Judge> {
        is_valid_name(first_name)
            .map_err(|reason| invalid("first_name", reason))?;
        is_valid_name(last_name)
            .map_err(|reason| invalid("last_name", reason))?;

        let judge = Judge {
            id: Uuid::now_v7().to_string(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            event,
            coach_id: coach_id.map(str::to_string),
            account_id: account_id.map(str::to_string),
        };

        diesel::insert_into(judges::table)
            .values(&judge)
            .execute(conn)?;

        tracing::debug!(judge = %judge.id, event = event.code(), "registered judge");

        Ok(judge)
    }

    pub fn fetch(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Judge> {
        judges::table
            .filter(judges::id.eq(id))
            .first::<Judge>(conn)
            .optional()?
            .ok_or(RegistryError::NotFound { entity: "judge" })
    }

    pub fn update(
        id: &str,
        first_name: &str,
        last_name: &str,
        event: Event,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        is_valid_name(first_name)
            .map_err(|reason| invalid("first_name", reason))?;
        is_valid_name(last_name)
            .map_err(|reason| invalid("last_name", reason))?;

        let n = diesel::update(judges::table.filter(judges::id.eq(id)))
            .set((
                judges::first_name.eq(first_name.trim()),
                judges::last_name.eq(last_name.trim()),
                judges::event.eq(event),
            ))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "judge" }),
            _ => Ok(()),
        }
    }

    pub fn link_account(
        id: &str,
        account_id: Option<&str>,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        let n = diesel::update(judges::table.filter(judges::id.eq(id)))
            .set(judges::account_id.eq(account_id))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "judge" }),
            _ => Ok(()),
        }
    }

    pub fn delete(
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        let n = diesel::delete(judges::table.filter(judges::id.eq(id)))
            .execute(conn)?;

        match n {
            0 => Err(RegistryError::NotFound { entity: "judge" }),
            _ => Ok(()),
        }
    }

    /// Associates this judge with a school. Adding a school that is already
    /// associated leaves the membership unchanged.
    pub fn add_school(
        &self,
        school_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        diesel::insert_into(judge_schools::table)
            .values((
                judge_schools::id.eq(Uuid::now_v7().to_string()),
                judge_schools::judge_id.eq(&self.id),
                judge_schools::school_id.eq(school_id),
            ))
            .on_conflict_do_nothing()
            .execute(conn)?;

        Ok(())
    }

    pub fn remove_school(
        &self,
        school_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<()> {
        diesel::delete(
            judge_schools::table.filter(
                judge_schools::judge_id
                    .eq(&self.id)
                    .and(judge_schools::school_id.eq(school_id)),
            ),
        )
        .execute(conn)?;

        Ok(())
    }

    pub fn schools(
        &self,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<Vec<School>> {
        Ok(judge_schools::table
            .inner_join(schools::table)
            .filter(judge_schools::judge_id.eq(&self.id))
            .order_by(schools::name.asc())
            .select(School::as_select())
            .load::<School>(conn)?)
    }
}

/// Formats a participant's name for display.
pub fn display_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}")
}

/// Everyone registered under one school, keyed by id.
pub struct SchoolRoster {
    pub coaches: IndexMap<String, Coach>,
    pub students: IndexMap<String, Student>,
    pub judges: IndexMap<String, Judge>,
}

impl SchoolRoster {
    pub fn load(
        school_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> RegistryResult<SchoolRoster> {
        let coaches = coaches::table
            .filter(coaches::school_id.eq(school_id))
            .order_by(coaches::last_name.asc())
            .load::<Coach>(conn)?
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();

        let students = students::table
            .filter(students::school_id.eq(school_id))
            .order_by(students::last_name.asc())
            .load::<Student>(conn)?
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();

        let judges = judge_schools::table
            .inner_join(judges::table)
            .filter(judge_schools::school_id.eq(school_id))
            .order_by(judges::last_name.asc())
            .select(Judge::as_select())
            .load::<Judge>(conn)?
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();

        Ok(SchoolRoster {
            coaches,
            students,
            judges,
        })
    }

    pub fn students_by_event(&self) -> HashMap<Event, Vec<&Student>> {
        self.students
            .values()
            .map(|student| (student.event, student))
            .into_group_map()
    }
}
