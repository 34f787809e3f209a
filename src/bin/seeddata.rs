use std::fs::File;

use chrono::{Duration, Utc};
use clap::Parser;
use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use lectern::MIGRATIONS;
use lectern::events::{Event, SchoolClass, YearInSchool};
use lectern::participants::{Coach, Judge, Student};
use lectern::schema::schools;
use lectern::schools::School;
use lectern::tournaments::Tournament;
use lectern::tournaments::rounds::Round;
use lectern::tournaments::sections::Section;
use lectern::venues::{Building, Room};
use serde::Deserialize;

#[derive(Parser)]
pub struct Seed {
    database_url: Option<String>,
    #[clap(long, action)]
    schools: bool,
    #[clap(long, action)]
    students: bool,
    #[clap(long, action)]
    judges: bool,
    #[clap(long, action)]
    tournament: bool,
}

#[derive(Deserialize, Debug, Clone)]
struct SchoolRow {
    name: String,
    class: String,
}

#[derive(Deserialize, Debug, Clone)]
struct StudentRow {
    first_name: String,
    last_name: String,
    school: String,
    year: String,
    event: String,
}

#[derive(Deserialize, Debug, Clone)]
struct JudgeRow {
    first_name: String,
    last_name: String,
    school: Option<String>,
    event: String,
}

fn main() {
    tracing_subscriber::fmt().init();

    let args = Seed::parse();
    let db_url = if let Some(url) = args.database_url {
        url
    } else {
        std::env::var("DATABASE_URL").expect(
            "please either set `DATABASE_URL` or pass the `--database-url` flag",
        )
    };

    let mut conn = diesel::SqliteConnection::establish(&db_url).unwrap();

    conn.run_pending_migrations(MIGRATIONS).unwrap();

    if args.schools {
        let mut reader =
            csv::Reader::from_reader(File::open("src/bin/schools.csv").unwrap());
        let headers = reader.headers().unwrap().clone();

        for result in reader.records() {
            let record = result.unwrap();
            let row: SchoolRow = record.deserialize(Some(&headers)).unwrap();

            let class = SchoolClass::from_code(&row.class)
                .expect("unrecognised school class in schools.csv");

            if school_id_by_name(&mut conn, &row.name).is_none() {
                School::create(&row.name, class, &mut conn).unwrap();
            }
        }
    }

    if args.students {
        let mut reader = csv::Reader::from_reader(
            File::open("src/bin/students.csv").unwrap(),
        );
        let headers = reader.headers().unwrap().clone();

        for result in reader.records() {
            let record = result.unwrap();
            let row: StudentRow = record.deserialize(Some(&headers)).unwrap();

            let school_id = get_or_create_school(&mut conn, &row.school);
            let year = YearInSchool::from_code(&row.year)
                .expect("unrecognised year code in students.csv");
            let event = Event::from_code(&row.event)
                .expect("unrecognised event code in students.csv");

            Student::create(
                &school_id,
                &row.first_name,
                &row.last_name,
                year,
                event,
                None,
                &mut conn,
            )
            .unwrap();
        }
    }

    if args.judges {
        let mut reader =
            csv::Reader::from_reader(File::open("src/bin/judges.csv").unwrap());
        let headers = reader.headers().unwrap().clone();

        for result in reader.records() {
            let record = result.unwrap();
            let row: JudgeRow = record.deserialize(Some(&headers)).unwrap();

            let event = Event::from_code(&row.event)
                .expect("unrecognised event code in judges.csv");

            let judge = Judge::create(
                &row.first_name,
                &row.last_name,
                event,
                None,
                None,
                &mut conn,
            )
            .unwrap();

            if let Some(school) = row.school {
                let school_id = get_or_create_school(&mut conn, &school);
                judge.add_school(&school_id, &mut conn).unwrap();
            }
        }
    }

    if args.tournament {
        let host_id = get_or_create_school(&mut conn, "Lincoln High School");

        let director = Coach::create(
            &host_id,
            "Miriam",
            "Okafor",
            true,
            None,
            &mut conn,
        )
        .unwrap();

        let building = Building::create(
            &host_id,
            "1600 Summit Ave",
            "Minneapolis",
            "MN",
            "55403",
            &mut conn,
        )
        .unwrap();

        let rooms = [("Auditorium", 120), ("204", 30), ("117", 25)]
            .into_iter()
            .map(|(designation, capacity)| {
                Room::create(&building.id, designation, capacity, &mut conn)
                    .unwrap()
            })
            .collect::<Vec<_>>();

        Tournament::create(
            "Lincoln Winter Invitational",
            &host_id,
            &director.id,
            Some(&building.id),
            &mut conn,
        )
        .unwrap();

        let first_round = Utc::now().naive_utc() + Duration::days(30);

        for (i, event) in [
            Event::LincolnDouglas,
            Event::OriginalOratory,
            Event::PublicForum,
        ]
        .into_iter()
        .enumerate()
        {
            let round = Round::create(
                event,
                first_round + Duration::hours(2 * i as i64),
                &mut conn,
            )
            .unwrap();

            let section = Section::create(&round.id, &mut conn).unwrap();
            section
                .add_room(&rooms[i % rooms.len()].id, &mut conn)
                .unwrap();
        }
    }
}

fn school_id_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Option<String> {
    schools::table
        .filter(schools::name.eq(name))
        .select(schools::id)
        .first::<String>(conn)
        .optional()
        .unwrap()
}

fn get_or_create_school(conn: &mut SqliteConnection, name: &str) -> String {
    match school_id_by_name(conn, name) {
        Some(id) => id,
        None => School::create(name, SchoolClass::FourA, conn).unwrap().id,
    }
}
