//! Registry workload. Runs the registration and section-assignment
//! operations against an in-memory database and checks the constraint
//! behaviour the schema is supposed to provide.

use chrono::NaiveDate;

use crate::{
    error::RegistryError,
    events::{Event, SchoolClass, YearInSchool},
    participants::{Coach, Judge, SchoolRoster, Student, display_name},
    schools::School,
    test::test_conn,
    tournaments::{Tournament, rounds::Round, sections::Section},
    venues::{Building, Room},
};

fn scheduled_at(hour: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, 7)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

#[test]
fn full_registration_workflow() {
    let mut conn = test_conn();

    let school =
        School::create("Lincoln High School", SchoolClass::FourA, &mut conn)
            .unwrap();
    let visiting =
        School::create("Washburn High School", SchoolClass::SixA, &mut conn)
            .unwrap();

    let director = Coach::create(
        &school.id,
        "Miriam",
        "Okafor",
        true,
        Some("acct-director"),
        &mut conn,
    )
    .unwrap();

    let student = Student::create(
        &school.id,
        "Priya",
        "Natarajan",
        YearInSchool::Junior,
        Event::LincolnDouglas,
        None,
        &mut conn,
    )
    .unwrap();
    assert!(student.is_upperclass());
    assert!(!student.is_underclassman());
    assert_eq!(
        display_name(&student.first_name, &student.last_name),
        "Priya Natarajan"
    );

    // a coach who also judges
    let judge = Judge::create(
        "Miriam",
        "Okafor",
        Event::LincolnDouglas,
        Some(&director.id),
        None,
        &mut conn,
    )
    .unwrap();
    judge.add_school(&school.id, &mut conn).unwrap();
    judge.add_school(&visiting.id, &mut conn).unwrap();

    let building = Building::create(
        &school.id,
        "1600 Summit Ave",
        "Minneapolis",
        "MN",
        "55403",
        &mut conn,
    )
    .unwrap();
    let room =
        Room::create(&building.id, "Auditorium", 120, &mut conn).unwrap();
    assert_eq!(building.rooms(&mut conn).unwrap().len(), 1);

    let tournament = Tournament::create(
        "Lincoln Winter Invitational",
        &school.id,
        &director.id,
        Some(&building.id),
        &mut conn,
    )
    .unwrap();
    assert_eq!(
        Tournament::fetch(&tournament.id, &mut conn).unwrap().name,
        "Lincoln Winter Invitational"
    );

    let round =
        Round::create(Event::LincolnDouglas, scheduled_at(9), &mut conn)
            .unwrap();
    let section = Section::create(&round.id, &mut conn).unwrap();

    section.add_room(&room.id, &mut conn).unwrap();
    section.add_student(&student.id, &mut conn).unwrap();
    section.add_judge(&judge.id, &mut conn).unwrap();

    assert_eq!(section.rooms(&mut conn).unwrap().len(), 1);
    assert_eq!(section.students(&mut conn).unwrap().len(), 1);
    assert_eq!(section.judges(&mut conn).unwrap().len(), 1);

    let roster = SchoolRoster::load(&school.id, &mut conn).unwrap();
    assert_eq!(roster.coaches.len(), 1);
    assert_eq!(roster.students.len(), 1);
    assert_eq!(roster.judges.len(), 1);
    assert_eq!(
        roster.students_by_event()[&Event::LincolnDouglas].len(),
        1
    );
}

#[test]
fn student_requires_existing_school() {
    let mut conn = test_conn();

    let err = Student::create(
        "no-such-school",
        "Dana",
        "Whitfield",
        YearInSchool::Freshman,
        Event::Prose,
        None,
        &mut conn,
    )
    .unwrap_err();

    assert!(matches!(err, RegistryError::ForeignKeyViolation { .. }));
}

#[test]
fn duplicate_account_link_rejected() {
    let mut conn = test_conn();

    let school =
        School::create("Central High School", SchoolClass::TwoA, &mut conn)
            .unwrap();

    Student::create(
        &school.id,
        "Ines",
        "Marquez",
        YearInSchool::Sophomore,
        Event::Poetry,
        Some("acct-1"),
        &mut conn,
    )
    .unwrap();

    let err = Student::create(
        &school.id,
        "Theo",
        "Brandt",
        YearInSchool::Senior,
        Event::Poetry,
        Some("acct-1"),
        &mut conn,
    )
    .unwrap_err();

    assert!(matches!(err, RegistryError::UniqueViolation { .. }));

    // relinking an existing student to a taken account fails the same way
    let third = Student::create(
        &school.id,
        "Noor",
        "Haddad",
        YearInSchool::Junior,
        Event::Poetry,
        None,
        &mut conn,
    )
    .unwrap();
    let err =
        Student::link_account(&third.id, Some("acct-1"), &mut conn)
            .unwrap_err();
    assert!(matches!(err, RegistryError::UniqueViolation { .. }));
}

#[test]
fn judge_school_membership_is_a_set() {
    let mut conn = test_conn();

    let school =
        School::create("Roosevelt High School", SchoolClass::OneA, &mut conn)
            .unwrap();
    let judge = Judge::create(
        "Sam",
        "Ellison",
        Event::PublicForum,
        None,
        None,
        &mut conn,
    )
    .unwrap();

    assert!(judge.schools(&mut conn).unwrap().is_empty());

    judge.add_school(&school.id, &mut conn).unwrap();
    judge.add_school(&school.id, &mut conn).unwrap();
    assert_eq!(judge.schools(&mut conn).unwrap().len(), 1);

    judge.remove_school(&school.id, &mut conn).unwrap();
    assert!(judge.schools(&mut conn).unwrap().is_empty());
}

#[test]
fn one_judge_record_per_coach() {
    let mut conn = test_conn();

    let school =
        School::create("Edison High School", SchoolClass::ThreeA, &mut conn)
            .unwrap();
    let coach =
        Coach::create(&school.id, "Ray", "Ortiz", false, None, &mut conn)
            .unwrap();

    Judge::create(
        "Ray",
        "Ortiz",
        Event::CrossExamination,
        Some(&coach.id),
        None,
        &mut conn,
    )
    .unwrap();

    let err = Judge::create(
        "Ray",
        "Ortiz",
        Event::PublicForum,
        Some(&coach.id),
        None,
        &mut conn,
    )
    .unwrap_err();

    assert!(matches!(err, RegistryError::UniqueViolation { .. }));
}

#[test]
fn one_building_per_school() {
    let mut conn = test_conn();

    let school =
        School::create("Southwest High School", SchoolClass::FiveA, &mut conn)
            .unwrap();

    Building::create(
        &school.id,
        "3414 W 47th St",
        "Minneapolis",
        "MN",
        "55410",
        &mut conn,
    )
    .unwrap();

    let err = Building::create(
        &school.id,
        "100 Other St",
        "Minneapolis",
        "MN",
        "55410",
        &mut conn,
    )
    .unwrap_err();

    assert!(matches!(err, RegistryError::UniqueViolation { .. }));
}

#[test]
fn room_capacity_must_be_positive() {
    let mut conn = test_conn();

    let school =
        School::create("North High School", SchoolClass::TwoA, &mut conn)
            .unwrap();
    let building = Building::create(
        &school.id,
        "1500 James Ave N",
        "Minneapolis",
        "MN",
        "55411",
        &mut conn,
    )
    .unwrap();

    let err =
        Room::create(&building.id, "204", 0, &mut conn).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Invalid { field: "capacity", .. }
    ));
}

#[test]
fn section_memberships_are_independent() {
    let mut conn = test_conn();

    let school =
        School::create("Highland Park", SchoolClass::FourA, &mut conn)
            .unwrap();
    let building = Building::create(
        &school.id,
        "1015 Snelling Ave S",
        "St Paul",
        "MN",
        "55116",
        &mut conn,
    )
    .unwrap();
    let room = Room::create(&building.id, "204", 30, &mut conn).unwrap();

    let student = Student::create(
        &school.id,
        "Wes",
        "Calloway",
        YearInSchool::Freshman,
        Event::Monologue,
        None,
        &mut conn,
    )
    .unwrap();
    let judge =
        Judge::create("Ada", "Lindqvist", Event::Monologue, None, None, &mut conn)
            .unwrap();

    let round =
        Round::create(Event::Monologue, scheduled_at(10), &mut conn).unwrap();
    let section = Section::create(&round.id, &mut conn).unwrap();

    section.add_room(&room.id, &mut conn).unwrap();
    section.add_student(&student.id, &mut conn).unwrap();
    section.add_judge(&judge.id, &mut conn).unwrap();

    // removing one membership leaves the others and the round untouched
    section.remove_room(&room.id, &mut conn).unwrap();
    assert!(section.rooms(&mut conn).unwrap().is_empty());
    assert_eq!(section.students(&mut conn).unwrap().len(), 1);
    assert_eq!(section.judges(&mut conn).unwrap().len(), 1);

    let refetched = Section::fetch(&section.id, &mut conn).unwrap();
    assert_eq!(refetched.round_id, round.id);

    section.remove_student(&student.id, &mut conn).unwrap();
    section.remove_judge(&judge.id, &mut conn).unwrap();
    assert!(section.students(&mut conn).unwrap().is_empty());
    assert!(section.judges(&mut conn).unwrap().is_empty());
}

#[test]
fn student_event_must_match_round_event() {
    let mut conn = test_conn();

    let school =
        School::create("Como Park", SchoolClass::ThreeA, &mut conn).unwrap();
    let student = Student::create(
        &school.id,
        "June",
        "Abara",
        YearInSchool::Sophomore,
        Event::LincolnDouglas,
        None,
        &mut conn,
    )
    .unwrap();

    let round = Round::create(Event::OriginalOratory, scheduled_at(11), &mut conn)
        .unwrap();
    let section = Section::create(&round.id, &mut conn).unwrap();

    let err = section.add_student(&student.id, &mut conn).unwrap_err();
    assert!(matches!(err, RegistryError::Invalid { field: "event", .. }));
    assert!(section.students(&mut conn).unwrap().is_empty());
}

#[test]
fn school_delete_is_restricted() {
    let mut conn = test_conn();

    let school =
        School::create("Harding High School", SchoolClass::SixA, &mut conn)
            .unwrap();
    let student = Student::create(
        &school.id,
        "Mai",
        "Vang",
        YearInSchool::Senior,
        Event::DramaticInterp,
        None,
        &mut conn,
    )
    .unwrap();

    let err = School::delete(&school.id, &mut conn).unwrap_err();
    assert!(matches!(err, RegistryError::ForeignKeyViolation { .. }));

    Student::delete(&student.id, &mut conn).unwrap();
    School::delete(&school.id, &mut conn).unwrap();

    assert!(matches!(
        School::fetch(&school.id, &mut conn).unwrap_err(),
        RegistryError::NotFound { entity: "school" }
    ));
}

#[test]
fn deleting_a_section_cascades_its_memberships() {
    let mut conn = test_conn();

    let school =
        School::create("Kennedy High School", SchoolClass::FiveA, &mut conn)
            .unwrap();
    let student = Student::create(
        &school.id,
        "Omar",
        "Diallo",
        YearInSchool::Junior,
        Event::ForeignExtemp,
        None,
        &mut conn,
    )
    .unwrap();

    let round =
        Round::create(Event::ForeignExtemp, scheduled_at(13), &mut conn)
            .unwrap();
    let section = Section::create(&round.id, &mut conn).unwrap();
    section.add_student(&student.id, &mut conn).unwrap();

    Section::delete(&section.id, &mut conn).unwrap();

    // the student survives; the membership row does not
    Student::fetch(&student.id, &mut conn).unwrap();
    assert!(Section::of_round(&round.id, &mut conn).unwrap().is_empty());

    // but a round with sections cannot be deleted
    let other = Section::create(&round.id, &mut conn).unwrap();
    let err = Round::delete(&round.id, &mut conn).unwrap_err();
    assert!(matches!(err, RegistryError::ForeignKeyViolation { .. }));
    Section::delete(&other.id, &mut conn).unwrap();
    Round::delete(&round.id, &mut conn).unwrap();
}
