//! The closed sets of enumerated values used across the registry: the
//! competitive events, the four high-school year levels, and the six
//! competition-class tiers. Each is stored in the database as a short text
//! code.

use diesel::{
    backend::Backend,
    deserialize::{self, FromSql, FromSqlRow},
    expression::AsExpression,
    serialize::{self, IsNull, Output, ToSql},
    sql_types::Text,
    sqlite::Sqlite,
};
use serde::{Deserialize, Serialize};

#[derive(
    AsExpression,
    FromSqlRow,
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
)]
#[diesel(sql_type = Text)]
pub enum Event {
    OriginalOratory,
    StandardOratory,
    Prose,
    DramaticInterp,
    HumorousInterp,
    ForeignExtemp,
    DomesticExtemp,
    Monologue,
    LincolnDouglas,
    Poetry,
    CrossExamination,
    HumorousDuet,
    DramaticDuet,
    PublicForum,
}

impl Event {
    pub const ALL: [Event; 14] = [
        Event::OriginalOratory,
        Event::StandardOratory,
        Event::Prose,
        Event::DramaticInterp,
        Event::HumorousInterp,
        Event::ForeignExtemp,
        Event::DomesticExtemp,
        Event::Monologue,
        Event::LincolnDouglas,
        Event::Poetry,
        Event::CrossExamination,
        Event::HumorousDuet,
        Event::DramaticDuet,
        Event::PublicForum,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Event::OriginalOratory => "OO",
            Event::StandardOratory => "SO",
            Event::Prose => "PR",
            Event::DramaticInterp => "DI",
            Event::HumorousInterp => "HI",
            Event::ForeignExtemp => "FX",
            Event::DomesticExtemp => "DX",
            Event::Monologue => "MO",
            Event::LincolnDouglas => "LD",
            Event::Poetry => "PO",
            Event::CrossExamination => "CX",
            Event::HumorousDuet => "HD",
            Event::DramaticDuet => "DD",
            Event::PublicForum => "PF",
        }
    }

    pub fn from_code(code: &str) -> Option<Event> {
        Event::ALL.into_iter().find(|event| event.code() == code)
    }
}

impl ToSql<Text, Sqlite> for Event {
    fn to_sql<'b>(
        &'b self,
        out: &mut Output<'b, '_, Sqlite>,
    ) -> serialize::Result {
        out.set_value(self.code());
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Sqlite> for Event {
    fn from_sql(
        value: <Sqlite as Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let code = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        Event::from_code(&code)
            .ok_or_else(|| format!("unrecognised event code `{code}`").into())
    }
}

#[derive(
    AsExpression,
    FromSqlRow,
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
)]
#[diesel(sql_type = Text)]
pub enum YearInSchool {
    Freshman,
    Sophomore,
    Junior,
    Senior,
}

impl YearInSchool {
    pub const ALL: [YearInSchool; 4] = [
        YearInSchool::Freshman,
        YearInSchool::Sophomore,
        YearInSchool::Junior,
        YearInSchool::Senior,
    ];

    pub fn code(self) -> &'static str {
        match self {
            YearInSchool::Freshman => "FR",
            YearInSchool::Sophomore => "SO",
            YearInSchool::Junior => "JR",
            YearInSchool::Senior => "SR",
        }
    }

    pub fn from_code(code: &str) -> Option<YearInSchool> {
        YearInSchool::ALL.into_iter().find(|year| year.code() == code)
    }

    pub fn is_underclassman(self) -> bool {
        matches!(self, YearInSchool::Freshman | YearInSchool::Sophomore)
    }

    pub fn is_upperclass(self) -> bool {
        matches!(self, YearInSchool::Junior | YearInSchool::Senior)
    }
}

impl ToSql<Text, Sqlite> for YearInSchool {
    fn to_sql<'b>(
        &'b self,
        out: &mut Output<'b, '_, Sqlite>,
    ) -> serialize::Result {
        out.set_value(self.code());
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Sqlite> for YearInSchool {
    fn from_sql(
        value: <Sqlite as Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let code = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        YearInSchool::from_code(&code)
            .ok_or_else(|| format!("unrecognised year code `{code}`").into())
    }
}

/// Competition class of a school, by enrolment size.
#[derive(
    AsExpression,
    FromSqlRow,
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
)]
#[diesel(sql_type = Text)]
pub enum SchoolClass {
    OneA,
    TwoA,
    ThreeA,
    FourA,
    FiveA,
    SixA,
}

impl SchoolClass {
    pub const ALL: [SchoolClass; 6] = [
        SchoolClass::OneA,
        SchoolClass::TwoA,
        SchoolClass::ThreeA,
        SchoolClass::FourA,
        SchoolClass::FiveA,
        SchoolClass::SixA,
    ];

    pub fn code(self) -> &'static str {
        match self {
            SchoolClass::OneA => "1A",
            SchoolClass::TwoA => "2A",
            SchoolClass::ThreeA => "3A",
            SchoolClass::FourA => "4A",
            SchoolClass::FiveA => "5A",
            SchoolClass::SixA => "6A",
        }
    }

    pub fn from_code(code: &str) -> Option<SchoolClass> {
        SchoolClass::ALL.into_iter().find(|class| class.code() == code)
    }
}

impl ToSql<Text, Sqlite> for SchoolClass {
    fn to_sql<'b>(
        &'b self,
        out: &mut Output<'b, '_, Sqlite>,
    ) -> serialize::Result {
        out.set_value(self.code());
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Sqlite> for SchoolClass {
    fn from_sql(
        value: <Sqlite as Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let code = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        SchoolClass::from_code(&code)
            .ok_or_else(|| format!("unrecognised class code `{code}`").into())
    }
}

pub fn event_name(event: Event) -> &'static str {
    match event {
        Event::OriginalOratory => "Original Oratory",
        Event::StandardOratory => "Standard Oratory",
        Event::Prose => "Prose",
        Event::DramaticInterp => "Dramatic Interpretation",
        Event::HumorousInterp => "Humorous Interpretation",
        Event::ForeignExtemp => "Foreign Extemp",
        Event::DomesticExtemp => "Domestic Extemp",
        Event::Monologue => "Monologue",
        Event::LincolnDouglas => "Lincoln-Douglas Debate",
        Event::Poetry => "Poetry",
        Event::CrossExamination => "Cross-Examination Debate",
        Event::HumorousDuet => "Humorous Duet",
        Event::DramaticDuet => "Dramatic Duet",
        Event::PublicForum => "Public Forum",
    }
}

pub fn year_name(year: YearInSchool) -> &'static str {
    match year {
        YearInSchool::Freshman => "Freshman",
        YearInSchool::Sophomore => "Sophomore",
        YearInSchool::Junior => "Junior",
        YearInSchool::Senior => "Senior",
    }
}

pub fn class_name(class: SchoolClass) -> &'static str {
    class.code()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_classification_partitions() {
        for year in YearInSchool::ALL {
            assert_ne!(year.is_underclassman(), year.is_upperclass());
        }
    }

    #[test]
    fn year_classification_literals() {
        assert!(YearInSchool::Freshman.is_underclassman());
        assert!(YearInSchool::Sophomore.is_underclassman());
        assert!(YearInSchool::Junior.is_upperclass());
        assert!(YearInSchool::Senior.is_upperclass());
    }

    #[test]
    fn event_codes_are_distinct() {
        for a in Event::ALL {
            for b in Event::ALL {
                if a != b {
                    assert_ne!(a.code(), b.code());
                }
            }
        }
    }

    #[test]
    fn unknown_codes_rejected() {
        assert_eq!(Event::from_code("ZZ"), None);
        assert_eq!(YearInSchool::from_code(""), None);
        assert_eq!(SchoolClass::from_code("7A"), None);
    }
}
