use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, FromRow, Postgres};

use crate::database::entity::{Entity, NoFilter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Athlete {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub grade: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_record: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<String>,
}

impl Entity for Athlete {
    const LABEL: &'static str = "Athlete";
    const TABLE: &'static str = "athletes";
    const COLUMNS: &'static [&'static str] = &["name", "gender", "grade", "personal_record", "events"];
    const ORDER_BY: &'static str = "name";

    type Filter = NoFilter;

    fn id(&self) -> i32 {
        self.id
    }

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.name.clone())
            .push_bind(self.gender.clone())
            .push_bind(self.grade)
            .push_bind(self.personal_record.clone())
            .push_bind(self.events.clone());
    }
}
