use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, FromRow, Postgres};

use crate::database::entity::{Entity, NoFilter};

/// A completed or scheduled race day. `date` travels as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Meet {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entity for Meet {
    const LABEL: &'static str = "Meet";
    const TABLE: &'static str = "meets";
    const COLUMNS: &'static [&'static str] = &["name", "date", "location", "description"];
    const ORDER_BY: &'static str = "date DESC";

    type Filter = NoFilter;

    fn id(&self) -> i32 {
        self.id
    }

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.name.clone())
            .push_bind(self.date)
            .push_bind(self.location.clone())
            .push_bind(self.description.clone());
    }
}
