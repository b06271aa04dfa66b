use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, FromRow, Postgres};

use crate::database::entity::{Entity, NoFilter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FutureMeet {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Squad the meet is for, e.g. "Varsity" or "JV"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl Entity for FutureMeet {
    const LABEL: &'static str = "Future meet";
    const TABLE: &'static str = "future_meets";
    const COLUMNS: &'static [&'static str] = &["name", "date", "location", "level"];
    const ORDER_BY: &'static str = "date";

    type Filter = NoFilter;

    fn id(&self) -> i32 {
        self.id
    }

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.name.clone())
            .push_bind(self.date)
            .push_bind(self.location.clone())
            .push_bind(self.level.clone());
    }
}
