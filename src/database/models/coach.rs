use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, FromRow, Postgres};

use crate::database::entity::{Entity, NoFilter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Coach {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl Entity for Coach {
    const LABEL: &'static str = "Coach";
    const TABLE: &'static str = "coaches";
    const COLUMNS: &'static [&'static str] = &["name", "title", "bio"];
    const ORDER_BY: &'static str = "id";

    type Filter = NoFilter;

    fn id(&self) -> i32 {
        self.id
    }

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.name.clone())
            .push_bind(self.title.clone())
            .push_bind(self.bio.clone());
    }
}
