use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, FromRow, Postgres, QueryBuilder};

use crate::database::entity::Entity;

/// One athlete's finish at one meet. The athlete and meet ids are foreign
/// keys; the datastore enforces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RaceResult {
    #[serde(default)]
    pub id: i32,
    #[serde(rename = "athleteId")]
    pub athlete_id: i32,
    #[serde(rename = "meetId")]
    pub meet_id: i32,
    /// Finish time as entered, e.g. "17:42.3"
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<i32>,
}

/// `?meetId=` wins over `?athleteId=` when both are given.
#[derive(Debug, Default, Deserialize)]
pub struct ResultFilter {
    #[serde(rename = "meetId")]
    pub meet_id: Option<i32>,
    #[serde(rename = "athleteId")]
    pub athlete_id: Option<i32>,
}

impl Entity for RaceResult {
    const LABEL: &'static str = "Result";
    const TABLE: &'static str = "results";
    const COLUMNS: &'static [&'static str] = &["athlete_id", "meet_id", "time", "place"];
    const ORDER_BY: &'static str = "meet_id, place";

    type Filter = ResultFilter;

    fn id(&self) -> i32 {
        self.id
    }

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.athlete_id)
            .push_bind(self.meet_id)
            .push_bind(self.time.clone())
            .push_bind(self.place);
    }

    fn push_list_tail(filter: &ResultFilter, query: &mut QueryBuilder<'_, Postgres>) {
        match (filter.meet_id, filter.athlete_id) {
            (Some(meet_id), _) => {
                query
                    .push(" WHERE meet_id = ")
                    .push_bind(meet_id)
                    .push(" ORDER BY place, time");
            }
            (None, Some(athlete_id)) => {
                query
                    .push(" WHERE athlete_id = ")
                    .push_bind(athlete_id)
                    .push(" ORDER BY meet_id");
            }
            (None, None) => {
                query.push(" ORDER BY ").push(Self::ORDER_BY);
            }
        }
    }
}
