pub mod athlete;
pub mod coach;
pub mod future_meet;
pub mod meet;
pub mod race_result;

pub use athlete::Athlete;
pub use coach::Coach;
pub use future_meet::FutureMeet;
pub use meet::Meet;
pub use race_result::{RaceResult, ResultFilter};
