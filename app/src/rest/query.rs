use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

#[derive(Debug, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RangeQuery {
    /// `normal` or `high`, anything else selects `normal`
    pub range: Option<String>,
}

impl RangeQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let range = pairs
            .into_iter()
            .find(|(key, _)| key == "range")
            .map(|(_, value)| value);
        RangeQuery { range }
    }

    pub fn range(self) -> Option<String> {
        self.range
    }
}
