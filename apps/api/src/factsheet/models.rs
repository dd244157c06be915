use serde::{Deserialize, Serialize};

/// A structured fact sheet about one person, as produced by the model.
///
/// Built once per successful request and discarded when the caller starts a
/// new one. A sheet is only constructed through the normalizer, which
/// guarantees `person_name` is non-empty and all four lists are present
/// (possibly empty). `ten_things_to_know` is nominally ten entries but the
/// length is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactSheet {
    pub person_name: String,
    pub primary_connections: Vec<String>,
    pub education: Vec<String>,
    pub key_memberships_awards: Vec<String>,
    pub ten_things_to_know: Vec<String>,
}
