use serde::{Deserialize, Serialize};

/// A person registered through the user form.
///
/// Every field defaults when absent so request bodies without an `id`
/// (or with only the fields being edited) still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: i64, // assigned by the store, never by the client
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub organization: String,
}

impl User {
    #[cfg(test)]
    pub fn new(first_name: &str, last_name: &str, email: &str, organization: &str) -> Self {
        Self {
            id: 0,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            organization: organization.to_string(),
        }
    }

    /// Renders the record the same way it is persisted in the store file.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
