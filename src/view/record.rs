//! Records as displayed, and the remote shapes they are flattened from.

use serde::{Deserialize, Serialize};

/// One table row: a flattened projection of a remote user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: String,
    pub email: String,
    /// `"<city>, <state>"`
    pub address: String,
    pub company_name: String,
}

impl Record {
    /// Field names a column may display, as spelled by the remote service.
    pub const FIELDS: &'static [&'static str] = &[
        "id",
        "firstName",
        "lastName",
        "age",
        "gender",
        "email",
        "address",
        "companyName",
    ];

    /// Display text of `field`, or `None` for an unknown field name.
    pub fn field(&self, field: &str) -> Option<String> {
        let value = match field {
            "id" => self.id.to_string(),
            "firstName" => self.first_name.clone(),
            "lastName" => self.last_name.clone(),
            "age" => self.age.to_string(),
            "gender" => self.gender.clone(),
            "email" => self.email.clone(),
            "address" => self.address.clone(),
            "companyName" => self.company_name.clone(),
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteAddress {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteCompany {
    #[serde(default)]
    pub name: String,
}

/// A user as returned by the collection endpoint. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: String,
    pub email: String,
    pub address: RemoteAddress,
    pub company: RemoteCompany,
}

impl From<RemoteUser> for Record {
    fn from(user: RemoteUser) -> Self {
        Record {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            age: user.age,
            gender: user.gender,
            email: user.email,
            address: format!("{}, {}", user.address.city, user.address.state),
            company_name: user.company.name,
        }
    }
}

/// Body of a collection response: one page plus the server-side total.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemotePage {
    pub users: Vec<RemoteUser>,
    pub total: u64,
}

impl RemotePage {
    /// Flattens every user, preserving server order.
    pub fn into_records(self) -> (Vec<Record>, u64) {
        let rows = self.users.into_iter().map(Record::from).collect();
        (rows, self.total)
    }
}
