//! User record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the users table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Autoincrement identifier assigned by the store.
    pub id: i64,

    /// Full name.
    pub name: String,

    /// Email address, unique across the table.
    pub email: String,

    /// Insertion timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Render the record as the multi-line block used in tool output.
    pub fn summary(&self) -> String {
        format!(
            "ID: {}\nName: {}\nEmail: {}\nCreated: {}",
            self.id,
            self.name,
            self.email,
            self.created_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_summary_format() {
        let user = User {
            id: 7,
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        };
        assert_eq!(
            user.summary(),
            "ID: 7\nName: Ada Lovelace\nEmail: ada@example.com\nCreated: 2024-03-01 12:30:00"
        );
    }

    #[test]
    fn test_serializes_snake_case_fields() {
        let user = User {
            id: 1,
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["email"], "john@example.com");
        assert!(value.get("created_at").is_some());
    }
}
