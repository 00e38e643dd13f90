//! Shared test harness for the query engine and repository tests
//!
//! Provides `Customer`, an entity whose fields cover every `FieldKind`
//! (string, integer, optional float, uuid, datetime, enum, nested), plus
//! seed-data helpers.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod harness;
//! use harness::*;
//! ```

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use sift::core::entity::Entity;
use sift::core::error::ValidationError;
use sift::core::field::{FieldFormat, FieldValue};
use sift::core::validation::{check, matches_format, non_blank, Validate};
use sift::{enumerated, queryable};

// ---------------------------------------------------------------------------
// Customer — covers all FieldKind variants
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub enum Tier {
    Standard,
    Premium,
}

enumerated!(Tier { Standard, Premium });

#[derive(Clone, Debug, PartialEq)]
pub struct Address {
    pub city: String,
    pub country: String,
}

queryable!(Address, "address", {
    city: string,
    country: string,
});

#[derive(Clone, Debug, PartialEq)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub score: Option<f64>,
    pub tier: Tier,
    pub signup: DateTime<Utc>,
    pub address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub status: String,
}

queryable!(Customer, "customer", {
    id: uuid,
    name: string,
    email: string,
    age: integer,
    score: (option float),
    tier: (enum Tier),
    signup: datetime,
    address: (nested Address),
    status: string,
});

impl Entity for Customer {
    fn resource_name() -> &'static str {
        "customers"
    }

    fn resource_name_singular() -> &'static str {
        "customer"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn entity_type(&self) -> &str {
        "customer"
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn status(&self) -> &str {
        &self.status
    }
}

impl Validate for Customer {
    fn validate(&self) -> Result<(), ValidationError> {
        check([
            non_blank("name", &self.name),
            matches_format(
                "email",
                &FieldValue::String(self.email.clone()),
                &FieldFormat::Email,
            ),
        ])
    }
}

// ---------------------------------------------------------------------------
// Builders and seed data
// ---------------------------------------------------------------------------

pub fn customer(name: &str, age: i64, city: &str, tier: Tier) -> Customer {
    let now = Utc::now();
    Customer {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        age,
        score: Some(age as f64 / 10.0),
        tier,
        signup: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        address: Address {
            city: city.to_string(),
            country: "PT".to_string(),
        },
        created_at: now,
        updated_at: now,
        deleted_at: None,
        status: "active".to_string(),
    }
}

/// Six customers across three cities and both tiers.
pub fn seed() -> Vec<Customer> {
    vec![
        customer("Alice", 30, "Lisbon", Tier::Premium),
        customer("Bob", 17, "Porto", Tier::Standard),
        customer("Carol", 42, "Lisbon", Tier::Premium),
        customer("Dan", 30, "Faro", Tier::Standard),
        customer("Erin", 25, "Porto", Tier::Premium),
        customer("Frank", 30, "Lisbon", Tier::Standard),
    ]
}
