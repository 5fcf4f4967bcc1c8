use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    domain::value_objects::packages::PackageLimits, infrastructure::postgres::schema::packages,
};

#[derive(Debug, Clone)]
pub struct PackageEntity {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub price_minor: i32,
    pub limits: PackageLimits,
    pub is_active: bool,
}

/// Raw row used for Diesel queries. Limits stay as JSON and are parsed into
/// PackageLimits.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = packages)]
pub struct PackageRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub price_minor: i32,
    pub limits: serde_json::Value,
    pub is_active: bool,
}

impl From<PackageRow> for PackageEntity {
    fn from(value: PackageRow) -> Self {
        let limits = serde_json::from_value(value.limits).unwrap_or_default();

        Self {
            id: value.id,
            code: value.code,
            name: value.name,
            price_minor: value.price_minor,
            limits,
            is_active: value.is_active,
        }
    }
}
