use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::packages::{PackageEntity, PackageRow},
        repositories::packages::PackageRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::packages},
};

pub struct PackagePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PackagePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PackageRepository for PackagePostgres {
    async fn find_by_id(&self, package_id: Uuid) -> Result<Option<PackageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = packages::table
            .filter(packages::id.eq(package_id))
            .select(PackageRow::as_select())
            .first::<PackageRow>(&mut conn)
            .optional()?;

        Ok(row.map(PackageEntity::from))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<PackageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = packages::table
            .filter(packages::code.eq(code))
            .filter(packages::is_active.eq(true))
            .select(PackageRow::as_select())
            .first::<PackageRow>(&mut conn)
            .optional()?;

        Ok(row.map(PackageEntity::from))
    }

    async fn list_active(&self) -> Result<Vec<PackageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = packages::table
            .filter(packages::is_active.eq(true))
            .order(packages::price_minor.asc())
            .select(PackageRow::as_select())
            .load::<PackageRow>(&mut conn)?;

        Ok(rows.into_iter().map(PackageEntity::from).collect())
    }
}
