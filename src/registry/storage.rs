/// SQLite persistence layer for registry records
///
/// Optional write-through storage behind the in-memory registries. Map and list
/// columns are stored as JSON text. Rows are keyed by the stable record id, so
/// deleting a component never rewrites the rows that follow it.

use crate::registry::types::{Component, Workflow};
use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Row,
};
use std::{future::Future, str::FromStr, time::Duration};

/// SQLite-backed storage shared by the component and workflow registries
#[derive(Debug, Clone)]
pub struct RegistryStorage {
    pool: SqlitePool,
}

impl RegistryStorage {
    /// Connect to the database at `url` and make sure the schema exists
    ///
    /// In-memory databases are pinned to a single long-lived connection, since
    /// every new SQLite connection would otherwise see its own empty database.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid database url '{}'", url))?
            .create_if_missing(true);

        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open database '{}'", url))?;

        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the registry tables. Safe to call repeatedly.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS components (
                id INTEGER PRIMARY KEY,
                type TEXT NOT NULL,
                configuration TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_components_type ON components(type)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS workflows (
                id INTEGER PRIMARY KEY,
                component_ids TEXT NOT NULL,
                execution_order TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or replace a component row
    pub async fn save_component(&self, id: u64, component: &Component) -> Result<()> {
        let configuration = serde_json::to_string(&component.configuration)?;

        sqlx::query(
            r#"
            INSERT INTO components (id, type, configuration)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                type = excluded.type,
                configuration = excluded.configuration
            "#,
        )
        .bind(row_id(id)?)
        .bind(&component.kind)
        .bind(&configuration)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete_component(&self, id: u64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM components WHERE id = ?")
            .bind(row_id(id)?)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Load every component in id order
    pub async fn load_components(&self) -> Result<Vec<(u64, Component)>> {
        let rows = sqlx::query("SELECT id, type, configuration FROM components ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let mut components = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row.get("id");
            let configuration: String = row.get("configuration");
            components.push((
                record_id(id)?,
                Component {
                    kind: row.get("type"),
                    configuration: serde_json::from_str(&configuration)
                        .with_context(|| format!("corrupt configuration for component {}", id))?,
                },
            ));
        }

        Ok(components)
    }

    pub async fn save_workflow(&self, id: u64, workflow: &Workflow) -> Result<()> {
        let component_ids = serde_json::to_string(&workflow.component_ids)?;
        let execution_order = serde_json::to_string(&workflow.execution_order)?;

        sqlx::query(
            r#"
            INSERT INTO workflows (id, component_ids, execution_order)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                component_ids = excluded.component_ids,
                execution_order = excluded.execution_order
            "#,
        )
        .bind(row_id(id)?)
        .bind(&component_ids)
        .bind(&execution_order)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete_workflow(&self, id: u64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM workflows WHERE id = ?")
            .bind(row_id(id)?)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Load every workflow in id order
    pub async fn load_workflows(&self) -> Result<Vec<(u64, Workflow)>> {
        let rows = sqlx::query("SELECT id, component_ids, execution_order FROM workflows ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let mut workflows = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row.get("id");
            let component_ids: String = row.get("component_ids");
            let execution_order: String = row.get("execution_order");
            workflows.push((
                record_id(id)?,
                Workflow {
                    component_ids: serde_json::from_str(&component_ids)
                        .with_context(|| format!("corrupt component_ids for workflow {}", id))?,
                    execution_order: serde_json::from_str(&execution_order)
                        .with_context(|| format!("corrupt execution_order for workflow {}", id))?,
                },
            ));
        }

        Ok(workflows)
    }
}

/// A record kind the registry knows how to persist
///
/// Implemented for [`Component`] and [`Workflow`] so one generic registry can
/// write through to the matching table.
pub trait Persisted: Clone + Send + Sync + Sized + 'static {
    /// Human-readable kind, used in log lines and not-found messages
    const KIND: &'static str;

    fn save(storage: &RegistryStorage, id: u64, record: &Self) -> impl Future<Output = Result<()>> + Send;

    fn delete(storage: &RegistryStorage, id: u64) -> impl Future<Output = Result<bool>> + Send;

    fn load_all(storage: &RegistryStorage) -> impl Future<Output = Result<Vec<(u64, Self)>>> + Send;
}

impl Persisted for Component {
    const KIND: &'static str = "Component";

    async fn save(storage: &RegistryStorage, id: u64, record: &Self) -> Result<()> {
        storage.save_component(id, record).await
    }

    async fn delete(storage: &RegistryStorage, id: u64) -> Result<bool> {
        storage.delete_component(id).await
    }

    async fn load_all(storage: &RegistryStorage) -> Result<Vec<(u64, Self)>> {
        storage.load_components().await
    }
}

impl Persisted for Workflow {
    const KIND: &'static str = "Workflow";

    async fn save(storage: &RegistryStorage, id: u64, record: &Self) -> Result<()> {
        storage.save_workflow(id, record).await
    }

    async fn delete(storage: &RegistryStorage, id: u64) -> Result<bool> {
        storage.delete_workflow(id).await
    }

    async fn load_all(storage: &RegistryStorage) -> Result<Vec<(u64, Self)>> {
        storage.load_workflows().await
    }
}

fn row_id(id: u64) -> Result<i64> {
    i64::try_from(id).with_context(|| format!("record id {} does not fit in an SQLite integer", id))
}

fn record_id(id: i64) -> Result<u64> {
    u64::try_from(id).with_context(|| format!("negative record id {} in storage", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn memory_storage() -> RegistryStorage {
        RegistryStorage::connect("sqlite::memory:").await.unwrap()
    }

    fn tool(configuration: serde_json::Value) -> Component {
        serde_json::from_value(json!({ "type": "Tool", "configuration": configuration })).unwrap()
    }

    #[tokio::test]
    async fn components_round_trip_in_id_order() {
        let storage = memory_storage().await;
        storage.save_component(4, &tool(json!({ "name": "search" }))).await.unwrap();
        storage.save_component(1, &tool(json!({ "name": "email" }))).await.unwrap();

        let loaded = storage.load_components().await.unwrap();
        let ids: Vec<u64> = loaded.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(loaded[1].1, tool(json!({ "name": "search" })));
    }

    #[tokio::test]
    async fn saving_an_existing_component_replaces_it() {
        let storage = memory_storage().await;
        storage.save_component(1, &tool(json!({ "a": 1 }))).await.unwrap();
        storage.save_component(1, &tool(json!({ "a": 2, "b": true }))).await.unwrap();

        let loaded = storage.load_components().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].1.configuration.get("a"), Some(&json!(2)));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let storage = memory_storage().await;
        storage.save_component(1, &tool(json!({}))).await.unwrap();

        assert!(storage.delete_component(1).await.unwrap());
        assert!(!storage.delete_component(1).await.unwrap());
    }

    #[tokio::test]
    async fn workflows_keep_list_columns() {
        let storage = memory_storage().await;
        let workflow = Workflow { component_ids: vec![2, 0, 99], execution_order: vec![1, 2, 0] };
        storage.save_workflow(1, &workflow).await.unwrap();

        let loaded = storage.load_workflows().await.unwrap();
        assert_eq!(loaded, vec![(1, workflow)]);
    }
}
