//! Table definitions
//!
//! Tables are described declaratively and rendered to SQLite DDL. [`up`]
//! creates whatever is missing and leaves existing tables alone, [`down`]
//! drops whatever exists. Both are safe to run repeatedly.

use anyhow::{Context, Result};
use tracing::info;

use super::DbPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
}

impl ColumnType {
    fn sql(&self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "INTEGER",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub primary_key: bool,
    pub not_null: bool,
    pub default: Option<&'static str>,
    /// Allowed values, rendered as a CHECK constraint
    pub one_of: &'static [&'static str],
    /// Parent table whose `id` this column references
    pub references: Option<&'static str>,
}

impl ColumnSpec {
    pub const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            primary_key: false,
            not_null: false,
            default: None,
            one_of: &[],
            references: None,
        }
    }

    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.not_null = true;
        self
    }

    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub const fn default_to(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    pub const fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.one_of = values;
        self
    }

    pub const fn references(mut self, table: &'static str) -> Self {
        self.references = Some(table);
        self
    }

    fn definition(&self) -> String {
        let mut def = format!("{} {}", self.name, self.column_type.sql());
        if self.primary_key {
            def.push_str(" PRIMARY KEY");
        }
        if self.not_null {
            def.push_str(" NOT NULL");
        }
        if let Some(value) = self.default {
            def.push_str(&format!(" DEFAULT {}", quote(value)));
        }
        if !self.one_of.is_empty() {
            let values: Vec<String> = self.one_of.iter().map(|v| quote(v)).collect();
            def.push_str(&format!(" CHECK ({} IN ({}))", self.name, values.join(", ")));
        }
        if let Some(parent) = self.references {
            def.push_str(&format!(" REFERENCES {}(id)", parent));
        }
        def
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IndexSpec {
    pub name: &'static str,
    pub column: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
    pub indexes: &'static [IndexSpec],
}

impl TableSpec {
    pub fn create_sql(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("    {}", c.definition()))
            .collect();
        format!("CREATE TABLE {} (\n{}\n)", self.name, columns.join(",\n"))
    }

    pub fn index_sql(&self) -> Vec<String> {
        self.indexes
            .iter()
            .map(|idx| {
                format!(
                    "CREATE INDEX IF NOT EXISTS {} ON {}({})",
                    idx.name, self.name, idx.column
                )
            })
            .collect()
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", self.name)
    }
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

const STATE_VALUES: &[&str] = &["active", "inactive"];
const STATUS_VALUES: &[&str] = &["created", "completed", "deleted"];

pub const ORGANIZATIONS: TableSpec = TableSpec {
    name: "organizations",
    columns: &[
        ColumnSpec::new("id", ColumnType::Text).primary_key(),
        ColumnSpec::new("name", ColumnType::Text).not_null(),
        ColumnSpec::new("state", ColumnType::Text)
            .not_null()
            .default_to("active")
            .one_of(STATE_VALUES),
    ],
    indexes: &[],
};

pub const PROJECTS: TableSpec = TableSpec {
    name: "projects",
    columns: &[
        ColumnSpec::new("id", ColumnType::Text).primary_key(),
        ColumnSpec::new("name", ColumnType::Text).not_null(),
        ColumnSpec::new("organization", ColumnType::Text)
            .not_null()
            .references("organizations"),
        ColumnSpec::new("state", ColumnType::Text)
            .not_null()
            .default_to("active")
            .one_of(STATE_VALUES),
    ],
    indexes: &[IndexSpec {
        name: "idx_projects_organization",
        column: "organization",
    }],
};

pub const TODOS: TableSpec = TableSpec {
    name: "todos",
    columns: &[
        ColumnSpec::new("id", ColumnType::Text).primary_key(),
        ColumnSpec::new("title", ColumnType::Text).not_null(),
        ColumnSpec::new("code", ColumnType::Integer).not_null(),
        ColumnSpec::new("description", ColumnType::Text),
        ColumnSpec::new("status", ColumnType::Text)
            .not_null()
            .default_to("created")
            .one_of(STATUS_VALUES),
        ColumnSpec::new("organization", ColumnType::Text)
            .not_null()
            .references("organizations"),
        ColumnSpec::new("project", ColumnType::Text)
            .not_null()
            .references("projects"),
    ],
    indexes: &[IndexSpec {
        name: "idx_todos_project",
        column: "project",
    }],
};

/// All tables, parents before children
pub const TABLES: &[TableSpec] = &[ORGANIZATIONS, PROJECTS, TODOS];

pub async fn table_exists(pool: &DbPool, name: &str) -> Result<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(name)
            .fetch_one(pool)
            .await
            .with_context(|| format!("Failed to check for table {}", name))?;

    Ok(count > 0)
}

/// Create every missing table
pub async fn up(pool: &DbPool) -> Result<()> {
    info!("Creating tables...");

    for table in TABLES {
        if table_exists(pool, table.name).await? {
            info!("Table {} already exists, skipping", table.name);
            continue;
        }

        sqlx::query(&table.create_sql())
            .execute(pool)
            .await
            .with_context(|| format!("Failed to create table {}", table.name))?;

        for statement in table.index_sql() {
            sqlx::query(&statement)
                .execute(pool)
                .await
                .with_context(|| format!("Failed to create index on {}", table.name))?;
        }

        info!("Table {} created", table.name);
    }

    Ok(())
}

/// Drop every existing table, children first
pub async fn down(pool: &DbPool) -> Result<()> {
    info!("Dropping tables...");

    for table in TABLES.iter().rev() {
        if !table_exists(pool, table.name).await? {
            continue;
        }

        sqlx::query(&table.drop_sql())
            .execute(pool)
            .await
            .with_context(|| format!("Failed to drop table {}", table.name))?;

        info!("Dropped table {}", table.name);
    }

    Ok(())
}

/// Drop and recreate all tables
pub async fn reset(pool: &DbPool) -> Result<()> {
    down(pool).await?;
    up(pool).await
}

/// Bring the schema up at startup, optionally wiping it first
pub async fn prepare(pool: &DbPool, reset_first: bool) -> Result<()> {
    if reset_first {
        reset(pool).await
    } else {
        up(pool).await
    }
}
