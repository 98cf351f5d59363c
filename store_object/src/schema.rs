//! Schema description and DDL generation
//!
//! The `#[model]` derive describes each table as static [`ColumnDef`] and
//! [`IndexDef`] slices. Everything that turns that description into
//! PostgreSQL DDL lives here, so it is shared by every model and can be tested
//! without a database.

use std::fmt;

use type_mapping::quote_identifier;

/// Referential action applied to child rows when the parent row is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    NoAction,
    Restrict,
    Cascade,
    SetNull,
}

impl OnDelete {
    pub fn as_sql(&self) -> Option<&'static str> {
        match self {
            OnDelete::NoAction => None,
            OnDelete::Restrict => Some("ON DELETE RESTRICT"),
            OnDelete::Cascade => Some("ON DELETE CASCADE"),
            OnDelete::SetNull => Some("ON DELETE SET NULL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: &'static str,
    pub column: &'static str,
    pub on_delete: OnDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub nullable: bool,
    pub primary_key: bool,
    pub unique: bool,
    /// SQL expression used as the column default
    pub default: Option<&'static str>,
    pub references: Option<ForeignKey>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDef {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub unique: bool,
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", quote_identifier(self.name), self.sql_type)?;

        if self.primary_key {
            f.write_str(" PRIMARY KEY")?;
        } else if !self.nullable {
            f.write_str(" NOT NULL")?;
        }
        if self.unique && !self.primary_key {
            f.write_str(" UNIQUE")?;
        }
        if let Some(default) = self.default {
            write!(f, " DEFAULT {}", default)?;
        }
        if let Some(fk) = &self.references {
            write!(
                f,
                " REFERENCES {} ({})",
                quote_identifier(fk.table),
                quote_identifier(fk.column)
            )?;
            if let Some(action) = fk.on_delete.as_sql() {
                write!(f, " {}", action)?;
            }
        }
        Ok(())
    }
}

/// `CREATE TABLE IF NOT EXISTS` for a table with the given columns
pub fn create_table_sql(table: &str, columns: &[ColumnDef]) -> String {
    let definitions: Vec<String> = columns.iter().map(ToString::to_string).collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote_identifier(table),
        definitions.join(", ")
    )
}

pub fn create_indexes_sql(table: &str, indexes: &[IndexDef]) -> Vec<String> {
    indexes
        .iter()
        .map(|index| {
            let columns: Vec<String> = index.columns.iter().map(|c| quote_identifier(c)).collect();
            format!(
                "CREATE {}INDEX IF NOT EXISTS {} ON {} ({})",
                if index.unique { "UNIQUE " } else { "" },
                quote_identifier(index.name),
                quote_identifier(table),
                columns.join(", ")
            )
        })
        .collect()
}

pub fn drop_table_sql(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {} CASCADE", quote_identifier(table))
}

/// Statements that keep `column` current on every UPDATE, including updates
/// issued outside this crate. The trigger is only created when missing.
pub fn updated_at_trigger_sql(table: &str, column: &str) -> Vec<String> {
    let function = format!("touch_{}_{}", table, column);
    let trigger = format!("{}_{}_touch", table, column);

    let function_sql = format!(
        "CREATE OR REPLACE FUNCTION {}() RETURNS TRIGGER AS $$ \
         BEGIN NEW.{} = NOW(); RETURN NEW; END; \
         $$ LANGUAGE plpgsql",
        quote_identifier(&function),
        quote_identifier(column)
    );

    let create_trigger = format!(
        "CREATE TRIGGER {} BEFORE UPDATE ON {} FOR EACH ROW EXECUTE FUNCTION {}()",
        quote_identifier(&trigger),
        quote_identifier(table),
        quote_identifier(&function)
    );
    let trigger_sql = format!(
        "DO $$ BEGIN \
         IF NOT EXISTS (SELECT 1 FROM pg_trigger WHERE tgname = '{}') THEN \
         EXECUTE '{}'; \
         END IF; \
         END $$",
        trigger, create_trigger
    );

    vec![function_sql, trigger_sql]
}
