use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Tags,
    AudienceGroups,
    Holidays,
    Compatibility,
}

impl TableKind {
    pub fn label(self) -> &'static str {
        match self {
            TableKind::Tags => "tag",
            TableKind::AudienceGroups => "audience group",
            TableKind::Holidays => "holiday",
            TableKind::Compatibility => "compatibility",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Load-time failure of a single reference table. Never aborts the other tables.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read {table} table from {}: {source}", path.display())]
    Io {
        table: TableKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {table} table: {source}")]
    Json {
        table: TableKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid numeric value {value:?} for field '{field}' of '{key}' in {table} table")]
    InvalidWeightFormat {
        table: TableKind,
        key: String,
        field: String,
        value: String,
    },
}

impl TableError {
    pub fn table(&self) -> TableKind {
        match self {
            TableError::Io { table, .. }
            | TableError::Json { table, .. }
            | TableError::InvalidWeightFormat { table, .. } => *table,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("none of the {requested} selected story elements exist in the tag table")]
    EmptySelection { requested: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
