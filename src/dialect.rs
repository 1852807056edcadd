use std::fmt::{self, Display, Formatter};

/// Database dialects a column declaration may target.
///
/// Unrecognized dialect names map to [`Dialect::Other`], which declares no
/// concrete column type.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Dialect {
    Mysql,
    Postgres,
    SqlServer,
    Sqlite,
    Other,
}

impl Dialect {
    pub fn from_name(name: &str) -> Dialect {
        match name {
            "mysql" => Dialect::Mysql,
            "postgres" => Dialect::Postgres,
            "sqlserver" => Dialect::SqlServer,
            "sqlite" => Dialect::Sqlite,
            _ => Dialect::Other,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Dialect::Mysql => "mysql",
            Dialect::Postgres => "postgres",
            Dialect::SqlServer => "sqlserver",
            Dialect::Sqlite => "sqlite",
            Dialect::Other => "",
        }
    }

    /// The concrete column type this dialect uses for the generic `time`
    /// declaration carried by [`LocalDate`] and [`LocalDateTime`].
    ///
    /// [`LocalDate`]: crate::LocalDate
    /// [`LocalDateTime`]: crate::LocalDateTime
    pub const fn time_column_type(self) -> &'static str {
        match self {
            Dialect::Mysql | Dialect::Postgres | Dialect::SqlServer => "TIME",
            Dialect::Sqlite => "TEXT",
            Dialect::Other => "",
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
