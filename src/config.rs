// config.rs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataAccess {
    /// Inline sqlx queries composed in Rust.
    Query,
    /// Stored routines and views defined in migrations.
    Proc,
}

impl DataAccess {
    pub fn parse(value: &str) -> DataAccess {
        match value.to_lowercase().as_str() {
            "proc" | "procedure" | "stored_procedure" => DataAccess::Proc,
            _ => DataAccess::Query,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataAccess::Query => "query",
            DataAccess::Proc => "proc",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub data_access: DataAccess,
    pub max_connections: u32,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid port number");

        let data_access = DataAccess::parse(
            &std::env::var("DATA_ACCESS").unwrap_or_else(|_| "query".to_string()),
        );

        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .expect("DB_MAX_CONNECTIONS must be a number");

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:3001".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Config {
            database_url,
            port,
            data_access,
            max_connections,
            allowed_origins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_access_parses_known_values() {
        assert_eq!(DataAccess::parse("proc"), DataAccess::Proc);
        assert_eq!(DataAccess::parse("StoredProcedure"), DataAccess::Proc);
        assert_eq!(DataAccess::parse("query"), DataAccess::Query);
    }

    #[test]
    fn data_access_defaults_to_query() {
        assert_eq!(DataAccess::parse("anything-else"), DataAccess::Query);
        assert_eq!(DataAccess::parse(""), DataAccess::Query);
    }
}
