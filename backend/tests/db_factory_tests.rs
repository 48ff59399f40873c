//! Tests for db::factory module - repository selection and configuration.

mod support;

use std::io::Write;
use std::str::FromStr;

use forum_backend::db::factory::{RepositoryFactory, RepositoryType};
use forum_backend::db::repository::{PostRepository, RepositoryError};
use forum_backend::db::RepositoryConfig;

#[test]
fn test_repository_type_from_str_aliases() {
    assert_eq!(
        RepositoryType::from_str("POSTGRES").unwrap(),
        RepositoryType::Postgres
    );
    assert_eq!(
        RepositoryType::from_str("pg").unwrap(),
        RepositoryType::Postgres
    );
    assert_eq!(
        RepositoryType::from_str("Local").unwrap(),
        RepositoryType::Local
    );
    assert_eq!(
        RepositoryType::from_str("memory").unwrap(),
        RepositoryType::Local
    );
}

#[test]
fn test_repository_type_from_str_invalid() {
    let err = RepositoryType::from_str("mongodb").unwrap_err();
    assert_eq!(err, "Unknown repository type: mongodb");
}

#[test]
fn test_repository_type_from_env_default() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}

#[test]
fn test_repository_type_from_env_with_database_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", Some("postgres://localhost/forum")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Postgres),
    );
}

#[test]
fn test_repository_type_from_env_with_pg_database_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", Some("postgres://localhost/forum")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Postgres),
    );
}

#[test]
fn test_repository_type_explicit_overrides_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", Some("postgres://localhost/forum")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}

#[test]
fn test_repository_type_unknown_env_falls_back_to_local() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("cassandra"))], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Local)
    });
}

#[test]
fn test_factory_from_env_honours_repository_type() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", Some("postgres://localhost/forum")),
        ],
        || {
            let repo = rt.block_on(RepositoryFactory::from_env()).unwrap();
            assert!(rt.block_on(repo.health_check()).unwrap());
            assert!(rt.block_on(repo.list_posts()).unwrap().is_empty());
        },
    );
}

#[test]
fn test_factory_default_sources_without_config_file_uses_env() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("memory")),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert!(RepositoryConfig::default_location().is_none());
            let repo = rt.block_on(RepositoryFactory::from_default_sources()).unwrap();
            assert!(rt.block_on(repo.health_check()).unwrap());
        },
    );
}

#[cfg(not(feature = "postgres-repo"))]
#[test]
fn test_factory_from_env_postgres_without_feature_fails() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("postgres"))], || {
        let err = rt.block_on(RepositoryFactory::from_env()).err().unwrap();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
        assert_eq!(err.context().operation.as_deref(), Some("from_env"));
    });
}

#[tokio::test]
async fn test_factory_from_local_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"local\"").unwrap();

    let repo = RepositoryFactory::from_config_file(file.path())
        .await
        .unwrap();
    assert!(repo.health_check().await.unwrap());
    assert!(repo.list_posts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_factory_from_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = RepositoryFactory::from_config_file(dir.path().join("repository.toml"))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
}

#[tokio::test]
async fn test_factory_rejects_unknown_type_in_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"mongodb\"").unwrap();

    let err = RepositoryFactory::from_config_file(file.path())
        .await
        .err()
        .unwrap();
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    assert!(err.message().contains("mongodb"));
}

#[test]
fn test_config_file_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repository.toml");
    std::fs::write(
        &path,
        "[repository]\ntype = \"postgres\"\n\n[postgres]\ndatabase_url = \"postgres://forum@db/forum\"\nmax_connections = 4\n",
    )
    .unwrap();

    let config = RepositoryConfig::from_file(&path).unwrap();
    assert_eq!(config.repository_type().unwrap(), RepositoryType::Postgres);
    assert_eq!(config.postgres.database_url, "postgres://forum@db/forum");
    assert_eq!(config.postgres.max_connections, 4);
    assert_eq!(config.postgres.min_connections, 1);
}

#[cfg(not(feature = "postgres-repo"))]
#[tokio::test]
async fn test_from_env_postgres_without_feature() {
    let result = support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("postgres")),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        RepositoryType::from_env,
    );
    assert_eq!(result, RepositoryType::Postgres);

    let err = RepositoryFactory::create(result, None).await.err().unwrap();
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
}

#[cfg(feature = "postgres-repo")]
#[tokio::test]
async fn test_create_postgres_requires_config() {
    let err = RepositoryFactory::create(RepositoryType::Postgres, None)
        .await
        .err()
        .unwrap();
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
}
