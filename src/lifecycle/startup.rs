//! Startup orchestration.
//!
//! # Responsibilities
//! - Load configuration (file or defaults)
//! - Apply command-line overrides
//! - Validate the result before anything binds
//! - Check that one process's own sockets do not collide
//! - Announce the served endpoints

use std::path::Path;

use crate::config::loader::read_config;
use crate::config::{check_distinct_binds, validate_config, ApiConfig, ConfigError, ServiceConfig};

/// Load the config file (or defaults), apply overrides, then validate.
pub fn resolve_config<F>(path: Option<&Path>, overrides: F) -> Result<ServiceConfig, ConfigError>
where
    F: FnOnce(&mut ServiceConfig),
{
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => ServiceConfig::default(),
    };
    overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Fail if this process's listener and its metrics endpoint would collide.
///
/// `listener` is the (field, address) pair the calling binary binds.
pub fn check_binds<'a>(
    config: &'a ServiceConfig,
    listener: (&'static str, &'a str),
) -> Result<(), ConfigError> {
    let mut binds = vec![listener];
    if config.observability.metrics_enabled {
        binds.push((
            "observability.metrics_address",
            config.observability.metrics_address.as_str(),
        ));
    }
    check_distinct_binds(&binds).map_err(ConfigError::Validation)
}

/// Method/path pairs served by the REST surface.
pub fn endpoint_table(api: &ApiConfig) -> Vec<(&'static str, String, &'static str)> {
    let root = format!("/{}", api.root);
    let collection = format!("{}/{}", root, api.collection);
    let member = format!("{}/{{id}}", collection);
    vec![
        ("GET", root, "API information"),
        ("GET", collection.clone(), "List all items"),
        ("POST", collection, "Create a new item"),
        ("GET", member.clone(), "Get an item by ID"),
        ("PUT", member.clone(), "Update an item"),
        ("DELETE", member, "Delete an item"),
    ]
}

/// Log the endpoint table at info level.
pub fn log_endpoints(api: &ApiConfig) {
    for (method, path, description) in endpoint_table(api) {
        tracing::info!(method, path = %path, "{}", description);
    }
}
