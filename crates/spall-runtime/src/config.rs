//! Application configuration loaded from TOML.
//!
//! ```toml
//! default_title = "Spall"
//! verbose_render_log = true
//!
//! [[routes]]
//! pattern = ""
//! page = "IndexPage"
//!
//! [[routes]]
//! pattern = "users/{id}"
//! page = "UserPage"
//! ```
//!
//! Page names are resolved against a [`PageCatalog`] supplied by the
//! application, in the order the routes are listed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use spall_routing::{PatternError, RouteTable};
use thiserror::Error;

use crate::app::AppOptions;
use crate::component::ComponentClass;
use crate::renderer::{Renderer, TracingRenderLogger};
use crate::router::Router;

/// Errors raised while loading or applying configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
	/// The configuration file could not be read.
	#[error("failed to read configuration from {path}: {source}")]
	Io {
		/// File path.
		path: PathBuf,
		/// Underlying error.
		#[source]
		source: std::io::Error,
	},

	/// The configuration is not valid TOML for [`AppConfig`].
	#[error("invalid configuration: {0}")]
	Parse(#[from] toml::de::Error),

	/// A route names a page the catalogue does not know.
	#[error("route '{pattern}' refers to unknown page '{page}'")]
	UnknownPage {
		/// Route declaration.
		pattern: String,
		/// Page name.
		page: String,
	},

	/// A route declaration could not be parsed.
	#[error(transparent)]
	Pattern(#[from] PatternError),
}

/// One `[[routes]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
	/// Route declaration, e.g. `users/{id}`.
	pub pattern: String,
	/// Name of the page class in the catalogue.
	pub page: String,
}

/// Declarative application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Title for pages that declare none.
	pub default_title: String,
	/// Skip the initial render on construction.
	pub disable_auto_run: bool,
	/// Trace every render step at debug level.
	pub verbose_render_log: bool,
	/// Routes in match order.
	pub routes: Vec<RouteConfig>,
}

impl AppConfig {
	/// Parses configuration from TOML text.
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(source)?)
	}

	/// Reads and parses a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&content)
	}

	/// Builds the ordered route table.
	pub fn route_table(
		&self,
		catalog: &PageCatalog,
	) -> Result<RouteTable<ComponentClass>, ConfigError> {
		let mut table = RouteTable::new();
		for route in &self.routes {
			let class = catalog.get(&route.page).ok_or_else(|| ConfigError::UnknownPage {
				pattern: route.pattern.clone(),
				page: route.page.clone(),
			})?;
			table.register_str(&route.pattern, class)?;
		}
		Ok(table)
	}

	/// Builds a router with the configured routes and default title.
	pub fn router(&self, catalog: &PageCatalog) -> Result<Router, ConfigError> {
		Ok(Router::new(self.route_table(catalog)?).with_default_title(self.default_title.clone()))
	}

	/// Builds the full set of [`AppOptions`].
	pub fn app_options(&self, catalog: &PageCatalog) -> Result<AppOptions, ConfigError> {
		let renderer = if self.verbose_render_log {
			Renderer::with_logger(TracingRenderLogger::new())
		} else {
			Renderer::new()
		};
		Ok(AppOptions::new()
			.router(self.router(catalog)?)
			.renderer(renderer)
			.disable_auto_run(self.disable_auto_run))
	}
}

/// Page classes addressable by name from configuration.
#[derive(Debug, Clone, Default)]
pub struct PageCatalog {
	pages: HashMap<String, ComponentClass>,
}

impl PageCatalog {
	/// Creates an empty catalogue.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a class under its own name.
	pub fn register(&mut self, class: ComponentClass) -> &mut Self {
		self.pages.insert(class.name().to_string(), class);
		self
	}

	/// Builder-style variant of [`register`](Self::register).
	pub fn with(mut self, class: ComponentClass) -> Self {
		self.register(class);
		self
	}

	/// Looks a class up by name.
	pub fn get(&self, name: &str) -> Option<ComponentClass> {
		self.pages.get(name).copied()
	}

	/// Returns the number of classes.
	pub fn len(&self) -> usize {
		self.pages.len()
	}

	/// Returns whether the catalogue is empty.
	pub fn is_empty(&self) -> bool {
		self.pages.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::component::RoutedApp;
	use rstest::{fixture, rstest};

	#[fixture]
	fn catalog() -> PageCatalog {
		PageCatalog::new()
			.with(ComponentClass::of::<RoutedApp>("IndexPage"))
			.with(ComponentClass::of::<RoutedApp>("UserPage"))
	}

	const CONFIG: &str = r#"
default_title = "Spall"
verbose_render_log = true

[[routes]]
pattern = ""
page = "IndexPage"

[[routes]]
pattern = "users/{id}"
page = "UserPage"
"#;

	#[rstest]
	fn test_parse_config() {
		let config = AppConfig::from_toml_str(CONFIG).unwrap();
		assert_eq!(config.default_title, "Spall");
		assert!(config.verbose_render_log);
		assert!(!config.disable_auto_run);
		assert_eq!(config.routes.len(), 2);
		assert_eq!(config.routes[1].pattern, "users/{id}");
	}

	#[rstest]
	fn test_defaults_for_empty_document() {
		assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
	}

	#[rstest]
	fn test_router_from_config(catalog: PageCatalog) {
		let router = AppConfig::from_toml_str(CONFIG).unwrap().router(&catalog).unwrap();
		assert_eq!(router.default_title(), "Spall");
		assert_eq!(router.find_route("users/3").unwrap().target().name(), "UserPage");
	}

	#[rstest]
	fn test_unknown_page(catalog: PageCatalog) {
		let config = AppConfig {
			routes: vec![RouteConfig {
				pattern: "posts".to_string(),
				page: "PostPage".to_string(),
			}],
			..AppConfig::default()
		};
		let err = config.route_table(&catalog).unwrap_err();
		assert_eq!(err.to_string(), "route 'posts' refers to unknown page 'PostPage'");
	}

	#[rstest]
	fn test_bad_pattern(catalog: PageCatalog) {
		let config = AppConfig {
			routes: vec![RouteConfig {
				pattern: "users/{".to_string(),
				page: "UserPage".to_string(),
			}],
			..AppConfig::default()
		};
		assert!(matches!(config.route_table(&catalog), Err(ConfigError::Pattern(_))));
	}

	#[rstest]
	#[case("disable_auto_run = \"yes\"")]
	#[case("routes = 3")]
	fn test_parse_errors(#[case] source: &str) {
		assert!(matches!(AppConfig::from_toml_str(source), Err(ConfigError::Parse(_))));
	}

	#[rstest]
	fn test_missing_file() {
		let err = AppConfig::from_file("/nonexistent/spall.toml").unwrap_err();
		assert!(matches!(err, ConfigError::Io { .. }));
	}
}
