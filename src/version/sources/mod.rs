//! Install-mechanism specific version sources

mod containerized;
mod native;

pub use containerized::{ContainerizedSource, parse_cli_version};
pub use native::{NativeSource, select_available_version, version_from_pkg_version};
