//! Infrastructure layer - external adapters (filesystem, processes, terminal).
//!
//! This layer handles all I/O the host adapter needs.

pub mod config_paths;
pub mod edit_lock;
pub mod ini;
pub mod launcher;
pub mod process_converter;
pub mod project_host;
pub mod terminal_view;

pub use config_paths::{layer_paths_in, user_config_dir, INI_FILENAME};
pub use edit_lock::EditLock;
pub use ini::IniDocument;
pub use launcher::SystemLauncher;
pub use process_converter::ProcessConverter;
pub use project_host::ProjectFileHost;
pub use terminal_view::TerminalView;
