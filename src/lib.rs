pub mod config_map;
pub mod driver;
pub mod engine;
pub mod error;
pub mod report;
pub mod settings;
pub mod token;

pub use config_map::{build_config_map, ConfigMap, ConfigWarning, GroupDescriptor};
pub use driver::{run, validate_all, GroupOutcome, Inputs, RunOutcome, RunStatus};
pub use engine::{compile_schema, validate_group};
pub use error::{Error, ShapeError};
pub use report::{ActionsReporter, LogReporter, ReportFormat, Reporter};
pub use settings::Settings;
pub use token::Token;
