//! Declarative evaluation configuration
//!
//! An evaluation run is described by a YAML file:
//!
//! ```yaml
//! model_name: bilstm_pos
//! predictions: data/test_predictions.jsonl
//! labels: data/idx2label.yaml
//! ```
//!
//! Every other field has a default, see [`EvaluatorConfig`](crate::eval::EvaluatorConfig).

mod cli;
mod loader;
mod schema;
mod validate;

pub use cli::{apply_overrides, parse_args, Cli, Command, EvaluateArgs, ValidateArgs};
pub use loader::{load_config, parse_config};
pub(crate) use schema::deserialize_bool_lenient;
pub use schema::EvalSpec;
pub use validate::{validate_config, ValidationError};
