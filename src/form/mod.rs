//! The simple person form: schema, parsing, validation and echo

pub mod age;
pub mod error;
pub mod handler;
pub mod loader;
pub mod messenger;
pub mod schema;
pub mod submission;
pub mod validator;
pub mod wizard;

pub use error::{ErrorReport, FieldError, FormErrors};
pub use handler::{Echo, FormHandler, ECHO_HEADING};
pub use loader::SubmissionFileError;
pub use messenger::{ConsoleMessenger, MessageKind, MessageLog, Messenger};
pub use schema::{FieldKind, FieldName, FieldSpec, FormSpec, SIMPLE_FORM};
pub use submission::{Gender, RawValues, Submission};
pub use wizard::FormWizard;
