pub mod loader;
pub mod mirror;
pub mod scope;
pub mod submitter;

pub use loader::{LoadOutcome, Resource, ResourceLoader};
pub use mirror::{field_views, update_field, Editable, FieldSpec, FieldView};
pub use scope::ViewScope;
pub use submitter::{MutationSubmitter, SubmissionState, SubmitOutcome};
