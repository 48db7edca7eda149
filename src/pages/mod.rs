pub mod review_page;
pub mod tag_editor;

pub use review_page::{ReviewEntryView, ReviewPage};
pub use tag_editor::{SaveOutcome, TagEditorPage, TagField};
