//! Annotation building blocks: the action-unit vocabulary, phrase
//! generation at the peak frame, auxiliary text artifacts, and final
//! record assembly.

mod artifacts;
mod phrases;
mod record;
mod vocabulary;

pub use artifacts::{read_description_csv, read_text_artifact};
pub use phrases::{MIN_RELEVANCE, PhraseSet, build_phrases};
pub use record::{SampleRecord, attach_labels, merge_record};
pub use vocabulary::{UNIT_VOCABULARY, intensity_qualifier};
