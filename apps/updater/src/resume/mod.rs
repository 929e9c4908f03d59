// Resume structural extractor: recovers experience entries and
// categorized skills from unstructured line-oriented text. Best-effort
// heuristics; absent or unrecognizable text degrades to an empty
// snapshot, never an error.

pub mod experience;
pub mod extract;
pub mod lines;
pub mod skills;

pub use experience::extract_experience_entries;
pub use extract::{load_resume_snapshot, snapshot_from_text};
pub use skills::extract_skills;
