// Text curation engine: turns raw description/README text into a single
// good sentence and a bounded language/technology label list.
// Every function here is pure and total: garbage in, fallback out.

pub mod cleaner;
pub mod description;
pub mod frameworks;
pub mod scoring;

pub use cleaner::{clamp_sentence, clean_text, split_sentences};
pub use description::{choose_best_sentence, fallback_description, select_description};
pub use frameworks::{infer_frameworks, select_languages};
pub use scoring::quality_score;
