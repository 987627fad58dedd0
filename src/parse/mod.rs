mod attributes;
mod error;
mod extract;
mod layout;
mod normalize;
mod nutrition;
mod price;
mod static_selector;
mod text_from_selection;
mod validity;

pub use error::Error;
pub use extract::{Extractor, ParseOutcome};
pub use layout::Layout;
pub use nutrition::NutritionPolicy;
