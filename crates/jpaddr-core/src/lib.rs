pub mod address;
pub mod compose;
pub mod merge;
pub mod normalize;
pub mod numeric;
pub mod postal;
pub mod prefecture;
pub mod romaji;
pub mod segment;
pub mod settings;
pub mod unicode;

pub use address::{AddressFields, ParsedAddress};
pub use compose::{compose, convert_fields, convert_text, ComposedAddress};
pub use merge::{merge_hints, Hints, MergedAddress};
pub use segment::parse_address;
