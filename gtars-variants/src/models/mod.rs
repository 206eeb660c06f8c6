pub mod coordinates;
pub mod raw;
pub mod variant;

// re-export for cleaner imports
pub use self::coordinates::{Category, Coordinates, SubCategory, SvLength, SvType};
pub use self::raw::{Case, Individual, RawCompound, RawSampleCall, RawScalar, RawVariantRecord};
pub use self::variant::{CanonicalVariant, VariantType};
