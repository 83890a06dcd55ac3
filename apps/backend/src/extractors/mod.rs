pub mod state_id;
pub mod validated_json;

pub use state_id::StateId;
pub use validated_json::{Validate, ValidatedJson};
