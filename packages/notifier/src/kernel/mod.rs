pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{MastodonAdapter, PgRelationSource};
pub use traits::{BaseMessenger, BaseRelationSource};
