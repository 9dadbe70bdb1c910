pub mod outcome_ops;
pub mod prefs_ops;
pub mod query_ops;
pub mod redirect_ops;
pub mod render_ops;

pub use outcome_ops::*;
pub use prefs_ops::*;
pub use query_ops::*;
pub use redirect_ops::*;
pub use render_ops::*;
