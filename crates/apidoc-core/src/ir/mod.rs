pub mod grouping;
pub mod operations;
pub mod schemas;
pub mod security;
pub mod types;

pub use grouping::{GroupTree, OperationGroup, group_operations};
pub use operations::*;
pub use schemas::*;
pub use security::*;
pub use types::{IrContact, IrInfo, IrLicense, IrSpec, IrTag, IrUriScheme, NormalizedName};
