mod call;
mod serve;

pub use call::call;
pub use serve::serve;
