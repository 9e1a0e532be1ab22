pub mod param;
pub mod response;

pub use param::PageParam;
pub use response::Page;
