mod category;

pub use category::CategoryKind;
