mod precaution;

pub use precaution::Precaution;
