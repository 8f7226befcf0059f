mod conversion;
mod source;
pub mod xml;

pub use conversion::IntoSequence;
pub use source::*;
pub use xml::XmlElement;
