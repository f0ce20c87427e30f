pub mod content;
pub mod subject;

pub use content::{DocumentFields, RecoveredFields, RenderableContent};
pub use subject::{DocumentType, Engagement, Gender, GenerationRequest, SubjectRecord};
