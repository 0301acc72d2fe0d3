//! Entity structs for all DPIA domain objects: catalog questions, assessment
//! headers, responses, mitigations, risk reviews and GDPR article references.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation. Field names are `camelCase` on the wire.

mod article;
mod assessment;
mod mitigation;
mod question;
mod response;
mod review;

pub use article::{ArticleDocument, GdprArticle};
pub use assessment::Assessment;
pub use mitigation::Mitigation;
pub use question::{Category, CatalogDocument, Question, QuestionOption};
pub use response::{AnswerSubmission, Response};
pub use review::{MatrixScore, RiskReview};
