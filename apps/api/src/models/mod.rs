pub mod career;
pub mod profile;

pub use career::{CareerAnalysisResult, CareerPath, LearningRoadmap, LearningStep};
pub use profile::{Education, UserProfile};
