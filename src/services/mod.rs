//! Application services.

mod publish;

pub use publish::{PublishInput, PublishReport, PublishService, Stage};
