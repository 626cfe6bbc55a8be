//! Deployment-specific image tag grammars

pub mod enterprise;
pub mod origin;

pub use enterprise::EnterpriseTagGrammar;
pub use origin::OriginTagGrammar;
