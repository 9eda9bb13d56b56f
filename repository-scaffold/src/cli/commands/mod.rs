//! CLI command implementations

pub mod make_repository;
pub mod stub_publish;

pub use make_repository::MakeRepositoryCommand;
pub use stub_publish::StubPublishCommand;
