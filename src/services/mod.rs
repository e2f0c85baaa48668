//! Service layer: corpus loading and retrieval orchestration.

pub mod retrieval_service;
pub mod scenario_repository;

pub use retrieval_service::RetrievalService;
pub use scenario_repository::ScenarioRepository;
