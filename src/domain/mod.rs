//! Domain layer: entities, repository traits and collaborator ports.

pub mod collaborators;
pub mod entities;
pub mod repositories;
