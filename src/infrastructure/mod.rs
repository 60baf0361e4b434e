// Infrastructure layer module (adapters for driven ports)
// Follows Hexagonal Architecture - infrastructure depends on domain, never
// the other way around

pub mod repositories;
