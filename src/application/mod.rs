// Application layer (use cases)
// Orchestrates domain rules and ports; returns result envelopes, never
// raw faults

pub mod dto;
pub mod result;
pub mod user_usecase;

pub use dto::{CreateUserRequest, PermissionDecision, UpdateUserRequest, UserPage, UserResponse};
pub use result::{OperationResult, OutcomeKind};
pub use user_usecase::UserUseCase;
