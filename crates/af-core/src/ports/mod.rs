//! Port interfaces for the application layer.
//!
//! Ports define the contract between the wizard's use cases and the
//! collaborators outside this core: the persistence store, the auth
//! service, the per-step input-collection units and the notification
//! service. Implementations live in the infrastructure layer (or in the
//! hosting web application); the domain stays independent of them.

pub mod application_repository;
pub mod auth;
pub mod notification;
pub mod step_unit;

pub use application_repository::{ApplicationRepositoryError, ApplicationRepositoryPort};
pub use auth::{AuthError, Session, SessionPort};
pub use notification::{Notification, NotificationLevel, NotificationPort};
pub use step_unit::StepUnitPort;
