//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or an open transaction for the multi-entity write
//! paths) as the first argument.

pub mod alert_repo;
pub mod animal_repo;
pub mod chip_repo;
pub mod health_record_repo;
pub mod holding_repo;
pub mod ownership_repo;

pub use alert_repo::AlertRepo;
pub use animal_repo::AnimalRepo;
pub use chip_repo::ChipRepo;
pub use health_record_repo::HealthRecordRepo;
pub use holding_repo::HoldingRepo;
pub use ownership_repo::OwnershipRepo;
