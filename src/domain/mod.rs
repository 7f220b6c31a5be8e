//! Domain value objects and types.
//!
//! Type-safe wrappers for the identifiers fleet records carry. Each one runs
//! its input through the field formatter at construction and refuses values
//! that are not complete, so an invalid plate or license can't be represented
//! once it leaves a form.

pub mod errors;
pub mod license;
pub mod money;
pub mod part_number;
pub mod phone;
pub mod record_id;
pub mod registration;

pub use errors::ValidationError;
pub use license::DriverLicense;
pub use money::Money;
pub use part_number::PartNumber;
pub use phone::PhoneNumber;
pub use record_id::RecordId;
pub use registration::VehicleRegistration;
