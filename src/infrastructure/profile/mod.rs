//! Profile infrastructure - repository and service implementations

mod repository;
mod service;

pub use repository::StorageProfileRepository;
pub use service::{
    EducationRequest, ExperienceRequest, PopulatedProfile, ProfileRequest, ProfileService,
};
